use super::model::{Graph, Link, LinkId, NodeId, ShapePoint};
use crate::geo::Pos;

/// Builds the implied opposite-direction link for `forward` and parks it on
/// `origin`'s pending-reverse list, tagged with the forward target position so
/// the target node can claim it once it is decoded itself.
///
/// The shape chain flips to target→origin order with positions and elevations
/// copied unchanged. Descriptions shift by one position: each description
/// covers the sub-segment ending at its point when walking origin→target, so
/// walking back it belongs to the preceding point instead. With a forward
/// chain T1..Tn and forward link description D, the reverse link carries T1's
/// description (D when n = 0) and the reverse chain is [Tn'..T1'] where Tn'
/// carries D and Tk' carries T(k+1)'s description.
pub(crate) fn synthesize_reverse(
    graph: &mut Graph,
    origin: NodeId,
    forward: LinkId,
    target_pos: Pos,
) {
    let fwd = graph.link(forward);
    let link_desc = fwd.description.clone();
    let shape = &fwd.shape;

    let reverse_desc = shape
        .first()
        .map_or_else(|| link_desc.clone(), |sp| sp.description.clone());

    let mut reverse_shape = Vec::with_capacity(shape.len());
    for (i, sp) in shape.iter().enumerate().rev() {
        let description = if i + 1 == shape.len() {
            link_desc.clone()
        } else {
            shape[i + 1].description.clone()
        };
        reverse_shape.push(ShapePoint { pos: sp.pos, selev: sp.selev, description });
    }

    let reverse = Link {
        target: origin,
        description: reverse_desc,
        reverse_written: false,
        shape: reverse_shape,
        origin_pos: Some(target_pos),
    };
    let id = graph.alloc_link(reverse);
    graph.add_pending_reverse(origin, id);
}

impl Graph {
    /// Removes and returns the first pending-reverse entry on `node` tagged
    /// with `origin_pos`.
    ///
    /// `None` means the neighbor at that position has not produced the link
    /// yet (decoded out of order, or living in a tile not loaded so far) — a
    /// defined absent outcome, not an error.
    pub fn claim_reverse_link(&mut self, node: NodeId, origin_pos: Pos) -> Option<LinkId> {
        let list = &self.nodes[node.0 as usize].pending_reverse;
        let i = list
            .iter()
            .position(|&l| self.links[l.0 as usize].origin_pos == Some(origin_pos))?;
        Some(self.nodes[node.0 as usize].pending_reverse.remove(i))
    }
}
