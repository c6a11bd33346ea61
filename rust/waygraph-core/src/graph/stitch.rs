use rustc_hash::FxHashMap;

use super::model::{Graph, Link, LinkId, NodeId, NodeState};
use crate::geo::Pos;
use crate::interner::DescriptionInterner;

/// Shared load-time state: the hollow index plus the description interner.
///
/// Passed explicitly into every body decode, so independent loads (tests,
/// separate regions) never interfere. The hollow index holds placeholders
/// only; a node is removed the moment its body is decoded, and a position
/// never regresses from real back to hollow.
#[derive(Debug, Default)]
pub struct LoadContext {
    hollow: FxHashMap<u64, NodeId>,
    pub interner: DescriptionInterner,
}

impl LoadContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hollow_get(&self, pos: Pos) -> Option<NodeId> {
        self.hollow.get(&pos.key()).copied()
    }

    pub fn hollow_put(&mut self, pos: Pos, node: NodeId) {
        self.hollow.insert(pos.key(), node);
    }

    pub fn hollow_remove(&mut self, pos: Pos) {
        self.hollow.remove(&pos.key());
    }

    pub fn hollow_len(&self) -> usize {
        self.hollow.len()
    }
}

/// Resolves a link's terminal position to a node, creating a hollow
/// placeholder when the position is not known yet.
///
/// `back_refs` are the links neighbors attached to the decoding node while it
/// was hollow, saved aside before its forward list was rebuilt. Each one's
/// target is an already-real node, so a coordinate match there short-circuits
/// the index lookup.
pub(crate) fn resolve_target(
    graph: &mut Graph,
    ctx: &mut LoadContext,
    origin: NodeId,
    back_refs: &[LinkId],
    pos: Pos,
) -> NodeId {
    for &lid in back_refs {
        let candidate = graph.link(lid).target;
        if graph.node(candidate).pos == pos {
            return candidate;
        }
    }

    let target = match ctx.hollow_get(pos) {
        Some(node) => node,
        None => {
            let node = graph.add_node(pos, NodeState::Hollow);
            ctx.hollow_put(pos, node);
            node
        }
    };

    // Leave a back-reference on the still-hollow target so its own decode can
    // find us without touching the index.
    let back = graph.alloc_link(Link {
        target: origin,
        description: None,
        reverse_written: false,
        shape: Vec::new(),
        origin_pos: None,
    });
    graph.add_forward(target, back);
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_placeholder_once_per_position() {
        let mut g = Graph::new();
        let mut ctx = LoadContext::new();
        let a = g.add_node(Pos::new(0, 0), NodeState::Hollow);
        let b = g.add_node(Pos::new(9, 9), NodeState::Hollow);
        let p = Pos::new(5, 5);

        let t1 = resolve_target(&mut g, &mut ctx, a, &[], p);
        let t2 = resolve_target(&mut g, &mut ctx, b, &[], p);
        assert_eq!(t1, t2);
        assert_eq!(ctx.hollow_len(), 1);
        // Both origins left a back-reference on the placeholder.
        assert_eq!(g.node(t1).forward_links().len(), 2);
    }

    #[test]
    fn prefers_back_reference_over_index() {
        let mut g = Graph::new();
        let mut ctx = LoadContext::new();
        let neighbor = g.add_node(Pos::new(5, 5), NodeState::Loaded { selev: 0 });
        let me = g.add_node(Pos::new(0, 0), NodeState::Hollow);
        let back = g.alloc_link(Link {
            target: neighbor,
            description: None,
            reverse_written: false,
            shape: Vec::new(),
            origin_pos: None,
        });

        let t = resolve_target(&mut g, &mut ctx, me, &[back], Pos::new(5, 5));
        assert_eq!(t, neighbor);
        // Already-real node: no placeholder, no new back-reference.
        assert_eq!(ctx.hollow_len(), 0);
        assert!(g.node(neighbor).forward_links().is_empty());
    }
}
