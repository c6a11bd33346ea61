use std::mem;

use tracing::{debug, trace};

use super::mirror;
use super::model::{Graph, Link, LinkId, NodeId, NodeState, ShapePoint};
use super::stitch::{resolve_target, LoadContext};
use crate::codec::reader::BodyCursor;
use crate::codec::{
    NODEDESC_BIT, RESERVED1_BIT, RESERVED2_BIT, REVERSEWRITTEN_BIT, SHAPEPOINT_BIT, SIGNLAT_BIT,
    SIGNLON_BIT, WAYDESC_BIT,
};
use crate::error::DecodeError;
use crate::geo::{Pos, RadiusCheck};
use crate::interner::{Desc, DescriptionInterner};

/// One fully read link, before target resolution.
struct PendingLink {
    target_pos: Pos,
    description: Option<Desc>,
    node_desc: Option<Desc>,
    reverse_written: bool,
    shape: Vec<ShapePoint>,
}

impl Graph {
    /// Decodes one node's serialized body, rebuilding its forward adjacency,
    /// stitching link targets to existing or placeholder nodes and
    /// synthesizing the reverse direction of every link the data does not
    /// store explicitly.
    ///
    /// `node` may be a hollow placeholder; it is promoted in place and removed
    /// from the hollow index once the body is fully consumed. The forward list
    /// is replaced wholesale: whatever it held before (back-references left by
    /// neighbors) is consumed as stitching shortcuts and dropped.
    pub fn decode_node_body(
        &mut self,
        node: NodeId,
        cursor: &mut dyn BodyCursor,
        ctx: &mut LoadContext,
        radius: Option<&dyn RadiusCheck>,
    ) -> Result<(), DecodeError> {
        let own_pos = self.node(node).pos;
        let selev = cursor.read_fixed_short()?;
        self.node_mut(node).state = NodeState::Loaded { selev };

        let back_refs: Vec<LinkId> = mem::take(&mut self.node_mut(node).forward);

        let mut accepted = 0usize;
        while cursor.has_more_data() {
            let pending = read_link_segments(cursor, &mut ctx.interner, own_pos, selev)?;

            if !pending.reverse_written {
                if let Some(rc) = radius {
                    if !rc.is_within_radius(own_pos, &pending.shape, pending.target_pos) {
                        // Diagnostic only; an out-of-radius chain stays in the graph.
                        debug!(
                            ilon = own_pos.ilon,
                            ilat = own_pos.ilat,
                            target_ilon = pending.target_pos.ilon,
                            target_ilat = pending.target_pos.ilat,
                            "link chain exceeds radius bound"
                        );
                    }
                }
            }

            if pending.target_pos == own_pos {
                // Self-reference: bytes are consumed, the link is dropped. A
                // node description on it still names this very node.
                if let Some(desc) = pending.node_desc {
                    self.node_mut(node).description = Some(desc);
                }
                continue;
            }

            let target = resolve_target(self, ctx, node, &back_refs, pending.target_pos);
            if let Some(desc) = pending.node_desc {
                self.node_mut(target).description = Some(desc);
            }

            let link = self.alloc_link(Link {
                target,
                description: pending.description,
                reverse_written: pending.reverse_written,
                shape: pending.shape,
                origin_pos: None,
            });
            self.append_forward(node, link);

            if !pending.reverse_written {
                mirror::synthesize_reverse(self, node, link, pending.target_pos);
            }
            accepted += 1;
        }

        ctx.hollow_remove(own_pos);
        trace!(ilon = own_pos.ilon, ilat = own_pos.ilat, links = accepted, "node body decoded");
        Ok(())
    }
}

/// Reads wire segments until a non-shape-point segment terminates the link.
fn read_link_segments(
    cursor: &mut dyn BodyCursor,
    interner: &mut DescriptionInterner,
    own_pos: Pos,
    own_selev: i16,
) -> Result<PendingLink, DecodeError> {
    let mut ref_pos = own_pos;
    let mut description: Option<Desc> = None;
    let mut node_desc: Option<Desc> = None;
    let mut reverse_written = false;
    let mut shape: Vec<ShapePoint> = Vec::new();

    loop {
        let flags = cursor.read_byte()?;
        let mut dlon = cursor.read_var_unsigned()? as i32;
        let mut dlat = cursor.read_var_unsigned()? as i32;
        if flags & SIGNLON_BIT != 0 {
            dlon = -dlon;
        }
        if flags & SIGNLAT_BIT != 0 {
            dlat = -dlat;
        }
        // Deltas chain: each segment is relative to the previous point, not
        // the owning node.
        let pos = Pos::new(ref_pos.ilon + dlon, ref_pos.ilat + dlat);
        ref_pos = pos;

        if flags & WAYDESC_BIT != 0 {
            description = Some(read_block(cursor, interner)?);
        }
        if flags & NODEDESC_BIT != 0 {
            node_desc = Some(read_block(cursor, interner)?);
        }
        // Reserved blocks must still be consumed to keep the cursor aligned.
        if flags & RESERVED1_BIT != 0 {
            skip_block(cursor)?;
        }
        if flags & RESERVED2_BIT != 0 {
            skip_block(cursor)?;
        }
        if flags & REVERSEWRITTEN_BIT != 0 {
            reverse_written = true;
        }

        if description.is_none() && !reverse_written {
            return Err(DecodeError::MissingDescription {
                ilon: own_pos.ilon,
                ilat: own_pos.ilat,
            });
        }

        if flags & SHAPEPOINT_BIT != 0 {
            // Elevation is a delta against the owning node, not the previous
            // shape point.
            let delta = cursor.read_var_signed()?;
            let selev = (i32::from(own_selev) + delta) as i16;
            shape.push(ShapePoint { pos, selev, description: description.clone() });
        } else {
            return Ok(PendingLink { target_pos: pos, description, node_desc, reverse_written, shape });
        }
    }
}

fn read_block(
    cursor: &mut dyn BodyCursor,
    interner: &mut DescriptionInterner,
) -> Result<Desc, DecodeError> {
    let len = cursor.read_byte()? as usize;
    let bytes = cursor.read_bytes(len)?;
    Ok(interner.unify(&bytes))
}

fn skip_block(cursor: &mut dyn BodyCursor) -> Result<(), DecodeError> {
    let len = cursor.read_byte()? as usize;
    cursor.read_bytes(len)?;
    Ok(())
}
