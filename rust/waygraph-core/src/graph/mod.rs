//! The in-memory routing graph and its loader.
//!
//! `model` holds the arena and the list primitives, `decode` the per-body
//! segment decoder, `stitch` the hollow-placeholder resolution and `mirror`
//! the synthesized reverse links.

pub mod decode;
pub mod mirror;
pub mod model;
pub mod stitch;

pub use model::{Graph, Link, LinkId, Node, NodeId, NodeState, ShapePoint};
pub use stitch::LoadContext;
