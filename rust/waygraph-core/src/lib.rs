//! Loader for the tile-oriented binary routing graph: decodes serialized node
//! bodies into an in-memory directed graph, stitching links across tile
//! boundaries through hollow placeholder nodes and synthesizing the reverse
//! direction of every link the wire format stores only once.

pub mod codec;
pub mod error;
pub mod geo;
pub mod graph;
pub mod interner;

pub use codec::{BodyCursor, BodyWriter, Segment, SliceCursor};
pub use error::{DecodeError, EncodeError};
pub use geo::{MaxRadiusCheck, Pos, RadiusCheck};
pub use graph::{Graph, Link, LinkId, LoadContext, Node, NodeId, NodeState, ShapePoint};
pub use interner::{Desc, DescriptionInterner};
