//! Wire-level pieces of the node-body format shared by reader and writer.
//!
//! A body is a fixed-size elevation field followed by segments. Each segment
//! is a flag byte, two variable-length coordinate deltas, the optional blocks
//! announced by the flags, and (for shape points) a variable-length elevation
//! delta.

pub mod reader;
pub mod writer;

pub use reader::{BodyCursor, SliceCursor};
pub use writer::{BodyWriter, Segment};

/// Longitude delta is negative.
pub const SIGNLON_BIT: u8 = 0x80;
/// Latitude delta is negative.
pub const SIGNLAT_BIT: u8 = 0x40;
/// Segment is an intermediate shape point, not the link's terminus.
pub const SHAPEPOINT_BIT: u8 = 0x20;
/// A length-prefixed way description follows.
pub const WAYDESC_BIT: u8 = 0x10;
/// The counter link is written explicitly elsewhere; do not synthesize one.
pub const REVERSEWRITTEN_BIT: u8 = 0x08;
/// A length-prefixed node description follows.
pub const NODEDESC_BIT: u8 = 0x04;
/// Reserved length-prefixed block; consumed and discarded.
pub const RESERVED1_BIT: u8 = 0x02;
/// Reserved length-prefixed block; consumed and discarded.
pub const RESERVED2_BIT: u8 = 0x01;
