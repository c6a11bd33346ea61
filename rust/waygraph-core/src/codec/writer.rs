use crate::codec::{
    NODEDESC_BIT, RESERVED1_BIT, RESERVED2_BIT, REVERSEWRITTEN_BIT, SHAPEPOINT_BIT, SIGNLAT_BIT,
    SIGNLON_BIT, WAYDESC_BIT,
};
use crate::error::EncodeError;

/// One wire segment, as handed to [`BodyWriter::write_segment`].
///
/// `Some` in `shape_elev_delta` marks an intermediate shape point; `None`
/// terminates the link at this segment's position.
#[derive(Clone, Copy, Debug, Default)]
pub struct Segment<'a> {
    pub dlon: i32,
    pub dlat: i32,
    pub way_desc: Option<&'a [u8]>,
    pub node_desc: Option<&'a [u8]>,
    pub reserved1: Option<&'a [u8]>,
    pub reserved2: Option<&'a [u8]>,
    pub reverse_written: bool,
    pub shape_elev_delta: Option<i32>,
}

/// Mirror encoder for node bodies; emits exactly the stream
/// [`Graph::decode_node_body`](crate::graph::Graph::decode_node_body) consumes.
///
/// Sign bits are derived from the delta signs; blocks are emitted in the fixed
/// order the reader tests the flags in.
#[derive(Debug)]
pub struct BodyWriter {
    buf: Vec<u8>,
}

impl BodyWriter {
    /// Starts a body with the fixed-size elevation field.
    pub fn new(selev: i16) -> Self {
        let mut w = Self { buf: Vec::new() };
        w.buf.extend_from_slice(&selev.to_le_bytes());
        w
    }

    pub fn write_segment(&mut self, seg: &Segment<'_>) -> Result<(), EncodeError> {
        let mut flags = 0u8;
        if seg.dlon < 0 {
            flags |= SIGNLON_BIT;
        }
        if seg.dlat < 0 {
            flags |= SIGNLAT_BIT;
        }
        if seg.way_desc.is_some() {
            flags |= WAYDESC_BIT;
        }
        if seg.node_desc.is_some() {
            flags |= NODEDESC_BIT;
        }
        if seg.reserved1.is_some() {
            flags |= RESERVED1_BIT;
        }
        if seg.reserved2.is_some() {
            flags |= RESERVED2_BIT;
        }
        if seg.reverse_written {
            flags |= REVERSEWRITTEN_BIT;
        }
        if seg.shape_elev_delta.is_some() {
            flags |= SHAPEPOINT_BIT;
        }
        self.buf.push(flags);
        self.write_var_unsigned(seg.dlon.unsigned_abs());
        self.write_var_unsigned(seg.dlat.unsigned_abs());
        if let Some(d) = seg.way_desc {
            self.write_block(d)?;
        }
        if let Some(d) = seg.node_desc {
            self.write_block(d)?;
        }
        if let Some(d) = seg.reserved1 {
            self.write_block(d)?;
        }
        if let Some(d) = seg.reserved2 {
            self.write_block(d)?;
        }
        if let Some(delta) = seg.shape_elev_delta {
            self.write_var_signed(delta);
        }
        Ok(())
    }

    pub fn write_var_unsigned(&mut self, mut v: u32) {
        loop {
            let b = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.buf.push(b);
                return;
            }
            self.buf.push(b | 0x80);
        }
    }

    pub fn write_var_signed(&mut self, v: i32) {
        self.write_var_unsigned(((v << 1) ^ (v >> 31)) as u32);
    }

    fn write_block(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let len = u8::try_from(bytes.len())
            .map_err(|_| EncodeError::BlobTooLong { len: bytes.len() })?;
        self.buf.push(len);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
