use byteorder::{ByteOrder, LittleEndian};

use crate::error::DecodeError;

/// Sequential reader over one node's serialized body.
///
/// Implementations must keep `offset` meaningful even when the underlying
/// storage is not a flat slice; it ends up in error messages.
pub trait BodyCursor {
    fn read_fixed_short(&mut self) -> Result<i16, DecodeError>;
    fn read_byte(&mut self) -> Result<u8, DecodeError>;
    fn read_var_unsigned(&mut self) -> Result<u32, DecodeError>;
    fn read_var_signed(&mut self) -> Result<i32, DecodeError>;
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, DecodeError>;
    fn has_more_data(&self) -> bool;
    /// Byte offset from the start of the body.
    fn offset(&self) -> usize;
}

/// [`BodyCursor`] over an in-memory byte slice.
///
/// Variable-length integers are 7-bit groups, low group first, with the high
/// bit of each byte flagging continuation; signed values are zigzag-folded.
/// The writer half lives in [`super::writer`].
pub struct SliceCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.pos + n > self.bytes.len() {
            return Err(DecodeError::Truncated { offset: self.pos });
        }
        let out = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }
}

impl BodyCursor for SliceCursor<'_> {
    fn read_fixed_short(&mut self) -> Result<i16, DecodeError> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn read_var_unsigned(&mut self) -> Result<u32, DecodeError> {
        let mut value: u32 = 0;
        let mut shift = 0u32;
        loop {
            let b = self.read_byte()?;
            // The fifth byte may only carry the top four value bits.
            if shift >= 32 || (shift == 28 && (b & 0x70) != 0) {
                return Err(DecodeError::BadVarint { offset: self.pos - 1 });
            }
            value |= u32::from(b & 0x7f) << shift;
            if b & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    fn read_var_signed(&mut self) -> Result<i32, DecodeError> {
        let v = self.read_var_unsigned()?;
        Ok(((v >> 1) as i32) ^ -((v & 1) as i32))
    }

    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        Ok(self.take(n)?.to_vec())
    }

    fn has_more_data(&self) -> bool {
        self.pos < self.bytes.len()
    }

    fn offset(&self) -> usize {
        self.pos
    }
}
