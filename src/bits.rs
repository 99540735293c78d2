//! Bit packing and unpacking.
//!
//! Bits are stored one per `u8` (values 0 or 1), most-significant bit of each
//! byte first. This is the same layout a Huffman or prefix-code stream uses on
//! the wire.

use crate::error::{Error, Result};

/// Unpack the first `bit_count` bits of `buffer`, MSB first.
///
/// # Errors
/// Returns `Error::OutOfRange` if `bit_count > 8 * buffer.len()`. The buffer is
/// never padded.
pub fn extract_bits(buffer: &[u8], bit_count: usize) -> Result<Vec<u8>> {
    let available = buffer.len() * 8;
    if bit_count > available {
        return Err(Error::OutOfRange {
            requested: bit_count,
            available,
        });
    }

    let mut bits = Vec::with_capacity(bit_count);
    for &byte in buffer {
        for shift in (0..8).rev() {
            if bits.len() == bit_count {
                return Ok(bits);
            }
            bits.push((byte >> shift) & 1);
        }
    }
    Ok(bits)
}

/// MSB-first bit writer accumulating into a byte buffer.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    buf: Vec<u8>,
    cur: u8,
    filled: u8,
    len: usize,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bit. Any non-zero value is written as 1.
    #[inline]
    pub fn write(&mut self, bit: u8) {
        if bit != 0 {
            self.cur |= 1 << (7 - self.filled);
        }
        self.filled += 1;
        self.len += 1;
        if self.filled == 8 {
            self.buf.push(self.cur);
            self.cur = 0;
            self.filled = 0;
        }
    }

    /// Append every bit of `bits` in order.
    pub fn write_all(&mut self, bits: &[u8]) {
        for &bit in bits {
            self.write(bit);
        }
    }

    /// Number of bits written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flush the partial byte (zero padded) and return `(bytes, bit_count)`.
    pub fn finish(mut self) -> (Vec<u8>, usize) {
        if self.filled > 0 {
            self.buf.push(self.cur);
        }
        (self.buf, self.len)
    }
}
