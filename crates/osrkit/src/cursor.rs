//! Cursor-based field extraction over an in-memory replay buffer.
//!
//! All integers are little-endian. Variable-length integers use the
//! 7-bit continuation scheme (ULEB128). String fields carry a presence
//! byte: `0x00` for absent, `0x0b` for present followed by a ULEB128
//! byte length and that many bytes of UTF-8.

use crate::error::ReplayError;

// ── Cursor ──────────────────────────────────────────────────────

/// A read cursor over a replay buffer.
///
/// Wraps a borrowed byte slice together with the current decode
/// position. Every successful read advances the position; a failed
/// read reports the offset where decoding stopped.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take the next `n` raw bytes, advancing the cursor.
    ///
    /// On truncation the cursor does not advance and the error carries
    /// the starting offset together with the requested length.
    pub fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], ReplayError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(ReplayError::Truncated {
                field,
                offset: self.pos,
                needed: n,
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], ReplayError> {
        let bytes = self.take(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, ReplayError> {
        Ok(self.take_array::<1>(field)?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self, field: &'static str) -> Result<u16, ReplayError> {
        Ok(u16::from_le_bytes(self.take_array(field)?))
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self, field: &'static str) -> Result<u32, ReplayError> {
        Ok(u32::from_le_bytes(self.take_array(field)?))
    }

    /// Read a little-endian u64.
    pub fn read_u64_le(&mut self, field: &'static str) -> Result<u64, ReplayError> {
        Ok(u64::from_le_bytes(self.take_array(field)?))
    }

    /// Read a little-endian i64.
    pub fn read_i64_le(&mut self, field: &'static str) -> Result<i64, ReplayError> {
        Ok(i64::from_le_bytes(self.take_array(field)?))
    }

    /// Read a ULEB128 variable-length integer.
    ///
    /// Accumulates into a `u64`. Continuation bytes that would shift
    /// past bit 63 are still consumed but their payload bits are
    /// dropped, so over-long encodings decode without error.
    pub fn read_uleb128(&mut self, field: &'static str) -> Result<u64, ReplayError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8(field)?;
            if shift < u64::BITS {
                value |= u64::from(byte & 0x7f) << shift;
            }
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Read an optional string field.
    ///
    /// The presence byte is `0x00` for an absent value and `0x0b` for
    /// a present one, followed by a ULEB128 byte length and the string
    /// bytes. Invalid UTF-8 is replaced rather than rejected; any
    /// other presence byte is a format error.
    pub fn read_string(&mut self, field: &'static str) -> Result<Option<String>, ReplayError> {
        let marker_at = self.pos;
        match self.read_u8(field)? {
            0x00 => Ok(None),
            0x0b => {
                let len = self.read_uleb128(field)?;
                // Saturate oversize lengths; take reports them as truncation.
                let len = usize::try_from(len).unwrap_or(usize::MAX);
                let bytes = self.take(len, field)?;
                Ok(Some(String::from_utf8_lossy(bytes).into_owned()))
            }
            found => Err(ReplayError::StringPrefix {
                found,
                offset: marker_at,
            }),
        }
    }
}

// ── ULEB128 encoding ────────────────────────────────────────────

/// Append the ULEB128 encoding of `value` to `out`.
pub fn encode_uleb128(value: u64, out: &mut Vec<u8>) {
    let mut rest = value;
    loop {
        let byte = (rest & 0x7f) as u8;
        rest >>= 7;
        if rest == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}
