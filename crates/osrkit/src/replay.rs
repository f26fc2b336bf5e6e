//! Whole-file decoding.

use crate::action::{self, ActionRecord};
use crate::error::ReplayError;
use crate::header::{decode_header, ReplayHeader};
use crate::SCORE_ID_LEN;

/// A fully decoded replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    /// The decoded header.
    pub header: ReplayHeader,
    /// The decoded action stream, sentinel record included.
    pub actions: Vec<ActionRecord>,
    /// Online score identifier from the final eight bytes.
    pub score_id: i64,
    block: Vec<u8>,
}

impl Replay {
    /// Decode a complete replay buffer.
    ///
    /// The compressed action block is everything between the end of
    /// the header and the final eight bytes. The header's declared
    /// length takes no part in finding it; see
    /// [`Replay::declared_len_mismatch`].
    pub fn decode(buf: &[u8]) -> Result<Self, ReplayError> {
        let (header, block_start) = decode_header(buf)?;
        let block_end = block_bounds(buf, block_start)?;
        let block = buf[block_start..block_end].to_vec();
        let payload = action::decompress_block_from(&block, block_start)?;
        let actions = action::parse_action_payload(&payload)?;
        let score_id = decode_score_id(buf)?;
        Ok(Self {
            header,
            actions,
            score_id,
            block,
        })
    }

    /// The compressed action block exactly as it appeared in the file.
    ///
    /// Writing this out is a byte-for-byte headerless extraction with
    /// no recompression.
    pub fn headerless_block(&self) -> &[u8] {
        &self.block
    }

    /// The RNG seed from the sentinel record, when the stream ends
    /// with one.
    pub fn rng_seed(&self) -> Option<u32> {
        self.actions.last().and_then(ActionRecord::seed)
    }

    /// The declared and actual block lengths when they disagree.
    pub fn declared_len_mismatch(&self) -> Option<(u32, usize)> {
        let actual = self.block.len();
        if self.header.declared_block_len as usize == actual {
            None
        } else {
            Some((self.header.declared_block_len, actual))
        }
    }

    /// Re-render the decoded actions and compress them into a fresh
    /// block.
    ///
    /// Slower than [`Replay::headerless_block`] and not guaranteed to
    /// reproduce the original compressed bytes, only the payload they
    /// decompress to.
    pub fn recompress(&self) -> Result<Vec<u8>, ReplayError> {
        action::encode_action_stream(&self.actions)
    }
}

/// Extract the header and the raw compressed block without touching
/// the block's contents.
///
/// This is the cheap path for headerless extraction: a header walk
/// plus a subslice, no decompression.
pub fn headerless(buf: &[u8]) -> Result<(ReplayHeader, &[u8]), ReplayError> {
    let (header, block_start) = decode_header(buf)?;
    let block_end = block_bounds(buf, block_start)?;
    Ok((header, &buf[block_start..block_end]))
}

/// Read the online score identifier from the final eight bytes.
///
/// The identifier sits at the very end of the file regardless of what
/// the header declares about the block length.
pub fn decode_score_id(buf: &[u8]) -> Result<i64, ReplayError> {
    let Some(start) = buf.len().checked_sub(SCORE_ID_LEN) else {
        return Err(ReplayError::Truncated {
            field: "online score id",
            offset: buf.len(),
            needed: SCORE_ID_LEN,
        });
    };
    let mut bytes = [0u8; SCORE_ID_LEN];
    bytes.copy_from_slice(&buf[start..]);
    Ok(i64::from_le_bytes(bytes))
}

// End of the block, leaving room for the trailing identifier.
fn block_bounds(buf: &[u8], block_start: usize) -> Result<usize, ReplayError> {
    buf.len()
        .checked_sub(SCORE_ID_LEN)
        .filter(|&end| end >= block_start)
        .ok_or(ReplayError::Truncated {
            field: "online score id",
            offset: block_start,
            needed: SCORE_ID_LEN,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn score_id_comes_from_the_final_eight_bytes() {
        let mut buf = vec![0xaa; 20];
        buf[12..].copy_from_slice(&(-99i64).to_le_bytes());
        assert_eq!(decode_score_id(&buf).unwrap(), -99);
    }

    #[test]
    fn short_buffer_cannot_hold_a_score_id() {
        let err = decode_score_id(&[1, 2, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Truncated);
    }

    #[test]
    fn block_needs_room_for_the_identifier() {
        let buf = [0u8; 10];
        assert_eq!(block_bounds(&buf, 2).unwrap(), 2);
        assert!(block_bounds(&buf, 3).is_err());
    }
}
