//! Action stream codec.
//!
//! The compressed block of a replay holds a legacy LZMA stream whose
//! payload is plain text: `w|x|y|z` records joined by `,` with a
//! trailing `,` after the last record. Field `w` is the millisecond
//! delta since the previous record, `x` and `y` are cursor
//! coordinates, and `z` is the pressed-key bitmask.

use crate::error::ReplayError;
use crate::SEED_FRAME_DELTA;

// ── Keys ────────────────────────────────────────────────────────

/// Pressed-input bitmask of a single action record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Keys(u32);

impl Keys {
    /// Left mouse button.
    pub const M1: Self = Self(1);
    /// Right mouse button.
    pub const M2: Self = Self(2);
    /// First keyboard key.
    pub const K1: Self = Self(4);
    /// Second keyboard key.
    pub const K2: Self = Self(8);
    /// Smoke key.
    pub const SMOKE: Self = Self(16);

    /// Create from the raw record field.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when no inputs are held.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is held.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Keys {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ── Records ─────────────────────────────────────────────────────

/// One sampled input state from the action stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionRecord {
    /// Milliseconds since the previous record. Negative values occur
    /// in real streams and are kept as-is.
    pub delta_ms: i32,
    /// Cursor x position. Nominally 0..=512 but not validated.
    pub x: i32,
    /// Cursor y position. Nominally 0..=384 but not validated.
    pub y: i32,
    /// Pressed inputs.
    pub keys: Keys,
}

impl ActionRecord {
    /// True for the sentinel record that carries the RNG seed in its
    /// key field.
    pub fn is_seed_frame(&self) -> bool {
        self.delta_ms == SEED_FRAME_DELTA && self.x == 0 && self.y == 0
    }

    /// The RNG seed when this is the sentinel record.
    pub fn seed(&self) -> Option<u32> {
        if self.is_seed_frame() {
            Some(self.keys.bits())
        } else {
            None
        }
    }
}

// ── Text payload ────────────────────────────────────────────────

/// Parse a decompressed text payload into records.
///
/// Records are split on `,`; only a final empty segment (the trailing
/// separator) is discarded. Every other segment must be exactly four
/// `|`-separated integers.
///
/// # Examples
///
/// ```
/// use osrkit::parse_action_payload;
///
/// let records = parse_action_payload(b"16|256|192|5,").unwrap();
/// assert_eq!(records[0].x, 256);
/// assert_eq!(records[0].keys.bits(), 5);
/// ```
pub fn parse_action_payload(payload: &[u8]) -> Result<Vec<ActionRecord>, ReplayError> {
    let text = String::from_utf8_lossy(payload);
    let mut segments: Vec<&str> = text.split(',').collect();
    if segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    let mut records = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        records.push(parse_record(segment, index)?);
    }
    Ok(records)
}

fn parse_record(segment: &str, index: usize) -> Result<ActionRecord, ReplayError> {
    let fields: Vec<&str> = segment.split('|').collect();
    if fields.len() != 4 {
        return Err(ReplayError::MalformedRecord {
            index,
            detail: format!("expected 4 fields, found {}", fields.len()),
        });
    }
    Ok(ActionRecord {
        delta_ms: parse_field(fields[0], index, "time delta")?,
        x: parse_field(fields[1], index, "x")?,
        y: parse_field(fields[2], index, "y")?,
        keys: Keys::from_bits(parse_field(fields[3], index, "key bitmask")?),
    })
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    index: usize,
    field: &'static str,
) -> Result<T, ReplayError> {
    raw.parse().map_err(|_| ReplayError::MalformedRecord {
        index,
        detail: format!("{field} is not an integer: {raw:?}"),
    })
}

/// Render records back to the text payload, trailing separator
/// included.
pub fn render_action_payload(records: &[ActionRecord]) -> Vec<u8> {
    let mut text = String::new();
    for record in records {
        text.push_str(&format!(
            "{}|{}|{}|{},",
            record.delta_ms,
            record.x,
            record.y,
            record.keys.bits()
        ));
    }
    text.into_bytes()
}

// ── Compressed block ────────────────────────────────────────────

/// Decompress a legacy LZMA block into its text payload.
pub fn decompress_block(block: &[u8]) -> Result<Vec<u8>, ReplayError> {
    decompress_block_from(block, 0)
}

/// Like [`decompress_block`], with the block's offset in the
/// surrounding buffer for error reporting.
pub(crate) fn decompress_block_from(
    block: &[u8],
    block_start: usize,
) -> Result<Vec<u8>, ReplayError> {
    let mut input = block;
    let mut payload = Vec::new();
    lzma_rs::lzma_decompress(&mut input, &mut payload).map_err(|err| ReplayError::Lzma {
        offset: block_start,
        detail: err.to_string(),
    })?;
    Ok(payload)
}

/// Compress a text payload into a legacy LZMA block.
pub fn compress_block(payload: &[u8]) -> Result<Vec<u8>, ReplayError> {
    let mut input = payload;
    let mut block = Vec::new();
    lzma_rs::lzma_compress(&mut input, &mut block).map_err(|err| ReplayError::Lzma {
        offset: 0,
        detail: err.to_string(),
    })?;
    Ok(block)
}

/// Decompress and parse a block in one step.
pub fn decode_action_stream(block: &[u8]) -> Result<Vec<ActionRecord>, ReplayError> {
    parse_action_payload(&decompress_block(block)?)
}

/// Render and compress records in one step.
///
/// This is the slow direction; callers that only move a block verbatim
/// should carry the original compressed bytes instead.
pub fn encode_action_stream(records: &[ActionRecord]) -> Result<Vec<u8>, ReplayError> {
    compress_block(&render_action_payload(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    // ── Keys ────────────────────────────────────────────────────

    #[test]
    fn key_bits_compose_and_decompose() {
        let held = Keys::M1 | Keys::K1 | Keys::SMOKE;
        assert_eq!(held.bits(), 21);
        assert!(held.contains(Keys::K1));
        assert!(!held.contains(Keys::M2));
        assert!(Keys::default().is_empty());
        assert_eq!(Keys::from_bits(21), held);
    }

    // ── Payload grammar ─────────────────────────────────────────

    #[test]
    fn splits_records_and_drops_only_the_trailing_empty() {
        let records = parse_action_payload(b"0|1|2|5,10|3|4|0,").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            ActionRecord {
                delta_ms: 0,
                x: 1,
                y: 2,
                keys: Keys::from_bits(5),
            }
        );
        assert_eq!(
            records[1],
            ActionRecord {
                delta_ms: 10,
                x: 3,
                y: 4,
                keys: Keys::default(),
            }
        );
    }

    #[test]
    fn missing_trailing_separator_still_parses_the_last_record() {
        let records = parse_action_payload(b"0|1|2|5,10|3|4|0").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn empty_payload_has_no_records() {
        assert!(parse_action_payload(b"").unwrap().is_empty());
    }

    #[test]
    fn interior_empty_segment_is_an_error() {
        let err = parse_action_payload(b"0|1|2|5,,10|3|4|0,").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(
            err,
            ReplayError::MalformedRecord { index: 1, .. }
        ));
    }

    #[test]
    fn wrong_field_count_is_an_error() {
        for payload in [&b"1|2|3,"[..], b"1|2|3|4|5,"] {
            let err = parse_action_payload(payload).unwrap_err();
            assert!(
                matches!(err, ReplayError::MalformedRecord { index: 0, .. }),
                "{payload:?}"
            );
        }
    }

    #[test]
    fn non_integer_field_is_an_error() {
        let err = parse_action_payload(b"12|256.5|192|0,").unwrap_err();
        match err {
            ReplayError::MalformedRecord { index, detail } => {
                assert_eq!(index, 0);
                assert!(detail.contains("256.5"), "{detail}");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn negative_deltas_and_coordinates_parse() {
        let records = parse_action_payload(b"-1|-20|500|16,").unwrap();
        assert_eq!(records[0].delta_ms, -1);
        assert_eq!(records[0].x, -20);
        assert_eq!(records[0].keys, Keys::SMOKE);
    }

    // ── Seed sentinel ───────────────────────────────────────────

    #[test]
    fn seed_frame_keeps_its_payload() {
        let records = parse_action_payload(b"16|100|200|1,-12345|0|0|424242,").unwrap();
        assert_eq!(records.len(), 2);
        let last = records.last().unwrap();
        assert!(last.is_seed_frame());
        assert_eq!(last.seed(), Some(424242));
        assert!(!records[0].is_seed_frame());
    }

    #[test]
    fn displaced_sentinel_values_are_not_a_seed_frame() {
        let record = ActionRecord {
            delta_ms: SEED_FRAME_DELTA,
            x: 1,
            y: 0,
            keys: Keys::from_bits(7),
        };
        assert_eq!(record.seed(), None);
    }

    // ── Compressed block ────────────────────────────────────────

    #[test]
    fn compress_then_decompress_is_identity() {
        let payload = b"16|100|200|1,16|105|195|1,-12345|0|0|99,".to_vec();
        let block = compress_block(&payload).unwrap();
        assert_ne!(block, payload);
        assert_eq!(decompress_block(&block).unwrap(), payload);
    }

    #[test]
    fn garbage_block_is_a_codec_error() {
        for block in [&[][..], &[0u8; 4][..], &[0xff; 16][..]] {
            let err = decompress_block(block).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Codec, "{block:?}");
        }
    }

    // ── Round-trips ─────────────────────────────────────────────

    fn arb_record() -> impl Strategy<Value = ActionRecord> {
        (any::<i32>(), any::<i32>(), any::<i32>(), any::<u32>()).prop_map(
            |(delta_ms, x, y, keys)| ActionRecord {
                delta_ms,
                x,
                y,
                keys: Keys::from_bits(keys),
            },
        )
    }

    proptest! {
        #[test]
        fn roundtrip_payload(records in prop::collection::vec(arb_record(), 0..64)) {
            let payload = render_action_payload(&records);
            let got = parse_action_payload(&payload).unwrap();
            prop_assert_eq!(records, got);
        }
    }

    #[test]
    fn roundtrip_action_stream() {
        let records = vec![
            ActionRecord {
                delta_ms: 0,
                x: 256,
                y: 192,
                keys: Keys::default(),
            },
            ActionRecord {
                delta_ms: 16,
                x: 260,
                y: 190,
                keys: Keys::M1 | Keys::K1,
            },
            ActionRecord {
                delta_ms: SEED_FRAME_DELTA,
                x: 0,
                y: 0,
                keys: Keys::from_bits(1337),
            },
        ];
        let block = encode_action_stream(&records).unwrap();
        assert_eq!(decode_action_stream(&block).unwrap(), records);
    }
}
