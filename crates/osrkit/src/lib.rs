//! Decoding and headerless re-encoding of osu! replay (`.osr`) files.
//!
//! Parses the little-endian header, inflates the legacy LZMA action
//! block into input records, and reads the trailing online score
//! identifier. The compressed block can also be lifted out verbatim
//! for headerless storage.
//!
//! # Architecture
//!
//! - [`Replay::decode`] decodes a whole in-memory buffer
//! - [`headerless`] returns the header plus the untouched compressed block
//! - [`decode_action_stream`] / [`encode_action_stream`] convert between
//!   compressed blocks and [`ActionRecord`] sequences
//! - All decoding is pure slice-in, value-out (no I/O in this crate)
//!
//! # Format
//!
//! ```text
//! [mode u8] [version u32]
//! [beatmap hash str] [player name str] [replay hash str]
//! [300 u16] [100 u16] [50 u16] [geki u16] [katu u16] [miss u16]
//! [score u32] [combo u16] [perfect u8] [mods u32]
//! [life graph str] [timestamp u64]
//! [block length u32] [compressed action block ...]
//! [online score id i64]
//! ```
//!
//! Strings carry a presence byte (`0x00` absent, `0x0b` present)
//! followed by a ULEB128 length and UTF-8 bytes. The action block is
//! a legacy LZMA stream of `w|x|y|z` text records. The score
//! identifier is always the final eight bytes of the file; the
//! declared block length is advisory only.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod cursor;
pub mod error;
pub mod header;
pub mod mods;
pub mod replay;

pub use action::{
    compress_block, decode_action_stream, decompress_block, encode_action_stream,
    parse_action_payload, render_action_payload, ActionRecord, Keys,
};
pub use cursor::{encode_uleb128, ByteCursor};
pub use error::{ErrorKind, ReplayError};
pub use header::{decode_header, parse_life_graph, GameMode, GraphEntry, ReplayHeader};
pub use mods::Mods;
pub use replay::{decode_score_id, headerless, Replay};

/// Byte width of the trailing online score identifier.
pub const SCORE_ID_LEN: usize = 8;

/// Time delta of the sentinel action record that smuggles the RNG
/// seed through the key field.
pub const SEED_FRAME_DELTA: i32 = -12345;
