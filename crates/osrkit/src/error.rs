//! Error types for replay decoding and re-encoding.

use std::fmt;

/// Broad classification of a [`ReplayError`].
///
/// Batch drivers typically only need to know which of the three
/// families a failure falls into; the variant itself carries the
/// precise location for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The bytes were present but structurally invalid.
    Format,
    /// The buffer ended before a required field.
    Truncated,
    /// The compressed action block could not be decoded.
    Codec,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => write!(f, "format error"),
            Self::Truncated => write!(f, "truncated input"),
            Self::Codec => write!(f, "codec error"),
        }
    }
}

/// Errors produced while decoding or re-encoding a replay buffer.
///
/// Every variant records where the failure occurred as a byte offset
/// from the start of the input buffer, except action-record errors
/// which index into the decompressed record sequence instead.
#[derive(Debug)]
pub enum ReplayError {
    /// The leading game-mode byte was outside the four known modes.
    GameMode {
        /// The byte that was found instead.
        found: u8,
        /// Offset of the mode byte.
        offset: usize,
    },
    /// A string field began with a byte other than `0x00` or `0x0b`.
    StringPrefix {
        /// The presence byte that was found.
        found: u8,
        /// Offset of the presence byte.
        offset: usize,
    },
    /// The buffer ended in the middle of a fixed-width or
    /// length-prefixed field.
    Truncated {
        /// Name of the field being read when the buffer ran out.
        field: &'static str,
        /// Offset at which the read began.
        offset: usize,
        /// Number of bytes the field still required.
        needed: usize,
    },
    /// An action record inside the decompressed payload did not match
    /// the `w|x|y|z` grammar.
    MalformedRecord {
        /// Zero-based index of the offending record.
        index: usize,
        /// What was wrong with it.
        detail: String,
    },
    /// The compressed action block was not a decodable legacy LZMA
    /// stream.
    Lzma {
        /// Offset of the start of the compressed block.
        offset: usize,
        /// Decoder-reported reason.
        detail: String,
    },
}

impl ReplayError {
    /// The broad family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GameMode { .. } | Self::StringPrefix { .. } | Self::MalformedRecord { .. } => {
                ErrorKind::Format
            }
            Self::Truncated { .. } => ErrorKind::Truncated,
            Self::Lzma { .. } => ErrorKind::Codec,
        }
    }
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameMode { found, offset } => {
                write!(f, "invalid game mode {found} at offset {offset}")
            }
            Self::StringPrefix { found, offset } => {
                write!(f, "invalid string presence byte {found:#04x} at offset {offset}")
            }
            Self::Truncated {
                field,
                offset,
                needed,
            } => {
                write!(
                    f,
                    "truncated input at offset {offset}: {field} needs {needed} more byte(s)"
                )
            }
            Self::MalformedRecord { index, detail } => {
                write!(f, "malformed action record {index}: {detail}")
            }
            Self::Lzma { offset, detail } => {
                write!(f, "undecodable action block at offset {offset}: {detail}")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_partition_the_variants() {
        let format = ReplayError::GameMode {
            found: 9,
            offset: 0,
        };
        let truncated = ReplayError::Truncated {
            field: "total score",
            offset: 31,
            needed: 4,
        };
        let codec = ReplayError::Lzma {
            offset: 64,
            detail: "header too short".into(),
        };
        assert_eq!(format.kind(), ErrorKind::Format);
        assert_eq!(truncated.kind(), ErrorKind::Truncated);
        assert_eq!(codec.kind(), ErrorKind::Codec);
    }

    #[test]
    fn display_includes_location() {
        let err = ReplayError::StringPrefix {
            found: 0x0c,
            offset: 5,
        };
        let text = err.to_string();
        assert!(text.contains("0x0c"), "{text}");
        assert!(text.contains("offset 5"), "{text}");
    }
}
