//! Gameplay modifier flags carried in the replay header.

use std::fmt;

/// Modifier bitmask from the replay header.
///
/// Values match the client's mod enumeration. Bits with no known
/// meaning are preserved verbatim and survive [`Mods::bits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mods(u32);

impl Mods {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// Failing does not end the play.
    pub const NO_FAIL: Self = Self(1);
    /// Reduced difficulty settings.
    pub const EASY: Self = Self(2);
    /// Legacy background-video toggle.
    pub const NO_VIDEO: Self = Self(4);
    /// Objects fade after appearing.
    pub const HIDDEN: Self = Self(8);
    /// Raised difficulty settings.
    pub const HARD_ROCK: Self = Self(16);
    /// Any miss ends the play.
    pub const SUDDEN_DEATH: Self = Self(32);
    /// Faster playback.
    pub const DOUBLE_TIME: Self = Self(64);
    /// Taps are automatic.
    pub const RELAX: Self = Self(128);
    /// Slower playback.
    pub const HALF_TIME: Self = Self(256);
    /// Faster playback with pitch shift; the client sets
    /// [`Mods::DOUBLE_TIME`] alongside it.
    pub const NIGHTCORE: Self = Self(512);
    /// Visible area is restricted.
    pub const FLASHLIGHT: Self = Self(1024);
    /// Fully automatic play.
    pub const AUTOPLAY: Self = Self(2048);
    /// Spinners complete themselves.
    pub const SPUN_OUT: Self = Self(4096);
    /// Cursor movement is automatic.
    pub const AUTOPILOT: Self = Self(8192);
    /// Any non-perfect judgment ends the play; the client sets
    /// [`Mods::SUDDEN_DEATH`] alongside it.
    pub const PERFECT: Self = Self(16384);
    /// Four-key layout.
    pub const KEY4: Self = Self(32768);
    /// Five-key layout.
    pub const KEY5: Self = Self(65536);
    /// Six-key layout.
    pub const KEY6: Self = Self(131072);
    /// Seven-key layout.
    pub const KEY7: Self = Self(262144);
    /// Eight-key layout.
    pub const KEY8: Self = Self(524288);
    /// Union of the 4K through 8K layout flags.
    pub const KEY_MOD: Self = Self(1015808);
    /// Objects fade in.
    pub const FADE_IN: Self = Self(1048576);
    /// Shuffled note columns.
    pub const RANDOM: Self = Self(2097152);
    /// Cinema playback.
    pub const LAST_MOD: Self = Self(4194304);
    /// Target-practice ruleset.
    pub const TARGET_PRACTICE: Self = Self(8388608);
    /// Nine-key layout.
    pub const KEY9: Self = Self(16777216);
    /// Co-op layout.
    pub const COOP: Self = Self(33554432);
    /// One-key layout.
    pub const KEY1: Self = Self(67108864);
    /// Three-key layout.
    pub const KEY3: Self = Self(134217728);
    /// Two-key layout.
    pub const KEY2: Self = Self(268435456);

    /// Create flags from the raw header bitmask.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set in `self`.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for Mods {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for Mods {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// Display names in bit order. KEY_MOD is a composite and stays out of
// the table.
const NAMES: &[(Mods, &str)] = &[
    (Mods::NO_FAIL, "NoFail"),
    (Mods::EASY, "Easy"),
    (Mods::NO_VIDEO, "NoVideo"),
    (Mods::HIDDEN, "Hidden"),
    (Mods::HARD_ROCK, "HardRock"),
    (Mods::SUDDEN_DEATH, "SuddenDeath"),
    (Mods::DOUBLE_TIME, "DoubleTime"),
    (Mods::RELAX, "Relax"),
    (Mods::HALF_TIME, "HalfTime"),
    (Mods::NIGHTCORE, "Nightcore"),
    (Mods::FLASHLIGHT, "Flashlight"),
    (Mods::AUTOPLAY, "Autoplay"),
    (Mods::SPUN_OUT, "SpunOut"),
    (Mods::AUTOPILOT, "Autopilot"),
    (Mods::PERFECT, "Perfect"),
    (Mods::KEY4, "Key4"),
    (Mods::KEY5, "Key5"),
    (Mods::KEY6, "Key6"),
    (Mods::KEY7, "Key7"),
    (Mods::KEY8, "Key8"),
    (Mods::FADE_IN, "FadeIn"),
    (Mods::RANDOM, "Random"),
    (Mods::LAST_MOD, "LastMod"),
    (Mods::TARGET_PRACTICE, "TargetPractice"),
    (Mods::KEY9, "Key9"),
    (Mods::COOP, "Coop"),
    (Mods::KEY1, "Key1"),
    (Mods::KEY3, "Key3"),
    (Mods::KEY2, "Key2"),
];

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut remaining = self.0;
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(*flag) {
                if !first {
                    write!(f, "+")?;
                }
                write!(f, "{name}")?;
                first = false;
                remaining &= !flag.0;
            }
        }
        // Unknown bits are shown raw rather than dropped.
        if remaining != 0 {
            if !first {
                write!(f, "+")?;
            }
            write!(f, "{remaining:#x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_and_intersects() {
        let mods = Mods::HIDDEN | Mods::HARD_ROCK;
        assert!(mods.contains(Mods::HIDDEN));
        assert!(!mods.contains(Mods::DOUBLE_TIME));
        assert!(mods.intersects(Mods::HARD_ROCK | Mods::FLASHLIGHT));
        assert!(!mods.intersects(Mods::FLASHLIGHT));
        assert_eq!(mods.bits(), 24);
    }

    #[test]
    fn key_mod_is_the_union_of_key_layouts() {
        let union = Mods::KEY4 | Mods::KEY5 | Mods::KEY6 | Mods::KEY7 | Mods::KEY8;
        assert_eq!(Mods::KEY_MOD, union);
    }

    #[test]
    fn display_lists_flags_in_bit_order() {
        assert_eq!(Mods::NONE.to_string(), "none");
        assert_eq!(
            (Mods::DOUBLE_TIME | Mods::HIDDEN).to_string(),
            "Hidden+DoubleTime"
        );
    }

    #[test]
    fn display_keeps_unknown_bits() {
        let mods = Mods::from_bits(Mods::HIDDEN.bits() | 0x4000_0000);
        assert_eq!(mods.to_string(), "Hidden+0x40000000");
    }
}
