//! Character conditions and bit vector helpers
//!
//! Conditions are independent status effects packed into a 32-bit vector.
//! The helpers at the bottom work on any `bitflags` type, so new bit vectors
//! get the same idempotent set/clear/test semantics for free.

use bitflags::{Flags, bitflags};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Status effects on a character
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Condition: u32 {
        const DISEASED = 1 << 0;
        const POISONED = 1 << 1;
        const PARALYZED = 1 << 2;
        const CONFUSED = 1 << 3;
        const SLEEPING = 1 << 4;
        const UNCONSCIOUS = 1 << 5;
        const BURNING = 1 << 6;
        const ENLARGED = 1 << 7;
        const SHRUNKEN = 1 << 8;
        // Bits 9 through 26 are reserved
        const GRAPPLED = 1 << 27;
        const SWALLOWED = 1 << 28;
        const DEAD = 1 << 29;
        const DIGESTED = 1 << 30;
        const SOULDEAD = 1 << 31;

        /// Conditions that prevent a character from moving
        const IMMOBILIZING = Self::PARALYZED.bits()
            | Self::SLEEPING.bits()
            | Self::UNCONSCIOUS.bits()
            | Self::DEAD.bits()
            | Self::SOULDEAD.bits()
            | Self::GRAPPLED.bits()
            | Self::SWALLOWED.bits()
            | Self::DIGESTED.bits();

        // Reserved bits are carried through untouched
        const _ = !0;
    }
}

impl Condition {
    /// Single-bit conditions with their names, in bit order
    pub fn named() -> impl Iterator<Item = (&'static str, Condition)> {
        Condition::all()
            .iter_names()
            .filter(|(_, flag)| flag.bits().count_ones() == 1)
    }

    /// Lowercase names of the conditions that are set, in bit order
    pub fn names(&self) -> Vec<String> {
        Self::named()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| name.to_lowercase())
            .collect()
    }
}

// Manual serde impl for Condition
impl Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Condition::from_bits_retain(bits))
    }
}

/// Return `flags` with `bit` present. No-op if it is already set.
pub fn set_bit<F: Flags>(flags: F, bit: F) -> F {
    let mut flags = flags;
    flags.insert(bit);
    flags
}

/// Return `flags` with `bit` absent. No-op if it is already clear.
pub fn remove_bit<F: Flags>(flags: F, bit: F) -> F {
    let mut flags = flags;
    flags.remove(bit);
    flags
}

/// Test whether `bit` is present in `flags`
pub fn check_bit<F: Flags>(flags: &F, bit: F) -> bool {
    flags.contains(bit)
}
