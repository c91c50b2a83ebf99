//! Key codes and modifier masks for synthetic keyboard events.
//!
//! Scripts speak X11 directly: the code passed to `send_key` is a hardware
//! key code as reported by `xev`, and the optional second argument is the
//! raw key-event state mask.  Neither value is translated on the way to the
//! display server.

use std::fmt;

/// An X11 hardware key code (normally in `8..=255`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// X11 key-event modifier state.
///
/// The bit layout mirrors the core protocol's `SETofKEYBUTMASK` so the value
/// can be copied verbatim into the `state` field of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierMask(pub u32);

impl ModifierMask {
    pub const NONE: ModifierMask = ModifierMask(0);

    pub const SHIFT: u32 = 1 << 0;
    pub const LOCK: u32 = 1 << 1;
    pub const CONTROL: u32 = 1 << 2;
    pub const MOD1: u32 = 1 << 3;
    pub const MOD2: u32 = 1 << 4;
    pub const MOD3: u32 = 1 << 5;
    pub const MOD4: u32 = 1 << 6;
    pub const MOD5: u32 = 1 << 7;

    /// Raw mask bits.
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl From<Option<u32>> for ModifierMask {
    fn from(bits: Option<u32>) -> Self {
        bits.map(ModifierMask).unwrap_or(Self::NONE)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_modifiers_default_to_none() {
        assert_eq!(ModifierMask::from(None), ModifierMask::NONE);
        assert_eq!(ModifierMask::default(), ModifierMask::NONE);
    }

    #[test]
    fn test_script_bits_pass_through_unchanged() {
        let mask = ModifierMask::from(Some(ModifierMask::CONTROL | ModifierMask::SHIFT));

        assert_eq!(mask.bits(), 0b101);
    }
}
