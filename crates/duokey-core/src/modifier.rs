// Duokey Modifier System
// The 8-bit HID modifier byte (Ctrl, Shift, Alt, Gui on either side)

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::Key;

/// A set of held modifiers, laid out like the first byte of a HID boot
/// keyboard report.
///
/// Used both as a snapshot of the currently held modifiers and as the mask a
/// dual-role binding tests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const LEFT_CTRL: Modifiers = Modifiers(0x01);
    pub const LEFT_SHIFT: Modifiers = Modifiers(0x02);
    pub const LEFT_ALT: Modifiers = Modifiers(0x04);
    pub const LEFT_GUI: Modifiers = Modifiers(0x08);
    pub const RIGHT_CTRL: Modifiers = Modifiers(0x10);
    pub const RIGHT_SHIFT: Modifiers = Modifiers(0x20);
    pub const RIGHT_ALT: Modifiers = Modifiers(0x40);
    pub const RIGHT_GUI: Modifiers = Modifiers(0x80);

    /// Either Ctrl
    pub const CTRL: Modifiers = Modifiers(0x11);
    /// Either Shift
    pub const SHIFT: Modifiers = Modifiers(0x22);
    /// Either Alt
    pub const ALT: Modifiers = Modifiers(0x44);
    /// Either Gui
    pub const GUI: Modifiers = Modifiers(0x88);

    pub const fn from_bits(bits: u8) -> Self {
        Modifiers(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any modifier in `mask` is also set in `self`
    pub const fn intersects(self, mask: Modifiers) -> bool {
        self.0 & mask.0 != 0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// The modifier bit a key sets while held, if it is a modifier key
    pub const fn from_key(key: Key) -> Option<Modifiers> {
        match key.0 {
            0xE0..=0xE7 => Some(Modifiers(1u8 << (key.0 - 0xE0))),
            _ => None,
        }
    }

    /// Look up a modifier set by name or alias, case-insensitively.
    ///
    /// Generic names ("Ctrl", "Shift") cover both sides; "L"/"R" prefixed
    /// names cover one side.
    pub fn from_alias(alias: &str) -> Result<Modifiers, ModifierError> {
        let wanted = alias.trim();
        MODIFIER_ALIASES
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| a.eq_ignore_ascii_case(wanted)))
            .map(|(mods, _)| *mods)
            .ok_or_else(|| ModifierError::UnknownAlias(alias.to_string()))
    }

    /// Union of several aliases, e.g. `["Ctrl", "RShift"]`
    pub fn from_aliases<S: AsRef<str>>(aliases: &[S]) -> Result<Modifiers, ModifierError> {
        let mut mods = Modifiers::NONE;
        for alias in aliases {
            mods |= Modifiers::from_alias(alias.as_ref())?;
        }
        Ok(mods)
    }

    /// Iterate over the single-bit modifiers set in `self`
    pub fn iter(self) -> impl Iterator<Item = Modifiers> {
        (0..8)
            .map(|bit| Modifiers(1u8 << bit))
            .filter(move |m| self.contains(*m))
    }
}

/// (modifier set, accepted spellings); the first spelling is the display name
const MODIFIER_ALIASES: &[(Modifiers, &[&str])] = &[
    (Modifiers::CTRL, &["Ctrl", "C", "Control"]),
    (Modifiers::LEFT_CTRL, &["LCtrl", "LC", "LCTL"]),
    (Modifiers::RIGHT_CTRL, &["RCtrl", "RC", "RCTL"]),
    (Modifiers::SHIFT, &["Shift", "S"]),
    (Modifiers::LEFT_SHIFT, &["LShift", "LS", "LSFT"]),
    (Modifiers::RIGHT_SHIFT, &["RShift", "RS", "RSFT"]),
    (Modifiers::ALT, &["Alt", "A", "Opt", "Option"]),
    (Modifiers::LEFT_ALT, &["LAlt", "LA", "LOpt"]),
    (Modifiers::RIGHT_ALT, &["RAlt", "RA", "ROpt", "AltGr"]),
    (Modifiers::GUI, &["Gui", "G", "Meta", "Super", "Win", "Cmd"]),
    (Modifiers::LEFT_GUI, &["LGui", "LMeta", "LSuper", "LWin", "LCmd"]),
    (Modifiers::RIGHT_GUI, &["RGui", "RMeta", "RSuper", "RWin", "RCmd"]),
];

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

impl Not for Modifiers {
    type Output = Self;

    fn not(self) -> Self::Output {
        Modifiers(!self.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAndAssign for Modifiers {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut rest = *self;
        let mut first = true;
        // Prefer the two-sided names when both sides are present
        for (mods, aliases) in MODIFIER_ALIASES {
            if rest.contains(*mods) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(aliases[0])?;
                rest &= !*mods;
                first = false;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when working with modifiers
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModifierError {
    #[error("unknown modifier '{0}'")]
    UnknownAlias(String),
}
