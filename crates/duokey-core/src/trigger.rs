use std::fmt;

use serde::Deserialize;
use strum_macros::{Display, EnumString};

/// Identifies the physical source of a key event: a position in the key
/// matrix.
///
/// Two keys carrying the same behavior (say, a left-hand and a right-hand
/// copy of the same dual-role key) always have distinct trigger ids, which is
/// what keeps their per-press state apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerId {
    pub row: u8,
    pub col: u8,
}

impl TriggerId {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which edge of a key transition an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Edge {
    Release,
    Press,
}

impl Edge {
    /// Returns true if this is a PRESS event
    pub fn is_pressed(self) -> bool {
        matches!(self, Edge::Press)
    }

    /// Returns true if this is a RELEASE event
    pub fn is_released(self) -> bool {
        matches!(self, Edge::Release)
    }
}

/// A single edge notification from the scanning layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub trigger: TriggerId,
    pub edge: Edge,
}

impl KeyEvent {
    pub const fn press(trigger: TriggerId) -> Self {
        Self {
            trigger,
            edge: Edge::Press,
        }
    }

    pub const fn release(trigger: TriggerId) -> Self {
        Self {
            trigger,
            edge: Edge::Release,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.edge, self.trigger)
    }
}
