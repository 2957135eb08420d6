use std::fmt;

use strum_macros::{Display, EnumString};

use crate::{Key, LightingCommand};

/// Something a behavior asks the output layer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputAction {
    /// Register/unregister a keycode in the HID report
    Key(Key),
    /// Forward a command to the lighting layer
    Lighting(LightingCommand),
}

impl OutputAction {
    /// The keycode, if this action is a key
    pub fn key(self) -> Option<Key> {
        match self {
            OutputAction::Key(key) => Some(key),
            OutputAction::Lighting(_) => None,
        }
    }
}

impl From<Key> for OutputAction {
    fn from(key: Key) -> Self {
        OutputAction::Key(key)
    }
}

impl From<LightingCommand> for OutputAction {
    fn from(command: LightingCommand) -> Self {
        OutputAction::Lighting(command)
    }
}

impl fmt::Display for OutputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputAction::Key(key) => write!(f, "{}", key),
            OutputAction::Lighting(command) => write!(f, "{}", command),
        }
    }
}

/// Whether an emission starts or ends an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Activate,
    Deactivate,
}

/// One `emit(action, phase)` request for the output layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Emission {
    pub action: OutputAction,
    pub phase: Phase,
}

impl Emission {
    pub fn activate(action: impl Into<OutputAction>) -> Self {
        Self {
            action: action.into(),
            phase: Phase::Activate,
        }
    }

    pub fn deactivate(action: impl Into<OutputAction>) -> Self {
        Self {
            action: action.into(),
            phase: Phase::Deactivate,
        }
    }
}

impl fmt::Display for Emission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.phase, self.action)
    }
}
