// Duokey Behaviors
// One variant per kind of key action, each with its own press/release logic

mod cycle;
mod dual_role;

use std::fmt;

use crate::{Emission, Key, Modifiers};

pub use cycle::CycleBinding;
pub use dual_role::{Commitment, DualRoleBinding, Role};

/// What a bound trigger does on press and release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    /// Modifier-dependent choice between two keys
    DualRole(DualRoleBinding),
    /// A plain key, activated while held
    Passthrough(Key),
    /// Rotation through lighting commands
    Cycle(CycleBinding),
}

impl Behavior {
    /// Handle a press; `modifiers` is the snapshot at the time of the press
    pub fn on_press(&mut self, modifiers: Modifiers) -> Option<Emission> {
        match self {
            Behavior::DualRole(binding) => Some(binding.on_press(modifiers)),
            Behavior::Passthrough(key) => Some(Emission::activate(*key)),
            Behavior::Cycle(cycle) => Some(cycle.on_press()),
        }
    }

    pub fn on_release(&mut self) -> Option<Emission> {
        match self {
            Behavior::DualRole(binding) => binding.on_release(),
            Behavior::Passthrough(key) => Some(Emission::deactivate(*key)),
            Behavior::Cycle(cycle) => cycle.on_release(),
        }
    }

    /// Clear transient press state. Cycle positions are kept.
    pub fn reset(&mut self) {
        if let Behavior::DualRole(binding) = self {
            binding.reset();
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Behavior::DualRole(_) => "dual_role",
            Behavior::Passthrough(_) => "passthrough",
            Behavior::Cycle(_) => "cycle",
        }
    }
}

impl From<DualRoleBinding> for Behavior {
    fn from(binding: DualRoleBinding) -> Self {
        Behavior::DualRole(binding)
    }
}

impl From<CycleBinding> for Behavior {
    fn from(cycle: CycleBinding) -> Self {
        Behavior::Cycle(cycle)
    }
}

impl From<Key> for Behavior {
    fn from(key: Key) -> Self {
        Behavior::Passthrough(key)
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::DualRole(binding) => write!(f, "{}", binding),
            Behavior::Passthrough(key) => write!(f, "{}", key),
            Behavior::Cycle(cycle) => write!(f, "{}: {} steps", cycle.name(), cycle.steps().len()),
        }
    }
}
