// Duokey Held Output State
// HashSet-based O(1) tracking of output keys currently activated

use std::collections::HashSet;

use crate::{Emission, Key, Modifiers, OutputAction, Phase};

/// Inconsistencies between an emission and the keys currently held.
///
/// These never stop processing; the engine reports them and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    #[error("{0} activated while already held")]
    AlreadyHeld(Key),
    #[error("{0} deactivated while not held")]
    NotHeld(Key),
}

/// Tracks which output keys are activated, mirroring what the host sees
/// in the HID report.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Key>,
}

impl HeldKeys {
    /// Create a new empty state
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
        }
    }

    /// Apply one emission. Lighting commands do not affect held keys.
    pub fn apply(&mut self, emission: &Emission) -> Result<(), OutputError> {
        let OutputAction::Key(key) = emission.action else {
            return Ok(());
        };
        match emission.phase {
            Phase::Activate => {
                if self.held.insert(key) {
                    Ok(())
                } else {
                    Err(OutputError::AlreadyHeld(key))
                }
            }
            Phase::Deactivate => {
                if self.held.remove(&key) {
                    Ok(())
                } else {
                    Err(OutputError::NotHeld(key))
                }
            }
        }
    }

    /// Check if a key is currently held
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Current modifier state: the union of all held modifier keys.
    ///
    /// This is the snapshot dual-role keys sample at press time.
    pub fn modifiers(&self) -> Modifiers {
        self.held
            .iter()
            .filter_map(|key| Modifiers::from_key(*key))
            .fold(Modifiers::NONE, |acc, m| acc | m)
    }

    /// All held keys, sorted by usage id
    pub fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.held.iter().copied().collect();
        keys.sort();
        keys
    }

    /// Forget every held key
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}
