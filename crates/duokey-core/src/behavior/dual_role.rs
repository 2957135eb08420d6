// Duokey Dual-Role Keys
// Modifier-dependent key substitution, decided once per press

use std::fmt;

use crate::{Emission, Key, Modifiers, TriggerId};

/// Which of a binding's two actions a press selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Alternate,
}

/// Per-instance press state of a dual-role key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commitment {
    /// No press outstanding
    #[default]
    Idle,
    /// Pressed; the release must deactivate this role's action
    Committed(Role),
}

/// A key that emits `primary` normally and `alternate` when any modifier in
/// `modifier_mask` is held at the moment it is pressed.
///
/// The modifier state is sampled exactly once, on press. The choice is then
/// frozen until the matching release so that the release always cancels the
/// action that was actually activated, even if the modifiers changed during
/// the hold. Releasing on a re-evaluated choice would leave a key stuck down
/// on the host.
///
/// Each binding owns its commitment. Two bindings with identical masks and
/// actions on different triggers are fully independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualRoleBinding {
    name: String,
    trigger: TriggerId,
    modifier_mask: Modifiers,
    primary: Key,
    alternate: Key,
    commitment: Commitment,
}

impl DualRoleBinding {
    pub fn new(
        name: impl Into<String>,
        trigger: TriggerId,
        modifier_mask: Modifiers,
        primary: Key,
        alternate: Key,
    ) -> Self {
        Self {
            name: name.into(),
            trigger,
            modifier_mask,
            primary,
            alternate,
            commitment: Commitment::Idle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger(&self) -> TriggerId {
        self.trigger
    }

    pub fn modifier_mask(&self) -> Modifiers {
        self.modifier_mask
    }

    pub fn primary(&self) -> Key {
        self.primary
    }

    pub fn alternate(&self) -> Key {
        self.alternate
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.commitment, Commitment::Committed(_))
    }

    /// The role a press with `modifiers` held would select
    pub fn role_for(&self, modifiers: Modifiers) -> Role {
        if modifiers.intersects(self.modifier_mask) {
            Role::Alternate
        } else {
            Role::Primary
        }
    }

    pub fn action(&self, role: Role) -> Key {
        match role {
            Role::Primary => self.primary,
            Role::Alternate => self.alternate,
        }
    }

    /// The role a release would deactivate right now.
    ///
    /// An idle binding resolves to the primary role.
    pub fn effective_role(&self) -> Role {
        match self.commitment {
            Commitment::Committed(role) => role,
            Commitment::Idle => Role::Primary,
        }
    }

    /// Commit to a role based on `modifiers` and activate its action.
    ///
    /// A press while already committed overwrites the commitment (last press
    /// wins) and does not deactivate the superseded action.
    pub fn on_press(&mut self, modifiers: Modifiers) -> Emission {
        let role = self.role_for(modifiers);
        if let Commitment::Committed(previous) = self.commitment {
            // The superseded action stays active on the host until something
            // else releases it.
            log::warn!(
                "{} {}: pressed again before release; {} stays active, now committed to {}",
                self.name,
                self.trigger,
                self.action(previous),
                self.action(role)
            );
        }
        self.commitment = Commitment::Committed(role);
        log::debug!(
            "{} {}: modifiers {} -> {:?} ({})",
            self.name,
            self.trigger,
            modifiers,
            role,
            self.action(role)
        );
        Emission::activate(self.action(role))
    }

    /// Deactivate the committed action and return to idle.
    ///
    /// A release with nothing committed resolves to the primary action, which
    /// was never activated, so nothing is emitted. This also makes repeated
    /// releases harmless.
    pub fn on_release(&mut self) -> Option<Emission> {
        match std::mem::take(&mut self.commitment) {
            Commitment::Committed(role) => Some(Emission::deactivate(self.action(role))),
            Commitment::Idle => {
                log::warn!(
                    "{} {}: release without press, {} not active",
                    self.name,
                    self.trigger,
                    self.primary
                );
                None
            }
        }
    }

    /// Drop any commitment without emitting anything
    pub fn reset(&mut self) {
        self.commitment = Commitment::Idle;
    }
}

impl fmt::Display for DualRoleBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} / {} with {}",
            self.name, self.primary, self.alternate, self.modifier_mask
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bsdl() -> DualRoleBinding {
        DualRoleBinding::new(
            "BSDL",
            TriggerId::new(0, 11),
            Modifiers::SHIFT,
            Key::BACKSPACE,
            Key::DELETE,
        )
    }

    #[test]
    fn test_starts_idle() {
        let binding = bsdl();
        assert_eq!(binding.commitment(), Commitment::Idle);
        assert!(!binding.is_committed());
        assert_eq!(binding.effective_role(), Role::Primary);
    }

    #[test]
    fn test_press_without_modifiers_selects_primary() {
        let mut binding = bsdl();
        assert_eq!(
            binding.on_press(Modifiers::NONE),
            Emission::activate(Key::BACKSPACE)
        );
        assert_eq!(binding.commitment(), Commitment::Committed(Role::Primary));
        assert_eq!(binding.on_release(), Some(Emission::deactivate(Key::BACKSPACE)));
        assert_eq!(binding.commitment(), Commitment::Idle);
    }

    #[test]
    fn test_press_with_either_shift_selects_alternate() {
        for shift in [Modifiers::LEFT_SHIFT, Modifiers::RIGHT_SHIFT] {
            let mut binding = bsdl();
            assert_eq!(binding.on_press(shift), Emission::activate(Key::DELETE));
            assert_eq!(binding.on_release(), Some(Emission::deactivate(Key::DELETE)));
        }
    }

    #[test]
    fn test_unrelated_modifier_selects_primary() {
        let mut binding = bsdl();
        assert_eq!(
            binding.on_press(Modifiers::LEFT_CTRL | Modifiers::LEFT_ALT),
            Emission::activate(Key::BACKSPACE)
        );
    }

    #[test]
    fn test_release_without_press_emits_nothing() {
        let mut binding = bsdl();
        assert_eq!(binding.on_release(), None);
        assert_eq!(binding.commitment(), Commitment::Idle);
    }

    #[test]
    fn test_second_release_emits_nothing() {
        let mut binding = bsdl();
        binding.on_press(Modifiers::LEFT_SHIFT);
        assert!(binding.on_release().is_some());
        assert_eq!(binding.on_release(), None);
    }

    #[test]
    fn test_repress_overwrites() {
        let mut binding = bsdl();
        assert_eq!(
            binding.on_press(Modifiers::NONE),
            Emission::activate(Key::BACKSPACE)
        );
        assert_eq!(
            binding.on_press(Modifiers::LEFT_SHIFT),
            Emission::activate(Key::DELETE)
        );
        assert_eq!(binding.commitment(), Commitment::Committed(Role::Alternate));
        assert_eq!(binding.on_release(), Some(Emission::deactivate(Key::DELETE)));
        assert_eq!(binding.on_release(), None);
    }

    #[test]
    fn test_reset_drops_commitment() {
        let mut binding = bsdl();
        binding.on_press(Modifiers::LEFT_SHIFT);
        binding.reset();
        assert!(!binding.is_committed());
        assert_eq!(binding.on_release(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(bsdl().to_string(), "BSDL: BACKSPACE / DELETE with Shift");
    }
}
