// Duokey Resolver
// Arena of behaviors indexed by trigger, dispatching press/release edges

use indexmap::IndexMap;

use crate::behavior::Behavior;
use crate::output::OutputSink;
use crate::{Edge, KeyEvent, Modifiers, TriggerId};

/// Errors raised while building a resolver
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    #[error("trigger {0} is bound twice")]
    DuplicateTrigger(TriggerId),
    #[error("binding '{name}' belongs to trigger {own} but was bound to {requested}")]
    TriggerMismatch {
        name: String,
        own: TriggerId,
        requested: TriggerId,
    },
}

/// Whether the resolver took care of an event.
///
/// `Unhandled` means no behavior is bound to the trigger and the firmware's
/// default processing should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Unhandled,
}

impl Dispatch {
    pub fn is_handled(self) -> bool {
        matches!(self, Dispatch::Handled)
    }
}

/// Owns one behavior instance per trigger and routes edges to it.
///
/// All press state lives in the behavior instances, so independent triggers
/// never observe each other's commitments.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    bindings: IndexMap<TriggerId, Behavior>,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Bind a behavior to a trigger
    pub fn bind(
        &mut self,
        trigger: TriggerId,
        behavior: impl Into<Behavior>,
    ) -> Result<(), ResolverError> {
        let behavior = behavior.into();
        if self.bindings.contains_key(&trigger) {
            return Err(ResolverError::DuplicateTrigger(trigger));
        }
        let own = match &behavior {
            Behavior::DualRole(binding) => Some((binding.name(), binding.trigger())),
            Behavior::Cycle(cycle) => Some((cycle.name(), cycle.trigger())),
            Behavior::Passthrough(_) => None,
        };
        if let Some((name, own)) = own {
            if own != trigger {
                return Err(ResolverError::TriggerMismatch {
                    name: name.to_string(),
                    own,
                    requested: trigger,
                });
            }
        }
        log::trace!("bound {} {} to {}", behavior.kind(), behavior, trigger);
        self.bindings.insert(trigger, behavior);
        Ok(())
    }

    pub fn get(&self, trigger: TriggerId) -> Option<&Behavior> {
        self.bindings.get(&trigger)
    }

    pub fn get_mut(&mut self, trigger: TriggerId) -> Option<&mut Behavior> {
        self.bindings.get_mut(&trigger)
    }

    pub fn is_bound(&self, trigger: TriggerId) -> bool {
        self.bindings.contains_key(&trigger)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over bindings in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = (TriggerId, &Behavior)> {
        self.bindings.iter().map(|(trigger, behavior)| (*trigger, behavior))
    }

    /// Press edge for `trigger`, with `modifiers` held at this instant
    pub fn press<S: OutputSink + ?Sized>(
        &mut self,
        trigger: TriggerId,
        modifiers: Modifiers,
        sink: &mut S,
    ) -> Dispatch {
        let Some(behavior) = self.bindings.get_mut(&trigger) else {
            log::trace!("press {}: unbound", trigger);
            return Dispatch::Unhandled;
        };
        if let Some(emission) = behavior.on_press(modifiers) {
            log::trace!("press {}: {}", trigger, emission);
            sink.emit(emission);
        }
        Dispatch::Handled
    }

    /// Release edge for `trigger`
    pub fn release<S: OutputSink + ?Sized>(
        &mut self,
        trigger: TriggerId,
        sink: &mut S,
    ) -> Dispatch {
        let Some(behavior) = self.bindings.get_mut(&trigger) else {
            log::trace!("release {}: unbound", trigger);
            return Dispatch::Unhandled;
        };
        if let Some(emission) = behavior.on_release() {
            log::trace!("release {}: {}", trigger, emission);
            sink.emit(emission);
        }
        Dispatch::Handled
    }

    /// Route a key event to `press` or `release`
    pub fn handle<S: OutputSink + ?Sized>(
        &mut self,
        event: KeyEvent,
        modifiers: Modifiers,
        sink: &mut S,
    ) -> Dispatch {
        match event.edge {
            Edge::Press => self.press(event.trigger, modifiers, sink),
            Edge::Release => self.release(event.trigger, sink),
        }
    }

    /// Send the first step of every cycle marked for boot, advancing it.
    ///
    /// Returns how many cycles were applied.
    pub fn boot<S: OutputSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut applied = 0;
        for behavior in self.bindings.values_mut() {
            if let Behavior::Cycle(cycle) = behavior {
                if cycle.apply_on_init() {
                    sink.emit(cycle.on_press());
                    applied += 1;
                }
            }
        }
        applied
    }

    /// Drop every outstanding commitment without emitting anything
    pub fn reset(&mut self) {
        self.bindings.values_mut().for_each(Behavior::reset);
    }

    /// Triggers whose dual-role binding is waiting for a release
    pub fn committed(&self) -> Vec<TriggerId> {
        self.bindings
            .iter()
            .filter(|(_, behavior)| matches!(behavior, Behavior::DualRole(b) if b.is_committed()))
            .map(|(trigger, _)| *trigger)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{CycleBinding, DualRoleBinding};
    use crate::lighting::default_mode_cycle;
    use crate::{Emission, Key, LightingCommand, LightingMode};

    const LEFT: TriggerId = TriggerId::new(0, 0);
    const RIGHT: TriggerId = TriggerId::new(4, 0);

    fn bsdl(trigger: TriggerId) -> DualRoleBinding {
        DualRoleBinding::new("BSDL", trigger, Modifiers::SHIFT, Key::BACKSPACE, Key::DELETE)
    }

    #[test]
    fn test_unbound_trigger_is_unhandled() {
        let mut resolver = Resolver::new();
        let mut out: Vec<Emission> = Vec::new();
        assert_eq!(
            resolver.press(LEFT, Modifiers::NONE, &mut out),
            Dispatch::Unhandled
        );
        assert_eq!(resolver.release(LEFT, &mut out), Dispatch::Unhandled);
        assert!(out.is_empty());
    }

    #[test]
    fn test_duplicate_trigger_rejected() {
        let mut resolver = Resolver::new();
        resolver.bind(LEFT, bsdl(LEFT)).unwrap();
        assert_eq!(
            resolver.bind(LEFT, Key::ENTER),
            Err(ResolverError::DuplicateTrigger(LEFT))
        );
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_trigger_mismatch_rejected() {
        let mut resolver = Resolver::new();
        let err = resolver.bind(RIGHT, bsdl(LEFT)).unwrap_err();
        assert!(matches!(err, ResolverError::TriggerMismatch { .. }));
        assert!(resolver.is_empty());
    }

    #[test]
    fn test_release_without_press_is_handled_silently() {
        let mut resolver = Resolver::new();
        resolver.bind(LEFT, bsdl(LEFT)).unwrap();
        let mut out: Vec<Emission> = Vec::new();
        assert_eq!(resolver.release(LEFT, &mut out), Dispatch::Handled);
        assert!(out.is_empty());
    }

    #[test]
    fn test_handle_routes_edges() {
        let mut resolver = Resolver::new();
        resolver.bind(LEFT, bsdl(LEFT)).unwrap();
        let mut out: Vec<Emission> = Vec::new();
        resolver.handle(KeyEvent::press(LEFT), Modifiers::LEFT_SHIFT, &mut out);
        assert_eq!(resolver.committed(), vec![LEFT]);
        resolver.handle(KeyEvent::release(LEFT), Modifiers::NONE, &mut out);
        assert!(resolver.committed().is_empty());
        assert_eq!(
            out,
            vec![Emission::activate(Key::DELETE), Emission::deactivate(Key::DELETE)]
        );
    }

    #[test]
    fn test_reset_clears_commitments() {
        let mut resolver = Resolver::new();
        resolver.bind(LEFT, bsdl(LEFT)).unwrap();
        resolver.bind(RIGHT, bsdl(RIGHT)).unwrap();
        let mut out: Vec<Emission> = Vec::new();
        resolver.press(LEFT, Modifiers::NONE, &mut out);
        resolver.press(RIGHT, Modifiers::RIGHT_SHIFT, &mut out);
        assert_eq!(resolver.committed().len(), 2);

        resolver.reset();
        assert!(resolver.committed().is_empty());
        out.clear();
        resolver.release(LEFT, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_boot_applies_marked_cycles_only() {
        let mut resolver = Resolver::new();
        let marked = CycleBinding::new("RGBM", LEFT, default_mode_cycle())
            .unwrap()
            .with_apply_on_init(true);
        let unmarked = CycleBinding::new("OTHER", RIGHT, default_mode_cycle()).unwrap();
        resolver.bind(LEFT, marked).unwrap();
        resolver.bind(RIGHT, unmarked).unwrap();

        let mut out: Vec<Emission> = Vec::new();
        assert_eq!(resolver.boot(&mut out), 1);
        assert_eq!(
            out,
            vec![Emission::activate(LightingCommand::Mode(
                LightingMode::SolidReactiveSimple
            ))]
        );

        // The next press continues from the second step
        out.clear();
        resolver.press(LEFT, Modifiers::NONE, &mut out);
        assert_eq!(
            out,
            vec![Emission::activate(LightingCommand::Mode(LightingMode::SolidColor))]
        );
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let mut resolver = Resolver::new();
        resolver.bind(RIGHT, bsdl(RIGHT)).unwrap();
        resolver.bind(LEFT, Key::LEFT_SHIFT).unwrap();
        let triggers: Vec<_> = resolver.iter().map(|(t, _)| t).collect();
        assert_eq!(triggers, vec![RIGHT, LEFT]);
    }
}
