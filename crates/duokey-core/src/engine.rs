// Duokey Engine
// Drives a resolver from key events and keeps the output side consistent
//
// The engine is the host-side stand-in for the firmware around the resolver:
// - samples the modifier snapshot from the keys it has activated
// - dispatches each edge through the resolver
// - tracks held output keys so stuck keys can be detected

use crate::output::{Emissions, HeldKeys};
use crate::resolver::{Dispatch, Resolver};
use crate::{Emission, KeyEvent, LightingCommand, Modifiers};

/// Result of processing a single key event
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub dispatch: Dispatch,
    pub emissions: Emissions,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    resolver: Resolver,
    held: HeldKeys,
    lighting_speed: Option<u8>,
}

impl Engine {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            held: HeldKeys::new(),
            lighting_speed: None,
        }
    }

    /// Animation speed sent to the lighting layer at boot
    pub fn with_lighting_speed(mut self, speed: Option<u8>) -> Self {
        self.lighting_speed = speed;
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut Resolver {
        &mut self.resolver
    }

    pub fn held_keys(&self) -> &HeldKeys {
        &self.held
    }

    /// Modifiers currently held on the output side
    pub fn modifiers(&self) -> Modifiers {
        self.held.modifiers()
    }

    /// Process one press or release edge
    pub fn process_event(&mut self, event: KeyEvent) -> Outcome {
        let modifiers = self.held.modifiers();
        let mut emissions = Emissions::new();
        let dispatch = self.resolver.handle(event, modifiers, &mut emissions);
        if dispatch == Dispatch::Unhandled {
            log::debug!("{}: no binding", event);
        }
        self.track(&emissions);
        Outcome {
            dispatch,
            emissions,
        }
    }

    /// Power-on sequence: enable lighting, apply boot cycles, set speed
    pub fn boot(&mut self) -> Emissions {
        let mut emissions = Emissions::new();
        emissions.push(Emission::activate(LightingCommand::Enable));
        let applied = self.resolver.boot(&mut emissions);
        if let Some(speed) = self.lighting_speed {
            emissions.push(Emission::activate(LightingCommand::Speed(speed)));
        }
        log::debug!("boot: applied {} cycle(s)", applied);
        emissions
    }

    /// Deactivate every held key and drop all commitments.
    ///
    /// Used when the event stream is interrupted and releases will never
    /// arrive.
    pub fn release_all(&mut self) -> Emissions {
        let emissions: Emissions = self
            .held
            .keys()
            .into_iter()
            .map(Emission::deactivate)
            .collect();
        if !emissions.is_empty() {
            log::info!("releasing {} held key(s)", emissions.len());
        }
        self.held.clear();
        self.resolver.reset();
        emissions
    }

    fn track(&mut self, emissions: &[Emission]) {
        for emission in emissions {
            if let Err(e) = self.held.apply(emission) {
                log::warn!("output: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::DualRoleBinding;
    use crate::{Key, TriggerId};

    const BSDL: TriggerId = TriggerId::new(0, 11);
    const SHIFT: TriggerId = TriggerId::new(3, 1);

    fn engine() -> Engine {
        let mut resolver = Resolver::new();
        resolver
            .bind(
                BSDL,
                DualRoleBinding::new("BSDL", BSDL, Modifiers::SHIFT, Key::BACKSPACE, Key::DELETE),
            )
            .unwrap();
        resolver.bind(SHIFT, Key::LEFT_SHIFT).unwrap();
        Engine::new(resolver)
    }

    #[test]
    fn test_engine_samples_held_modifiers() {
        let mut engine = engine();
        engine.process_event(KeyEvent::press(SHIFT));
        assert_eq!(engine.modifiers(), Modifiers::LEFT_SHIFT);

        let outcome = engine.process_event(KeyEvent::press(BSDL));
        assert_eq!(outcome.dispatch, Dispatch::Handled);
        assert_eq!(outcome.emissions.as_slice(), &[Emission::activate(Key::DELETE)]);
        assert!(engine.held_keys().is_held(Key::DELETE));
    }

    #[test]
    fn test_engine_unbound_trigger() {
        let mut engine = engine();
        let outcome = engine.process_event(KeyEvent::press(TriggerId::new(9, 9)));
        assert_eq!(outcome.dispatch, Dispatch::Unhandled);
        assert!(outcome.emissions.is_empty());
    }

    #[test]
    fn test_release_all() {
        let mut engine = engine();
        engine.process_event(KeyEvent::press(SHIFT));
        engine.process_event(KeyEvent::press(BSDL));

        let released = engine.release_all();
        assert_eq!(
            released.as_slice(),
            &[Emission::deactivate(Key::DELETE), Emission::deactivate(Key::LEFT_SHIFT)]
        );
        assert!(engine.held_keys().is_empty());
        assert!(engine.resolver().committed().is_empty());
    }

    #[test]
    fn test_boot_without_cycles() {
        let mut engine = engine().with_lighting_speed(Some(0x40));
        let boot = engine.boot();
        assert_eq!(
            boot.as_slice(),
            &[
                Emission::activate(LightingCommand::Enable),
                Emission::activate(LightingCommand::Speed(0x40)),
            ]
        );
    }
}
