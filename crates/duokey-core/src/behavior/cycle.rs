// Duokey Cycle Keys
// Step through a fixed list of lighting commands, one per press

use crate::{Emission, LightingCommand, TriggerId};

/// A key that sends the next command of a rotation each time it is pressed.
///
/// The cursor belongs to the instance: two cycle keys with the same steps
/// rotate independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleBinding {
    name: String,
    trigger: TriggerId,
    steps: Vec<LightingCommand>,
    cursor: usize,
    apply_on_init: bool,
}

impl CycleBinding {
    /// Returns `None` when `steps` is empty.
    pub fn new(
        name: impl Into<String>,
        trigger: TriggerId,
        steps: Vec<LightingCommand>,
    ) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            trigger,
            steps,
            cursor: 0,
            apply_on_init: false,
        })
    }

    /// Also send the first step once when the keyboard boots
    pub fn with_apply_on_init(mut self, apply_on_init: bool) -> Self {
        self.apply_on_init = apply_on_init;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger(&self) -> TriggerId {
        self.trigger
    }

    pub fn steps(&self) -> &[LightingCommand] {
        &self.steps
    }

    /// Index of the step the next press sends
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn apply_on_init(&self) -> bool {
        self.apply_on_init
    }

    /// Return the current step and move the cursor, wrapping at the end
    pub fn advance(&mut self) -> LightingCommand {
        let step = self.steps[self.cursor];
        self.cursor = (self.cursor + 1) % self.steps.len();
        log::debug!("{} {}: {} (next {})", self.name, self.trigger, step, self.cursor);
        step
    }

    pub fn on_press(&mut self) -> Emission {
        Emission::activate(self.advance())
    }

    /// Commands are one-shot; there is nothing to release.
    pub fn on_release(&mut self) -> Option<Emission> {
        None
    }
}
