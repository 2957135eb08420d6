// Duokey Output Layer
// Emission sinks and tracking of activated output keys

mod state;

use smallvec::SmallVec;

use crate::Emission;

pub use state::{HeldKeys, OutputError};

/// Per-event emission buffer; a single event rarely yields more than two
pub type Emissions = SmallVec<[Emission; 2]>;

/// Consumer of `emit(action, phase)` requests, i.e. the firmware's
/// report layer or a recorder in tests.
pub trait OutputSink {
    fn emit(&mut self, emission: Emission);
}

impl OutputSink for Vec<Emission> {
    fn emit(&mut self, emission: Emission) {
        self.push(emission);
    }
}

impl OutputSink for Emissions {
    fn emit(&mut self, emission: Emission) {
        self.push(emission);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit(&mut self, emission: Emission) {
        (**self).emit(emission);
    }
}
