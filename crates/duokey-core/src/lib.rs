// Duokey Core Library
// Dual-role key resolution and the data models around it

pub mod action;
pub mod behavior;
pub mod engine;
pub mod key;
pub mod lighting;
pub mod modifier;
pub mod output;
pub mod resolver;
pub mod script;
pub mod trigger;

#[cfg(feature = "host")]
pub mod config;

pub use action::{Emission, OutputAction, Phase};
pub use behavior::{Behavior, Commitment, CycleBinding, DualRoleBinding, Role};
pub use engine::{Engine, Outcome};
pub use key::Key;
pub use lighting::{Hsv, LightingCommand, LightingMode};
pub use modifier::{ModifierError, Modifiers};
pub use output::{Emissions, HeldKeys, OutputError, OutputSink};
pub use resolver::{Dispatch, Resolver, ResolverError};
pub use script::ScriptError;
pub use trigger::{Edge, KeyEvent, TriggerId};

#[cfg(feature = "host")]
pub use config::{Config, ConfigError};
