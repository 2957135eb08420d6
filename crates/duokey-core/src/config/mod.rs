// Duokey Config API
// TOML keymap files and the default config location

pub mod parser;

pub use parser::{
    Config, ConfigError, ConfigToml, CycleEntry, DualRoleEntry, PassthroughEntry,
};
