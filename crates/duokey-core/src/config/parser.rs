// Duokey Config Parser - TOML with Serde
// Parses keymap configuration from TOML files

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use strum::IntoEnumIterator;

use crate::behavior::{CycleBinding, DualRoleBinding};
use crate::resolver::{Resolver, ResolverError};
use crate::{Engine, Hsv, Key, LightingCommand, LightingMode, ModifierError, Modifiers, TriggerId};

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Invalid lighting mode: {0}")]
    InvalidLightingMode(String),

    #[error("Dual-role key '{0}' has an empty modifier mask")]
    EmptyMask(String),

    #[error("Cycle '{0}' has no steps")]
    EmptyCycle(String),

    #[error("'{0}' is not bound to any trigger")]
    NoTriggers(String),

    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

impl From<ModifierError> for ConfigError {
    fn from(err: ModifierError) -> Self {
        match err {
            ModifierError::UnknownAlias(alias) => ConfigError::InvalidModifier(alias),
        }
    }
}

/// Root TOML table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub general: Option<GeneralConfig>,

    #[serde(default)]
    pub lighting: Option<LightingConfig>,

    /// Plain keys
    #[serde(default)]
    pub passthrough: Vec<PassthroughTomlEntry>,

    /// Modifier-dependent keys
    #[serde(default)]
    pub dual_role: Vec<DualRoleTomlEntry>,

    /// Lighting rotation keys
    #[serde(default)]
    pub cycle: Vec<CycleTomlEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Keyboard or layout name, informational only
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightingConfig {
    /// Animation speed sent at boot
    pub speed: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassthroughTomlEntry {
    pub trigger: TriggerId,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DualRoleTomlEntry {
    pub name: String,

    /// Every trigger gets its own binding instance
    pub triggers: Vec<TriggerId>,

    /// Modifier aliases; any one of them selects the alternate key
    pub mask: Vec<String>,

    pub primary: String,
    pub alternate: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CycleTomlEntry {
    pub name: String,
    pub triggers: Vec<TriggerId>,

    /// Send the first step once at boot
    #[serde(default)]
    pub apply_on_init: bool,

    pub steps: Vec<CycleStepToml>,
}

/// One step of a cycle: `{ mode = "solid_color" }` or `{ hsv = [h, s, v] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CycleStepToml {
    Mode(ModeStepToml),
    Hsv(HsvStepToml),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeStepToml {
    pub mode: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HsvStepToml {
    pub hsv: Hsv,
}

/// Validated configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub name: Option<String>,
    pub lighting_speed: Option<u8>,
    pub passthrough: Vec<PassthroughEntry>,
    pub dual_role: Vec<DualRoleEntry>,
    pub cycles: Vec<CycleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughEntry {
    pub trigger: TriggerId,
    pub key: Key,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualRoleEntry {
    pub name: String,
    pub triggers: Vec<TriggerId>,
    pub mask: Modifiers,
    pub primary: Key,
    pub alternate: Key,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEntry {
    pub name: String,
    pub triggers: Vec<TriggerId>,
    pub apply_on_init: bool,
    pub steps: Vec<LightingCommand>,
}

impl Config {
    /// Default config location (~/.config/duokey/keymap.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("duokey").join("keymap.toml"))
    }

    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// The bindings are also checked for trigger collisions.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        let config = toml_config.to_config()?;
        config.to_resolver()?;
        Ok(config)
    }

    /// Number of bindings the config produces
    pub fn binding_count(&self) -> usize {
        self.passthrough.len()
            + self.dual_role.iter().map(|e| e.triggers.len()).sum::<usize>()
            + self.cycles.iter().map(|e| e.triggers.len()).sum::<usize>()
    }

    /// Build a resolver with one fresh behavior instance per trigger
    pub fn to_resolver(&self) -> Result<Resolver, ConfigError> {
        let mut resolver = Resolver::new();

        for entry in &self.passthrough {
            resolver.bind(entry.trigger, entry.key)?;
        }

        for entry in &self.dual_role {
            for &trigger in &entry.triggers {
                let binding = DualRoleBinding::new(
                    entry.name.as_str(),
                    trigger,
                    entry.mask,
                    entry.primary,
                    entry.alternate,
                );
                resolver.bind(trigger, binding)?;
            }
        }

        for entry in &self.cycles {
            for &trigger in &entry.triggers {
                let cycle = CycleBinding::new(entry.name.as_str(), trigger, entry.steps.clone())
                    .ok_or_else(|| ConfigError::EmptyCycle(entry.name.clone()))?
                    .with_apply_on_init(entry.apply_on_init);
                resolver.bind(trigger, cycle)?;
            }
        }

        log::debug!("resolver built with {} bindings", resolver.len());
        Ok(resolver)
    }

    /// Build a ready-to-boot engine
    pub fn to_engine(&self) -> Result<Engine, ConfigError> {
        Ok(Engine::new(self.to_resolver()?).with_lighting_speed(self.lighting_speed))
    }
}

impl ConfigToml {
    /// Convert parsed TOML to the validated Config
    fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config {
            name: self.general.as_ref().and_then(|g| g.name.clone()),
            lighting_speed: self.lighting.as_ref().and_then(|l| l.speed),
            ..Config::default()
        };

        for entry in &self.passthrough {
            config.passthrough.push(PassthroughEntry {
                trigger: entry.trigger,
                key: parse_key(&entry.key)?,
            });
        }

        for entry in &self.dual_role {
            if entry.triggers.is_empty() {
                return Err(ConfigError::NoTriggers(entry.name.clone()));
            }
            let mask = Modifiers::from_aliases(entry.mask.as_slice())?;
            if mask.is_empty() {
                return Err(ConfigError::EmptyMask(entry.name.clone()));
            }
            config.dual_role.push(DualRoleEntry {
                name: entry.name.clone(),
                triggers: entry.triggers.clone(),
                mask,
                primary: parse_key(&entry.primary)?,
                alternate: parse_key(&entry.alternate)?,
            });
        }

        for entry in &self.cycle {
            if entry.triggers.is_empty() {
                return Err(ConfigError::NoTriggers(entry.name.clone()));
            }
            if entry.steps.is_empty() {
                return Err(ConfigError::EmptyCycle(entry.name.clone()));
            }
            let steps = entry
                .steps
                .iter()
                .map(parse_step)
                .collect::<Result<Vec<_>, _>>()?;
            config.cycles.push(CycleEntry {
                name: entry.name.clone(),
                triggers: entry.triggers.clone(),
                apply_on_init: entry.apply_on_init,
                steps,
            });
        }

        Ok(config)
    }
}

/// Parse a key name into a Key
fn parse_key(name: &str) -> Result<Key, ConfigError> {
    let trimmed = name.trim();
    crate::key::key_from_name(trimmed).ok_or_else(|| ConfigError::InvalidKey(trimmed.to_string()))
}

fn parse_step(step: &CycleStepToml) -> Result<LightingCommand, ConfigError> {
    match step {
        CycleStepToml::Mode(ModeStepToml { mode }) => LightingMode::from_str(mode.trim())
            .map(LightingCommand::Mode)
            .map_err(|_| {
                let known: Vec<String> = LightingMode::iter().map(|m| m.to_string()).collect();
                ConfigError::InvalidLightingMode(format!("'{}' (expected one of {})", mode, known.join(", ")))
            }),
        CycleStepToml::Hsv(HsvStepToml { hsv }) => Ok(LightingCommand::Hsv(*hsv)),
    }
}
