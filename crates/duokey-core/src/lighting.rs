// Duokey Lighting Commands
// Opaque requests for the firmware's lighting layer; nothing is rendered here

use std::fmt;

use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Lighting effect selectable from a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum LightingMode {
    SolidColor,
    SolidReactiveSimple,
    Off,
}

/// Hue/saturation/value triple, one byte each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Hsv {
    pub hue: u8,
    pub saturation: u8,
    pub value: u8,
}

impl Hsv {
    pub const fn new(hue: u8, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}

impl From<[u8; 3]> for Hsv {
    fn from([hue, saturation, value]: [u8; 3]) -> Self {
        Self::new(hue, saturation, value)
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsv(0x{:02X}, 0x{:02X}, 0x{:02X})",
            self.hue, self.saturation, self.value
        )
    }
}

/// A one-shot command for the lighting layer.
///
/// Commands are fire-and-forget: they are only ever activated, never
/// deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightingCommand {
    Enable,
    Mode(LightingMode),
    Hsv(Hsv),
    Speed(u8),
}

impl fmt::Display for LightingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightingCommand::Enable => write!(f, "lighting on"),
            LightingCommand::Mode(mode) => write!(f, "mode {}", mode),
            LightingCommand::Hsv(hsv) => write!(f, "colour {}", hsv),
            LightingCommand::Speed(speed) => write!(f, "speed 0x{:02X}", speed),
        }
    }
}

/// Reactive, solid, then off
pub fn default_mode_cycle() -> Vec<LightingCommand> {
    vec![
        LightingCommand::Mode(LightingMode::SolidReactiveSimple),
        LightingCommand::Mode(LightingMode::SolidColor),
        LightingCommand::Mode(LightingMode::Off),
    ]
}

/// Cyan, magenta and orange at full saturation, then white
pub fn default_colour_cycle() -> Vec<LightingCommand> {
    [0x80, 0xEB, 0x03]
        .into_iter()
        .map(|hue| Hsv::new(hue, 0xFF, 0xFF))
        .chain(std::iter::once(Hsv::new(0x00, 0x00, 0xFF)))
        .map(LightingCommand::Hsv)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!(
            "solid_reactive_simple".parse::<LightingMode>(),
            Ok(LightingMode::SolidReactiveSimple)
        );
        assert_eq!(LightingMode::SolidColor.to_string(), "solid_color");
        assert!("rainbow".parse::<LightingMode>().is_err());
    }

    #[test]
    fn test_default_colour_cycle_ends_white() {
        let cycle = default_colour_cycle();
        assert_eq!(cycle.len(), 4);
        assert_eq!(cycle[0], LightingCommand::Hsv(Hsv::new(0x80, 0xFF, 0xFF)));
        assert_eq!(cycle[3], LightingCommand::Hsv(Hsv::new(0x00, 0x00, 0xFF)));
    }

    #[test]
    fn test_command_display() {
        assert_eq!(
            LightingCommand::Hsv(Hsv::new(0xEB, 0xFF, 0xFF)).to_string(),
            "colour hsv(0xEB, 0xFF, 0xFF)"
        );
        assert_eq!(LightingCommand::Speed(0x40).to_string(), "speed 0x40");
    }
}
