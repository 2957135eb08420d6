// Duokey Key Type
// Represents a single HID keyboard usage id

use std::fmt;
use std::str::FromStr;

include!(concat!(env!("OUT_DIR"), "/key_codes.rs"));

/// Short spellings accepted when parsing, on top of the canonical names
const KEY_ALIASES: &[(&str, u16)] = &[
    ("1", 0x1E),
    ("2", 0x1F),
    ("3", 0x20),
    ("4", 0x21),
    ("5", 0x22),
    ("6", 0x23),
    ("7", 0x24),
    ("8", 0x25),
    ("9", 0x26),
    ("0", 0x27),
    ("ENT", 0x28),
    ("ESC", 0x29),
    ("BSPC", 0x2A),
    ("SPC", 0x2C),
    ("MINS", 0x2D),
    ("EQL", 0x2E),
    ("LBRC", 0x2F),
    ("RBRC", 0x30),
    ("BSLS", 0x31),
    ("SCLN", 0x33),
    ("QUOT", 0x34),
    ("GRV", 0x35),
    ("COMM", 0x36),
    ("SLSH", 0x38),
    ("CAPS", 0x39),
    ("PSCR", 0x46),
    ("INS", 0x49),
    ("PGUP", 0x4B),
    ("DEL", 0x4C),
    ("PGDN", 0x4E),
    ("RGHT", 0x4F),
    ("APP", 0x65),
    ("LCTL", 0xE0),
    ("LSFT", 0xE1),
    ("LALT", 0xE2),
    ("LGUI", 0xE3),
    ("RCTL", 0xE4),
    ("RSFT", 0xE5),
    ("RALT", 0xE6),
    ("RGUI", 0xE7),
];

/// Try to parse a key name to a key
///
/// Accepts canonical names, short aliases, and an optional `KC_` prefix,
/// case-insensitively.
pub fn key_from_name(name: &str) -> Option<Key> {
    let name_upper = name.trim().to_uppercase();
    let name_upper = name_upper.strip_prefix("KC_").unwrap_or(&name_upper);
    KEY_TABLE
        .iter()
        .chain(KEY_ALIASES)
        .find(|(n, _)| *n == name_upper)
        .map(|(_, code)| Key::from(*code))
}
