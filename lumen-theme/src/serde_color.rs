//! Serde helpers storing [Color] as a hex string.
//!
//! Use with `#[serde(with = "lumen_theme::serde_color")]`. Opaque colors are
//! written as `#RRGGBB`, translucent ones as `#RRGGBBAA`.

use serde::{Deserialize, Deserializer, Serializer};
use vello::peniko::Color;

use crate::palette::{parse_hex_color, to_hex};

/// Serialize a Color as a hex string.
pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let alpha = (color.components[3].clamp(0.0, 1.0) * 255.0).round() as u8;
    let hex = if alpha == 255 {
        to_hex(*color)
    } else {
        format!("{}{:02X}", to_hex(*color), alpha)
    };
    serializer.serialize_str(&hex)
}

/// Deserialize a Color from a hex string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let hex = String::deserialize(deserializer)?;
    parse_hex_color(&hex).map_err(Error::custom)
}
