//! # Palettes
//!
//! A [Palette] is an immutable table of semantic colors, one per [ColorRole].
//! Palettes are produced by a [PaletteBuilder]; switching theme always means
//! publishing a *new* palette, never editing an existing one.
//!
//! ```rust
//! use lumen_theme::palette::{ColorRole, PaletteBuilder};
//!
//! let palette = PaletteBuilder::new()
//!     .name("Ocean")
//!     .rgb(ColorRole::Primary, 0, 120, 215)
//!     .build();
//!
//! assert_eq!(palette.hex_of(ColorRole::Primary), "#0078D7");
//! ```

use std::fmt;
use std::str::FromStr;

use vello::peniko::Color;

use crate::error::{ThemeError, ThemeResult};

/// Absorbs the f32 error of an 8-bit channel that went through `n / 255.0`,
/// so truncation of `c * 255` lands back on `n`.
const CHANNEL_EPSILON: f32 = 1e-4;

/// A semantic color slot inside a [Palette].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorRole {
    /// Main brand color, used for selected and accented surfaces.
    Primary,
    /// Darker companion of [ColorRole::Primary].
    PrimaryVariant,
    /// Secondary brand color.
    Secondary,
    /// Darker companion of [ColorRole::Secondary].
    SecondaryVariant,
    /// Highlight color for small accents.
    Accent,
    /// Window background.
    Background,
    /// Background of cards, fields and other raised surfaces.
    Surface,
    /// Error status color.
    Error,
    /// Warning status color.
    Warning,
    /// Success status color.
    Success,
    /// Informational status color.
    Info,
    /// Content drawn on top of [ColorRole::Primary].
    OnPrimary,
    /// Content drawn on top of [ColorRole::Secondary].
    OnSecondary,
    /// Content drawn on top of [ColorRole::Background].
    OnBackground,
    /// Content drawn on top of [ColorRole::Surface].
    OnSurface,
    /// Content drawn on top of [ColorRole::Error].
    OnError,
    /// Content drawn on top of [ColorRole::Warning].
    OnWarning,
    /// Content drawn on top of [ColorRole::Success].
    OnSuccess,
    /// Content drawn on top of [ColorRole::Info].
    OnInfo,
    /// Muted color for disabled widgets.
    Disabled,
    /// Scrim behind dialogs, also used for shadows.
    Overlay,
}

impl ColorRole {
    /// Number of roles.
    pub const COUNT: usize = 21;

    /// Every role in declaration order.
    pub const ALL: [ColorRole; Self::COUNT] = [
        ColorRole::Primary,
        ColorRole::PrimaryVariant,
        ColorRole::Secondary,
        ColorRole::SecondaryVariant,
        ColorRole::Accent,
        ColorRole::Background,
        ColorRole::Surface,
        ColorRole::Error,
        ColorRole::Warning,
        ColorRole::Success,
        ColorRole::Info,
        ColorRole::OnPrimary,
        ColorRole::OnSecondary,
        ColorRole::OnBackground,
        ColorRole::OnSurface,
        ColorRole::OnError,
        ColorRole::OnWarning,
        ColorRole::OnSuccess,
        ColorRole::OnInfo,
        ColorRole::Disabled,
        ColorRole::Overlay,
    ];

    /// Get the string representation of the role (used as config key).
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::PrimaryVariant => "primaryVariant",
            ColorRole::Secondary => "secondary",
            ColorRole::SecondaryVariant => "secondaryVariant",
            ColorRole::Accent => "accent",
            ColorRole::Background => "background",
            ColorRole::Surface => "surface",
            ColorRole::Error => "error",
            ColorRole::Warning => "warning",
            ColorRole::Success => "success",
            ColorRole::Info => "info",
            ColorRole::OnPrimary => "onPrimary",
            ColorRole::OnSecondary => "onSecondary",
            ColorRole::OnBackground => "onBackground",
            ColorRole::OnSurface => "onSurface",
            ColorRole::OnError => "onError",
            ColorRole::OnWarning => "onWarning",
            ColorRole::OnSuccess => "onSuccess",
            ColorRole::OnInfo => "onInfo",
            ColorRole::Disabled => "disabled",
            ColorRole::Overlay => "overlay",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorRole {
    type Err = ThemeError;

    /// Parse a role from its config key. Matching ignores case and `_`/`-`,
    /// so `on_surface`, `on-surface` and `onSurface` are the same role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        ColorRole::ALL
            .into_iter()
            .find(|role| role.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| ThemeError::unknown_role(s))
    }
}

/// An immutable, named table of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    colors: [Color; ColorRole::COUNT],
}

impl Palette {
    /// Start building a palette from the default colors.
    pub fn builder() -> PaletteBuilder {
        PaletteBuilder::new()
    }

    /// The display name of this palette.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The color assigned to `role`.
    pub fn color(&self, role: ColorRole) -> Color {
        self.colors[role.index()]
    }

    /// The color of `role` formatted as `#RRGGBB`.
    ///
    /// Channels are scaled to 0..=255 and truncated, so a red channel of
    /// `0.999` yields `FE`.
    pub fn hex_of(&self, role: ColorRole) -> String {
        to_hex(self.color(role))
    }

    /// Like [Palette::hex_of], looking the role up by name.
    pub fn hex_of_name(&self, role: &str) -> ThemeResult<String> {
        let role = role.parse::<ColorRole>()?;
        Ok(self.hex_of(role))
    }

    /// Iterate over every role and its color in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, Color)> + '_ {
        ColorRole::ALL.into_iter().map(|role| (role, self.color(role)))
    }

    /// Create a builder seeded with this palette's name and colors.
    pub fn to_builder(&self) -> PaletteBuilder {
        PaletteBuilder {
            name: self.name.clone(),
            colors: self.colors,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        PaletteBuilder::new().build()
    }
}

/// Format a color as uppercase `#RRGGBB`, truncating each channel.
pub fn to_hex(color: Color) -> String {
    let [r, g, b, _] = color.components;
    format!(
        "#{:02X}{:02X}{:02X}",
        truncate_channel(r),
        truncate_channel(g),
        truncate_channel(b)
    )
}

fn truncate_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0 + CHANNEL_EPSILON).floor().min(255.0) as u8
}

/// Parse a hex color string with optional alpha channel.
///
/// Supports both RGB and RGBA formats:
/// - `#rrggbb` - 6 characters, opaque
/// - `#rrggbbaa` - 8 characters, with alpha channel
pub fn parse_hex_color(input: &str) -> ThemeResult<Color> {
    let hex = input.trim().trim_start_matches('#');
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return Err(ThemeError::invalid_color(
            input,
            "hex color must be 6 or 8 characters",
        ));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| ThemeError::invalid_color(input, "not a hexadecimal number"))
    };

    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;
    if hex.len() == 8 {
        Ok(Color::from_rgba8(r, g, b, channel(6..8)?))
    } else {
        Ok(Color::from_rgb8(r, g, b))
    }
}

/// Builder for [Palette]. Every role starts out with a documented default.
#[derive(Debug, Clone)]
pub struct PaletteBuilder {
    name: String,
    colors: [Color; ColorRole::COUNT],
}

impl PaletteBuilder {
    /// Create a builder holding the default palette.
    pub fn new() -> Self {
        let mut builder = Self {
            name: "Default".to_string(),
            colors: [Color::TRANSPARENT; ColorRole::COUNT],
        };

        for role in ColorRole::ALL {
            builder.colors[role.index()] = default_color(role);
        }

        builder
    }

    /// Set the palette name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Assign a color to a role.
    pub fn with(mut self, role: ColorRole, color: Color) -> Self {
        self.colors[role.index()] = color;
        self
    }

    /// Assign an opaque 8-bit RGB color to a role.
    pub fn rgb(self, role: ColorRole, r: u8, g: u8, b: u8) -> Self {
        self.with(role, Color::from_rgb8(r, g, b))
    }

    /// Assign a color given as `#rrggbb` or `#rrggbbaa`.
    pub fn hex(self, role: ColorRole, hex: &str) -> ThemeResult<Self> {
        let color = parse_hex_color(hex)?;
        Ok(self.with(role, color))
    }

    /// Finish the palette. Unset roles keep their defaults.
    pub fn build(self) -> Palette {
        Palette {
            name: self.name,
            colors: self.colors,
        }
    }
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_color(role: ColorRole) -> Color {
    match role {
        ColorRole::Primary => Color::from_rgb8(149, 128, 255),
        ColorRole::PrimaryVariant => Color::from_rgb8(129, 108, 235),
        ColorRole::Secondary => Color::from_rgb8(48, 25, 88),
        ColorRole::SecondaryVariant => Color::from_rgb8(38, 15, 78),
        ColorRole::Accent => Color::from_rgb8(255, 128, 149),
        ColorRole::Background => Color::from_rgb8(36, 17, 70),
        ColorRole::Surface => Color::from_rgb8(48, 25, 88),
        ColorRole::Error => Color::from_rgb8(255, 69, 58),
        ColorRole::Warning => Color::from_rgb8(255, 159, 10),
        ColorRole::Success => Color::from_rgb8(48, 209, 88),
        ColorRole::Info => Color::from_rgb8(100, 210, 255),
        ColorRole::OnPrimary
        | ColorRole::OnSecondary
        | ColorRole::OnBackground
        | ColorRole::OnSurface
        | ColorRole::OnError => Color::WHITE,
        ColorRole::OnWarning | ColorRole::OnSuccess | ColorRole::OnInfo => {
            Color::from_rgb8(41, 41, 41)
        },
        ColorRole::Disabled => Color::from_rgb8(128, 128, 128).with_alpha(0.38),
        ColorRole::Overlay => Color::BLACK.with_alpha(0.5),
    }
}
