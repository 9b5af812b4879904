//! Built-in palettes.

use std::fmt;
use std::str::FromStr;

use crate::error::ThemeError;
use crate::palette::{ColorRole, Palette, PaletteBuilder};

/// The palettes shipped with lumen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Builder defaults: violet primary on a deep purple background.
    Default,
    /// Dark neutral background with the default violet accents.
    Dark,
    /// Material-style light palette.
    Light,
    /// Material Palenight.
    Palenight,
    /// Dracula.
    Dracula,
    /// Nord.
    Nord,
    /// Oceanic.
    Oceanic,
}

impl ThemePreset {
    /// Every preset.
    pub const ALL: [ThemePreset; 7] = [
        ThemePreset::Default,
        ThemePreset::Dark,
        ThemePreset::Light,
        ThemePreset::Palenight,
        ThemePreset::Dracula,
        ThemePreset::Nord,
        ThemePreset::Oceanic,
    ];

    /// The display name, also used as palette name.
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Default => "Default",
            ThemePreset::Dark => "Dark",
            ThemePreset::Light => "Light",
            ThemePreset::Palenight => "Palenight",
            ThemePreset::Dracula => "Dracula",
            ThemePreset::Nord => "Nord",
            ThemePreset::Oceanic => "Oceanic",
        }
    }

    /// Build the palette for this preset.
    pub fn palette(&self) -> Palette {
        match self {
            ThemePreset::Default => PaletteBuilder::new().build(),
            ThemePreset::Dark => dark(),
            ThemePreset::Light => light(),
            ThemePreset::Palenight => palenight(),
            ThemePreset::Dracula => dracula(),
            ThemePreset::Nord => nord(),
            ThemePreset::Oceanic => oceanic(),
        }
    }
}

impl fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemePreset {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemePreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ThemeError::not_found(s))
    }
}

type Rgb = (u8, u8, u8);

/// The roles every preset overrides, in this order.
struct PresetColors {
    primary: Rgb,
    primary_variant: Rgb,
    secondary: Rgb,
    secondary_variant: Rgb,
    background: Rgb,
    surface: Rgb,
    accent: Rgb,
    error: Rgb,
    warning: Rgb,
    success: Rgb,
    on_background: Rgb,
    on_surface: Rgb,
    on_primary: Rgb,
    on_secondary: Rgb,
}

fn preset(name: &str, c: PresetColors) -> Palette {
    [
        (ColorRole::Primary, c.primary),
        (ColorRole::PrimaryVariant, c.primary_variant),
        (ColorRole::Secondary, c.secondary),
        (ColorRole::SecondaryVariant, c.secondary_variant),
        (ColorRole::Background, c.background),
        (ColorRole::Surface, c.surface),
        (ColorRole::Accent, c.accent),
        (ColorRole::Error, c.error),
        (ColorRole::Warning, c.warning),
        (ColorRole::Success, c.success),
        (ColorRole::OnBackground, c.on_background),
        (ColorRole::OnSurface, c.on_surface),
        (ColorRole::OnPrimary, c.on_primary),
        (ColorRole::OnSecondary, c.on_secondary),
    ]
    .into_iter()
    .fold(PaletteBuilder::new().name(name), |builder, (role, (r, g, b))| {
        builder.rgb(role, r, g, b)
    })
    .build()
}

const WHITE: Rgb = (255, 255, 255);
const INK: Rgb = (33, 33, 33);

fn dark() -> Palette {
    preset("Dark", PresetColors {
        primary: (149, 128, 255),
        primary_variant: (129, 108, 235),
        secondary: (48, 25, 88),
        secondary_variant: (38, 15, 78),
        background: (24, 24, 37),
        surface: (32, 32, 45),
        accent: (255, 128, 149),
        error: (255, 69, 58),
        warning: (255, 159, 10),
        success: (48, 209, 88),
        on_background: WHITE,
        on_surface: WHITE,
        on_primary: WHITE,
        on_secondary: WHITE,
    })
}

fn light() -> Palette {
    preset("Light", PresetColors {
        primary: (98, 0, 238),
        primary_variant: (55, 0, 179),
        secondary: (3, 218, 198),
        secondary_variant: (1, 135, 134),
        background: (245, 245, 245),
        surface: (255, 255, 255),
        accent: (255, 128, 149),
        error: (176, 0, 32),
        warning: (255, 152, 0),
        success: (76, 175, 80),
        on_background: INK,
        on_surface: INK,
        on_primary: WHITE,
        on_secondary: WHITE,
    })
}

fn palenight() -> Palette {
    preset("Palenight", PresetColors {
        primary: (199, 146, 234),
        primary_variant: (179, 126, 214),
        secondary: (92, 103, 153),
        secondary_variant: (72, 83, 133),
        background: (41, 45, 62),
        surface: (34, 39, 54),
        accent: (137, 221, 255),
        error: (255, 85, 85),
        warning: (255, 198, 109),
        success: (195, 232, 141),
        on_background: WHITE,
        on_surface: WHITE,
        on_primary: INK,
        on_secondary: WHITE,
    })
}

fn dracula() -> Palette {
    preset("Dracula", PresetColors {
        primary: (189, 147, 249),
        primary_variant: (169, 127, 229),
        secondary: (255, 121, 198),
        secondary_variant: (235, 101, 178),
        background: (40, 42, 54),
        surface: (68, 71, 90),
        accent: (80, 250, 123),
        error: (255, 85, 85),
        warning: (255, 184, 108),
        success: (80, 250, 123),
        on_background: (248, 248, 242),
        on_surface: (248, 248, 242),
        on_primary: INK,
        on_secondary: INK,
    })
}

fn nord() -> Palette {
    preset("Nord", PresetColors {
        primary: (136, 192, 208),
        primary_variant: (129, 161, 193),
        secondary: (94, 129, 172),
        secondary_variant: (76, 86, 106),
        background: (46, 52, 64),
        surface: (59, 66, 82),
        accent: (180, 142, 173),
        error: (191, 97, 106),
        warning: (235, 203, 139),
        success: (163, 190, 140),
        on_background: (229, 233, 240),
        on_surface: (229, 233, 240),
        on_primary: INK,
        on_secondary: WHITE,
    })
}

fn oceanic() -> Palette {
    preset("Oceanic", PresetColors {
        primary: (102, 217, 239),
        primary_variant: (82, 197, 219),
        secondary: (79, 91, 102),
        secondary_variant: (59, 71, 82),
        background: (27, 43, 52),
        surface: (34, 50, 59),
        accent: (199, 146, 234),
        error: (249, 38, 114),
        warning: (253, 151, 31),
        success: (166, 226, 46),
        on_background: (237, 237, 237),
        on_surface: (237, 237, 237),
        on_primary: INK,
        on_secondary: WHITE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_carry_their_names() {
        for preset in ThemePreset::ALL {
            assert_eq!(preset.palette().name(), preset.name());
        }
    }

    #[test]
    fn preset_colors_match_table() {
        assert_eq!(ThemePreset::Dracula.palette().hex_of(ColorRole::Primary), "#BD93F9");
        assert_eq!(ThemePreset::Nord.palette().hex_of(ColorRole::Background), "#2E3440");
        assert_eq!(ThemePreset::Light.palette().hex_of(ColorRole::OnSurface), "#212121");
        // Roles a preset does not override keep the builder default.
        assert_eq!(ThemePreset::Nord.palette().hex_of(ColorRole::Info), "#64D2FF");
    }

    #[test]
    fn preset_names_parse_case_insensitively() {
        assert_eq!("palenight".parse::<ThemePreset>().unwrap(), ThemePreset::Palenight);
        assert_eq!(" NORD ".parse::<ThemePreset>().unwrap(), ThemePreset::Nord);
        assert!("solarized".parse::<ThemePreset>().is_err());
    }
}
