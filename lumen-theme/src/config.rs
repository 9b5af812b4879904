//! # Theme Configuration
//!
//! Chooses the palette an application starts with. Settings come from the
//! environment, from a TOML or JSON file, or from code.
//!
//! ## Environment Variables
//!
//! - `LUMEN_THEME`: the theme to use (`dracula`, `custom:corporate`, `file:./night.toml`)
//! - `LUMEN_THEME_FALLBACK`: used when `LUMEN_THEME` cannot be resolved
//! - `LUMEN_THEME_CONFIG`: path to a configuration file
//!
//! Variables override values read from the configuration file.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [theme]
//! default = "custom:corporate"
//! fallback = "light"
//!
//! [palettes.corporate]
//! base = "light"
//! primary = "#0078D7"
//! onPrimary = "#FFFFFF"
//! ```
//!
//! A palette file referenced by `file:` holds a single palette table:
//!
//! ```toml
//! name = "Night Shift"
//! base = "dark"
//! accent = "#FFB86C"
//! ```
//!
//! ## Programmatic Configuration
//!
//! ```rust
//! use lumen_theme::config::{ThemeConfig, ThemeSource};
//! use lumen_theme::presets::ThemePreset;
//!
//! let config = ThemeConfig::new()
//!     .with_default_theme(ThemeSource::Preset(ThemePreset::Nord))
//!     .with_fallback_theme(ThemeSource::Preset(ThemePreset::Light));
//!
//! let palette = config.resolve().unwrap();
//! assert_eq!(palette.name(), "Nord");
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vello::peniko::Color;

use crate::error::{ThemeError, ThemeResult};
use crate::palette::{ColorRole, Palette};
use crate::presets::ThemePreset;

/// Environment variable naming the theme.
pub const THEME_ENV: &str = "LUMEN_THEME";
/// Environment variable naming the fallback theme.
pub const FALLBACK_ENV: &str = "LUMEN_THEME_FALLBACK";
/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV: &str = "LUMEN_THEME_CONFIG";

/// Where a palette comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSource {
    /// A built-in palette.
    Preset(ThemePreset),
    /// A palette defined in the `[palettes]` table of the configuration.
    Custom(String),
    /// A palette file.
    File(PathBuf),
}

impl ThemeSource {
    /// Parse `dark`, `custom:name` or `file:path`.
    ///
    /// Bare names that are not presets are treated as custom palette names.
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if let Some(name) = source.strip_prefix("custom:") {
            return ThemeSource::Custom(name.to_string());
        }
        if let Some(path) = source.strip_prefix("file:") {
            return ThemeSource::File(PathBuf::from(path));
        }
        match source.parse::<ThemePreset>() {
            Ok(preset) => ThemeSource::Preset(preset),
            Err(_) => ThemeSource::Custom(source.to_string()),
        }
    }
}

/// A color stored as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(#[serde(with = "crate::serde_color")] pub Color);

/// A palette described as overrides on top of a preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteSpec {
    /// Palette name. Defaults to the table key or file stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Preset the overrides apply to. Defaults to [ThemePreset::Default].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Role name to color.
    #[serde(flatten)]
    pub colors: IndexMap<String, HexColor>,
}

impl PaletteSpec {
    /// Build the palette. Unknown role or base names are errors.
    pub fn build(&self, fallback_name: &str) -> ThemeResult<Palette> {
        let base = match &self.base {
            Some(base) => base.parse::<ThemePreset>()?,
            None => ThemePreset::Default,
        };
        let name = self.name.as_deref().unwrap_or(fallback_name);

        let mut builder = base.palette().to_builder().name(name);
        for (key, color) in &self.colors {
            let role = key.parse::<ColorRole>()?;
            builder = builder.with(role, color.0);
        }
        Ok(builder.build())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ThemeSection {
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    fallback: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: ThemeSection,
    #[serde(default)]
    palettes: IndexMap<String, PaletteSpec>,
}

/// Theme settings for an application.
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// The theme to use.
    pub default_theme: ThemeSource,
    /// Used when `default_theme` cannot be resolved.
    pub fallback_theme: Option<ThemeSource>,
    custom_palettes: IndexMap<String, PaletteSpec>,
    base_dir: Option<PathBuf>,
}

impl ThemeConfig {
    /// The default preset and no fallback.
    pub fn new() -> Self {
        Self {
            default_theme: ThemeSource::Preset(ThemePreset::Default),
            fallback_theme: None,
            custom_palettes: IndexMap::new(),
            base_dir: None,
        }
    }

    /// Read the `LUMEN_THEME*` variables.
    ///
    /// A configuration file named by `LUMEN_THEME_CONFIG` is loaded first; a
    /// broken file is logged and ignored.
    pub fn from_env_or_default() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Like [ThemeConfig::from_env_or_default] with a custom variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) => Self::from_file(&path).unwrap_or_else(|err| {
                log::warn!("Ignoring theme config {}: {}", path, err);
                Self::new()
            }),
            None => Self::new(),
        };

        if let Some(theme) = lookup(THEME_ENV) {
            config.default_theme = ThemeSource::parse(&theme);
        }
        if let Some(fallback) = lookup(FALLBACK_ENV) {
            config.fallback_theme = Some(ThemeSource::parse(&fallback));
        }

        config
    }

    /// Load a configuration file. The format follows the extension
    /// (`.toml` or `.json`). Relative `file:` paths resolve against the
    /// file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let path = path.as_ref();
        let content = read_file(path)?;

        let file: ConfigFile = match extension(path).as_deref() {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ThemeError::parse_error(path, e.to_string()))?
            },
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ThemeError::parse_error(path, e.to_string()))?,
            _ => {
                return Err(ThemeError::parse_error(
                    path,
                    "unsupported configuration format, use .toml or .json",
                ))
            },
        };

        let mut config = Self::from_parts(file);
        config.base_dir = path.parent().map(Path::to_path_buf);
        log::debug!("Loaded theme config from {:?}", path);
        Ok(config)
    }

    /// Parse TOML configuration content.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(Self::from_parts(file))
    }

    fn from_parts(file: ConfigFile) -> Self {
        let mut config = Self::new();
        if let Some(default) = file.theme.default {
            config.default_theme = ThemeSource::parse(&default);
        }
        config.fallback_theme = file.theme.fallback.as_deref().map(ThemeSource::parse);
        config.custom_palettes = file.palettes;
        config
    }

    /// Set the theme to use.
    pub fn with_default_theme(mut self, theme: ThemeSource) -> Self {
        self.default_theme = theme;
        self
    }

    /// Set the fallback theme.
    pub fn with_fallback_theme(mut self, theme: ThemeSource) -> Self {
        self.fallback_theme = Some(theme);
        self
    }

    /// Register a custom palette under `name`.
    pub fn with_custom_palette(mut self, name: impl Into<String>, spec: PaletteSpec) -> Self {
        self.custom_palettes.insert(name.into(), spec);
        self
    }

    /// Names of the custom palettes.
    pub fn custom_palette_names(&self) -> impl Iterator<Item = &str> {
        self.custom_palettes.keys().map(String::as_str)
    }

    /// Resolve the configured palette, trying the fallback on failure.
    pub fn resolve(&self) -> ThemeResult<Palette> {
        match self.resolve_source(&self.default_theme) {
            Ok(palette) => Ok(palette),
            Err(err) => match &self.fallback_theme {
                Some(fallback) => {
                    log::warn!(
                        "Theme {:?} unavailable ({}), using fallback {:?}",
                        self.default_theme,
                        err,
                        fallback
                    );
                    self.resolve_source(fallback)
                },
                None => Err(err),
            },
        }
    }

    /// Resolve the configured palette, ending at the default preset.
    pub fn resolve_or_default(&self) -> Palette {
        self.resolve().unwrap_or_else(|err| {
            log::warn!("No configured theme could be resolved ({}), using defaults", err);
            ThemePreset::Default.palette()
        })
    }

    /// Resolve one source.
    pub fn resolve_source(&self, source: &ThemeSource) -> ThemeResult<Palette> {
        match source {
            ThemeSource::Preset(preset) => Ok(preset.palette()),
            ThemeSource::Custom(name) => self
                .custom_palettes
                .get(name)
                .ok_or_else(|| ThemeError::not_found(name))?
                .build(name),
            ThemeSource::File(path) => load_palette_file(self.locate(path)),
        }
    }

    /// Paths of palette files this configuration reads.
    pub fn palette_files(&self) -> Vec<PathBuf> {
        [Some(&self.default_theme), self.fallback_theme.as_ref()]
            .into_iter()
            .flatten()
            .filter_map(|source| match source {
                ThemeSource::File(path) => Some(self.locate(path)),
                _ => None,
            })
            .collect()
    }

    fn locate(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a single palette from a `.toml` or `.json` file.
pub fn load_palette_file<P: AsRef<Path>>(path: P) -> ThemeResult<Palette> {
    let path = path.as_ref();
    let content = read_file(path)?;

    let spec: PaletteSpec = match extension(path).as_deref() {
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| ThemeError::parse_error(path, e.to_string()))?,
        _ => toml::from_str(&content).map_err(|e| ThemeError::parse_error(path, e.to_string()))?,
    };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Custom");
    spec.build(stem)
}

fn read_file(path: &Path) -> ThemeResult<String> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ThemeError::file_not_found(path),
        _ => ThemeError::Io(err),
    })
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_theme_source_variants() {
        assert_eq!(ThemeSource::parse("Dark"), ThemeSource::Preset(ThemePreset::Dark));
        assert_eq!(
            ThemeSource::parse("custom:corporate"),
            ThemeSource::Custom("corporate".into())
        );
        assert_eq!(
            ThemeSource::parse("file:themes/night.toml"),
            ThemeSource::File(PathBuf::from("themes/night.toml"))
        );
        assert_eq!(ThemeSource::parse("corporate"), ThemeSource::Custom("corporate".into()));
    }

    #[test]
    fn custom_palette_from_toml() {
        let config = ThemeConfig::from_toml(
            r##"
            [theme]
            default = "custom:corporate"

            [palettes.corporate]
            base = "light"
            primary = "#0078D7"
            "##,
        )
        .unwrap();

        let palette = config.resolve().unwrap();
        assert_eq!(palette.name(), "corporate");
        assert_eq!(palette.hex_of(ColorRole::Primary), "#0078D7");
        // Inherited from the Light preset.
        assert_eq!(palette.hex_of(ColorRole::Background), "#F5F5F5");
    }

    #[test]
    fn unknown_role_in_palette_is_rejected() {
        let config = ThemeConfig::from_toml(
            r##"
            [theme]
            default = "custom:broken"

            [palettes.broken]
            primry = "#000000"
            "##,
        )
        .unwrap();
        assert!(matches!(config.resolve(), Err(ThemeError::UnknownRole { .. })));
    }

    #[test]
    fn fallback_used_when_default_missing() {
        let config = ThemeConfig::new()
            .with_default_theme(ThemeSource::Custom("missing".into()))
            .with_fallback_theme(ThemeSource::Preset(ThemePreset::Oceanic));
        assert_eq!(config.resolve().unwrap().name(), "Oceanic");

        let no_fallback = ThemeConfig::new().with_default_theme(ThemeSource::Custom("missing".into()));
        assert!(no_fallback.resolve().unwrap_err().is_not_found());
        assert_eq!(no_fallback.resolve_or_default().name(), "Default");
    }

    #[test]
    fn env_vars_override_defaults() {
        let config = ThemeConfig::from_vars(|key| match key {
            THEME_ENV => Some("dracula".into()),
            FALLBACK_ENV => Some("light".into()),
            _ => None,
        });
        assert_eq!(config.default_theme, ThemeSource::Preset(ThemePreset::Dracula));
        assert_eq!(config.fallback_theme, Some(ThemeSource::Preset(ThemePreset::Light)));
    }

    #[test]
    fn broken_config_path_is_ignored() {
        let config = ThemeConfig::from_vars(|key| match key {
            CONFIG_ENV => Some("/definitely/not/here.toml".into()),
            _ => None,
        });
        assert_eq!(config.default_theme, ThemeSource::Preset(ThemePreset::Default));
    }
}
