#![warn(missing_docs)]

//! # Lumen Theming
//!
//! Palettes, the theme registry and style derivation for lumen widgets.
//!
//! ## Overview
//!
//! - **[Palette](palette::Palette)**: an immutable table of semantic colors
//! - **[ThemePreset](presets::ThemePreset)**: built-in palettes (Dark, Light, Nord, ...)
//! - **[ThemeRegistry](registry::ThemeRegistry)**: the current palette and its subscribers
//! - **[StateFlags](state::StateFlags)**: interaction flags fed to style derivation
//! - **[derive](style::derive)**: computes a [StyleDescriptor](style::StyleDescriptor)
//!   from widget kind, flags and palette
//! - **[ThemeConfig](config::ThemeConfig)**: picks the startup palette from
//!   environment variables and config files
//! - **[ConfigWatcher](watch::ConfigWatcher)**: reloads the palette when the
//!   config file changes
//!
//! ## Quick Start
//!
//! ```rust
//! use lumen_theme::config::ThemeConfig;
//! use lumen_theme::registry::ThemeRegistry;
//! use lumen_theme::presets::ThemePreset;
//!
//! let registry = ThemeRegistry::new(ThemeConfig::from_env_or_default().resolve_or_default());
//!
//! registry.subscribe(|palette| {
//!     println!("background is now {}", palette.hex_of(lumen_theme::palette::ColorRole::Background));
//! });
//!
//! registry.set_current(ThemePreset::Dracula.palette());
//! ```

/// Contains the [config::ThemeConfig] for selecting palettes from the environment and files.
pub mod config;

/// Contains the [error::ThemeError] type.
pub mod error;

/// Contains [palette::Palette], [palette::ColorRole] and [palette::PaletteBuilder].
pub mod palette;

/// Contains the built-in [presets::ThemePreset] palettes.
pub mod presets;

/// Contains the [registry::ThemeRegistry].
pub mod registry;

/// Serde helpers for hex colors.
pub mod serde_color;

/// Contains [state::StateFlags] and [state::StateTier].
pub mod state;

/// Contains style derivation.
pub mod style;

/// Contains the [watch::ConfigWatcher] for hot reload.
pub mod watch;
