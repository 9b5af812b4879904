#![warn(missing_docs)]

//! Core library for lumen => See `lumen` crate.
//!
//! Contains observable widget state, the rendering surface seam and the
//! themed node every widget is built on.

pub use lumen_theme as theme;

/// Contains the [context::UiContext] shared by widgets.
pub mod context;

/// Contains the [state::InteractiveState] for reactive interaction flags.
pub mod state;

/// Contains the [surface::RenderingSurface] trait and a headless implementation.
pub mod surface;

/// Contains the [widget::ThemedNode] that keeps a widget's style in sync.
pub mod widget;
