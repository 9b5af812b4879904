#![warn(missing_docs)]

//! Palette driven theming and reactive widget styling.
//!
//! Widgets derive their look from a shared palette and their own interaction
//! flags. Switching the palette restyles every live widget.

pub use vello::peniko as color;

pub use lumen_core as core;
pub use lumen_theme as theme;

/// Widgets module re-exporting [lumen_widgets].
pub mod widgets {
    pub use lumen_widgets::*;
}

/// A "prelude" for users of the lumen toolkit.
///
/// Importing this module brings into scope the most common types
/// needed to build a themed widget tree.
///
/// ```rust
/// use lumen::prelude::*;
///
/// let context = UiContext::new(ThemeRegistry::default(), HeadlessSurface::new());
/// let accept = Checkbox::new(&context, "Accept");
/// accept.click();
/// context.registry().set_current(ThemePreset::Nord.palette());
/// assert!(accept.is_selected());
/// ```
pub mod prelude {
    pub use crate::core::context::UiContext;
    pub use crate::core::state::{InteractiveState, StateChange};
    pub use crate::core::surface::{HeadlessSurface, RenderingSurface, Transition, TransitionChannel, WidgetKey};
    pub use crate::core::widget::{ThemedNode, Widget};

    // Theme
    pub use crate::theme::config::{ThemeConfig, ThemeSource};
    pub use crate::theme::error::{ThemeError, ThemeResult};
    pub use crate::theme::palette::{ColorRole, Palette, PaletteBuilder};
    pub use crate::theme::presets::ThemePreset;
    pub use crate::theme::registry::{BroadcastReport, SubscriptionHandle, ThemeRegistry};
    pub use crate::theme::state::StateFlags;
    pub use crate::theme::style::{ButtonVariant, Emphasis, LabelVariant, StyleDescriptor, StylePart, WidgetKind};
    pub use crate::theme::watch::ConfigWatcher;

    // Color
    pub use crate::color::Color;

    // Widgets
    pub use crate::widgets::button::Button;
    pub use crate::widgets::card::Card;
    pub use crate::widgets::checkbox::{Checkbox, CheckboxState};
    pub use crate::widgets::combo_box::ComboBox;
    pub use crate::widgets::dialog::Dialog;
    pub use crate::widgets::error::{WidgetError, WidgetResult};
    pub use crate::widgets::group::{CheckboxGroup, GroupPhase};
    pub use crate::widgets::label::{Label, TextAlign};
    pub use crate::widgets::scroll_pane::{Axis, ScrollPane};
    pub use crate::widgets::text_field::{TextField, Validator};
    pub use crate::widgets::toggle::ToggleButton;
}
