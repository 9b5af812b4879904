#![warn(missing_docs)]

//! Widget library for lumen => See `lumen` crate.
//!
//! Every widget wraps a [ThemedNode](lumen_core::widget::ThemedNode) and
//! implements [Widget](lumen_core::widget::Widget), so hover, press and
//! disable work the same everywhere and styles follow the current palette.

/// Contains the [button::Button] widget.
pub mod button;

/// Contains the [card::Card] widget.
pub mod card;

/// Contains the [checkbox::Checkbox] widget.
pub mod checkbox;

/// Contains the [combo_box::ComboBox] widget.
pub mod combo_box;

/// Contains the [dialog::Dialog] widget.
pub mod dialog;

/// Contains the [error::WidgetError] type.
pub mod error;

/// Contains the [group::CheckboxGroup] for tri-state checkbox hierarchies.
pub mod group;

/// Contains the [label::Label] widget.
pub mod label;

/// Contains the [scroll_pane::ScrollPane] widget.
pub mod scroll_pane;

/// Contains the [text_field::TextField] widget and its [text_field::Validator].
pub mod text_field;

/// Contains the [toggle::ToggleButton] widget.
pub mod toggle;
