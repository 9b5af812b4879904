//! Per-widget derivation functions, one module per [WidgetKind](super::WidgetKind).

pub mod button;
pub mod card;
pub mod checkbox;
pub mod combo_box;
pub mod dialog;
pub mod label;
pub mod scroll_pane;
pub mod text_field;
pub mod toggle;
