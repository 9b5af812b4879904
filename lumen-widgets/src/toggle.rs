use std::fmt;
use std::time::Duration;

use lumen_core::context::UiContext;
use lumen_core::surface::Transition;
use lumen_core::widget::{ThemedNode, Widget};
use lumen_theme::style::WidgetKind;

/// Length of the ripple played on click.
pub const RIPPLE_DURATION: Duration = Duration::from_millis(400);

/// A button that stays pressed in until clicked again.
///
/// ### Theming
/// Styled as [WidgetKind::Toggle]: an outlined button that fills with the
/// primary role while selected.
pub struct ToggleButton {
    node: ThemedNode,
    text: String,
}

impl ToggleButton {
    /// Create an unselected toggle with the given text.
    pub fn new(context: &UiContext, text: impl Into<String>) -> Self {
        Self {
            node: context.node(WidgetKind::Toggle),
            text: text.into(),
        }
    }

    /// Start selected or not.
    pub fn with_selected(self, selected: bool) -> Self {
        self.set_selected(selected);
        self
    }

    /// The button text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the toggle is selected.
    pub fn is_selected(&self) -> bool {
        self.node.state().is_selected()
    }

    /// Select or unselect without a ripple.
    pub fn set_selected(&self, selected: bool) {
        self.node.state().set_selected(selected);
    }

    /// Handle a user click. Returns whether the click was accepted.
    pub fn click(&self) -> bool {
        let state = self.node.state();
        if state.is_disabled() {
            return false;
        }
        state.set_selected(!state.is_selected());
        self.node.animate(Transition::ripple(RIPPLE_DURATION));
        true
    }
}

impl Widget for ToggleButton {
    fn node(&self) -> &ThemedNode {
        &self.node
    }
}

impl fmt::Debug for ToggleButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleButton")
            .field("text", &self.text)
            .field("selected", &self.is_selected())
            .finish()
    }
}
