use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use lumen_core::context::UiContext;
use lumen_core::surface::Transition;
use lumen_core::widget::{ThemedNode, Widget};
use lumen_theme::style::components::dialog::{ANIMATION_MS, INITIAL_SCALE};
use lumen_theme::style::{ButtonVariant, Emphasis, LabelVariant, WidgetKind};

use crate::button::Button;
use crate::label::Label;

/// Length of the show and hide transitions.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(ANIMATION_MS);

type CloseCallback = Rc<dyn Fn()>;

/// A modal dialog drawn over a dimming scrim.
///
/// [show](Dialog::show) and [hide](Dialog::hide) fade and scale the dialog.
/// Clicking the scrim runs the close callback and hides the dialog.
///
/// ### Theming
/// Styled as [WidgetKind::Dialog]: an overlay-colored scrim, a surface
/// colored body and a bold title.
pub struct Dialog {
    node: ThemedNode,
    title: String,
    content: Option<Label>,
    actions: Vec<Button>,
    open: Cell<bool>,
    on_close: RefCell<Option<CloseCallback>>,
}

impl Dialog {
    /// Create a hidden dialog with the given title.
    pub fn new(context: &UiContext, title: impl Into<String>) -> Self {
        Self {
            node: context.node(WidgetKind::Dialog),
            title: title.into(),
            content: None,
            actions: Vec::new(),
            open: Cell::new(false),
            on_close: RefCell::new(None),
        }
    }

    /// A dialog asking the user to confirm or cancel.
    pub fn confirmation(
        context: &UiContext,
        title: impl Into<String>,
        message: impl Into<String>,
        confirm: (&str, impl Fn() + 'static),
        cancel: (&str, impl Fn() + 'static),
    ) -> Self {
        let content = Label::new(context, message)
            .with_variant(LabelVariant::Body)
            .with_emphasis(Emphasis::Medium);
        let cancel = Button::new(context, cancel.0)
            .with_variant(ButtonVariant::Secondary)
            .with_on_click(cancel.1);
        let confirm = Button::new(context, confirm.0)
            .with_variant(ButtonVariant::Primary)
            .with_on_click(confirm.1);

        Self::new(context, title)
            .with_content(content)
            .with_action(cancel)
            .with_action(confirm)
    }

    fn apply_with(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Set the body text.
    pub fn with_content(self, content: Label) -> Self {
        self.apply_with(|s| s.content = Some(content))
    }

    /// Append an action button.
    pub fn with_action(self, action: Button) -> Self {
        self.apply_with(|s| s.actions.push(action))
    }

    /// Set the function to run when the scrim is clicked.
    pub fn with_on_close(self, on_close: impl Fn() + 'static) -> Self {
        self.apply_with(|s| *s.on_close.get_mut() = Some(Rc::new(on_close)))
    }

    /// The title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The body text.
    pub fn content(&self) -> Option<&Label> {
        self.content.as_ref()
    }

    /// The action buttons, in display order.
    pub fn actions(&self) -> &[Button] {
        &self.actions
    }

    /// Whether the dialog is showing.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Fade and scale the dialog in. Returns `false` if it was already open.
    pub fn show(&self) -> bool {
        if self.open.replace(true) {
            return false;
        }
        log::debug!("Showing dialog '{}'", self.title);
        self.node
            .animate(Transition::fade(1.0, ANIMATION_DURATION).from_value(0.0));
        self.node
            .animate(Transition::scale(INITIAL_SCALE, 1.0, ANIMATION_DURATION));
        true
    }

    /// Fade and scale the dialog out. Returns `false` if it was already
    /// hidden.
    pub fn hide(&self) -> bool {
        if !self.open.replace(false) {
            return false;
        }
        log::debug!("Hiding dialog '{}'", self.title);
        self.node
            .animate(Transition::fade(0.0, ANIMATION_DURATION).from_value(1.0));
        self.node
            .animate(Transition::scale(1.0, INITIAL_SCALE, ANIMATION_DURATION));
        true
    }

    /// Handle a click on the scrim.
    pub fn click_overlay(&self) {
        if !self.is_open() {
            return;
        }
        let on_close = self.on_close.borrow().clone();
        if let Some(on_close) = on_close {
            on_close();
        }
        self.hide();
    }
}

impl Widget for Dialog {
    fn node(&self) -> &ThemedNode {
        &self.node
    }
}

impl fmt::Debug for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialog")
            .field("title", &self.title)
            .field("open", &self.open.get())
            .field("actions", &self.actions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::surface::{HeadlessSurface, TransitionChannel};
    use lumen_theme::registry::ThemeRegistry;

    fn context() -> (UiContext, Rc<HeadlessSurface>) {
        let surface = Rc::new(HeadlessSurface::new());
        let context = UiContext::with_surface(ThemeRegistry::default(), surface.clone());
        (context, surface)
    }

    #[test]
    fn show_and_hide_request_transitions() {
        let (context, surface) = context();
        let dialog = Dialog::new(&context, "Settings");

        assert!(dialog.show());
        assert!(!dialog.show());
        assert!(dialog.is_open());
        let scale = surface
            .active_transition(dialog.key(), TransitionChannel::Scale)
            .unwrap();
        assert_eq!(scale.from, Some(INITIAL_SCALE));
        assert_eq!(scale.target, 1.0);
        assert_eq!(scale.duration, ANIMATION_DURATION);

        assert!(dialog.hide());
        assert!(!dialog.hide());
        assert_eq!(
            surface
                .active_transition(dialog.key(), TransitionChannel::Opacity)
                .map(|t| t.target),
            Some(0.0)
        );
        assert_eq!(surface.transitions_for(dialog.key()).len(), 4);
    }

    #[test]
    fn overlay_click_closes() {
        let (context, _) = context();
        let closed = Rc::new(Cell::new(0));
        let dialog = {
            let closed = Rc::clone(&closed);
            Dialog::new(&context, "About").with_on_close(move || closed.set(closed.get() + 1))
        };

        dialog.click_overlay();
        assert_eq!(closed.get(), 0);

        dialog.show();
        dialog.click_overlay();
        assert_eq!(closed.get(), 1);
        assert!(!dialog.is_open());
    }

    #[test]
    fn confirmation_wires_buttons() {
        let (context, _) = context();
        let confirmed = Rc::new(Cell::new(false));
        let dialog = {
            let confirmed = Rc::clone(&confirmed);
            Dialog::confirmation(
                &context,
                "Delete file?",
                "This cannot be undone.",
                ("Delete", move || confirmed.set(true)),
                ("Cancel", || {}),
            )
        };

        let actions = dialog.actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].variant(), ButtonVariant::Secondary);
        assert!(actions[1].click());
        assert!(confirmed.get());
        assert_eq!(dialog.content().map(Label::text), Some("This cannot be undone.".to_string()));
    }
}
