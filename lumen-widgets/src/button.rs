use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use lumen_core::context::UiContext;
use lumen_core::surface::{Transition, TransitionChannel};
use lumen_core::widget::{ThemedNode, Widget};
use lumen_theme::state::StateFlags;
use lumen_theme::style::components::button::{SHADOW_HOVER, SHADOW_PRESSED, SHADOW_REST};
use lumen_theme::style::{ButtonVariant, WidgetKind};

/// Length of the shadow transition between rest, hover and pressed.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(150);

type ClickCallback = Rc<dyn Fn()>;

/// Shadow radius a button settles on for `flags`.
fn shadow_target(flags: StateFlags) -> f32 {
    if flags.shows_pressed() {
        SHADOW_PRESSED.0
    } else if flags.shows_hover() {
        SHADOW_HOVER.0
    } else {
        SHADOW_REST.0
    }
}

/// A push button.
///
/// Pressing and releasing the button runs its click callback. Hover and
/// press animate the drop shadow.
///
/// ### Theming
/// Styled as [WidgetKind::Button]. The [ButtonVariant] picks the fill role
/// and the role of the text drawn on it. Menu buttons are wider and more
/// padded.
pub struct Button {
    node: ThemedNode,
    text: String,
    on_click: RefCell<Option<ClickCallback>>,
}

impl Button {
    /// Create a primary button with the given text.
    pub fn new(context: &UiContext, text: impl Into<String>) -> Self {
        let node = context.node(WidgetKind::Button {
            variant: ButtonVariant::Primary,
            menu: false,
        });

        let surface = Rc::clone(node.surface());
        let key = node.key();
        node.state().on_change(move |change| {
            let moved = change.changed().intersects(StateFlags::HOVER | StateFlags::PRESSED);
            if moved && !change.current.is_disabled() {
                surface.request_transition(
                    key,
                    Transition::new(
                        TransitionChannel::Elevation,
                        shadow_target(change.current),
                        ANIMATION_DURATION,
                    ),
                );
            }
        });

        Self {
            node,
            text: text.into(),
            on_click: RefCell::new(None),
        }
    }

    fn apply_with(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Set the color variant.
    pub fn with_variant(self, variant: ButtonVariant) -> Self {
        self.set_variant(variant);
        self
    }

    /// Make this a menu button.
    pub fn with_menu(self, menu: bool) -> Self {
        self.set_menu(menu);
        self
    }

    /// Set the function to run when the button is clicked.
    pub fn with_on_click(self, on_click: impl Fn() + 'static) -> Self {
        self.apply_with(|s| *s.on_click.get_mut() = Some(Rc::new(on_click)))
    }

    /// The button text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The color variant.
    pub fn variant(&self) -> ButtonVariant {
        match self.node.kind() {
            WidgetKind::Button { variant, .. } => variant,
            _ => ButtonVariant::default(),
        }
    }

    /// Whether this is a menu button.
    pub fn is_menu(&self) -> bool {
        matches!(self.node.kind(), WidgetKind::Button { menu: true, .. })
    }

    /// Change the color variant.
    pub fn set_variant(&self, variant: ButtonVariant) {
        self.node.set_kind(WidgetKind::Button {
            variant,
            menu: self.is_menu(),
        });
    }

    /// Turn the menu look on or off.
    pub fn set_menu(&self, menu: bool) {
        self.node.set_kind(WidgetKind::Button {
            variant: self.variant(),
            menu,
        });
    }

    /// Replace the click callback.
    pub fn set_on_click(&self, on_click: impl Fn() + 'static) {
        *self.on_click.borrow_mut() = Some(Rc::new(on_click));
    }

    /// Pointer went down. Returns whether the press was accepted.
    pub fn press(&self) -> bool {
        if self.node.state().is_disabled() {
            return false;
        }
        self.node.state().set_pressed(true);
        true
    }

    /// Pointer went up. Runs the click callback when the button was pressed.
    /// Returns whether it did.
    pub fn release(&self) -> bool {
        let state = self.node.state();
        if !state.is_pressed() {
            return false;
        }
        state.set_pressed(false);
        if state.is_disabled() {
            return false;
        }

        let on_click = self.on_click.borrow().clone();
        if let Some(on_click) = on_click {
            log::trace!("Button '{}' clicked", self.text);
            on_click();
        }
        true
    }

    /// Press and release.
    pub fn click(&self) -> bool {
        self.press() && self.release()
    }
}

impl Widget for Button {
    fn node(&self) -> &ThemedNode {
        &self.node
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("variant", &self.variant())
            .field("menu", &self.is_menu())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use lumen_core::surface::HeadlessSurface;
    use lumen_theme::palette::ColorRole;
    use lumen_theme::registry::ThemeRegistry;
    use lumen_theme::style::StylePart;

    fn context() -> (UiContext, Rc<HeadlessSurface>) {
        let surface = Rc::new(HeadlessSurface::new());
        let context = UiContext::with_surface(ThemeRegistry::default(), surface.clone());
        (context, surface)
    }

    #[test]
    fn release_runs_on_click() {
        let (context, _) = context();
        let clicks = Rc::new(Cell::new(0));
        let button = {
            let clicks = Rc::clone(&clicks);
            Button::new(&context, "Save").with_on_click(move || clicks.set(clicks.get() + 1))
        };

        assert!(!button.release());
        assert!(button.press());
        assert!(button.flags().contains(StateFlags::PRESSED));
        assert!(button.release());
        assert!(button.click());
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn disabled_button_ignores_press() {
        let (context, surface) = context();
        let clicks = Rc::new(Cell::new(0));
        let button = {
            let clicks = Rc::clone(&clicks);
            Button::new(&context, "Delete")
                .with_variant(ButtonVariant::Error)
                .with_on_click(move || clicks.set(clicks.get() + 1))
        };

        button.set_disabled(true);
        assert!(!button.click());
        assert_eq!(clicks.get(), 0);
        assert!(surface.style_of(button.key()).unwrap().elevation.is_none());
    }

    #[test]
    fn hover_and_press_animate_shadow() {
        let (context, surface) = context();
        let button = Button::new(&context, "Go");

        button.set_hovered(true);
        button.press();
        let targets: Vec<f32> = surface
            .transitions_for(button.key())
            .iter()
            .filter(|t| t.channel == TransitionChannel::Elevation)
            .map(|t| t.target)
            .collect();
        assert_eq!(targets, vec![SHADOW_HOVER.0, SHADOW_PRESSED.0]);
    }

    #[test]
    fn variant_and_menu_restyle() {
        let (context, _) = context();
        let button = Button::new(&context, "Open").with_variant(ButtonVariant::Success).with_menu(true);
        assert_eq!(button.variant(), ButtonVariant::Success);
        assert!(button.is_menu());

        let style = button.style();
        assert_eq!(
            style.part(StylePart::Body).unwrap().background.role,
            Some(ColorRole::Success)
        );
        assert_eq!(
            style.part(StylePart::Label).unwrap().foreground.role,
            Some(ColorRole::OnSuccess)
        );
    }
}
