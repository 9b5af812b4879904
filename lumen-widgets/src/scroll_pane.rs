use std::cell::Cell;
use std::fmt;
use std::time::Duration;

use lumen_core::context::UiContext;
use lumen_core::surface::{Transition, TransitionChannel};
use lumen_core::widget::{ThemedNode, Widget};
use lumen_theme::style::WidgetKind;

/// Fraction of the content scrolled per unit of wheel delta.
pub const SCROLL_SPEED: f32 = 0.015;
/// Wheel deltas this small or smaller are ignored.
pub const MIN_DELTA: f32 = 0.1;
/// Length of the smooth scroll transition.
pub const SCROLL_DURATION: Duration = Duration::from_millis(200);

/// Scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// A viewport with smooth wheel scrolling and a themed scrollbar.
///
/// Positions run from `0.0` (start) to `1.0` (end) on each axis. The hover
/// flag refers to the scrollbar thumb.
///
/// ### Theming
/// Styled as [WidgetKind::ScrollPane]: a primary colored thumb that brightens
/// under the pointer over a faint surface track.
pub struct ScrollPane {
    node: ThemedNode,
    vertical: Cell<f32>,
    horizontal: Cell<f32>,
}

impl ScrollPane {
    /// Create a pane scrolled to the top left.
    pub fn new(context: &UiContext) -> Self {
        Self {
            node: context.node(WidgetKind::ScrollPane),
            vertical: Cell::new(0.0),
            horizontal: Cell::new(0.0),
        }
    }

    /// Current position on `axis`.
    pub fn position(&self, axis: Axis) -> f32 {
        self.cell(axis).get()
    }

    /// Jump to `position` on `axis` without animating.
    pub fn set_position(&self, axis: Axis, position: f32) {
        self.cell(axis).set(position.clamp(0.0, 1.0));
    }

    /// Scroll vertically by a wheel delta. Positive deltas scroll up.
    /// Returns whether the delta was large enough to act on.
    pub fn scroll_by(&self, delta: f32) -> bool {
        self.scroll_axis(Axis::Vertical, delta)
    }

    /// Handle a wheel event on both axes.
    pub fn handle_scroll(&self, delta_x: f32, delta_y: f32) {
        self.scroll_axis(Axis::Vertical, delta_y);
        self.scroll_axis(Axis::Horizontal, delta_x);
    }

    /// Scroll `axis` by a wheel delta.
    pub fn scroll_axis(&self, axis: Axis, delta: f32) -> bool {
        if delta.abs() <= MIN_DELTA || self.node.state().is_disabled() {
            return false;
        }

        let cell = self.cell(axis);
        let current = cell.get();
        let target = (current - delta * SCROLL_SPEED).clamp(0.0, 1.0);
        cell.set(target);

        let channel = match axis {
            Axis::Horizontal => TransitionChannel::ScrollX,
            Axis::Vertical => TransitionChannel::ScrollY,
        };
        self.node
            .animate(Transition::new(channel, target, SCROLL_DURATION).from_value(current));
        true
    }

    fn cell(&self, axis: Axis) -> &Cell<f32> {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}

impl Widget for ScrollPane {
    fn node(&self) -> &ThemedNode {
        &self.node
    }
}

impl fmt::Debug for ScrollPane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollPane")
            .field("vertical", &self.vertical.get())
            .field("horizontal", &self.horizontal.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use lumen_core::surface::HeadlessSurface;
    use lumen_theme::registry::ThemeRegistry;
    use lumen_theme::style::components::scroll_pane::{THUMB_HOVER_OPACITY, THUMB_OPACITY};
    use lumen_theme::style::StylePart;

    fn context() -> (UiContext, Rc<HeadlessSurface>) {
        let surface = Rc::new(HeadlessSurface::new());
        let context = UiContext::with_surface(ThemeRegistry::default(), surface.clone());
        (context, surface)
    }

    #[test]
    fn small_deltas_are_ignored() {
        let (context, surface) = context();
        let pane = ScrollPane::new(&context);
        assert!(!pane.scroll_by(0.1));
        assert!(!pane.scroll_by(-0.05));
        assert!(surface.transitions_for(pane.key()).is_empty());
    }

    #[test]
    fn wheel_scrolls_and_clamps() {
        let (context, surface) = context();
        let pane = ScrollPane::new(&context);

        assert!(pane.scroll_by(-20.0));
        assert!((pane.position(Axis::Vertical) - 0.3).abs() < 1e-6);
        let scroll = surface
            .active_transition(pane.key(), TransitionChannel::ScrollY)
            .unwrap();
        assert_eq!(scroll.from, Some(0.0));
        assert_eq!(scroll.duration, SCROLL_DURATION);

        pane.scroll_by(-1000.0);
        assert_eq!(pane.position(Axis::Vertical), 1.0);
        pane.scroll_by(1000.0);
        assert_eq!(pane.position(Axis::Vertical), 0.0);

        pane.handle_scroll(-10.0, 0.0);
        assert!((pane.position(Axis::Horizontal) - 0.15).abs() < 1e-6);
    }

    #[test]
    fn thumb_hover() {
        let (context, _) = context();
        let pane = ScrollPane::new(&context);
        assert_eq!(pane.style().part(StylePart::Thumb).unwrap().opacity, THUMB_OPACITY);
        pane.set_hovered(true);
        assert_eq!(
            pane.style().part(StylePart::Thumb).unwrap().opacity,
            THUMB_HOVER_OPACITY
        );
    }
}
