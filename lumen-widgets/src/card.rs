use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use lumen_core::context::UiContext;
use lumen_core::surface::{Transition, TransitionChannel};
use lumen_core::widget::{ThemedNode, Widget};
use lumen_theme::state::StateFlags;
use lumen_theme::style::components::card::{DEFAULT_ELEVATION, HOVER_ELEVATION_MULTIPLIER, HOVER_LIFT};
use lumen_theme::style::WidgetKind;

/// Length of the hover lift.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq)]
struct CardShape {
    hoverable: bool,
    elevation: f32,
}

impl CardShape {
    fn kind(self) -> WidgetKind {
        WidgetKind::Card {
            hoverable: self.hoverable,
            elevation: self.elevation,
        }
    }
}

/// A raised surface that groups related content.
///
/// Hoverable cards lift and deepen their shadow under the pointer.
///
/// ### Theming
/// Styled as [WidgetKind::Card]: surface fill, on-surface text and an
/// overlay-colored shadow whose radius equals the elevation.
pub struct Card {
    node: ThemedNode,
    shape: Rc<Cell<CardShape>>,
}

impl Card {
    /// Create a hoverable card with the default elevation.
    pub fn new(context: &UiContext) -> Self {
        let shape = CardShape {
            hoverable: true,
            elevation: DEFAULT_ELEVATION,
        };
        let node = context.node(shape.kind());
        let shape = Rc::new(Cell::new(shape));

        let surface = Rc::clone(node.surface());
        let key = node.key();
        let watched = Rc::clone(&shape);
        node.state().on_change(move |change| {
            let shape = watched.get();
            if !shape.hoverable || change.became(StateFlags::HOVER).is_none() {
                return;
            }
            let lifted = change.current.shows_hover();
            let (radius, lift) = if lifted {
                (shape.elevation * HOVER_ELEVATION_MULTIPLIER, HOVER_LIFT)
            } else {
                (shape.elevation, 0.0)
            };
            surface.request_transition(
                key,
                Transition::new(TransitionChannel::Elevation, radius, ANIMATION_DURATION),
            );
            surface.request_transition(
                key,
                Transition::new(TransitionChannel::TranslateY, lift, ANIMATION_DURATION),
            );
        });

        Self { node, shape }
    }

    /// Set whether the card reacts to hover.
    pub fn with_hoverable(self, hoverable: bool) -> Self {
        self.set_hoverable(hoverable);
        self
    }

    /// Set the resting shadow radius.
    pub fn with_elevation(self, elevation: f32) -> Self {
        self.set_elevation(elevation);
        self
    }

    /// Whether the card reacts to hover.
    pub fn is_hoverable(&self) -> bool {
        self.shape.get().hoverable
    }

    /// Resting shadow radius.
    pub fn elevation(&self) -> f32 {
        self.shape.get().elevation
    }

    /// Turn the hover lift on or off.
    pub fn set_hoverable(&self, hoverable: bool) {
        self.reshape(CardShape {
            hoverable,
            ..self.shape.get()
        });
    }

    /// Change the resting shadow radius. Negative values are treated as zero.
    pub fn set_elevation(&self, elevation: f32) {
        self.reshape(CardShape {
            elevation: elevation.max(0.0),
            ..self.shape.get()
        });
    }

    fn reshape(&self, shape: CardShape) {
        self.shape.set(shape);
        self.node.set_kind(shape.kind());
    }
}

impl Widget for Card {
    fn node(&self) -> &ThemedNode {
        &self.node
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("hoverable", &self.is_hoverable())
            .field("elevation", &self.elevation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::surface::HeadlessSurface;
    use lumen_theme::registry::ThemeRegistry;

    fn context() -> (UiContext, Rc<HeadlessSurface>) {
        let surface = Rc::new(HeadlessSurface::new());
        let context = UiContext::with_surface(ThemeRegistry::default(), surface.clone());
        (context, surface)
    }

    #[test]
    fn hover_lifts_hoverable_card() {
        let (context, surface) = context();
        let card = Card::new(&context).with_elevation(4.0);

        card.set_hovered(true);
        let shadow = card.style().elevation.unwrap();
        assert_eq!(shadow.radius, 6.0);
        assert_eq!(
            surface
                .active_transition(card.key(), TransitionChannel::TranslateY)
                .map(|t| t.target),
            Some(HOVER_LIFT)
        );

        card.set_hovered(false);
        assert_eq!(card.style().elevation.unwrap().radius, 4.0);
        assert_eq!(
            surface
                .active_transition(card.key(), TransitionChannel::Elevation)
                .map(|t| t.target),
            Some(4.0)
        );
    }

    #[test]
    fn static_card_stays_put() {
        let (context, surface) = context();
        let card = Card::new(&context).with_hoverable(false);
        card.set_hovered(true);
        assert!(surface.transitions_for(card.key()).is_empty());
        assert_eq!(card.style().elevation.unwrap().radius, DEFAULT_ELEVATION);
    }
}
