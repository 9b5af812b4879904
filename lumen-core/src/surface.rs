//! The seam between widgets and whatever draws them.
//!
//! Widgets never draw, lay out or animate anything themselves. They hand a
//! [StyleDescriptor] to a [RenderingSurface], ask it to run bounded
//! [Transition]s, and ask it whether the pointer is over them.

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use indexmap::IndexMap;
use lumen_theme::style::StyleDescriptor;

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a widget on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetKey(u64);

impl WidgetKey {
    /// Allocate a fresh key.
    pub fn next() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The visual property a transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionChannel {
    /// Opacity of the whole widget.
    Opacity,
    /// Uniform scale.
    Scale,
    /// Horizontal offset, used for the invalid-input shake.
    TranslateX,
    /// Vertical offset, used for hover lift.
    TranslateY,
    /// Shadow radius.
    Elevation,
    /// Click ripple expanding from the pointer.
    Ripple,
    /// Horizontal scroll position in `0.0..=1.0`.
    ScrollX,
    /// Vertical scroll position in `0.0..=1.0`.
    ScrollY,
}

/// A bounded, fire-and-forget animation request.
///
/// A later request on the same widget and channel replaces an earlier one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Animated property.
    pub channel: TransitionChannel,
    /// Start value, or the current value when `None`.
    pub from: Option<f32>,
    /// End value.
    pub target: f32,
    /// Length of one cycle.
    pub duration: Duration,
    /// How many times to run back and forth. `1` runs once.
    pub cycles: u32,
}

impl Transition {
    /// Animate `channel` to `target`.
    pub fn new(channel: TransitionChannel, target: f32, duration: Duration) -> Self {
        Self {
            channel,
            from: None,
            target,
            duration,
            cycles: 1,
        }
    }

    /// Start from `value` instead of the current value.
    pub fn from_value(mut self, value: f32) -> Self {
        self.from = Some(value);
        self
    }

    /// Repeat back and forth `cycles` times.
    pub fn cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles.max(1);
        self
    }

    /// Fade opacity to `target`.
    pub fn fade(target: f32, duration: Duration) -> Self {
        Self::new(TransitionChannel::Opacity, target, duration)
    }

    /// Scale from `from` to `target`.
    pub fn scale(from: f32, target: f32, duration: Duration) -> Self {
        Self::new(TransitionChannel::Scale, target, duration).from_value(from)
    }

    /// Expand a ripple from nothing to full size.
    pub fn ripple(duration: Duration) -> Self {
        Self::new(TransitionChannel::Ripple, 1.0, duration).from_value(0.0)
    }

    /// Shake horizontally by `distance`, `cycles` times within `duration`.
    pub fn shake(distance: f32, cycles: u32, duration: Duration) -> Self {
        let per_cycle = duration / cycles.max(1);
        Self::new(TransitionChannel::TranslateX, distance, per_cycle)
            .from_value(0.0)
            .cycles(cycles)
    }

    /// Total running time.
    pub fn total_duration(&self) -> Duration {
        self.duration * self.cycles
    }
}

/// The host toolkit as seen by widgets.
pub trait RenderingSurface {
    /// Apply a freshly derived style to a widget.
    fn apply_style(&self, key: WidgetKey, style: &StyleDescriptor);

    /// Start a visual transition on a widget.
    fn request_transition(&self, key: WidgetKey, transition: Transition);

    /// Whether the pointer is currently over a widget.
    fn is_pointer_over(&self, key: WidgetKey) -> bool;
}

/// A surface that draws nothing and records everything.
///
/// Used by tests and the demos.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    styles: RefCell<IndexMap<WidgetKey, StyleDescriptor>>,
    applied: Cell<usize>,
    transitions: RefCell<Vec<(WidgetKey, Transition)>>,
    pointer: Cell<Option<WidgetKey>>,
}

impl HeadlessSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last style applied to `key`.
    pub fn style_of(&self, key: WidgetKey) -> Option<StyleDescriptor> {
        self.styles.borrow().get(&key).cloned()
    }

    /// Total number of [RenderingSurface::apply_style] calls.
    pub fn apply_count(&self) -> usize {
        self.applied.get()
    }

    /// All transitions requested for `key`, oldest first.
    pub fn transitions_for(&self, key: WidgetKey) -> Vec<Transition> {
        self.transitions
            .borrow()
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, t)| *t)
            .collect()
    }

    /// The transition currently running on a channel of `key`.
    pub fn active_transition(&self, key: WidgetKey, channel: TransitionChannel) -> Option<Transition> {
        self.transitions
            .borrow()
            .iter()
            .rev()
            .find(|(k, t)| *k == key && t.channel == channel)
            .map(|(_, t)| *t)
    }

    /// Drain the transition log.
    pub fn take_transitions(&self) -> Vec<(WidgetKey, Transition)> {
        std::mem::take(&mut *self.transitions.borrow_mut())
    }

    /// Move the pointer over `key`, or off every widget.
    pub fn set_pointer(&self, key: Option<WidgetKey>) {
        self.pointer.set(key);
    }
}

impl RenderingSurface for HeadlessSurface {
    fn apply_style(&self, key: WidgetKey, style: &StyleDescriptor) {
        self.applied.set(self.applied.get() + 1);
        self.styles.borrow_mut().insert(key, style.clone());
    }

    fn request_transition(&self, key: WidgetKey, transition: Transition) {
        self.transitions.borrow_mut().push((key, transition));
    }

    fn is_pointer_over(&self, key: WidgetKey) -> bool {
        self.pointer.get() == Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let a = WidgetKey::next();
        let b = WidgetKey::next();
        assert_ne!(a, b);
    }

    #[test]
    fn shake_splits_duration_across_cycles() {
        let shake = Transition::shake(10.0, 5, Duration::from_millis(500));
        assert_eq!(shake.channel, TransitionChannel::TranslateX);
        assert_eq!(shake.duration, Duration::from_millis(100));
        assert_eq!(shake.cycles, 5);
        assert_eq!(shake.total_duration(), Duration::from_millis(500));
    }

    #[test]
    fn later_request_wins_per_channel() {
        let surface = HeadlessSurface::new();
        let key = WidgetKey::next();
        surface.request_transition(key, Transition::fade(1.0, Duration::from_millis(250)));
        surface.request_transition(key, Transition::fade(0.0, Duration::from_millis(250)));
        assert_eq!(
            surface.active_transition(key, TransitionChannel::Opacity).map(|t| t.target),
            Some(0.0)
        );
        assert_eq!(surface.transitions_for(key).len(), 2);
    }
}
