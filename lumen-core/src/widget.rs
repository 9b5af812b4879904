use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use lumen_theme::palette::Palette;
use lumen_theme::registry::{SubscriptionHandle, ThemeRegistry};
use lumen_theme::state::StateFlags;
use lumen_theme::style::{derive, StyleDescriptor, WidgetKind};

use crate::state::{InteractiveState, ListenerId};
use crate::surface::{RenderingSurface, Transition, WidgetKey};

/// Shared handle to a rendering surface.
pub type SurfaceRef = Rc<dyn RenderingSurface>;

/// Everything a widget needs to keep its look in sync.
///
/// A node derives and applies its style when created, whenever the registry
/// publishes a palette and whenever its own [InteractiveState] changes.
/// Dropping the node unsubscribes it from the registry.
pub struct ThemedNode {
    inner: Rc<NodeInner>,
}

struct NodeInner {
    key: WidgetKey,
    kind: Cell<WidgetKind>,
    state: InteractiveState,
    registry: ThemeRegistry,
    surface: SurfaceRef,
    subscription: Cell<Option<SubscriptionHandle>>,
    state_listener: Cell<Option<ListenerId>>,
}

impl ThemedNode {
    /// Create a node and apply its initial style.
    pub fn new(kind: WidgetKind, registry: &ThemeRegistry, surface: SurfaceRef) -> Self {
        Self::with_state(kind, StateFlags::empty(), registry, surface)
    }

    /// Create a node starting from `flags`.
    pub fn with_state(
        kind: WidgetKind,
        flags: StateFlags,
        registry: &ThemeRegistry,
        surface: SurfaceRef,
    ) -> Self {
        let inner = Rc::new(NodeInner {
            key: WidgetKey::next(),
            kind: Cell::new(kind),
            state: InteractiveState::new(flags),
            registry: registry.clone(),
            surface,
            subscription: Cell::new(None),
            state_listener: Cell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let subscription = registry.subscribe(move |palette| {
            if let Some(node) = weak.upgrade() {
                node.apply(palette);
            }
        });
        inner.subscription.set(Some(subscription));

        let weak = Rc::downgrade(&inner);
        let listener = inner.state.on_change(move |_| {
            if let Some(node) = weak.upgrade() {
                node.refresh();
            }
        });
        inner.state_listener.set(Some(listener));

        log::debug!("{} {:?} attached", kind.name(), inner.key);
        inner.refresh();
        Self { inner }
    }

    /// Identity on the surface.
    pub fn key(&self) -> WidgetKey {
        self.inner.key
    }

    /// Widget kind used for derivation.
    pub fn kind(&self) -> WidgetKind {
        self.inner.kind.get()
    }

    /// Change the widget kind (variant, emphasis, ...) and restyle.
    pub fn set_kind(&self, kind: WidgetKind) {
        if self.inner.kind.replace(kind) != kind {
            self.inner.refresh();
        }
    }

    /// The widget's interaction flags.
    pub fn state(&self) -> &InteractiveState {
        &self.inner.state
    }

    /// The registry this node listens to.
    pub fn registry(&self) -> &ThemeRegistry {
        &self.inner.registry
    }

    /// The surface this node draws through.
    pub fn surface(&self) -> &SurfaceRef {
        &self.inner.surface
    }

    /// Derive the style for the current palette and flags. Never cached.
    pub fn current_style(&self) -> StyleDescriptor {
        derive(
            &self.inner.kind.get(),
            self.inner.state.get(),
            &self.inner.registry.get_current(),
        )
    }

    /// Re-derive and re-apply the style.
    pub fn refresh(&self) {
        self.inner.refresh();
    }

    /// Ask the surface whether the pointer is over this widget and update
    /// the hover flag. Returns the new hover value.
    pub fn sync_hover(&self) -> bool {
        let over = self.inner.surface.is_pointer_over(self.inner.key);
        self.inner.state.set_hovered(over);
        over
    }

    /// Request a transition on this widget.
    pub fn animate(&self, transition: Transition) {
        self.inner
            .surface
            .request_transition(self.inner.key, transition);
    }
}

impl NodeInner {
    fn apply(&self, palette: &Palette) {
        let kind = self.kind.get();
        let style = derive(&kind, self.state.get(), palette);
        log::trace!("{} {:?} restyled for '{}'", kind.name(), self.key, palette.name());
        self.surface.apply_style(self.key, &style);
    }

    fn refresh(&self) {
        let palette = self.registry.get_current();
        self.apply(&palette);
    }
}

impl Drop for NodeInner {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.registry.unsubscribe(subscription);
        }
        if let Some(listener) = self.state_listener.take() {
            self.state.remove_listener(listener);
        }
        log::debug!("{} {:?} detached", self.kind.get().name(), self.key);
    }
}

/// Behaviour shared by every themed widget.
///
/// Implementors only expose their [ThemedNode]; flag forwarding and style
/// access come for free.
pub trait Widget {
    /// The node backing this widget.
    fn node(&self) -> &ThemedNode;

    /// Identity on the surface.
    fn key(&self) -> WidgetKey {
        self.node().key()
    }

    /// Current interaction flags.
    fn flags(&self) -> StateFlags {
        self.node().state().get()
    }

    /// Freshly derived style.
    fn style(&self) -> StyleDescriptor {
        self.node().current_style()
    }

    /// Set the hover flag.
    fn set_hovered(&self, hovered: bool) {
        self.node().state().set_hovered(hovered);
    }

    /// Set the pressed flag.
    fn set_pressed(&self, pressed: bool) {
        self.node().state().set_pressed(pressed);
    }

    /// Enable or disable the widget.
    fn set_disabled(&self, disabled: bool) {
        self.node().state().set_disabled(disabled);
    }

    /// Whether the widget is disabled.
    fn is_disabled(&self) -> bool {
        self.node().state().is_disabled()
    }
}

impl Widget for ThemedNode {
    fn node(&self) -> &ThemedNode {
        self
    }
}

impl fmt::Debug for ThemedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemedNode")
            .field("key", &self.inner.key)
            .field("kind", &self.inner.kind.get())
            .field("state", &self.inner.state.get())
            .finish()
    }
}
