use std::fmt;
use std::rc::Rc;

use lumen_theme::registry::ThemeRegistry;
use lumen_theme::state::StateFlags;
use lumen_theme::style::WidgetKind;

use crate::surface::RenderingSurface;
use crate::widget::{SurfaceRef, ThemedNode};

/// The registry and surface shared by every widget of one UI.
///
/// Cheap to clone. Widgets take a `&UiContext` on construction.
#[derive(Clone)]
pub struct UiContext {
    registry: ThemeRegistry,
    surface: SurfaceRef,
}

impl UiContext {
    /// Create a context from a registry and a surface.
    pub fn new(registry: ThemeRegistry, surface: impl RenderingSurface + 'static) -> Self {
        Self::with_surface(registry, Rc::new(surface))
    }

    /// Create a context from an already shared surface.
    pub fn with_surface(registry: ThemeRegistry, surface: SurfaceRef) -> Self {
        Self { registry, surface }
    }

    /// The theme registry.
    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// The rendering surface.
    pub fn surface(&self) -> &SurfaceRef {
        &self.surface
    }

    /// Create a themed node of `kind`.
    pub fn node(&self, kind: WidgetKind) -> ThemedNode {
        ThemedNode::new(kind, &self.registry, Rc::clone(&self.surface))
    }

    /// Create a themed node of `kind` starting from `flags`.
    pub fn node_with_state(&self, kind: WidgetKind, flags: StateFlags) -> ThemedNode {
        ThemedNode::with_state(kind, flags, &self.registry, Rc::clone(&self.surface))
    }
}

impl fmt::Debug for UiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiContext")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
