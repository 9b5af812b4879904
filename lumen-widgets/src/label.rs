use std::cell::{Cell, RefCell};
use std::fmt;

use lumen_core::context::UiContext;
use lumen_core::widget::{ThemedNode, Widget};
use lumen_theme::style::components::label::wraps;
use lumen_theme::style::{Emphasis, LabelVariant, WidgetKind};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    /// Align to the start.
    #[default]
    Left,
    /// Center the text.
    Center,
    /// Align to the end.
    Right,
}

/// Static themed text.
///
/// ### Theming
/// Styled as [WidgetKind::Label]. The [LabelVariant] picks size and weight,
/// the [Emphasis] the opacity of the on-surface color.
pub struct Label {
    node: ThemedNode,
    text: RefCell<String>,
    align: Cell<TextAlign>,
    wrap: Cell<Option<bool>>,
}

impl Label {
    /// Create a body label with high emphasis.
    pub fn new(context: &UiContext, text: impl Into<String>) -> Self {
        Self {
            node: context.node(WidgetKind::Label {
                variant: LabelVariant::Body,
                emphasis: Emphasis::High,
            }),
            text: RefCell::new(text.into()),
            align: Cell::new(TextAlign::Left),
            wrap: Cell::new(None),
        }
    }

    /// Set the typographic variant.
    pub fn with_variant(self, variant: LabelVariant) -> Self {
        self.set_variant(variant);
        self
    }

    /// Set the emphasis.
    pub fn with_emphasis(self, emphasis: Emphasis) -> Self {
        self.set_emphasis(emphasis);
        self
    }

    /// Set the alignment.
    pub fn with_align(self, align: TextAlign) -> Self {
        self.align.set(align);
        self
    }

    /// Force wrapping on or off instead of following the variant.
    pub fn with_wrap(self, wrap: bool) -> Self {
        self.wrap.set(Some(wrap));
        self
    }

    /// The text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replace the text.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    /// The typographic variant.
    pub fn variant(&self) -> LabelVariant {
        self.parts().0
    }

    /// The emphasis.
    pub fn emphasis(&self) -> Emphasis {
        self.parts().1
    }

    /// The alignment.
    pub fn align(&self) -> TextAlign {
        self.align.get()
    }

    /// Whether long text wraps.
    pub fn wraps(&self) -> bool {
        self.wrap.get().unwrap_or_else(|| wraps(self.variant()))
    }

    /// Change the typographic variant.
    pub fn set_variant(&self, variant: LabelVariant) {
        self.node.set_kind(WidgetKind::Label {
            variant,
            emphasis: self.emphasis(),
        });
    }

    /// Change the emphasis.
    pub fn set_emphasis(&self, emphasis: Emphasis) {
        self.node.set_kind(WidgetKind::Label {
            variant: self.variant(),
            emphasis,
        });
    }

    fn parts(&self) -> (LabelVariant, Emphasis) {
        match self.node.kind() {
            WidgetKind::Label { variant, emphasis } => (variant, emphasis),
            _ => (LabelVariant::default(), Emphasis::default()),
        }
    }
}

impl Widget for Label {
    fn node(&self) -> &ThemedNode {
        &self.node
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("text", &self.text.borrow())
            .field("variant", &self.variant())
            .field("emphasis", &self.emphasis())
            .finish()
    }
}
