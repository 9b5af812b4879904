//! # Style Derivation
//!
//! Turns a widget kind, a [StateFlags] snapshot and a [Palette] into a
//! [StyleDescriptor]. Derivation is a pure function: it reads nothing but its
//! arguments and the same inputs always give the same descriptor.
//!
//! ## Priority
//!
//! Every component resolves its colors through [StateTier]:
//!
//! 1. Disabled widgets use [ColorRole::Disabled] and ignore selection,
//!    validation and hover.
//! 2. Invalid widgets use [ColorRole::Error] for border and accent, even when
//!    selected.
//! 3. Selected or indeterminate widgets use their accent role.
//! 4. Everything else gets the idle look.
//!
//! Hover and pressed only change opacity and elevation of the result.
//!
//! ```rust
//! use lumen_theme::palette::{ColorRole, Palette};
//! use lumen_theme::state::StateFlags;
//! use lumen_theme::style::{derive, StylePart, WidgetKind};
//!
//! let palette = Palette::default();
//! let style = derive(&WidgetKind::Checkbox, StateFlags::SELECTED, &palette);
//! let body = style.part(StylePart::Body).unwrap();
//! assert_eq!(body.border.role, Some(ColorRole::Primary));
//! ```

use indexmap::IndexMap;
use vello::peniko::Color;

use crate::palette::{ColorRole, Palette};
use crate::state::{StateFlags, StateTier};

pub mod components;

/// Visual flavor of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonVariant {
    /// Primary action.
    #[default]
    Primary,
    /// Secondary action.
    Secondary,
    /// Confirming action.
    Success,
    /// Risky action.
    Warning,
    /// Destructive action.
    Error,
}

impl ButtonVariant {
    /// Background role and the role of content drawn on it.
    pub fn roles(&self) -> (ColorRole, ColorRole) {
        match self {
            ButtonVariant::Primary => (ColorRole::Primary, ColorRole::OnPrimary),
            ButtonVariant::Secondary => (ColorRole::Secondary, ColorRole::OnSecondary),
            ButtonVariant::Success => (ColorRole::Success, ColorRole::OnSuccess),
            ButtonVariant::Warning => (ColorRole::Warning, ColorRole::OnWarning),
            ButtonVariant::Error => (ColorRole::Error, ColorRole::OnError),
        }
    }
}

/// Typographic level of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelVariant {
    /// 24px bold.
    Title,
    /// 18px semi-bold.
    Subtitle,
    /// 16px bold.
    Heading,
    /// 14px regular.
    #[default]
    Body,
    /// 12px regular.
    Caption,
}

/// How strongly a label stands out from its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    /// Full opacity.
    #[default]
    High,
    /// 87% opacity.
    Medium,
    /// 60% opacity.
    Low,
}

impl Emphasis {
    /// Alpha applied to the label color.
    pub fn alpha(&self) -> f32 {
        match self {
            Emphasis::High => 1.0,
            Emphasis::Medium => 0.87,
            Emphasis::Low => 0.6,
        }
    }
}

/// The closed set of widget kinds that can be styled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetKind {
    /// Push button.
    Button {
        /// Color flavor.
        variant: ButtonVariant,
        /// Wide, padded button used in menus.
        menu: bool,
    },
    /// Two-state toggle button.
    Toggle,
    /// Tri-state checkbox with label and validation message.
    Checkbox,
    /// Single line text input.
    TextField {
        /// Whether the text can be edited.
        editable: bool,
    },
    /// Drop-down selector.
    ComboBox,
    /// Raised container.
    Card {
        /// Whether hover lifts the card.
        hoverable: bool,
        /// Resting shadow radius.
        elevation: f32,
    },
    /// Modal dialog over a scrim.
    Dialog,
    /// Scrollable viewport with a scrollbar.
    ScrollPane,
    /// Static text.
    Label {
        /// Typographic level.
        variant: LabelVariant,
        /// Opacity level.
        emphasis: Emphasis,
    },
}

impl WidgetKind {
    /// A short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Button { .. } => "Button",
            WidgetKind::Toggle => "Toggle",
            WidgetKind::Checkbox => "Checkbox",
            WidgetKind::TextField { .. } => "TextField",
            WidgetKind::ComboBox => "ComboBox",
            WidgetKind::Card { .. } => "Card",
            WidgetKind::Dialog => "Dialog",
            WidgetKind::ScrollPane => "ScrollPane",
            WidgetKind::Label { .. } => "Label",
        }
    }
}

/// A named visual part of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePart {
    /// Main box of the widget.
    Body,
    /// Text next to or inside the body.
    Label,
    /// Check mark or other glyph.
    Icon,
    /// Hover/press ripple overlay.
    Ripple,
    /// Validation message.
    Message,
    /// Placeholder text of an empty input.
    Placeholder,
    /// Scrim behind a dialog.
    Overlay,
    /// Scrollbar track.
    Track,
    /// Scrollbar thumb.
    Thumb,
    /// Drop-down arrow.
    Arrow,
    /// Highlighted item of an open list.
    Highlight,
}

/// A color together with the palette role it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Source role, `None` for literal colors.
    pub role: Option<ColorRole>,
    /// Resolved color.
    pub color: Color,
}

impl Paint {
    /// Fully transparent, no role.
    pub const TRANSPARENT: Paint = Paint {
        role: None,
        color: Color::TRANSPARENT,
    };

    /// The palette color of `role`.
    pub fn role(palette: &Palette, role: ColorRole) -> Self {
        Self {
            role: Some(role),
            color: palette.color(role),
        }
    }

    /// The palette color of `role` with its alpha replaced by `alpha`.
    pub fn role_alpha(palette: &Palette, role: ColorRole, alpha: f32) -> Self {
        Self {
            role: Some(role),
            color: palette.color(role).with_alpha(alpha),
        }
    }

    /// Whether this paint draws nothing.
    pub fn is_transparent(&self) -> bool {
        self.color.components[3] <= 0.0
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Spacing around content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    /// Top inset.
    pub top: f32,
    /// Right inset.
    pub right: f32,
    /// Bottom inset.
    pub bottom: f32,
    /// Left inset.
    pub left: f32,
}

impl Insets {
    /// Same inset on every side.
    pub const fn uniform(value: f32) -> Self {
        Self::symmetric(value, value)
    }

    /// `vertical` on top and bottom, `horizontal` on left and right.
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// 400.
    #[default]
    Normal,
    /// 600.
    SemiBold,
    /// 700.
    Bold,
}

/// Resolved visual properties of one [StylePart].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartStyle {
    /// Fill.
    pub background: Paint,
    /// Text or glyph color.
    pub foreground: Paint,
    /// Outline color.
    pub border: Paint,
    /// Outline width.
    pub border_width: f32,
    /// Corner radius.
    pub corner_radius: f32,
    /// Content padding.
    pub padding: Insets,
    /// Opacity of the whole part.
    pub opacity: f32,
    /// Font size in pixels.
    pub font_size: f32,
    /// Font weight.
    pub font_weight: FontWeight,
}

impl PartStyle {
    /// Default text size.
    pub const DEFAULT_FONT_SIZE: f32 = 14.0;

    /// Set the fill.
    pub fn background(mut self, paint: Paint) -> Self {
        self.background = paint;
        self
    }

    /// Set the text color.
    pub fn foreground(mut self, paint: Paint) -> Self {
        self.foreground = paint;
        self
    }

    /// Set the outline color and width.
    pub fn border(mut self, paint: Paint, width: f32) -> Self {
        self.border = paint;
        self.border_width = width;
        self
    }

    /// Set the corner radius.
    pub fn radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the padding.
    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set size and weight of text.
    pub fn font(mut self, size: f32, weight: FontWeight) -> Self {
        self.font_size = size;
        self.font_weight = weight;
        self
    }
}

impl Default for PartStyle {
    fn default() -> Self {
        Self {
            background: Paint::TRANSPARENT,
            foreground: Paint::TRANSPARENT,
            border: Paint::TRANSPARENT,
            border_width: 0.0,
            corner_radius: 0.0,
            padding: Insets::default(),
            opacity: 1.0,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_weight: FontWeight::Normal,
        }
    }
}

/// Drop shadow of a raised widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elevation {
    /// Blur radius.
    pub radius: f32,
    /// Vertical shadow offset.
    pub offset_y: f32,
    /// Vertical translation of the widget itself (negative lifts it).
    pub lift: f32,
    /// Shadow color.
    pub color: Paint,
}

/// Everything the rendering surface needs to draw one widget.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleDescriptor {
    /// Styled parts in drawing order.
    pub parts: IndexMap<StylePart, PartStyle>,
    /// Shadow, if the widget is raised.
    pub elevation: Option<Elevation>,
}

impl StyleDescriptor {
    /// An empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a part.
    pub fn with_part(mut self, part: StylePart, style: PartStyle) -> Self {
        self.parts.insert(part, style);
        self
    }

    /// Set the shadow.
    pub fn with_elevation(mut self, elevation: Elevation) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Look up a part.
    pub fn part(&self, part: StylePart) -> Option<&PartStyle> {
        self.parts.get(&part)
    }
}

/// Derive the style of a widget.
pub fn derive(kind: &WidgetKind, flags: StateFlags, palette: &Palette) -> StyleDescriptor {
    let flags = flags.normalized();
    match *kind {
        WidgetKind::Button { variant, menu } => {
            components::button::button_style(variant, menu, flags, palette)
        },
        WidgetKind::Toggle => components::toggle::toggle_style(flags, palette),
        WidgetKind::Checkbox => components::checkbox::checkbox_style(flags, palette),
        WidgetKind::TextField { editable } => {
            components::text_field::text_field_style(editable, flags, palette)
        },
        WidgetKind::ComboBox => components::combo_box::combo_box_style(flags, palette),
        WidgetKind::Card {
            hoverable,
            elevation,
        } => components::card::card_style(hoverable, elevation, flags, palette),
        WidgetKind::Dialog => components::dialog::dialog_style(flags, palette),
        WidgetKind::ScrollPane => components::scroll_pane::scroll_pane_style(flags, palette),
        WidgetKind::Label { variant, emphasis } => {
            components::label::label_style(variant, emphasis, flags, palette)
        },
    }
}

/// Outline color shared by bordered inputs: `idle_role` at `idle_alpha`,
/// the accent role when active, error when invalid, disabled when disabled.
pub(crate) fn outline_paint(
    flags: StateFlags,
    palette: &Palette,
    idle_role: ColorRole,
    idle_alpha: f32,
    active_role: ColorRole,
) -> Paint {
    match StateTier::of(flags) {
        StateTier::Disabled => Paint::role(palette, ColorRole::Disabled),
        StateTier::Invalid => Paint::role(palette, ColorRole::Error),
        StateTier::Active => Paint::role(palette, active_role),
        StateTier::Idle => Paint::role_alpha(palette, idle_role, idle_alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::ThemePreset;

    const ALL_KINDS: [WidgetKind; 9] = [
        WidgetKind::Button {
            variant: ButtonVariant::Primary,
            menu: false,
        },
        WidgetKind::Toggle,
        WidgetKind::Checkbox,
        WidgetKind::TextField { editable: true },
        WidgetKind::ComboBox,
        WidgetKind::Card {
            hoverable: true,
            elevation: 2.0,
        },
        WidgetKind::Dialog,
        WidgetKind::ScrollPane,
        WidgetKind::Label {
            variant: LabelVariant::Body,
            emphasis: Emphasis::High,
        },
    ];

    #[test]
    fn derivation_is_deterministic() {
        let palette = ThemePreset::Palenight.palette();
        let flags = StateFlags::HOVER | StateFlags::SELECTED;
        for kind in ALL_KINDS {
            assert_eq!(derive(&kind, flags, &palette), derive(&kind, flags, &palette));
        }
    }

    #[test]
    fn disabled_beats_invalid_and_selected_everywhere() {
        let palette = Palette::default();
        let flags = StateFlags::DISABLED | StateFlags::INVALID | StateFlags::SELECTED;
        for kind in [
            WidgetKind::Toggle,
            WidgetKind::Checkbox,
            WidgetKind::TextField { editable: true },
            WidgetKind::ComboBox,
        ] {
            let style = derive(&kind, flags, &palette);
            let body = style.part(StylePart::Body).unwrap();
            assert_eq!(body.border.role, Some(ColorRole::Disabled), "{}", kind.name());
            for part in style.parts.values() {
                for paint in [part.background, part.border] {
                    assert_ne!(paint.role, Some(ColorRole::Error), "{}", kind.name());
                    assert_ne!(paint.role, Some(ColorRole::Primary), "{}", kind.name());
                }
            }
        }
    }

    #[test]
    fn invalid_beats_selected_for_outline() {
        let palette = Palette::default();
        let paint = outline_paint(
            StateFlags::INVALID | StateFlags::SELECTED,
            &palette,
            ColorRole::OnSurface,
            0.6,
            ColorRole::Primary,
        );
        assert_eq!(paint.role, Some(ColorRole::Error));
    }

    #[test]
    fn hover_never_changes_roles() {
        let palette = ThemePreset::Nord.palette();
        for kind in ALL_KINDS {
            for base in [StateFlags::empty(), StateFlags::SELECTED, StateFlags::INVALID] {
                let resting = derive(&kind, base, &palette);
                let hovered = derive(&kind, base | StateFlags::HOVER | StateFlags::PRESSED, &palette);
                for (part, style) in &resting.parts {
                    let other = hovered.part(*part).unwrap();
                    assert_eq!(style.background.role, other.background.role, "{}", kind.name());
                    assert_eq!(style.foreground.role, other.foreground.role, "{}", kind.name());
                    assert_eq!(style.border.role, other.border.role, "{}", kind.name());
                }
            }
        }
    }

    #[test]
    fn palette_swap_changes_colors_not_roles() {
        let dark = derive(&WidgetKind::Checkbox, StateFlags::SELECTED, &ThemePreset::Dark.palette());
        let light = derive(&WidgetKind::Checkbox, StateFlags::SELECTED, &ThemePreset::Light.palette());
        let (dark_body, light_body) = (
            dark.part(StylePart::Body).unwrap(),
            light.part(StylePart::Body).unwrap(),
        );
        assert_eq!(dark_body.background.role, light_body.background.role);
        assert_ne!(dark_body.background.color, light_body.background.color);
    }
}
