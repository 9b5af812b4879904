use crate::palette::{ColorRole, Palette};
use crate::state::{StateFlags, StateTier};
use crate::style::{outline_paint, FontWeight, Insets, Paint, PartStyle, StyleDescriptor, StylePart};

/// Corner radius.
pub const CORNER_RADIUS: f32 = 5.0;
/// Padding around the editor.
pub const PADDING: Insets = Insets::uniform(4.0);
/// Padding of list cells.
pub const CELL_PADDING: Insets = Insets::uniform(8.0);
/// Alpha of the idle outline.
pub const BORDER_OPACITY: f32 = 0.2;
/// Opacity of the hovered list cell highlight.
pub const HOVER_OPACITY: f32 = 0.2;

/// Derive the combo box style. [StateFlags::SELECTED] marks an open popup.
pub fn combo_box_style(flags: StateFlags, palette: &Palette) -> StyleDescriptor {
    let tier = StateTier::of(flags);
    let border = outline_paint(
        flags,
        palette,
        ColorRole::OnSurface,
        BORDER_OPACITY,
        ColorRole::Primary,
    );
    let text = match tier {
        StateTier::Disabled => Paint::role(palette, ColorRole::Disabled),
        _ => Paint::role(palette, ColorRole::OnSurface),
    };
    let highlight = if tier == StateTier::Disabled {
        Paint::TRANSPARENT
    } else {
        Paint::role(palette, ColorRole::Primary)
    };

    StyleDescriptor::new()
        .with_part(
            StylePart::Body,
            PartStyle::default()
                .background(Paint::role(palette, ColorRole::Surface))
                .foreground(text)
                .border(border, 1.0)
                .radius(CORNER_RADIUS)
                .padding(PADDING)
                .font(PartStyle::DEFAULT_FONT_SIZE, FontWeight::Normal),
        )
        .with_part(StylePart::Arrow, PartStyle::default().foreground(text))
        .with_part(
            StylePart::Highlight,
            PartStyle::default()
                .background(highlight)
                .padding(CELL_PADDING)
                .opacity(if flags.shows_hover() { HOVER_OPACITY } else { 0.0 }),
        )
}
