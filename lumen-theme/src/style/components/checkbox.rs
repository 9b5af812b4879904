use crate::palette::{ColorRole, Palette};
use crate::state::{StateFlags, StateTier};
use crate::style::{outline_paint, FontWeight, Paint, PartStyle, StyleDescriptor, StylePart};

/// Edge length of the check box.
pub const BOX_SIZE: f32 = 18.0;
/// Gap between box and label.
pub const LABEL_SPACING: f32 = 8.0;
/// Corner radius of the box.
pub const CORNER_RADIUS: f32 = 3.0;
/// Outline width of the box.
pub const BORDER_WIDTH: f32 = 2.0;
/// Diameter of the ripple overlay.
pub const RIPPLE_SIZE: f32 = 40.0;
/// Ripple opacity while hovered or pressed.
pub const RIPPLE_MAX_OPACITY: f32 = 0.12;
/// Glyph size relative to the box.
pub const ICON_SCALE: f32 = 0.7;
/// Label text size.
pub const FONT_SIZE: f32 = 14.0;
/// Validation message text size.
pub const MESSAGE_FONT_SIZE: f32 = 12.0;

/// Derive the checkbox style: box, glyph, label, ripple and message.
pub fn checkbox_style(flags: StateFlags, palette: &Palette) -> StyleDescriptor {
    let tier = StateTier::of(flags);
    let active = flags.is_active();

    let border = outline_paint(flags, palette, ColorRole::OnSurface, 0.6, ColorRole::Primary);
    let fill = match tier {
        StateTier::Invalid | StateTier::Active if active => border,
        _ => Paint::TRANSPARENT,
    };

    let glyph = match tier {
        StateTier::Disabled => Paint::role(palette, ColorRole::Disabled),
        StateTier::Invalid => Paint::role(palette, ColorRole::OnError),
        _ => Paint::role(palette, ColorRole::OnPrimary),
    };
    let text = match tier {
        StateTier::Disabled => Paint::role(palette, ColorRole::Disabled),
        _ => Paint::role(palette, ColorRole::OnSurface),
    };

    let ripple = if tier == StateTier::Disabled {
        Paint::TRANSPARENT
    } else {
        Paint::role(palette, ColorRole::Primary)
    };
    let ripple_opacity = if flags.shows_hover() || flags.shows_pressed() {
        RIPPLE_MAX_OPACITY
    } else {
        0.0
    };

    StyleDescriptor::new()
        .with_part(
            StylePart::Body,
            PartStyle::default()
                .background(fill)
                .border(border, BORDER_WIDTH)
                .radius(CORNER_RADIUS),
        )
        .with_part(
            StylePart::Icon,
            PartStyle::default()
                .foreground(glyph)
                .opacity(if active { 1.0 } else { 0.0 }),
        )
        .with_part(
            StylePart::Label,
            PartStyle::default()
                .foreground(text)
                .font(FONT_SIZE, FontWeight::Normal),
        )
        .with_part(
            StylePart::Ripple,
            PartStyle::default()
                .background(ripple)
                .radius(RIPPLE_SIZE / 2.0)
                .opacity(ripple_opacity),
        )
        .with_part(
            StylePart::Message,
            PartStyle::default()
                .foreground(Paint::role(palette, ColorRole::Error))
                .font(MESSAGE_FONT_SIZE, FontWeight::Normal)
                .opacity(if flags.contains(StateFlags::INVALID) { 1.0 } else { 0.0 }),
        )
}
