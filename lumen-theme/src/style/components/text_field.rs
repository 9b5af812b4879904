use crate::palette::{ColorRole, Palette};
use crate::state::{StateFlags, StateTier};
use crate::style::{outline_paint, FontWeight, Insets, Paint, PartStyle, StyleDescriptor, StylePart};

/// Field height.
pub const HEIGHT: f32 = 40.0;
/// Maximum field width.
pub const MAX_WIDTH: f32 = 300.0;
/// Inner padding.
pub const PADDING: Insets = Insets::symmetric(8.0, 12.0);
/// Corner radius.
pub const CORNER_RADIUS: f32 = 5.0;
/// Text size.
pub const FONT_SIZE: f32 = 14.0;
/// Validation message size.
pub const MESSAGE_FONT_SIZE: f32 = 12.0;
/// Alpha of the idle outline.
pub const BORDER_OPACITY: f32 = 0.2;
/// Alpha of placeholder text.
pub const PLACEHOLDER_OPACITY: f32 = 0.6;
/// Opacity of a read-only or disabled field.
pub const DISABLED_OPACITY: f32 = 0.6;

/// Derive the text field style.
pub fn text_field_style(editable: bool, flags: StateFlags, palette: &Palette) -> StyleDescriptor {
    let tier = StateTier::of(flags);
    // Text fields have no selected look.
    let border = outline_paint(
        flags,
        palette,
        ColorRole::OnSurface,
        BORDER_OPACITY,
        ColorRole::OnSurface,
    );
    let text = match tier {
        StateTier::Disabled => Paint::role(palette, ColorRole::Disabled),
        _ => Paint::role(palette, ColorRole::OnSurface),
    };
    let opacity = if editable && tier != StateTier::Disabled {
        1.0
    } else {
        DISABLED_OPACITY
    };
    let invalid = tier == StateTier::Invalid;

    StyleDescriptor::new()
        .with_part(
            StylePart::Body,
            PartStyle::default()
                .background(Paint::role(palette, ColorRole::Surface))
                .foreground(text)
                .border(border, 1.0)
                .radius(CORNER_RADIUS)
                .padding(PADDING)
                .opacity(opacity)
                .font(FONT_SIZE, FontWeight::Normal),
        )
        .with_part(
            StylePart::Placeholder,
            PartStyle::default()
                .foreground(Paint::role_alpha(
                    palette,
                    ColorRole::OnSurface,
                    PLACEHOLDER_OPACITY,
                ))
                .font(FONT_SIZE, FontWeight::Normal),
        )
        .with_part(
            StylePart::Message,
            PartStyle::default()
                .foreground(Paint::role(palette, ColorRole::Error))
                .font(MESSAGE_FONT_SIZE, FontWeight::Normal)
                .opacity(if invalid { 1.0 } else { 0.0 }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_has_error_outline_and_message() {
        let style = text_field_style(true, StateFlags::INVALID, &Palette::default());
        assert_eq!(
            style.part(StylePart::Body).unwrap().border.role,
            Some(ColorRole::Error)
        );
        assert_eq!(style.part(StylePart::Message).unwrap().opacity, 1.0);
    }

    #[test]
    fn valid_field_hides_message() {
        let style = text_field_style(true, StateFlags::empty(), &Palette::default());
        let body = style.part(StylePart::Body).unwrap();
        assert_eq!(body.background.role, Some(ColorRole::Surface));
        assert!((body.border.color.components[3] - BORDER_OPACITY).abs() < 1e-6);
        assert_eq!(style.part(StylePart::Message).unwrap().opacity, 0.0);
    }

    #[test]
    fn read_only_field_is_dimmed() {
        let style = text_field_style(false, StateFlags::empty(), &Palette::default());
        assert_eq!(style.part(StylePart::Body).unwrap().opacity, DISABLED_OPACITY);
    }

    #[test]
    fn disabled_invalid_field_hides_error() {
        let style = text_field_style(
            true,
            StateFlags::DISABLED | StateFlags::INVALID,
            &Palette::default(),
        );
        assert_eq!(
            style.part(StylePart::Body).unwrap().border.role,
            Some(ColorRole::Disabled)
        );
        assert_eq!(style.part(StylePart::Message).unwrap().opacity, 0.0);
    }
}
