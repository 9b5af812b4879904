use crate::palette::{ColorRole, Palette};
use crate::state::{StateFlags, StateTier};
use crate::style::{FontWeight, Insets, Paint, PartStyle, StyleDescriptor, StylePart};

/// Preferred width.
pub const WIDTH: f32 = 120.0;
/// Preferred height.
pub const HEIGHT: f32 = 36.0;
/// Corner radius.
pub const CORNER_RADIUS: f32 = 4.0;
/// Overlay opacity while hovered.
pub const HOVER_OPACITY: f32 = 0.08;
/// Overlay opacity while pressed.
pub const RIPPLE_OPACITY: f32 = 0.12;

/// Derive the toggle button style.
pub fn toggle_style(flags: StateFlags, palette: &Palette) -> StyleDescriptor {
    let selected = flags.contains(StateFlags::SELECTED);

    let (background, text, border) = match StateTier::of(flags) {
        StateTier::Disabled => (
            if selected {
                Paint::role(palette, ColorRole::Disabled)
            } else {
                Paint::TRANSPARENT
            },
            Paint::role(palette, ColorRole::Disabled),
            Paint::role(palette, ColorRole::Disabled),
        ),
        StateTier::Invalid => (
            if selected {
                Paint::role(palette, ColorRole::Error)
            } else {
                Paint::TRANSPARENT
            },
            Paint::role(
                palette,
                if selected { ColorRole::OnError } else { ColorRole::OnSurface },
            ),
            Paint::role(palette, ColorRole::Error),
        ),
        StateTier::Active => (
            Paint::role(palette, ColorRole::Primary),
            Paint::role(palette, ColorRole::OnPrimary),
            Paint::role(palette, ColorRole::Primary),
        ),
        StateTier::Idle => (
            Paint::TRANSPARENT,
            Paint::role(palette, ColorRole::OnSurface),
            Paint::role_alpha(palette, ColorRole::OnSurface, 0.23),
        ),
    };

    // The overlay contrasts with whatever the body is filled with.
    let overlay = if flags.is_disabled() {
        Paint::TRANSPARENT
    } else if selected {
        Paint::role(palette, ColorRole::OnPrimary)
    } else {
        Paint::role(palette, ColorRole::Primary)
    };
    let overlay_opacity = if flags.shows_pressed() {
        RIPPLE_OPACITY
    } else if flags.shows_hover() {
        HOVER_OPACITY
    } else {
        0.0
    };

    StyleDescriptor::new()
        .with_part(
            StylePart::Body,
            PartStyle::default()
                .background(background)
                .border(border, 1.0)
                .radius(CORNER_RADIUS)
                .padding(Insets::symmetric(8.0, 16.0)),
        )
        .with_part(
            StylePart::Label,
            PartStyle::default()
                .foreground(text)
                .font(PartStyle::DEFAULT_FONT_SIZE, FontWeight::SemiBold),
        )
        .with_part(
            StylePart::Ripple,
            PartStyle::default()
                .background(overlay)
                .radius(CORNER_RADIUS)
                .opacity(overlay_opacity),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_toggle_is_filled() {
        let style = toggle_style(StateFlags::SELECTED, &Palette::default());
        let body = style.part(StylePart::Body).unwrap();
        assert_eq!(body.background.role, Some(ColorRole::Primary));
        assert_eq!(
            style.part(StylePart::Label).unwrap().foreground.role,
            Some(ColorRole::OnPrimary)
        );
    }

    #[test]
    fn overlay_contrasts_with_fill() {
        let palette = Palette::default();
        let on = toggle_style(StateFlags::SELECTED | StateFlags::HOVER, &palette);
        let off = toggle_style(StateFlags::HOVER, &palette);
        let on_ripple = on.part(StylePart::Ripple).unwrap();
        let off_ripple = off.part(StylePart::Ripple).unwrap();
        assert_eq!(on_ripple.background.role, Some(ColorRole::OnPrimary));
        assert_eq!(off_ripple.background.role, Some(ColorRole::Primary));
        assert_eq!(off_ripple.opacity, HOVER_OPACITY);

        let pressed = toggle_style(StateFlags::HOVER | StateFlags::PRESSED, &palette);
        assert_eq!(pressed.part(StylePart::Ripple).unwrap().opacity, RIPPLE_OPACITY);
    }

    #[test]
    fn idle_border_is_faint() {
        let style = toggle_style(StateFlags::empty(), &Palette::default());
        let border = style.part(StylePart::Body).unwrap().border;
        assert_eq!(border.role, Some(ColorRole::OnSurface));
        assert!((border.color.components[3] - 0.23).abs() < 1e-6);
    }
}
