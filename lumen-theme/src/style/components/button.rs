use crate::palette::{ColorRole, Palette};
use crate::state::{StateFlags, StateTier};
use crate::style::{
    ButtonVariant, Elevation, FontWeight, Insets, Paint, PartStyle, StyleDescriptor, StylePart,
};

/// Corner radius.
pub const CORNER_RADIUS: f32 = 5.0;
/// Padding of a regular button.
pub const PADDING: Insets = Insets::symmetric(8.0, 16.0);
/// Padding of a menu button.
pub const MENU_PADDING: Insets = Insets::symmetric(10.0, 20.0);
/// Fixed width of a menu button.
pub const MENU_WIDTH: f32 = 200.0;

/// Shadow radius and offset at rest.
pub const SHADOW_REST: (f32, f32) = (5.0, 2.0);
/// Shadow radius and offset while hovered.
pub const SHADOW_HOVER: (f32, f32) = (8.0, 3.0);
/// Shadow radius and offset while pressed.
pub const SHADOW_PRESSED: (f32, f32) = (3.0, 1.0);

/// Derive the button style.
pub fn button_style(
    variant: ButtonVariant,
    menu: bool,
    flags: StateFlags,
    palette: &Palette,
) -> StyleDescriptor {
    let (fill_role, text_role) = variant.roles();
    let tier = StateTier::of(flags);

    let (background, text, border) = match tier {
        StateTier::Disabled => (
            Paint::role(palette, ColorRole::Disabled),
            Paint::role_alpha(palette, ColorRole::OnSurface, 0.38),
            Paint::TRANSPARENT,
        ),
        StateTier::Invalid => (
            Paint::role(palette, fill_role),
            Paint::role(palette, text_role),
            Paint::role(palette, ColorRole::Error),
        ),
        StateTier::Active | StateTier::Idle => (
            Paint::role(palette, fill_role),
            Paint::role(palette, text_role),
            Paint::TRANSPARENT,
        ),
    };

    let body = PartStyle::default()
        .background(background)
        .border(border, if border.is_transparent() { 0.0 } else { 1.0 })
        .radius(CORNER_RADIUS)
        .padding(if menu { MENU_PADDING } else { PADDING });

    let mut style = StyleDescriptor::new().with_part(StylePart::Body, body).with_part(
        StylePart::Label,
        PartStyle::default()
            .foreground(text)
            .font(PartStyle::DEFAULT_FONT_SIZE, FontWeight::Normal),
    );

    if tier != StateTier::Disabled {
        let (radius, offset_y) = if flags.shows_pressed() {
            SHADOW_PRESSED
        } else if flags.shows_hover() {
            SHADOW_HOVER
        } else {
            SHADOW_REST
        };
        style = style.with_elevation(Elevation {
            radius,
            offset_y,
            lift: 0.0,
            color: Paint::role(palette, ColorRole::Overlay),
        });
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_selects_role_pair() {
        let palette = Palette::default();
        let style = button_style(ButtonVariant::Warning, false, StateFlags::empty(), &palette);
        assert_eq!(
            style.part(StylePart::Body).unwrap().background.role,
            Some(ColorRole::Warning)
        );
        assert_eq!(
            style.part(StylePart::Label).unwrap().foreground.role,
            Some(ColorRole::OnWarning)
        );
    }

    #[test]
    fn elevation_tracks_pointer() {
        let palette = Palette::default();
        let radius = |flags| {
            button_style(ButtonVariant::Primary, false, flags, &palette)
                .elevation
                .map(|e| e.radius)
        };
        assert_eq!(radius(StateFlags::empty()), Some(5.0));
        assert_eq!(radius(StateFlags::HOVER), Some(8.0));
        assert_eq!(radius(StateFlags::HOVER | StateFlags::PRESSED), Some(3.0));
        assert_eq!(radius(StateFlags::DISABLED | StateFlags::HOVER), None);
    }

    #[test]
    fn menu_buttons_get_wider_padding() {
        let palette = Palette::default();
        let style = button_style(ButtonVariant::Secondary, true, StateFlags::empty(), &palette);
        assert_eq!(style.part(StylePart::Body).unwrap().padding, MENU_PADDING);
    }
}
