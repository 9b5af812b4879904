use crate::palette::{ColorRole, Palette};
use crate::state::StateFlags;
use crate::style::{Paint, PartStyle, StyleDescriptor, StylePart};

/// Scrollbar width.
pub const SCROLLBAR_WIDTH: f32 = 8.0;
/// Scrollbar corner radius.
pub const SCROLLBAR_RADIUS: f32 = 4.0;
/// Thumb opacity at rest.
pub const THUMB_OPACITY: f32 = 0.5;
/// Thumb opacity while hovered.
pub const THUMB_HOVER_OPACITY: f32 = 0.8;
/// Alpha of the track.
pub const TRACK_OPACITY: f32 = 0.1;

/// Derive the scroll pane style. Hover refers to the scrollbar thumb.
pub fn scroll_pane_style(flags: StateFlags, palette: &Palette) -> StyleDescriptor {
    let thumb = if flags.is_disabled() {
        Paint::role(palette, ColorRole::Disabled)
    } else {
        Paint::role(palette, ColorRole::Primary)
    };

    StyleDescriptor::new()
        .with_part(
            StylePart::Body,
            PartStyle::default().background(Paint::role(palette, ColorRole::Surface)),
        )
        .with_part(
            StylePart::Track,
            PartStyle::default()
                .background(Paint::role_alpha(palette, ColorRole::Surface, TRACK_OPACITY))
                .radius(SCROLLBAR_RADIUS),
        )
        .with_part(
            StylePart::Thumb,
            PartStyle::default()
                .background(thumb)
                .radius(SCROLLBAR_RADIUS)
                .opacity(if flags.shows_hover() {
                    THUMB_HOVER_OPACITY
                } else {
                    THUMB_OPACITY
                }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_brightens_on_hover() {
        let palette = Palette::default();
        let idle = scroll_pane_style(StateFlags::empty(), &palette);
        let hovered = scroll_pane_style(StateFlags::HOVER, &palette);
        assert_eq!(idle.part(StylePart::Thumb).unwrap().opacity, THUMB_OPACITY);
        assert_eq!(hovered.part(StylePart::Thumb).unwrap().opacity, THUMB_HOVER_OPACITY);
        assert_eq!(
            hovered.part(StylePart::Thumb).unwrap().background.role,
            Some(ColorRole::Primary)
        );
    }
}
