use crate::palette::{ColorRole, Palette};
use crate::state::StateFlags;
use crate::style::{Elevation, FontWeight, Insets, Paint, PartStyle, StyleDescriptor, StylePart};

/// Show/hide animation length in milliseconds.
pub const ANIMATION_MS: u64 = 250;
/// Maximum dialog width.
pub const MAX_WIDTH: f32 = 560.0;
/// Maximum dialog height.
pub const MAX_HEIGHT: f32 = 400.0;
/// Shadow blur radius.
pub const BLUR_RADIUS: f32 = 10.0;
/// Scale the dialog grows from when shown.
pub const INITIAL_SCALE: f32 = 0.8;
/// Corner radius.
pub const CORNER_RADIUS: f32 = 4.0;

/// Derive the dialog style: scrim and content box.
pub fn dialog_style(flags: StateFlags, palette: &Palette) -> StyleDescriptor {
    let text = if flags.is_disabled() {
        Paint::role(palette, ColorRole::Disabled)
    } else {
        Paint::role(palette, ColorRole::OnSurface)
    };

    StyleDescriptor::new()
        .with_part(
            StylePart::Overlay,
            PartStyle::default().background(Paint::role(palette, ColorRole::Overlay)),
        )
        .with_part(
            StylePart::Body,
            PartStyle::default()
                .background(Paint::role(palette, ColorRole::Surface))
                .foreground(text)
                .radius(CORNER_RADIUS)
                .padding(Insets::uniform(24.0)),
        )
        .with_part(
            StylePart::Label,
            PartStyle::default().foreground(text).font(20.0, FontWeight::Bold),
        )
        .with_elevation(Elevation {
            radius: BLUR_RADIUS,
            offset_y: 0.0,
            lift: 0.0,
            color: Paint::role(palette, ColorRole::Overlay),
        })
}
