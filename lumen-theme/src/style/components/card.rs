use crate::palette::{ColorRole, Palette};
use crate::state::StateFlags;
use crate::style::{Elevation, Insets, Paint, PartStyle, StyleDescriptor, StylePart};

/// Inner padding.
pub const PADDING: f32 = 15.0;
/// Spacing between stacked children.
pub const SPACING: f32 = 10.0;
/// Corner radius.
pub const CORNER_RADIUS: f32 = 10.0;
/// Default shadow radius.
pub const DEFAULT_ELEVATION: f32 = 2.0;
/// Shadow offset at rest.
pub const SHADOW_OFFSET: f32 = 2.0;
/// Shadow offset while hovered.
pub const HOVER_SHADOW_OFFSET: f32 = 4.0;
/// Shadow radius multiplier while hovered.
pub const HOVER_ELEVATION_MULTIPLIER: f32 = 1.5;
/// Vertical translation while hovered.
pub const HOVER_LIFT: f32 = -2.0;

/// Derive the card style. Only hoverable cards react to the pointer.
pub fn card_style(
    hoverable: bool,
    elevation: f32,
    flags: StateFlags,
    palette: &Palette,
) -> StyleDescriptor {
    let lifted = hoverable && flags.shows_hover();
    let shadow = if lifted {
        Elevation {
            radius: elevation * HOVER_ELEVATION_MULTIPLIER,
            offset_y: HOVER_SHADOW_OFFSET,
            lift: HOVER_LIFT,
            color: Paint::role(palette, ColorRole::Overlay),
        }
    } else {
        Elevation {
            radius: elevation,
            offset_y: SHADOW_OFFSET,
            lift: 0.0,
            color: Paint::role(palette, ColorRole::Overlay),
        }
    };

    let text = if flags.is_disabled() {
        Paint::role(palette, ColorRole::Disabled)
    } else {
        Paint::role(palette, ColorRole::OnSurface)
    };

    StyleDescriptor::new()
        .with_part(
            StylePart::Body,
            PartStyle::default()
                .background(Paint::role(palette, ColorRole::Surface))
                .foreground(text)
                .radius(CORNER_RADIUS)
                .padding(Insets::uniform(PADDING)),
        )
        .with_elevation(shadow)
}
