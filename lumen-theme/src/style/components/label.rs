use crate::palette::{ColorRole, Palette};
use crate::state::StateFlags;
use crate::style::{Emphasis, FontWeight, LabelVariant, Paint, PartStyle, StyleDescriptor, StylePart};

/// Font size and weight of a label variant.
pub fn typography(variant: LabelVariant) -> (f32, FontWeight) {
    match variant {
        LabelVariant::Title => (24.0, FontWeight::Bold),
        LabelVariant::Subtitle => (18.0, FontWeight::SemiBold),
        LabelVariant::Heading => (16.0, FontWeight::Bold),
        LabelVariant::Body => (14.0, FontWeight::Normal),
        LabelVariant::Caption => (12.0, FontWeight::Normal),
    }
}

/// Whether a label variant wraps long text.
pub fn wraps(variant: LabelVariant) -> bool {
    matches!(
        variant,
        LabelVariant::Title | LabelVariant::Subtitle | LabelVariant::Heading
    )
}

/// Derive the label style.
pub fn label_style(
    variant: LabelVariant,
    emphasis: Emphasis,
    flags: StateFlags,
    palette: &Palette,
) -> StyleDescriptor {
    let (size, weight) = typography(variant);
    let text = if flags.is_disabled() {
        Paint::role(palette, ColorRole::Disabled)
    } else {
        Paint::role_alpha(palette, ColorRole::OnSurface, emphasis.alpha())
    };

    StyleDescriptor::new().with_part(
        StylePart::Label,
        PartStyle::default().foreground(text).font(size, weight),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_sets_alpha() {
        let palette = Palette::default();
        let style = label_style(LabelVariant::Caption, Emphasis::Medium, StateFlags::empty(), &palette);
        let label = style.part(StylePart::Label).unwrap();
        assert!((label.foreground.color.components[3] - 0.87).abs() < 1e-6);
        assert_eq!(label.font_size, 12.0);
    }

    #[test]
    fn title_is_bold_and_wraps() {
        assert_eq!(typography(LabelVariant::Title), (24.0, FontWeight::Bold));
        assert!(wraps(LabelVariant::Title));
        assert!(!wraps(LabelVariant::Body));
    }
}
