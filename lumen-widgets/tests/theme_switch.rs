use std::rc::Rc;

use lumen_core::context::UiContext;
use lumen_core::surface::HeadlessSurface;
use lumen_core::widget::Widget;
use lumen_theme::palette::ColorRole;
use lumen_theme::presets::ThemePreset;
use lumen_theme::registry::ThemeRegistry;
use lumen_theme::state::StateFlags;
use lumen_theme::style::StylePart;
use lumen_widgets::button::Button;
use lumen_widgets::checkbox::Checkbox;
use lumen_widgets::text_field::{TextField, Validator};
use lumen_widgets::toggle::ToggleButton;

#[test]
fn test_palette_switch_restyles_every_widget() {
    let surface = Rc::new(HeadlessSurface::new());
    let registry = ThemeRegistry::new(ThemePreset::Dark.palette());
    let context = UiContext::with_surface(registry.clone(), surface.clone());

    let button = Button::new(&context, "Ok");
    let toggle = ToggleButton::new(&context, "Wrap").with_selected(true);
    let field = TextField::new(&context).with_text("x");
    let widgets: [&dyn Widget; 3] = [&button, &toggle, &field];

    let report = registry.set_current(ThemePreset::Light.palette());
    assert!(report.is_clean());
    assert_eq!(report.notified, 3);

    let light = ThemePreset::Light.palette();
    for widget in widgets {
        assert_eq!(surface.style_of(widget.key()), Some(widget.style()));
    }
    let body = surface.style_of(toggle.key()).unwrap();
    assert_eq!(
        body.part(StylePart::Body).unwrap().background.color,
        light.color(ColorRole::Primary)
    );
}

#[test]
fn test_disabled_beats_invalid_and_selected() {
    let context = UiContext::new(ThemeRegistry::default(), HeadlessSurface::new());
    let checkbox = Checkbox::new(&context, "Terms").with_selected(true);
    checkbox.set_validation_message("Required");
    checkbox.set_disabled(true);
    assert_eq!(
        checkbox.flags(),
        StateFlags::SELECTED | StateFlags::INVALID | StateFlags::DISABLED
    );

    let body = checkbox.style().part(StylePart::Body).copied().unwrap();
    assert_eq!(body.border.role, Some(ColorRole::Disabled));
}

#[test]
fn test_same_validator_twice_is_stable() {
    let context = UiContext::new(ThemeRegistry::default(), HeadlessSurface::new());
    let field = TextField::new(&context).with_text("not-an-email");

    field.set_validator(Validator::email("Invalid email"));
    let first = (field.is_valid(), field.validation_message());
    field.set_validator(Validator::email("Invalid email"));
    let second = (field.is_valid(), field.validation_message());
    assert_eq!(first, second);
    assert!(!first.0);

    field.set_text("ada@example.com");
    let validator = Validator::email("Invalid email");
    field.set_validator(validator.clone());
    field.set_validator(validator);
    assert!(field.is_valid());
}
