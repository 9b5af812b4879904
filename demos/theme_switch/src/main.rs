use std::env;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use lumen::prelude::*;

fn print_palette(palette: &Palette) {
    println!("== {} ==", palette.name());
    for role in [
        ColorRole::Background,
        ColorRole::Surface,
        ColorRole::Primary,
        ColorRole::OnPrimary,
        ColorRole::Error,
    ] {
        println!("  {:<12} {}", role.as_str(), palette.hex_of(role));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ThemeConfig::from_env_or_default();
    let registry = ThemeRegistry::new(config.resolve_or_default());
    let surface = Rc::new(HeadlessSurface::new());
    let context = UiContext::with_surface(registry.clone(), surface.clone());

    let all = Checkbox::new(&context, "All toppings");
    let toppings: Vec<Checkbox> = ["Cheese", "Olives", "Basil"]
        .into_iter()
        .map(|name| Checkbox::new(&context, name))
        .collect();
    let group = CheckboxGroup::new(&all);
    group.attach_all(&toppings)?;

    let email = TextField::new(&context)
        .with_placeholder("you@example.com")
        .with_validator(Validator::email("Please enter a valid email"));
    let save = Button::new(&context, "Save").with_variant(ButtonVariant::Success);

    toppings[0].click();
    email.set_text("not an email");
    println!(
        "'{}' is {:?}, email valid: {} ({})",
        all.label(),
        all.value(),
        email.is_valid(),
        email.validation_message()
    );

    registry.subscribe(print_palette);
    for preset in ThemePreset::ALL {
        let report = registry.set_current(preset.palette());
        let body = surface
            .style_of(save.key())
            .and_then(|style| style.part(StylePart::Body).copied())
            .context("save button has no body style")?;
        println!(
            "  restyled {} widgets, save button fill {:?}",
            report.notified, body.background.color
        );
    }

    if let Some(path) = env::args().nth(1) {
        let mut watcher = ConfigWatcher::new(&path)
            .with_context(|| format!("failed to watch theme config {path}"))?;
        log::info!("Watching {:?}, edit it to switch themes (Ctrl+C to quit)", watcher.config_path());
        loop {
            match watcher.reload(&registry) {
                Ok(Some(report)) if !report.is_clean() => {
                    log::warn!("{} subscribers failed", report.failed);
                },
                Ok(_) => {},
                Err(err) => log::error!("Could not apply theme config: {}", err),
            }
            thread::sleep(Duration::from_millis(250));
        }
    }

    Ok(())
}
