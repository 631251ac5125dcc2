use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use wheel::surface::WheelStyle;

/// Pointer and label colours taken from the active GTK theme.
pub fn wheel_style(context: &gtk::StyleContext) -> WheelStyle {
    let fallback = WheelStyle::default();
    WheelStyle {
        pointer: lookup_color(context, "theme_fg_color", fallback.pointer),
        label: lookup_color(context, "theme_selected_fg_color", fallback.label),
    }
}

fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
    context
        .lookup_color(name)
        .map(|c| {
            Srgba::new(
                c.red() as f64,
                c.green() as f64,
                c.blue() as f64,
                c.alpha() as f64,
            )
        })
        .unwrap_or(fallback)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.wheel-area {
    background: none;
    background-color: transparent;
}
.step-title {
    font-weight: bold;
    font-size: 1.3em;
}
.form-error {
    color: @error_color;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
