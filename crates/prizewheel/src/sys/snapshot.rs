use std::path::Path;
use wheel::surface::export;
use wheel::{Label, RendererKind, SceneSurface, Wheel, WheelConfig};

/// Picks the export format from an explicit choice or the file extension.
pub fn infer_kind(explicit: Option<RendererKind>, out: &Path) -> RendererKind {
    explicit.unwrap_or_else(|| {
        match out
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("svg") => RendererKind::Svg,
            _ => RendererKind::Png,
        }
    })
}

/// Draws the wheel offscreen at `rotation` and writes it to `out`. Returns the label under
/// the pointer.
pub fn render(
    labels: Vec<Label>,
    size: u32,
    rotation: f64,
    kind: RendererKind,
    out: &Path,
) -> anyhow::Result<Label> {
    let config = WheelConfig::new(size, size, kind);
    let surface = SceneSurface::new(size as f64, size as f64);
    let mut wheel = Wheel::initialize(config, surface)?;

    wheel.set_labels(labels);
    wheel.set_rotation(rotation);
    wheel.draw()?;
    export(wheel.surface().scene(), kind, out)?;

    Ok(wheel.current_word()?.clone())
}
