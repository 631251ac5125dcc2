use super::layout::{PointerShape, SegmentShape};
use super::scene::Scene;
use super::{LABEL_FONT, RendererKind};
use crate::error::WheelError;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;
use std::path::Path;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Paints the whole scene: the rotated segment group first, the pointer on top.
pub fn paint(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    let (vw, vh) = scene.viewport;
    cr.save()?;
    if vw > 0.0 && vh > 0.0 {
        cr.scale(scene.width / vw, scene.height / vh);
    }

    if let Some(group) = &scene.group {
        cr.save()?;
        cr.translate(group.translation.x, group.translation.y);
        cr.rotate(scene.rotation);
        for segment in &group.segments {
            paint_segment(cr, segment, scene.style.label)?;
        }
        cr.restore()?;
    }

    if let Some(pointer) = &scene.pointer {
        paint_pointer(cr, pointer, scene.style.pointer)?;
    }
    cr.restore()
}

fn paint_segment(
    cr: &Context,
    segment: &SegmentShape,
    text: Srgba<f64>,
) -> Result<(), cairo::Error> {
    let fill = segment.fill.into_format::<f64>();
    cr.set_source_rgb(fill.red, fill.green, fill.blue);
    cr.new_path();
    cr.move_to(segment.center.x, segment.center.y);
    cr.arc(
        segment.center.x,
        segment.center.y,
        segment.radius,
        segment.start_angle,
        segment.start_angle + segment.sweep,
    );
    cr.close_path();
    cr.fill()?;

    set_source(cr, text);
    cr.select_font_face(LABEL_FONT, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(segment.font_size);
    let ext = cr.text_extents(&segment.label)?;

    cr.save()?;
    cr.translate(segment.label_anchor.x, segment.label_anchor.y);
    cr.rotate(segment.label_rotation);
    // right-aligned, vertically centred on the anchor
    cr.move_to(-ext.x_advance(), ext.height() / 2.0);
    cr.show_text(&segment.label)?;
    cr.restore()
}

fn paint_pointer(
    cr: &Context,
    pointer: &PointerShape,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_source(cr, color);

    cr.save()?;
    cr.set_fill_rule(cairo::FillRule::EvenOdd);
    cr.new_path();
    cr.arc(
        pointer.center.x,
        pointer.center.y,
        pointer.outer_radius,
        0.0,
        2.0 * PI,
    );
    cr.new_sub_path();
    cr.arc(
        pointer.center.x,
        pointer.center.y,
        pointer.inner_radius,
        0.0,
        2.0 * PI,
    );
    cr.fill()?;
    cr.restore()?;

    let [first, rest @ ..] = pointer.arrow;
    cr.new_path();
    cr.move_to(first.x, first.y);
    for p in rest {
        cr.line_to(p.x, p.y);
    }
    cr.close_path();
    cr.fill()
}

/// Renders `scene` offscreen into a PNG or SVG file.
pub fn export(scene: &Scene, kind: RendererKind, path: &Path) -> Result<(), WheelError> {
    let (width, height) = (scene.width.ceil() as i32, scene.height.ceil() as i32);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    match kind {
        RendererKind::Png => {
            let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
            {
                let cr = Context::new(&surface)?;
                paint(&cr, scene)?;
            }
            let mut file = fs_err::File::create(path)?;
            surface.write_to_png(&mut file)?;
        }
        RendererKind::Svg => {
            let surface = cairo::SvgSurface::new(scene.width, scene.height, Some(path))?;
            {
                let cr = Context::new(&surface)?;
                paint(&cr, scene)?;
            }
            surface.finish();
        }
        RendererKind::Window => {
            log::warn!("Window renderer cannot export, writing PNG to {}", path.display());
            return export(scene, RendererKind::Png, path);
        }
    }
    log::info!("Wrote {} snapshot to {}", kind, path.display());
    Ok(())
}
