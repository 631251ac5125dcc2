use super::{
    EDGE_DIST_RATIO, TEXT_SIZE_RATIO, TICKER_INNER_RATIO, TICKER_RADIUS_RATIO, segment_color,
    ticker_tangent_angle,
};
use crate::geometry::{Bounds, Point, arc_bounds, point_on_circle};
use crate::label::Label;
use palette::Srgb;
use std::f64::consts::{PI, TAU};

/// One slice of the wheel, in group-local coordinates (the group pivot is the origin).
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentShape {
    pub label: Label,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
    pub fill: Srgb<u8>,
    /// Right edge of the label text.
    pub label_anchor: Point,
    pub label_rotation: f64,
    pub font_size: f64,
}

impl SegmentShape {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }
}

/// Segments grouped around the pivot they rotate about.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelLayout {
    /// Screen position of the pivot.
    pub translation: Point,
    pub segments: Vec<SegmentShape>,
    /// Unrotated bounds in group-local coordinates.
    pub local_bounds: Bounds,
    pub radius: f64,
}

impl WheelLayout {
    /// Lays out one slice per label for a surface `width` pixels wide.
    ///
    /// The pivot is the centre of the bounding box of every arc and label extent, so labels
    /// that poke out of their slice shift the pivot with them. `measure` returns the advance
    /// width of a label at a font size.
    pub fn compute(labels: &[Label], width: f64, measure: impl Fn(&str, f64) -> f64) -> Self {
        let unit = TAU / labels.len() as f64;
        let x_offset = width * TICKER_RADIUS_RATIO * 2.0;
        let radius = (width - x_offset * 2.0) / 2.0;
        let center = Point::new(width / 2.0, radius + x_offset);
        let font_size = radius * TEXT_SIZE_RATIO;
        let text_radius = radius * (1.0 - EDGE_DIST_RATIO);

        let mut bounds: Option<Bounds> = None;
        let segments: Vec<SegmentShape> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let start_angle = unit * i as f64 - (PI + unit) / 2.0;
                let label_anchor = point_on_circle(text_radius, start_angle + unit / 2.0, center);
                let label_rotation = unit * i as f64 - PI / 2.0;

                let slice = arc_bounds(center, radius, start_angle, unit);
                let text = label_bounds(
                    label_anchor,
                    label_rotation,
                    measure(label, font_size),
                    font_size,
                );
                let both = slice.union(&text);
                bounds = Some(bounds.map_or(both, |b| b.union(&both)));

                SegmentShape {
                    label: label.clone(),
                    center,
                    radius,
                    start_angle,
                    sweep: unit,
                    fill: segment_color(i),
                    label_anchor,
                    label_rotation,
                    font_size,
                }
            })
            .collect();

        let bounds = bounds.unwrap_or(Bounds::new(center, center));
        let pivot = bounds.center();
        let to_local = |p: Point| p.offset(-pivot.x, -pivot.y);

        Self {
            translation: pivot,
            segments: segments
                .into_iter()
                .map(|s| SegmentShape {
                    center: to_local(s.center),
                    label_anchor: to_local(s.label_anchor),
                    ..s
                })
                .collect(),
            local_bounds: Bounds::new(to_local(bounds.min), to_local(bounds.max)),
            radius,
        }
    }

    /// Axis-aligned screen bounds of the group once rotated by `rotation`.
    pub fn screen_bounds(&self, rotation: f64) -> Bounds {
        let corners = self
            .local_bounds
            .corners()
            .map(|c| c.rotate(rotation).offset(self.translation.x, self.translation.y));
        Bounds::from_points(corners).unwrap_or(self.local_bounds)
    }
}

/// Box covering right-aligned text whose right edge sits at `anchor`, rotated by `rotation`.
fn label_bounds(anchor: Point, rotation: f64, text_width: f64, size: f64) -> Bounds {
    let (sin, cos) = rotation.sin_cos();
    let tail = anchor.offset(-text_width * cos, -text_width * sin);
    let (nx, ny) = (-sin * size / 2.0, cos * size / 2.0);

    let corners = [anchor, tail]
        .into_iter()
        .flat_map(|p| [p.offset(nx, ny), p.offset(-nx, -ny)]);
    Bounds::from_points(corners).unwrap_or(Bounds::new(anchor, anchor))
}

/// The fixed indicator on the right edge of the surface: a ring plus an arrow tangent to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerShape {
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub arrow: [Point; 4],
}

impl PointerShape {
    pub fn compute(width: f64, height: f64) -> Self {
        let outer_radius = TICKER_RADIUS_RATIO * width;
        let center = Point::new(width - outer_radius, height / 2.0);
        let tangent = ticker_tangent_angle();

        let arrow = [
            point_on_circle(outer_radius, PI, center),
            point_on_circle(outer_radius, PI / 2.0 + tangent, center),
            Point::new(center.x - outer_radius / (PI / 2.0 - tangent).cos(), center.y),
            point_on_circle(outer_radius, 3.0 * PI / 2.0 - tangent, center),
        ];

        Self {
            center,
            outer_radius,
            inner_radius: outer_radius * TICKER_INNER_RATIO,
            arrow,
        }
    }

    /// Tip of the arrow, the point the winning segment sits under.
    pub fn tip(&self) -> Point {
        self.arrow[2]
    }
}
