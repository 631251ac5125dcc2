use super::layout::{PointerShape, WheelLayout};
use super::{LABEL_FONT, RenderSurface, WheelStyle};
use crate::error::WheelError;
use crate::geometry::Bounds;
use crate::label::Label;

/// Width of rendered text, used for bounding-box centering of the wheel.
pub trait TextMetrics {
    fn text_width(&self, text: &str, size: f64) -> f64;
}

/// Measures with cairo's toy text API on a scratch surface.
pub struct CairoMetrics {
    cr: Option<cairo::Context>,
}

impl CairoMetrics {
    pub fn new() -> Self {
        let cr = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1)
            .and_then(|surface| cairo::Context::new(&surface))
            .inspect_err(|e| log::warn!("Text measurement unavailable: {}", e))
            .ok();
        Self { cr }
    }
}

impl Default for CairoMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetrics for CairoMetrics {
    fn text_width(&self, text: &str, size: f64) -> f64 {
        let Some(cr) = &self.cr else {
            return EstimatedMetrics.text_width(text, size);
        };
        cr.select_font_face(LABEL_FONT, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(size);
        cr.text_extents(text)
            .map(|ext| ext.x_advance())
            .unwrap_or_else(|_| EstimatedMetrics.text_width(text, size))
    }
}

/// Fixed advance per character; good enough when no font backend is around.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMetrics;

impl TextMetrics for EstimatedMetrics {
    fn text_width(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * 0.6
    }
}

/// Retained drawing state: what gets painted on the next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Visible coordinate box, painted stretched over `width` x `height`.
    pub viewport: (f64, f64),
    pub group: Option<WheelLayout>,
    pub rotation: f64,
    pub pointer: Option<PointerShape>,
    pub style: WheelStyle,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            viewport: (width, height),
            group: None,
            rotation: 0.0,
            pointer: None,
            style: WheelStyle::default(),
        }
    }
}

/// `RenderSurface` backed by a retained [`Scene`] that is painted with cairo.
pub struct SceneSurface<M = CairoMetrics> {
    scene: Scene,
    labels: Vec<Label>,
    metrics: M,
}

impl SceneSurface<CairoMetrics> {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_metrics(width, height, CairoMetrics::new())
    }
}

impl<M: TextMetrics> SceneSurface<M> {
    pub fn with_metrics(width: f64, height: f64, metrics: M) -> Self {
        Self {
            scene: Scene::new(width, height),
            labels: Vec::new(),
            metrics,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn set_style(&mut self, style: WheelStyle) {
        self.scene.style = style;
    }
}

impl<M: TextMetrics> RenderSurface for SceneSurface<M> {
    fn set_viewport(&mut self, width: f64, height: f64) {
        self.scene.viewport = (width, height);
    }

    fn draw_pointer(&mut self) {
        self.scene.pointer = Some(PointerShape::compute(self.scene.width, self.scene.height));
    }

    fn draw_segments(&mut self, labels: &[Label], rotation: f64) -> Result<(), WheelError> {
        if labels.is_empty() {
            return Err(WheelError::NoLabels);
        }
        let metrics = &self.metrics;
        let layout = WheelLayout::compute(labels, self.scene.width, |text, size| {
            metrics.text_width(text, size)
        });

        self.labels = labels.to_vec();
        self.scene.group = Some(layout);
        self.scene.rotation = rotation;
        Ok(())
    }

    fn set_group_rotation(&mut self, angle: f64) {
        self.scene.rotation = angle;
    }

    fn group_rotation(&self) -> f64 {
        self.scene.rotation
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), WheelError> {
        self.scene.width = width;
        self.scene.height = height;
        self.set_viewport(width, height);

        if !self.labels.is_empty() {
            let labels = std::mem::take(&mut self.labels);
            self.draw_segments(&labels, self.scene.rotation)?;
        }
        self.draw_pointer();
        Ok(())
    }

    fn group_bounds(&self) -> Option<Bounds> {
        self.scene
            .group
            .as_ref()
            .map(|g| g.screen_bounds(self.scene.rotation))
    }

    fn clear(&mut self) {
        self.scene.group = None;
        self.scene.pointer = None;
        self.labels.clear();
    }
}
