use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;
use wheel::geometry::Bounds;
use wheel::surface::paint;
use wheel::{Label, RenderSurface, SceneSurface, WheelConfig, WheelError};

/// On-screen surface: a retained scene painted into a `DrawingArea`.
pub struct GtkSurface {
    scene: Rc<RefCell<SceneSurface>>,
    area: gtk::DrawingArea,
}

impl GtkSurface {
    /// Creates the drawing area inside `container`. Fails when there is nowhere to mount.
    pub fn mount(container: Option<&gtk::Box>, config: &WheelConfig) -> Result<Self, WheelError> {
        let container = container.ok_or(WheelError::NoMount)?;
        let (width, height) = (config.width as f64, config.height as f64);

        let area = gtk::DrawingArea::builder()
            .content_width(config.width as i32)
            .content_height(config.height as i32)
            .halign(gtk::Align::Center)
            .valign(gtk::Align::Center)
            .build();
        area.add_css_class("wheel-area");

        let scene = Rc::new(RefCell::new(SceneSurface::new(width, height)));
        let scene_draw = scene.clone();
        area.set_draw_func(move |area, cr, _, _| {
            let mut scene = scene_draw.borrow_mut();
            scene.set_style(theme::wheel_style(&area.style_context()));
            if let Err(e) = paint(cr, scene.scene()) {
                log::error!("Drawing error: {}", e);
            }
        });

        container.append(&area);
        Ok(Self { scene, area })
    }

    pub fn area(&self) -> &gtk::DrawingArea {
        &self.area
    }
}

impl RenderSurface for GtkSurface {
    fn set_viewport(&mut self, width: f64, height: f64) {
        self.scene.borrow_mut().set_viewport(width, height);
        self.area.queue_draw();
    }

    fn draw_pointer(&mut self) {
        self.scene.borrow_mut().draw_pointer();
        self.area.queue_draw();
    }

    fn draw_segments(&mut self, labels: &[Label], rotation: f64) -> Result<(), WheelError> {
        self.scene.borrow_mut().draw_segments(labels, rotation)?;
        self.area.queue_draw();
        Ok(())
    }

    fn set_group_rotation(&mut self, angle: f64) {
        self.scene.borrow_mut().set_group_rotation(angle);
        self.area.queue_draw();
    }

    fn group_rotation(&self) -> f64 {
        self.scene.borrow().group_rotation()
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), WheelError> {
        self.area.set_content_width(width as i32);
        self.area.set_content_height(height as i32);
        self.scene.borrow_mut().resize(width, height)?;
        self.area.queue_draw();
        Ok(())
    }

    fn group_bounds(&self) -> Option<Bounds> {
        self.scene.borrow().group_bounds()
    }

    fn clear(&mut self) {
        self.scene.borrow_mut().clear();
        self.area.queue_draw();
    }
}
