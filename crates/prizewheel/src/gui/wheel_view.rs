use crate::config::Config;
use crate::gui::surface::GtkSurface;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;
use wheel::geometry::Point;
use wheel::{Label, Wheel, WheelError};

type SharedWheel = Rc<RefCell<Wheel<GtkSurface>>>;

/// Window space taken by the form around the wheel: margins, title, messages and buttons.
const CHROME_WIDTH: i32 = 36;
const CHROME_HEIGHT: i32 = 160;
const MIN_SIDE: i32 = 120;

/// Side of the square wheel that fits a window of the given size, if it is known yet.
pub fn wheel_side(window_width: i32, window_height: i32) -> Option<f64> {
    if window_width <= 0 || window_height <= 0 {
        return None;
    }
    let side = (window_width - CHROME_WIDTH).min(window_height - CHROME_HEIGHT);
    Some(side.max(MIN_SIDE) as f64)
}

/// A mounted wheel: owns the drag controller and the per-frame tick that drive it.
pub struct WheelView {
    wheel: SharedWheel,
    area: gtk::DrawingArea,
    drag: Option<gtk::GestureDrag>,
    tick: Option<gtk::TickCallbackId>,
}

impl WheelView {
    pub fn mount(
        container: Option<&gtk::Box>,
        config: &Config,
        on_settle: impl Fn(Label) + 'static,
    ) -> Result<Self, WheelError> {
        let surface = GtkSurface::mount(container, &config.wheel)?;
        let area = surface.area().clone();

        let mut wheel = Wheel::initialize(config.wheel, surface)?
            .on_settle(move |label| on_settle(label.clone()));
        if !config.labels.is_empty() {
            wheel.set_labels(config.labels.iter().cloned());
            wheel.draw()?;
        }
        let wheel = Rc::new(RefCell::new(wheel));

        let drag = drag_controller(&wheel);
        area.add_controller(drag.clone());

        let wheel_tick = wheel.clone();
        let tick = area.add_tick_callback(move |_, _| {
            wheel_tick.borrow_mut().tick();
            glib::ControlFlow::Continue
        });

        Ok(Self {
            wheel,
            area,
            drag: Some(drag),
            tick: Some(tick),
        })
    }

    /// Replaces the labels and redraws. An empty list leaves the wheel as it was.
    pub fn set_labels(&self, labels: Vec<Label>) -> Result<(), WheelError> {
        if labels.is_empty() {
            log::warn!("Ignoring empty word list");
            return Ok(());
        }
        let mut wheel = self.wheel.borrow_mut();
        wheel.set_labels(labels);
        wheel.draw()
    }

    pub fn spin(&self, velocity: f64) -> Result<(), WheelError> {
        self.wheel.borrow_mut().spin(velocity)
    }

    pub fn current_word(&self) -> Result<Label, WheelError> {
        self.wheel.borrow().current_word().cloned()
    }

    pub fn update_dimensions(&self, width: f64, height: f64) -> Result<(), WheelError> {
        self.wheel.borrow_mut().update_dimensions(width, height)
    }

    /// Locks out pointer input, e.g. while the submitted spin decides the prize.
    pub fn set_locked(&self, locked: bool) {
        self.wheel.borrow_mut().set_locked(locked);
    }

    /// Detaches input and the frame tick, then tears the surface down. Safe to call twice.
    pub fn destroy(&mut self) -> bool {
        if let Some(drag) = self.drag.take() {
            self.area.remove_controller(&drag);
        }
        if let Some(tick) = self.tick.take() {
            tick.remove();
        }
        if let Some(parent) = self.area.parent().and_downcast::<gtk::Box>() {
            parent.remove(&self.area);
        }
        self.wheel.borrow_mut().destroy()
    }
}

impl Drop for WheelView {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn drag_controller(wheel: &SharedWheel) -> gtk::GestureDrag {
    let drag = gtk::GestureDrag::new();

    let w = wheel.clone();
    drag.connect_drag_begin(move |gesture, x, y| {
        let time = gesture.current_event_time() as f64;
        if !w.borrow_mut().pointer_down(Point::new(x, y), time) {
            gesture.set_state(gtk::EventSequenceState::Denied);
        }
    });

    let w = wheel.clone();
    drag.connect_drag_update(move |gesture, dx, dy| {
        if let Some((x, y)) = gesture.start_point() {
            let time = gesture.current_event_time() as f64;
            w.borrow_mut().pointer_move(Point::new(x + dx, y + dy), time);
        }
    });

    let w = wheel.clone();
    drag.connect_drag_end(move |gesture, dx, dy| {
        if let Some((x, y)) = gesture.start_point() {
            let time = gesture.current_event_time() as f64;
            w.borrow_mut().pointer_up(Point::new(x + dx, y + dy), time);
        }
    });

    drag
}
