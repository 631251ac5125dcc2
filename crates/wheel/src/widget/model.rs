use super::motion::{Inertia, Motion, Phase, PointerSample};
use super::segment_under_pointer;
use crate::error::WheelError;
use crate::geometry::{Point, normalize_angle};
use crate::label::Label;
use crate::surface::{RenderSurface, WheelConfig};

type RotationListener = Box<dyn FnMut(f64)>;
type SettleListener = Box<dyn FnMut(&Label)>;

/// A prize wheel drawn on an injected [`RenderSurface`].
///
/// The host feeds it pointer events and calls [`Wheel::tick`] once per frame; everything else
/// (layout, rotation, inertia, selection) lives here.
pub struct Wheel<S: RenderSurface> {
    config: WheelConfig,
    surface: S,
    labels: Vec<Label>,
    rotation: f64,
    motion: Motion,
    inertia: Option<Inertia>,
    on_rotation_change: Option<RotationListener>,
    on_settle: Option<SettleListener>,
    locked: bool,
    destroyed: bool,
}

impl<S: RenderSurface> Wheel<S> {
    pub fn initialize(config: WheelConfig, mut surface: S) -> Result<Self, WheelError> {
        if config.width == 0 || config.height == 0 {
            return Err(WheelError::InvalidDimensions {
                width: config.width as f64,
                height: config.height as f64,
            });
        }
        surface.set_viewport(config.width as f64, config.height as f64);

        Ok(Self {
            config,
            surface,
            labels: Vec::new(),
            rotation: 0.0,
            motion: Motion::default(),
            inertia: None,
            on_rotation_change: None,
            on_settle: None,
            locked: false,
            destroyed: false,
        })
    }

    /// Called with the new angle after every drag step and animation tick.
    pub fn on_rotation_change(mut self, listener: impl FnMut(f64) + 'static) -> Self {
        self.on_rotation_change = Some(Box::new(listener));
        self
    }

    /// Called with the winning label once an inertial spin comes to rest.
    pub fn on_settle(mut self, listener: impl FnMut(&Label) + 'static) -> Self {
        self.on_settle = Some(Box::new(listener));
        self
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Replaces the segment list. Nothing is redrawn until [`Wheel::draw`].
    pub fn set_labels<L: Into<Label>>(&mut self, labels: impl IntoIterator<Item = L>) {
        self.labels = labels.into_iter().map(Into::into).collect();
    }

    pub fn draw(&mut self) -> Result<(), WheelError> {
        if self.destroyed {
            log::debug!("Ignoring draw on destroyed wheel");
            return Ok(());
        }
        if self.labels.is_empty() {
            return Err(WheelError::NoLabels);
        }
        self.surface.draw_segments(&self.labels, self.rotation)?;
        self.surface.draw_pointer();
        Ok(())
    }

    /// Starts a fresh inertial spin, cancelling any drag and replacing any spin in progress.
    pub fn spin(&mut self, velocity: f64) -> Result<(), WheelError> {
        if !velocity.is_finite() {
            return Err(WheelError::InvalidVelocity(velocity));
        }
        if self.destroyed {
            log::debug!("Ignoring spin on destroyed wheel");
            return Ok(());
        }

        self.motion.cancel();
        log::debug!("Spin at {:.4} rad/tick", velocity);
        self.coast(Inertia::new(velocity));
        Ok(())
    }

    fn coast(&mut self, inertia: Inertia) {
        if inertia.is_spent() {
            self.settle();
        } else {
            self.inertia = Some(inertia);
        }
    }

    /// Runs one frame of the inertial animation. Returns whether the wheel is still moving.
    pub fn tick(&mut self) -> bool {
        let Some(inertia) = self.inertia.as_mut() else {
            return false;
        };
        let (delta, done) = inertia.step(self.motion.direction);
        self.apply_rotation(self.rotation + delta);

        if done {
            self.settle();
        }
        self.inertia.is_some()
    }

    fn settle(&mut self) {
        self.inertia = None;
        let Some(index) = segment_under_pointer(self.rotation, self.labels.len()) else {
            return;
        };
        log::debug!("Wheel settled on '{}'", self.labels[index]);
        if let Some(listener) = self.on_settle.as_mut() {
            listener(&self.labels[index]);
        }
    }

    fn apply_rotation(&mut self, angle: f64) {
        self.rotation = normalize_angle(angle);
        self.surface.set_group_rotation(self.rotation);
        if let Some(listener) = self.on_rotation_change.as_mut() {
            listener(self.rotation);
        }
    }

    /// Label of the segment currently under the fixed pointer.
    pub fn current_word(&self) -> Result<&Label, WheelError> {
        segment_under_pointer(self.rotation, self.labels.len())
            .map(|i| &self.labels[i])
            .ok_or(WheelError::NoLabels)
    }

    /// Applies new pixel dimensions (truncated to whole pixels) and redraws.
    pub fn update_dimensions(&mut self, width: f64, height: f64) -> Result<(), WheelError> {
        if self.destroyed {
            return Ok(());
        }
        let (w, h) = (width.trunc(), height.trunc());
        if !(w.is_finite() && h.is_finite() && w >= 1.0 && h >= 1.0) {
            log::warn!("Rejecting wheel dimensions {}x{}", width, height);
            return Err(WheelError::InvalidDimensions { width, height });
        }

        self.config.width = w as u32;
        self.config.height = h as u32;
        self.surface.resize(w, h)?;
        if !self.labels.is_empty() {
            self.draw()?;
        }
        Ok(())
    }

    /// Stops all motion, ignores further input and clears the surface. Safe to call repeatedly.
    pub fn destroy(&mut self) -> bool {
        if !self.destroyed {
            self.destroyed = true;
            self.inertia = None;
            self.motion.cancel();
            self.surface.clear();
        }
        true
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// While locked, pointer input is ignored; programmatic spins still run and settle.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            self.motion.cancel();
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Starts a drag if `pos` lands on the segment group. Returns whether it did.
    pub fn pointer_down(&mut self, pos: Point, time: f64) -> bool {
        let on_group = !self.destroyed
            && !self.locked
            && self
                .surface
                .group_bounds()
                .is_some_and(|bounds| bounds.contains(pos));

        if !on_group {
            self.motion.samples.clear();
            return false;
        }
        self.inertia = None;
        self.motion.begin(PointerSample::new(pos, time));
        true
    }

    pub fn pointer_move(&mut self, pos: Point, time: f64) {
        if !self.motion.dragging {
            return;
        }
        let Some(center) = self.surface.group_bounds().map(|b| b.center()) else {
            return;
        };
        if let Some(delta) = self.motion.track(PointerSample::new(pos, time), center) {
            self.apply_rotation(self.rotation + delta);
        }
    }

    /// Ends a drag, flinging the wheel if the pointer was moving.
    pub fn pointer_up(&mut self, pos: Point, time: f64) {
        if let Some(speed) = self.motion.release(PointerSample::new(pos, time)) {
            log::debug!("Released at {:.4} rad/tick", speed);
            self.coast(Inertia::new(speed));
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, angle: f64) {
        self.apply_rotation(angle);
    }

    /// Current inertial velocity; zero when not spinning.
    pub fn velocity(&self) -> f64 {
        self.inertia.map_or(0.0, |i| i.velocity)
    }

    pub fn direction(&self) -> f64 {
        self.motion.direction
    }

    pub fn phase(&self) -> Phase {
        if self.motion.dragging {
            Phase::Dragging
        } else if self.inertia.is_some() {
            Phase::Releasing
        } else {
            Phase::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        self.inertia.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::surface::{EstimatedMetrics, RendererKind, SceneSurface};
    use crate::widget::{MAX_SPEED, STOP_THRESHOLD};
    use std::cell::RefCell;
    use std::f64::consts::{PI, TAU};
    use std::rc::Rc;

    #[derive(Default)]
    struct MockSurface {
        viewport: Option<(f64, f64)>,
        size: Option<(f64, f64)>,
        drawn: Vec<Vec<Label>>,
        pointer_draws: usize,
        rotation: f64,
        cleared: usize,
    }

    impl RenderSurface for MockSurface {
        fn set_viewport(&mut self, width: f64, height: f64) {
            self.viewport = Some((width, height));
        }

        fn draw_pointer(&mut self) {
            self.pointer_draws += 1;
        }

        fn draw_segments(&mut self, labels: &[Label], rotation: f64) -> Result<(), WheelError> {
            self.drawn.push(labels.to_vec());
            self.rotation = rotation;
            Ok(())
        }

        fn set_group_rotation(&mut self, angle: f64) {
            self.rotation = angle;
        }

        fn group_rotation(&self) -> f64 {
            self.rotation
        }

        fn resize(&mut self, width: f64, height: f64) -> Result<(), WheelError> {
            self.size = Some((width, height));
            Ok(())
        }

        fn group_bounds(&self) -> Option<Bounds> {
            (!self.drawn.is_empty() && self.cleared == 0)
                .then(|| Bounds::new(Point::new(0.0, 0.0), Point::new(400.0, 400.0)))
        }

        fn clear(&mut self) {
            self.cleared += 1;
        }
    }

    fn config() -> WheelConfig {
        WheelConfig::new(400, 400, RendererKind::Window)
    }

    fn wheel(words: &[&str]) -> Wheel<MockSurface> {
        let mut wheel = Wheel::initialize(config(), MockSurface::default()).unwrap();
        wheel.set_labels(words.iter().copied());
        wheel.draw().unwrap();
        wheel
    }

    fn run_to_rest<S: RenderSurface>(wheel: &mut Wheel<S>) {
        while wheel.tick() {}
    }

    #[test]
    fn test_initialize_sets_viewport() {
        let wheel = Wheel::initialize(config(), MockSurface::default()).unwrap();
        assert_eq!(wheel.surface().viewport, Some((400.0, 400.0)));
        assert_eq!(wheel.phase(), Phase::Idle);
    }

    #[test]
    fn test_initialize_rejects_zero_size() {
        let config = WheelConfig::new(0, 400, RendererKind::Window);
        assert!(matches!(
            Wheel::initialize(config, MockSurface::default()),
            Err(WheelError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_empty_labels() {
        let mut wheel = Wheel::initialize(config(), MockSurface::default()).unwrap();
        assert!(matches!(wheel.draw(), Err(WheelError::NoLabels)));
        assert!(matches!(wheel.current_word(), Err(WheelError::NoLabels)));
    }

    #[test]
    fn test_set_labels_waits_for_draw() {
        let mut wheel = wheel(&["A", "B"]);
        wheel.set_labels(["X", "Y", "Z"]);
        assert_eq!(wheel.surface().drawn.len(), 1);
        wheel.draw().unwrap();
        assert_eq!(wheel.surface().drawn.last().unwrap().len(), 3);
        assert_eq!(wheel.surface().pointer_draws, 2);
    }

    #[test]
    fn test_current_word_at_rest() {
        let mut wheel = wheel(&["A", "B", "C", "D"]);
        assert_eq!(wheel.current_word().unwrap().as_str(), "B");
        wheel.set_rotation(PI / 2.0);
        assert_eq!(wheel.current_word().unwrap().as_str(), "A");
    }

    #[test]
    fn test_full_revolution_visits_labels_in_order() {
        let words = ["A", "B", "C", "D", "E"];
        let mut wheel = wheel(&words);
        let unit = TAU / words.len() as f64;
        let start = words
            .iter()
            .position(|w| *w == wheel.current_word().unwrap().as_str())
            .unwrap();

        for k in 0..words.len() {
            wheel.set_rotation(-(k as f64) * unit);
            assert_eq!(
                wheel.current_word().unwrap().as_str(),
                words[(start + k) % words.len()]
            );
        }
    }

    #[test]
    fn test_spin_runs_to_rest() {
        let settled = Rc::new(RefCell::new(Vec::<Label>::new()));
        let angles = Rc::new(RefCell::new(Vec::<f64>::new()));
        let mut wheel = {
            let settled = settled.clone();
            let angles = angles.clone();
            Wheel::initialize(config(), MockSurface::default())
                .unwrap()
                .on_settle(move |label| settled.borrow_mut().push(label.clone()))
                .on_rotation_change(move |a| angles.borrow_mut().push(a))
        };
        wheel.set_labels(["A", "B", "C", "D"]);
        wheel.draw().unwrap();

        wheel.spin(0.3).unwrap();
        assert_eq!(wheel.phase(), Phase::Releasing);

        let mut expected = 0.0;
        let mut velocity = 0.3;
        let mut ticks = 0;
        while wheel.is_animating() {
            assert!(wheel.velocity() >= STOP_THRESHOLD);
            assert!((wheel.velocity() - velocity).abs() < 1e-12);
            expected += velocity;
            velocity *= 0.95;
            wheel.tick();
            ticks += 1;
            assert!(wheel.is_animating() == (wheel.velocity() >= STOP_THRESHOLD));
        }

        assert_eq!(ticks, 80);
        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(angles.borrow().len(), 80);
        assert!((wheel.rotation() - normalize_angle(expected)).abs() < 1e-9);
        assert_eq!(wheel.surface().rotation, wheel.rotation());

        let index = segment_under_pointer(wheel.rotation(), 4).unwrap();
        let word = wheel.current_word().unwrap().clone();
        assert_eq!(word, wheel.labels()[index]);
        assert_eq!(*settled.borrow(), vec![word]);

        // ticking a settled wheel is harmless, spinning again works
        assert!(!wheel.tick());
        wheel.spin(0.2).unwrap();
        assert!(wheel.is_animating());
    }

    #[test]
    fn test_spin_replaces_running_spin() {
        let mut wheel = wheel(&["A", "B", "C"]);
        wheel.spin(0.5).unwrap();
        wheel.tick();
        wheel.tick();
        wheel.spin(0.1).unwrap();
        assert!((wheel.velocity() - 0.1).abs() < 1e-12);
        wheel.tick();
        assert!((wheel.velocity() - 0.095).abs() < 1e-12);
    }

    #[test]
    fn test_spin_input_handling() {
        let mut wheel = wheel(&["A", "B"]);
        assert!(matches!(
            wheel.spin(f64::NAN),
            Err(WheelError::InvalidVelocity(_))
        ));
        wheel.spin(2.0).unwrap();
        assert_eq!(wheel.velocity(), MAX_SPEED);

        // below the threshold: settles without ever animating
        wheel.spin(0.001).unwrap();
        assert!(!wheel.is_animating());
        assert_eq!(wheel.phase(), Phase::Idle);
    }

    #[test]
    fn test_drag_tracks_pointer_angle() {
        let angles = Rc::new(RefCell::new(Vec::<f64>::new()));
        let mut wheel = {
            let angles = angles.clone();
            Wheel::initialize(config(), MockSurface::default())
                .unwrap()
                .on_rotation_change(move |a| angles.borrow_mut().push(a))
        };
        wheel.set_labels(["A", "B", "C", "D"]);
        wheel.draw().unwrap();

        // centre of the mock group is (200, 200)
        assert!(wheel.pointer_down(Point::new(300.0, 200.0), 0.0));
        assert_eq!(wheel.phase(), Phase::Dragging);

        wheel.pointer_move(Point::new(200.0, 300.0), 16.0);
        assert!((wheel.rotation() - PI / 2.0).abs() < 1e-9);
        assert_eq!(wheel.direction(), 1.0);

        wheel.pointer_move(Point::new(300.0, 200.0), 32.0);
        assert!(wheel.rotation().abs() < 1e-9);
        assert_eq!(wheel.direction(), -1.0);
        assert_eq!(angles.borrow().len(), 2);

        wheel.pointer_up(Point::new(300.0, 200.0), 48.0);
        assert_eq!(wheel.phase(), Phase::Releasing);
        assert_eq!(wheel.velocity(), MAX_SPEED);
    }

    #[test]
    fn test_pointer_down_outside_group_is_ignored() {
        let mut idle = Wheel::initialize(config(), MockSurface::default()).unwrap();
        idle.set_labels(["A"]);
        // nothing drawn yet, so there is nothing to grab
        assert!(!idle.pointer_down(Point::new(10.0, 10.0), 0.0));

        let mut wheel = wheel(&["A", "B"]);
        assert!(!wheel.pointer_down(Point::new(500.0, 10.0), 0.0));
        assert_eq!(wheel.phase(), Phase::Idle);
        wheel.pointer_move(Point::new(10.0, 10.0), 5.0);
        assert_eq!(wheel.rotation(), 0.0);
    }

    #[test]
    fn test_click_without_drag_does_not_spin() {
        let mut wheel = wheel(&["A", "B"]);
        wheel.pointer_down(Point::new(300.0, 200.0), 0.0);
        wheel.pointer_up(Point::new(300.0, 200.0), 100.0);
        assert_eq!(wheel.phase(), Phase::Idle);
        assert!(!wheel.is_animating());
    }

    #[test]
    fn test_grabbing_stops_inertia() {
        let mut wheel = wheel(&["A", "B"]);
        wheel.spin(0.4).unwrap();
        wheel.tick();
        assert!(wheel.pointer_down(Point::new(100.0, 100.0), 0.0));
        assert!(!wheel.is_animating());
        assert_eq!(wheel.phase(), Phase::Dragging);
    }

    #[test]
    fn test_spin_interrupts_drag() {
        let mut wheel = wheel(&["A", "B"]);
        wheel.pointer_down(Point::new(300.0, 200.0), 0.0);
        wheel.pointer_move(Point::new(200.0, 300.0), 10.0);
        wheel.spin(0.2).unwrap();
        assert_eq!(wheel.phase(), Phase::Releasing);

        // a late release from the interrupted drag must not replace the spin
        wheel.pointer_up(Point::new(100.0, 200.0), 20.0);
        assert!((wheel.velocity() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_stays_normalized() {
        let mut wheel = wheel(&["A", "B", "C"]);
        for _ in 0..20 {
            wheel.spin(0.5).unwrap();
            run_to_rest(&mut wheel);
            assert!((0.0..TAU).contains(&wheel.rotation()));
        }
        wheel.set_rotation(-0.5);
        assert!((wheel.rotation() - (TAU - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut wheel = wheel(&["A", "B"]);
        wheel.spin(0.3).unwrap();
        assert!(wheel.destroy());
        assert!(wheel.destroy());
        assert_eq!(wheel.surface().cleared, 1);
        assert!(!wheel.is_animating());
        assert!(!wheel.pointer_down(Point::new(100.0, 100.0), 0.0));
        wheel.spin(0.3).unwrap();
        assert!(!wheel.is_animating());
    }

    #[test]
    fn test_destroyed_wheel_stays_blank() {
        let mut wheel = wheel(&["A", "B"]);
        wheel.destroy();
        wheel.draw().unwrap();
        wheel.update_dimensions(200.0, 200.0).unwrap();

        assert_eq!(wheel.surface().drawn.len(), 1);
        assert_eq!(wheel.surface().pointer_draws, 1);
        assert_eq!(wheel.surface().size, None);
        assert_eq!(wheel.config().width, 400);
    }

    #[test]
    fn test_locked_wheel_ignores_grab_during_spin() {
        let settled = Rc::new(RefCell::new(Vec::<Label>::new()));
        let mut wheel = {
            let settled = settled.clone();
            Wheel::initialize(config(), MockSurface::default())
                .unwrap()
                .on_settle(move |label| settled.borrow_mut().push(label.clone()))
        };
        wheel.set_labels(["A", "B", "C", "D"]);
        wheel.draw().unwrap();
        wheel.set_locked(true);

        wheel.spin(0.4).unwrap();
        for _ in 0..5 {
            wheel.tick();
        }
        let velocity = wheel.velocity();

        // a click on the centre of the group
        assert!(!wheel.pointer_down(Point::new(200.0, 200.0), 0.0));
        wheel.pointer_up(Point::new(200.0, 200.0), 10.0);
        assert!(wheel.is_animating());
        assert_eq!(wheel.velocity(), velocity);

        // a fling cannot steer it either
        wheel.pointer_down(Point::new(300.0, 200.0), 20.0);
        wheel.pointer_move(Point::new(200.0, 300.0), 30.0);
        wheel.pointer_up(Point::new(100.0, 200.0), 31.0);
        assert_eq!(wheel.velocity(), velocity);

        run_to_rest(&mut wheel);
        assert_eq!(settled.borrow().len(), 1);
        assert_eq!(settled.borrow()[0], *wheel.current_word().unwrap());
    }

    #[test]
    fn test_unlocked_click_cancels_spin_without_settling() {
        let settled = Rc::new(RefCell::new(0));
        let mut wheel = {
            let settled = settled.clone();
            Wheel::initialize(config(), MockSurface::default())
                .unwrap()
                .on_settle(move |_| *settled.borrow_mut() += 1)
        };
        wheel.set_labels(["A", "B"]);
        wheel.draw().unwrap();

        wheel.spin(0.4).unwrap();
        wheel.tick();
        assert!(wheel.pointer_down(Point::new(200.0, 200.0), 0.0));
        wheel.pointer_up(Point::new(200.0, 200.0), 10.0);
        assert!(!wheel.tick());
        assert_eq!(*settled.borrow(), 0);
    }

    #[test]
    fn test_update_dimensions_validation() {
        let mut wheel = wheel(&["A", "B"]);
        assert!(matches!(
            wheel.update_dimensions(f64::NAN, 300.0),
            Err(WheelError::InvalidDimensions { .. })
        ));
        assert!(wheel.update_dimensions(0.4, 300.0).is_err());

        wheel.update_dimensions(320.9, 240.2).unwrap();
        assert_eq!(wheel.config().width, 320);
        assert_eq!(wheel.config().height, 240);
        assert_eq!(wheel.surface().size, Some((320.0, 240.0)));
        assert_eq!(wheel.surface().drawn.len(), 2);
    }

    #[test]
    fn test_resize_scales_layout() {
        let surface = SceneSurface::with_metrics(360.0, 360.0, EstimatedMetrics);
        let config = WheelConfig::new(360, 360, RendererKind::Window);
        let mut wheel = Wheel::initialize(config, surface).unwrap();
        wheel.set_labels(["A", "B", "C", "D"]);
        wheel.draw().unwrap();
        let before = wheel.surface().scene().group.clone().unwrap();

        wheel.update_dimensions(500.0, 500.0).unwrap();
        let after = wheel.surface().scene().group.clone().unwrap();
        let ratio = 500.0 / 360.0;

        assert!((after.radius - before.radius * ratio).abs() < 1e-9);
        assert_eq!(before.segments.len(), after.segments.len());
        for (b, a) in before.segments.iter().zip(&after.segments) {
            assert_eq!(b.label, a.label);
            assert_eq!(b.fill, a.fill);
            assert!(a.label_anchor.distance(b.label_anchor.scale(ratio)) < 1e-6);
            assert!((a.font_size - b.font_size * ratio).abs() < 1e-9);
        }
        assert_eq!(wheel.surface().scene().viewport, (500.0, 500.0));
    }
}
