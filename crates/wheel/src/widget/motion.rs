use super::{FRICTION, MAX_INERTIA_TICKS, MAX_SPEED, STOP_THRESHOLD};
use crate::geometry::{Point, wrap_delta};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pos: Point,
    /// Milliseconds, from whatever clock the host's input events carry.
    pub time: f64,
}

impl PointerSample {
    pub fn new(pos: Point, time: f64) -> Self {
        Self { pos, time }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    /// Coasting on inertia after a release or a programmatic spin.
    Releasing,
}

/// Decaying spin. Dropped as soon as it falls below the stop threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inertia {
    pub velocity: f64,
    pub ticks: u32,
}

impl Inertia {
    pub fn new(velocity: f64) -> Self {
        Self {
            velocity: velocity.clamp(0.0, MAX_SPEED),
            ticks: 0,
        }
    }

    /// Advances one frame. Returns the rotation to apply and whether the spin is now spent.
    pub fn step(&mut self, direction: f64) -> (f64, bool) {
        let delta = self.velocity * direction;
        self.velocity *= FRICTION;
        self.ticks += 1;
        let done = self.velocity < STOP_THRESHOLD || self.ticks >= MAX_INERTIA_TICKS;
        (delta, done)
    }

    pub fn is_spent(&self) -> bool {
        self.velocity < STOP_THRESHOLD
    }
}

/// Pointer interaction state for one wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub dragging: bool,
    pub direction: f64,
    pub samples: Vec<PointerSample>,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            dragging: false,
            direction: 1.0,
            samples: Vec::new(),
        }
    }
}

impl Motion {
    pub fn begin(&mut self, sample: PointerSample) {
        self.dragging = true;
        self.samples.clear();
        self.samples.push(sample);
    }

    /// Records a move and returns the wrapped angular delta around `center` since the previous
    /// sample.
    pub fn track(&mut self, sample: PointerSample, center: Point) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        let prev = self.samples.last().copied()?;
        self.samples.push(sample);

        let delta = wrap_delta(sample.pos.angle_from(center) - prev.pos.angle_from(center));
        self.direction = if delta > 0.0 { 1.0 } else { -1.0 };
        Some(delta)
    }

    /// Ends the drag and returns the release speed when enough samples were collected.
    ///
    /// Speed is the distance from the second-to-last sample to the release point over the
    /// time since the last move, in pixels per millisecond, clamped to [`MAX_SPEED`].
    pub fn release(&mut self, sample: PointerSample) -> Option<f64> {
        let samples = std::mem::take(&mut self.samples);
        let was_dragging = std::mem::replace(&mut self.dragging, false);
        if !was_dragging || samples.len() < 2 {
            return None;
        }

        let last = samples[samples.len() - 1];
        let before = samples[samples.len() - 2];
        let elapsed = sample.time - last.time;
        let distance = sample.pos.distance(before.pos);

        let speed = if elapsed > 0.0 {
            distance / elapsed
        } else {
            MAX_SPEED
        };
        Some(speed.min(MAX_SPEED))
    }

    pub fn cancel(&mut self) {
        self.dragging = false;
        self.samples.clear();
    }
}
