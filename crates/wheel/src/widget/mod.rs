pub mod model;
pub mod motion;
pub mod selection;

pub use model::Wheel;
pub use motion::{Inertia, Motion, Phase, PointerSample};
pub use selection::segment_under_pointer;

pub const FRICTION: f64 = 0.95; // velocity kept per tick
pub const STOP_THRESHOLD: f64 = 0.005;
pub const MAX_SPEED: f64 = 0.5; // rad per tick
/// Hard stop for an inertial spin; geometric decay from MAX_SPEED settles in ~90 ticks.
pub const MAX_INERTIA_TICKS: u32 = 1_000;
