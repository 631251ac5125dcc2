pub mod error;
pub mod geometry;
pub mod label;
pub mod macros;
pub mod surface;
pub mod widget;

pub use error::WheelError;
pub use label::Label;
pub use surface::{RenderSurface, RendererKind, SceneSurface, WheelConfig};
pub use widget::{Phase, Wheel};
