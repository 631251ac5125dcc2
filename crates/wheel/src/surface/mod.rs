use crate::error::WheelError;
use crate::geometry::{Bounds, degrees_to_radians};
use crate::label::Label;
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub mod layout;
pub mod paint;
pub mod scene;

pub use layout::{PointerShape, SegmentShape, WheelLayout};
pub use paint::{export, paint};
pub use scene::{CairoMetrics, EstimatedMetrics, Scene, SceneSurface, TextMetrics};

pub const TICKER_RADIUS_RATIO: f64 = 0.06; // of width
pub const TEXT_SIZE_RATIO: f64 = 0.12; // of radius
pub const EDGE_DIST_RATIO: f64 = 0.14; // of radius
pub const TICKER_INNER_RATIO: f64 = 0.5; // of ticker radius
pub const LABEL_FONT: &str = "Sans";

pub fn ticker_tangent_angle() -> f64 {
    degrees_to_radians(30.0)
}

const PALETTE: [u32; 9] = [
    0xf7d046, 0xff4c5a, 0xf08cba, 0x49c4d2, 0x924e84, 0xfd926f, 0x245a65, 0xff6a76, 0x633d89,
];

pub fn palette_len() -> usize {
    PALETTE.len()
}

/// Fill colour for the segment at `index`, cycling through the fixed palette.
pub fn segment_color(index: usize) -> Srgb<u8> {
    let hex = PALETTE[index % PALETTE.len()];
    Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    #[strum(serialize = "window", serialize = "screen")]
    Window,
    #[strum(serialize = "png")]
    Png,
    #[strum(serialize = "svg")]
    Svg,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    #[serde(default = "WheelConfig::default_size")]
    pub width: u32,
    #[serde(default = "WheelConfig::default_size")]
    pub height: u32,
    #[serde(default)]
    pub renderer: RendererKind,
}

impl WheelConfig {
    fn default_size() -> u32 {
        360
    }

    pub fn new(width: u32, height: u32, renderer: RendererKind) -> Self {
        Self {
            width,
            height,
            renderer,
        }
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::new(Self::default_size(), Self::default_size(), RendererKind::Window)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelStyle {
    pub pointer: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl Default for WheelStyle {
    fn default() -> Self {
        Self {
            pointer: Srgba::new(0.2, 0.2, 0.2, 1.0),
            label: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Drawing capabilities the wheel needs from whatever actually puts pixels on screen.
///
/// Every draw call replaces what was drawn before.
pub trait RenderSurface {
    /// Makes the visible coordinate box match the given pixel size exactly.
    fn set_viewport(&mut self, width: f64, height: f64);

    /// Draws the fixed pointer that marks the winning segment.
    fn draw_pointer(&mut self);

    /// Lays out one slice per label under a single rotatable group.
    fn draw_segments(&mut self, labels: &[Label], rotation: f64) -> Result<(), WheelError>;

    fn set_group_rotation(&mut self, angle: f64);

    fn group_rotation(&self) -> f64;

    /// Updates the surface size and redraws segments and pointer.
    fn resize(&mut self, width: f64, height: f64) -> Result<(), WheelError>;

    /// On-screen bounds of the rotated segment group, if one is drawn.
    fn group_bounds(&self) -> Option<Bounds>;

    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_renderer_kind_parsing() {
        let cases = vec![
            ("\"window\"", RendererKind::Window),
            ("\"Window\"", RendererKind::Window),
            ("\"screen\"", RendererKind::Window),
            ("\"PNG\"", RendererKind::Png),
            ("\"svg\"", RendererKind::Svg),
        ];

        for (json, expected) in cases {
            let deserialized: RendererKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(RendererKind::from_str("webgl").is_err());
    }

    #[test]
    fn test_wheel_config_defaults() {
        let config: WheelConfig = serde_json::from_str("{\"width\": 500}").unwrap();
        assert_eq!(config, WheelConfig::new(500, 360, RendererKind::Window));
    }

    #[test]
    fn test_palette_cycles_every_nine() {
        assert_eq!(segment_color(0), Srgb::new(0xf7, 0xd0, 0x46));
        assert_eq!(segment_color(8), Srgb::new(0x63, 0x3d, 0x89));
        assert_eq!(segment_color(9), segment_color(0));
        assert_eq!(segment_color(palette_len() + 4), segment_color(4));
    }
}
