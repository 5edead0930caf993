//! Color lookups: the three-band heat-map ramp and sonar image sampling.
pub mod heatmap;
pub mod sonar;

pub use heatmap::{heat_map_color, heat_map_color_raw};
pub use sonar::SonarGrid;

/// RGB triple with channels nominally in `[0, 1]`.
pub type Rgb = [f32; 3];
