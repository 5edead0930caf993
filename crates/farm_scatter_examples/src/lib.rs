#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    color_to_rgb8, init_tracing, render_points_to_png, render_wall_segments_to_png, Projection,
    RenderConfig,
};
