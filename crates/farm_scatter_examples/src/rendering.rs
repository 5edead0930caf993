use std::path::Path;

use farm_scatter::building::{ResolvedWallSegment, SegmentKind};
use farm_scatter::color::Rgb;
use glam::{Vec2, Vec3};
use image::{Rgb as Pixel, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Plane a 3D scene is flattened onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    /// Looking down the Y axis: image x is world X, image y is world Z.
    TopDown,
    /// Looking along the Z axis: image x is world X, image y is world Y (up).
    Side,
}

impl Projection {
    fn project(self, p: Vec3) -> Vec2 {
        match self {
            Projection::TopDown => Vec2::new(p.x, p.z),
            Projection::Side => Vec2::new(p.x, -p.y),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// World-space window mapped onto the image, in projected coordinates.
    pub min: Vec2,
    pub max: Vec2,
    pub background: [u8; 3],
    pub projection: Projection,
    /// Radius of each dot, in pixels.
    pub point_radius: i32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), min: Vec2, max: Vec2, projection: Projection) -> Self {
        Self {
            image_size,
            min,
            max,
            background: [16, 24, 40],
            projection,
            point_radius: 2,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_point_radius(mut self, radius: i32) -> Self {
        self.point_radius = radius;
        self
    }

    fn to_pixel(&self, p: Vec3) -> (i32, i32) {
        let q = self.projection.project(p);
        let span = (self.max - self.min).max(Vec2::splat(f32::EPSILON));
        let n = (q - self.min) / span;
        (
            (n.x * self.image_size.0 as f32) as i32,
            (n.y * self.image_size.1 as f32) as i32,
        )
    }

    fn blank(&self) -> RgbImage {
        RgbImage::from_pixel(self.image_size.0, self.image_size.1, Pixel(self.background))
    }
}

/// Converts a `[0, 1]` color to 8-bit channels, clamping out-of-range values.
pub fn color_to_rgb8(c: Rgb) -> [u8; 3] {
    c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Pixel(color));
    }
}

fn disk(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: [u8; 3]) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draws colored dots, later points on top, and writes a PNG.
pub fn render_points_to_png<I>(
    points: I,
    rc: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()>
where
    I: IntoIterator<Item = (Vec3, [u8; 3])>,
{
    let mut img = rc.blank();
    let mut drawn = 0usize;
    for (p, color) in points {
        let (x, y) = rc.to_pixel(p);
        disk(&mut img, x, y, rc.point_radius, color);
        drawn += 1;
    }
    img.save(out_path.as_ref())?;
    info!("Wrote {} points to {}.", drawn, out_path.as_ref().display());
    Ok(())
}

/// Draws the projected bounding rectangle of each wall instance and writes a PNG.
///
/// Window parts are drawn in a lighter color than plain walls and slabs.
pub fn render_wall_segments_to_png(
    segments: &[ResolvedWallSegment],
    part: Vec3,
    rc: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut img = rc.blank();
    for seg in segments {
        let color = match seg.kind {
            SegmentKind::Ground => continue,
            SegmentKind::Window(..) => [120, 200, 255],
            SegmentKind::Floor | SegmentKind::Ceiling => [150, 150, 150],
            SegmentKind::Wall(_) => [230, 230, 230],
        };
        let (lo, hi) = bounds(seg, part);
        let (x0, y0) = rc.to_pixel(lo);
        let (x1, y1) = rc.to_pixel(hi);
        let (x0, x1) = (x0.min(x1), x0.max(x1));
        let (y0, y1) = (y0.min(y1), y0.max(y1));
        for x in x0..=x1 {
            put(&mut img, x, y0, color);
            put(&mut img, x, y1, color);
        }
        for y in y0..=y1 {
            put(&mut img, x0, y, color);
            put(&mut img, x1, y, color);
        }
    }
    img.save(out_path.as_ref())?;
    info!(
        "Wrote {} wall instances to {}.",
        segments.len(),
        out_path.as_ref().display()
    );
    Ok(())
}

/// Axis-aligned box of a scaled, Y- or Z-rotated wall part.
fn bounds(seg: &ResolvedWallSegment, part: Vec3) -> (Vec3, Vec3) {
    let mut half = 0.5 * part * seg.scale;
    if seg.rotation.y.abs() > f32::EPSILON {
        half = Vec3::new(half.z, half.y, half.x);
    }
    if seg.rotation.z.abs() > f32::EPSILON {
        half = Vec3::new(half.y, half.x, half.z);
    }
    (seg.position - half, seg.position + half)
}
