//! Floor footprints and the floating-floor shift.
use glam::Vec3;

use crate::building::outline::{FloorOutline, Outline};
use crate::error::Result;
use crate::settings::WallSettings;

/// Size of a floor in wall parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Footprint {
    /// Parts along X, i.e. the facing side length.
    pub width: usize,
    /// Parts along Z, i.e. the right side length.
    pub depth: usize,
}

impl Footprint {
    pub const fn new(width: usize, depth: usize) -> Self {
        Self { width, depth }
    }

    /// Outer extent along X in world units.
    #[inline]
    pub fn world_width(&self, wall: &WallSettings) -> f32 {
        self.width as f32 * wall.width()
    }

    /// Outer extent along Z in world units.
    #[inline]
    pub fn world_depth(&self, wall: &WallSettings) -> f32 {
        self.depth as f32 * wall.width()
    }

    /// Interior width between the left and right walls.
    #[inline]
    pub fn inner_width(&self, wall: &WallSettings) -> f32 {
        self.world_width(wall) - 2.0 * wall.depth()
    }
}

/// Horizontal shift of a floor that is narrower or shallower than the floor below.
///
/// Along each axis where `current` is smaller than `previous`, the floor moves by
/// `0.5 * diff * wall_width` towards its float direction, then by its own offset. Axes where
/// the floor is not smaller stay at zero. The returned vector has `y == 0`.
pub fn float_shift(
    floor: &FloorOutline,
    current: Footprint,
    previous: Footprint,
    wall_width: f32,
) -> Vec3 {
    let mut shift = Vec3::ZERO;
    if current.width < previous.width {
        let diff = (previous.width - current.width) as f32;
        shift.x = floor.x_float.sign() * 0.5 * diff * wall_width + floor.x_offset;
    }
    if current.depth < previous.depth {
        let diff = (previous.depth - current.depth) as f32;
        shift.z = floor.z_float.sign() * 0.5 * diff * wall_width + floor.z_offset;
    }
    shift
}

/// [`float_shift`] for floor `floor` of `outline`, compared against the floor below.
pub fn floor_shift(outline: &Outline, floor: usize, wall: &WallSettings) -> Result<Vec3> {
    let current = outline.floor(floor)?;
    let previous = outline.previous(floor)?;
    Ok(float_shift(
        current,
        current.footprint(),
        previous.footprint(),
        wall.width(),
    ))
}

/// Widest floor of the building in world units.
///
/// Normalizes distances when coloring building particles by hotspot proximity.
pub fn max_floor_distance(outline: &Outline, wall: &WallSettings) -> f32 {
    outline
        .floors()
        .iter()
        .map(|f| f.footprint().world_width(wall))
        .fold(0.0, f32::max)
}
