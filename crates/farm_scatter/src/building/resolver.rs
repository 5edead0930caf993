//! Turns an [`Outline`] into positioned wall, floor and ceiling instances.
//!
//! Every instance is the same wall part mesh with its own position, Euler rotation and
//! scale. Output order is stable: the ground plane first, then for each floor its floor slab,
//! ceiling slab and the segments of each side in [`WallSide::ALL`] order.
use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use tracing::debug;

use crate::buffers;
use crate::building::footprint::float_shift;
use crate::building::outline::{Outline, WallSegmentSpec, WallSide, WindowSize};
use crate::settings::WallSettings;

const GROUND_POSITION: Vec3 = Vec3::new(0.0, -0.25, 0.0);
const GROUND_SCALE: Vec3 = Vec3::new(20.0, 0.1, 20.0);
/// Lays the wall part flat for the ground plane and floor slabs.
const LYING: Vec3 = Vec3::new(0.0, 0.0, FRAC_PI_2);

/// Piece of a window wall part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowPart {
    LeftPillar,
    RightPillar,
    Sill,
    Lintel,
}

/// What a resolved instance represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Ground,
    Floor,
    Ceiling,
    Wall(WallSide),
    Window(WallSide, WindowPart),
}

/// One positioned instance of the wall part mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedWallSegment {
    /// `None` for the ground plane.
    pub floor: Option<usize>,
    pub kind: SegmentKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

/// All instances of one building.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomLayout {
    pub segments: Vec<ResolvedWallSegment>,
}

impl RoomLayout {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Instances that belong to `floor`.
    pub fn floor_segments(&self, floor: usize) -> impl Iterator<Item = &ResolvedWallSegment> {
        self.segments.iter().filter(move |s| s.floor == Some(floor))
    }

    /// Flat instance buffer, nine floats per instance.
    pub fn instance_data(&self) -> Vec<f32> {
        buffers::flatten_transforms(
            self.segments
                .iter()
                .map(|s| (s.position, s.rotation, s.scale)),
        )
    }
}

/// Resolves every floor of `outline`.
pub fn resolve_rooms(outline: &Outline, wall: &WallSettings) -> RoomLayout {
    let mut segments = vec![ResolvedWallSegment {
        floor: None,
        kind: SegmentKind::Ground,
        position: GROUND_POSITION,
        rotation: LYING,
        scale: GROUND_SCALE,
    }];

    let floors = outline.floors();
    for (floor, floor_outline) in floors.iter().enumerate() {
        let previous = &floors[floor.saturating_sub(1)];
        let footprint = floor_outline.footprint();
        let shift = float_shift(
            floor_outline,
            footprint,
            previous.footprint(),
            wall.width(),
        );
        let resolver = FloorResolver {
            floor,
            wall: *wall,
            width: footprint.width as f32,
            depth: footprint.depth as f32,
            shift,
        };
        resolver.slabs(&mut segments);
        for side in WallSide::ALL {
            for (index, spec) in floor_outline.side(side).iter().enumerate() {
                resolver.segment(side, index, spec, &mut segments);
            }
        }
    }

    debug!(
        "Resolved {} floors into {} wall instances.",
        floors.len(),
        segments.len()
    );
    RoomLayout { segments }
}

struct FloorResolver {
    floor: usize,
    wall: WallSettings,
    /// Footprint in wall parts.
    width: f32,
    depth: f32,
    shift: Vec3,
}

impl FloorResolver {
    fn push(
        &self,
        kind: SegmentKind,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        out: &mut Vec<ResolvedWallSegment>,
    ) {
        out.push(ResolvedWallSegment {
            floor: Some(self.floor),
            kind,
            position,
            rotation,
            scale,
        });
    }

    fn slabs(&self, out: &mut Vec<ResolvedWallSegment>) {
        let w = self.wall.width();
        let d = self.wall.depth();
        let base = self.floor as f32 * w;
        let scale = Vec3::new((self.width * w - 2.0 * d) / w, 1.0, self.depth);

        let floor_pos = Vec3::new(0.0, base - 0.5 * w + 0.5 * d, 0.0) + self.shift;
        let ceil_pos = Vec3::new(0.0, base + 0.5 * w - 0.5 * d, 0.0) + self.shift;
        self.push(SegmentKind::Floor, floor_pos, LYING, scale, out);
        self.push(SegmentKind::Ceiling, ceil_pos, LYING, scale, out);
    }

    /// Center of the wall part at `index` on `side`.
    fn base_offset(&self, side: WallSide, index: usize) -> Vec3 {
        let w = self.wall.width();
        let d = self.wall.depth();
        let y = self.floor as f32 * w;
        let i = index as f32;
        let half_w = 0.5 * self.width * w;
        let half_d = 0.5 * self.depth * w;

        let offset = match side {
            WallSide::Facing => Vec3::new(-half_w + 0.5 * w + i * w, y, half_d + 0.5 * d),
            WallSide::Back => Vec3::new(-half_w + 0.5 * w + i * w, y, -half_d - 0.5 * d),
            WallSide::Left => Vec3::new(-half_w + 0.5 * d, y, half_d - 0.5 * w - i * w),
            WallSide::Right => Vec3::new(half_w - 0.5 * d, y, half_d - 0.5 * w - i * w),
        };
        offset + self.shift
    }

    fn segment(
        &self,
        side: WallSide,
        index: usize,
        spec: &WallSegmentSpec,
        out: &mut Vec<ResolvedWallSegment>,
    ) {
        let offset = self.base_offset(side, index);
        let rotation = side.rotation();
        match spec {
            WallSegmentSpec::Wall => {
                self.push(SegmentKind::Wall(side), offset, rotation, Vec3::ONE, out);
            }
            WallSegmentSpec::Window(size) => {
                for (part, position, scale) in self.window_parts(side, offset, size) {
                    self.push(SegmentKind::Window(side, part), position, rotation, scale, out);
                }
            }
        }
    }

    /// Splits a window wall part into two pillars, a sill and a lintel.
    fn window_parts(
        &self,
        side: WallSide,
        offset: Vec3,
        size: &WindowSize,
    ) -> [(WindowPart, Vec3, Vec3); 4] {
        let w = self.wall.width();
        let pillar = (1.0 - size.width) / 2.0;
        let pillar_shift = 0.5 * w - 0.5 * pillar * w;
        let rail_shift = 0.5 * w - 0.5 * size.height * w;

        // Facing and back walls span X; side walls span Z.
        let (axis, rail_scale, pillar_scale) = if side.runs_along_x() {
            (
                Vec3::X,
                Vec3::new(size.width, size.height, 1.0),
                Vec3::new(pillar, 1.0, 1.0),
            )
        } else {
            (
                Vec3::Z,
                Vec3::new(1.0, size.height, size.width),
                Vec3::new(1.0, 1.0, pillar),
            )
        };

        [
            (WindowPart::LeftPillar, offset - axis * pillar_shift, pillar_scale),
            (WindowPart::RightPillar, offset + axis * pillar_shift, pillar_scale),
            (WindowPart::Sill, offset - Vec3::Y * rail_shift, rail_scale),
            (WindowPart::Lintel, offset + Vec3::Y * rail_shift, rail_scale),
        ]
    }
}
