//! Declarative building outlines.
//!
//! An [`Outline`] lists one [`FloorOutline`] per floor, ground floor first. Each floor names
//! the wall segments on its four sides and how it floats when it is smaller than the floor
//! below it.
use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::building::footprint::Footprint;
use crate::error::{Error, Result};

/// Horizontal float of a narrower floor along X.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum XFloat {
    #[default]
    None,
    Left,
    Right,
}

/// Horizontal float of a shallower floor along Z.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZFloat {
    #[default]
    None,
    Back,
    Front,
}

impl XFloat {
    /// `-1` for [`XFloat::Left`], `1` otherwise.
    pub fn sign(self) -> f32 {
        match self {
            XFloat::Left => -1.0,
            XFloat::None | XFloat::Right => 1.0,
        }
    }
}

impl ZFloat {
    /// `-1` for [`ZFloat::Back`], `1` otherwise.
    pub fn sign(self) -> f32 {
        match self {
            ZFloat::Back => -1.0,
            ZFloat::None | ZFloat::Front => 1.0,
        }
    }
}

/// Window opening as fractions of one wall part.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowSize {
    /// Horizontal fraction in `(0, 1]`.
    pub width: f32,
    /// Fraction in `(0, 1]` of the wall part taken by each of the sill and the lintel.
    pub height: f32,
}

impl WindowSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 && v <= 1.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "window {name} must be in (0, 1], got {v}"
                )))
            }
        };
        unit("width", self.width)?;
        unit("height", self.height)
    }
}

/// One wall part along a side of a floor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum WallSegmentSpec {
    #[default]
    Wall,
    Window(WindowSize),
}

impl WallSegmentSpec {
    pub const fn window(width: f32, height: f32) -> Self {
        WallSegmentSpec::Window(WindowSize::new(width, height))
    }

    pub fn is_window(&self) -> bool {
        matches!(self, WallSegmentSpec::Window(_))
    }
}

/// The four sides of a floor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WallSide {
    Facing,
    Back,
    Left,
    Right,
}

impl WallSide {
    /// Sides in resolution order.
    pub const ALL: [WallSide; 4] = [
        WallSide::Facing,
        WallSide::Back,
        WallSide::Left,
        WallSide::Right,
    ];

    /// Whether segments on this side run along the X axis.
    #[inline]
    pub fn runs_along_x(self) -> bool {
        matches!(self, WallSide::Facing | WallSide::Back)
    }

    /// Euler rotation applied to the wall part on this side.
    pub fn rotation(self) -> Vec3 {
        if self.runs_along_x() {
            Vec3::new(0.0, FRAC_PI_2, 0.0)
        } else {
            Vec3::ZERO
        }
    }
}

/// Walls and float settings of one floor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloorOutline {
    pub x_float: XFloat,
    pub z_float: ZFloat,
    /// Extra X shift applied after floating.
    pub x_offset: f32,
    /// Extra Z shift applied after floating.
    pub z_offset: f32,
    pub facing: Vec<WallSegmentSpec>,
    pub back: Vec<WallSegmentSpec>,
    pub left: Vec<WallSegmentSpec>,
    pub right: Vec<WallSegmentSpec>,
}

impl FloorOutline {
    /// A closed box of plain walls, `width` parts wide and `depth` parts deep.
    pub fn plain(width: usize, depth: usize) -> Self {
        Self {
            facing: vec![WallSegmentSpec::Wall; width],
            back: vec![WallSegmentSpec::Wall; width],
            left: vec![WallSegmentSpec::Wall; depth],
            right: vec![WallSegmentSpec::Wall; depth],
            ..Default::default()
        }
    }

    pub fn with_float(mut self, x_float: XFloat, z_float: ZFloat) -> Self {
        self.x_float = x_float;
        self.z_float = z_float;
        self
    }

    pub fn with_offset(mut self, x_offset: f32, z_offset: f32) -> Self {
        self.x_offset = x_offset;
        self.z_offset = z_offset;
        self
    }

    /// Replaces the segment at `index` on `side`. Out-of-range indices are ignored.
    pub fn with_segment(mut self, side: WallSide, index: usize, spec: WallSegmentSpec) -> Self {
        if let Some(slot) = self.side_mut(side).get_mut(index) {
            *slot = spec;
        }
        self
    }

    pub fn side(&self, side: WallSide) -> &[WallSegmentSpec] {
        match side {
            WallSide::Facing => &self.facing,
            WallSide::Back => &self.back,
            WallSide::Left => &self.left,
            WallSide::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, side: WallSide) -> &mut Vec<WallSegmentSpec> {
        match side {
            WallSide::Facing => &mut self.facing,
            WallSide::Back => &mut self.back,
            WallSide::Left => &mut self.left,
            WallSide::Right => &mut self.right,
        }
    }

    /// Wall parts across (facing side) and deep (right side).
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.facing.len(), self.right.len())
    }

    /// Total segments before window expansion.
    pub fn segment_count(&self) -> usize {
        WallSide::ALL.iter().map(|s| self.side(*s).len()).sum()
    }

    pub fn window_count(&self) -> usize {
        WallSide::ALL
            .iter()
            .flat_map(|s| self.side(*s))
            .filter(|seg| seg.is_window())
            .count()
    }

    pub fn validate(&self) -> Result<()> {
        if self.facing.len() != self.back.len() {
            return Err(Error::InvalidConfig(format!(
                "facing has {} segments but back has {}",
                self.facing.len(),
                self.back.len()
            )));
        }
        if self.left.len() != self.right.len() {
            return Err(Error::InvalidConfig(format!(
                "left has {} segments but right has {}",
                self.left.len(),
                self.right.len()
            )));
        }
        if !self.x_offset.is_finite() || !self.z_offset.is_finite() {
            return Err(Error::InvalidConfig("floor offsets must be finite".into()));
        }
        for side in WallSide::ALL {
            for seg in self.side(side) {
                if let WallSegmentSpec::Window(size) = seg {
                    size.validate()?;
                }
            }
        }
        Ok(())
    }
}

/// Floors of one building, ground floor first.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    pub(crate) floors: Vec<FloorOutline>,
}

impl Outline {
    /// Builds and validates an outline.
    pub fn new(floors: Vec<FloorOutline>) -> Result<Self> {
        let outline = Self { floors };
        outline.validate()?;
        Ok(outline)
    }

    pub fn floors(&self) -> &[FloorOutline] {
        &self.floors
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn floor(&self, floor: usize) -> Result<&FloorOutline> {
        self.floors.get(floor).ok_or(Error::FloorOutOfRange {
            floor,
            floors: self.floors.len(),
        })
    }

    /// The floor below `floor`; the ground floor is its own predecessor.
    pub fn previous(&self, floor: usize) -> Result<&FloorOutline> {
        self.floor(floor)?;
        self.floor(floor.saturating_sub(1))
    }

    pub fn validate(&self) -> Result<()> {
        if self.floors.is_empty() {
            return Err(Error::InvalidConfig("outline has no floors".into()));
        }
        for (i, floor) in self.floors.iter().enumerate() {
            floor
                .validate()
                .map_err(|e| Error::InvalidConfig(format!("floor {i}: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_floor_has_matching_sides() {
        let f = FloorOutline::plain(6, 4);
        f.validate().unwrap();
        assert_eq!(f.footprint(), Footprint::new(6, 4));
        assert_eq!(f.segment_count(), 20);
        assert_eq!(f.window_count(), 0);
    }

    #[test]
    fn mismatched_sides_are_rejected() {
        let mut f = FloorOutline::plain(6, 4);
        f.back.pop();
        assert!(matches!(f.validate(), Err(Error::InvalidConfig(_))));

        let mut f = FloorOutline::plain(6, 4);
        f.left.push(WallSegmentSpec::Wall);
        assert!(f.validate().is_err());
    }

    #[test]
    fn window_size_must_be_a_fraction() {
        let f = FloorOutline::plain(2, 2).with_segment(
            WallSide::Facing,
            0,
            WallSegmentSpec::window(1.5, 0.2),
        );
        assert!(f.validate().is_err());
        let f = FloorOutline::plain(2, 2).with_segment(
            WallSide::Facing,
            0,
            WallSegmentSpec::window(1.0, 0.2),
        );
        f.validate().unwrap();
        assert_eq!(f.window_count(), 1);
    }

    #[test]
    fn ground_floor_is_its_own_predecessor() {
        let outline = Outline::new(vec![FloorOutline::plain(6, 4), FloorOutline::plain(4, 4)])
            .unwrap();
        assert_eq!(outline.previous(0).unwrap().footprint().width, 6);
        assert_eq!(outline.previous(1).unwrap().footprint().width, 6);
        assert!(matches!(
            outline.previous(2),
            Err(Error::FloorOutOfRange { floor: 2, floors: 2 })
        ));
    }

    #[test]
    fn empty_outline_is_rejected() {
        assert!(Outline::new(Vec::new()).is_err());
    }

    #[test]
    fn float_signs() {
        assert_eq!(XFloat::Left.sign(), -1.0);
        assert_eq!(XFloat::None.sign(), 1.0);
        assert_eq!(ZFloat::Back.sign(), -1.0);
        assert_eq!(ZFloat::Front.sign(), 1.0);
    }

    #[test]
    fn side_rotation_depends_on_axis() {
        assert_eq!(WallSide::Facing.rotation(), Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert_eq!(WallSide::Left.rotation(), Vec3::ZERO);
    }
}
