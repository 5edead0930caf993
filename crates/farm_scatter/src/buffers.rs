//! Flat `f32` buffers handed to the rendering backend.
//!
//! Positions and colors are packed as consecutive triples, wall instances as nine floats
//! (position, rotation, scale) and building hotspots as `[x, y, z, floor]` quadruples.
use glam::Vec3;

use crate::color::Rgb;

/// Packs positions as `[x, y, z, x, y, z, ...]`.
pub fn flatten_positions<I>(positions: I) -> Vec<f32>
where
    I: IntoIterator<Item = Vec3>,
{
    let iter = positions.into_iter();
    let mut out = Vec::with_capacity(iter.size_hint().0 * 3);
    for p in iter {
        out.extend_from_slice(&p.to_array());
    }
    out
}

/// Packs colors as `[r, g, b, r, g, b, ...]`.
pub fn flatten_colors(colors: &[Rgb]) -> Vec<f32> {
    colors.iter().flatten().copied().collect()
}

/// Packs instance transforms as `[px, py, pz, rx, ry, rz, sx, sy, sz, ...]`.
pub fn flatten_transforms<I>(transforms: I) -> Vec<f32>
where
    I: IntoIterator<Item = (Vec3, Vec3, Vec3)>,
{
    let iter = transforms.into_iter();
    let mut out = Vec::with_capacity(iter.size_hint().0 * 9);
    for (position, rotation, scale) in iter {
        out.extend_from_slice(&position.to_array());
        out.extend_from_slice(&rotation.to_array());
        out.extend_from_slice(&scale.to_array());
    }
    out
}

/// Packs positions tagged with a floor index as `[x, y, z, floor, ...]`.
pub fn flatten_tagged<I>(points: I) -> Vec<f32>
where
    I: IntoIterator<Item = (Vec3, usize)>,
{
    let iter = points.into_iter();
    let mut out = Vec::with_capacity(iter.size_hint().0 * 4);
    for (p, floor) in iter {
        out.extend_from_slice(&[p.x, p.y, p.z, floor as f32]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_pack_as_triples() {
        let buf = flatten_positions([Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn transforms_pack_nine_floats_each() {
        let buf = flatten_transforms([(Vec3::X, Vec3::Y, Vec3::ONE)]);
        assert_eq!(buf, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn tagged_points_carry_floor_last() {
        let buf = flatten_tagged([(Vec3::new(0.5, 0.25, -1.0), 2)]);
        assert_eq!(buf, vec![0.5, 0.25, -1.0, 2.0]);
    }

    #[test]
    fn empty_inputs_give_empty_buffers() {
        assert!(flatten_positions(std::iter::empty()).is_empty());
        assert!(flatten_colors(&[]).is_empty());
    }
}
