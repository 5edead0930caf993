//! Coordinate helpers shared by the tank and building generators.
//!
//! Tank positions are authored in polar form `(theta, rho, depth)` around the vertical
//! axis and rendered in a Y-up Cartesian space: `x = rho cos(theta)`, `y = depth`,
//! `z = rho sin(theta)`.
use glam::Vec3;

use crate::error::{Error, Result};

/// Position in tank polar space.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polar {
    /// Angle from the X axis, in radians.
    pub theta: f32,
    /// Distance from the vertical axis.
    pub rho: f32,
    /// Vertical position; zero at the water surface, negative below it.
    pub depth: f32,
}

impl Polar {
    pub const fn new(theta: f32, rho: f32, depth: f32) -> Self {
        Self { theta, rho, depth }
    }

    /// Converts to render space. See [`polar_to_cartesian`].
    #[inline]
    pub fn to_cartesian(self) -> Vec3 {
        polar_to_cartesian(self)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.theta, self.rho, self.depth]
    }
}

impl From<[f32; 3]> for Polar {
    fn from([theta, rho, depth]: [f32; 3]) -> Self {
        Self { theta, rho, depth }
    }
}

/// Maps `(theta, rho, depth)` to `[rho cos(theta), depth, rho sin(theta)]`.
#[inline]
pub fn polar_to_cartesian(p: Polar) -> Vec3 {
    let (sin, cos) = p.theta.sin_cos();
    Vec3::new(p.rho * cos, p.depth, p.rho * sin)
}

/// Lossy inverse of [`polar_to_cartesian`].
///
/// `rho` is the full Euclidean length of `v` (depth included) and `theta` is
/// `acos(x / rho)`, so the result only lies in `[0, pi]`: points with negative `z`
/// come back mirrored. Round trips hold for `theta` in `[0, pi]` and `depth == 0`.
/// The zero vector maps to `theta = 0`.
pub fn cartesian_to_polar(v: Vec3) -> Polar {
    let rho = v.length();
    let theta = if rho > 0.0 {
        (v.x / rho).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };
    Polar::new(theta, rho, v.y)
}

/// Euclidean norm of an n-dimensional vector.
///
/// Fails with [`Error::InvalidInput`] if any component is NaN. The empty vector has length 0.
pub fn vector_length(v: &[f32]) -> Result<f32> {
    if let Some(i) = v.iter().position(|c| c.is_nan()) {
        return Err(Error::InvalidInput(format!(
            "vector component {i} is not a number"
        )));
    }
    Ok(v.iter().map(|c| c * c).sum::<f32>().sqrt())
}

/// Euclidean distance between two n-dimensional points.
///
/// Fails with [`Error::InvalidInput`] on a dimension mismatch or a NaN component.
pub fn cart_dist(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::InvalidInput(format!(
            "dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.iter().chain(b).any(|c| c.is_nan()) {
        return Err(Error::InvalidInput("point component is not a number".into()));
    }
    Ok(a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt())
}
