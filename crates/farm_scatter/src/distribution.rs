//! Shared vocabulary for the particle generators.
//!
//! This module defines the [`ParticleDistribution`] trait implemented by the tank and floor
//! generators, the [`Termination`] record that tells a complete pass apart from one that ran
//! out of geometry, and the random helpers used for hotspot placement.
use mint::Vector3;
use rand::RngCore;

/// Deterministic particle layout.
pub trait ParticleDistribution {
    /// Particle centers in render space.
    fn positions(&self) -> Vec<Vector3<f32>>;
}

/// Why a generation pass stopped producing geometry early.
///
/// This is a normal outcome; the pass still returns a valid, possibly empty, result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Degenerate {
    /// The settings yield zero layers.
    NoLayers,
    /// The ring count at `layer` (1-indexed) dropped to zero or below.
    NoRings { layer: u32 },
    /// The floor grid leaves no cells.
    EmptyFloor { floor: usize },
}

/// How a generation pass ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Termination {
    /// Every planned layer was generated.
    #[default]
    Complete,
    /// Generation stopped early; see [`Degenerate`].
    Degenerate(Degenerate),
}

impl Termination {
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Termination::Degenerate(_))
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Picks `floor(rand01 * (len - 1))`, the index rule used for hotspot placement.
///
/// The last element is only reachable through float rounding; the result is clamped to
/// `len - 1`. Returns `None` for an empty slice.
#[inline]
pub(crate) fn pick_index(rng: &mut dyn RngCore, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let idx = (rand01(rng) * (len - 1) as f32).floor() as usize;
    Some(idx.min(len - 1))
}

/// Picks `floor(rand01 * len)`, a uniform index over the whole slice.
#[inline]
pub(crate) fn uniform_index(rng: &mut dyn RngCore, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let idx = (rand01(rng) * len as f32).floor() as usize;
    Some(idx.min(len - 1))
}
