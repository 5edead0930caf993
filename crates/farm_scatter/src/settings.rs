//! Settings records read by the generators.
//!
//! Each record is a plain value with builder-style setters and a `validate` check. A
//! generation pass takes them by reference and never mutates them.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shape of the tank net, which decides how ring counts shrink with depth.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NetShape {
    /// Radius shrinks linearly from the surface down.
    #[default]
    Conical,
    /// Full radius down to the decrease height, then a tapered bottom.
    Cylindrical,
}

/// Tank particle density and dimensions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankSettings {
    /// Radius of one particle before scaling.
    pub particle_radius: f32,
    /// Render scale applied to every particle.
    pub particle_scale: f32,
    /// Radius of the net at the surface.
    pub max_rho: f32,
    /// Depth of the water column.
    pub water_height: f32,
    /// Height of the tapered bottom section of a cylindrical net.
    pub decrease_ring_height: f32,
}

impl Default for TankSettings {
    fn default() -> Self {
        Self {
            particle_radius: 0.02,
            particle_scale: 0.7,
            max_rho: 0.95,
            water_height: 1.311,
            decrease_ring_height: 0.5387,
        }
    }
}

impl TankSettings {
    pub fn with_particle_radius(mut self, particle_radius: f32) -> Self {
        self.particle_radius = particle_radius;
        self
    }

    pub fn with_particle_scale(mut self, particle_scale: f32) -> Self {
        self.particle_scale = particle_scale;
        self
    }

    pub fn with_max_rho(mut self, max_rho: f32) -> Self {
        self.max_rho = max_rho;
        self
    }

    pub fn with_water_height(mut self, water_height: f32) -> Self {
        self.water_height = water_height;
        self
    }

    pub fn with_decrease_ring_height(mut self, decrease_ring_height: f32) -> Self {
        self.decrease_ring_height = decrease_ring_height;
        self
    }

    /// Scaled particle diameter, `2 * radius * scale`.
    #[inline]
    pub fn scaled_diameter(&self) -> f32 {
        2.0 * self.particle_radius * self.particle_scale
    }

    /// Distance reported when no hotspot is closer, `max_rho / particle_scale`.
    #[inline]
    pub fn far_distance(&self) -> f32 {
        self.max_rho / self.particle_scale
    }

    /// Validates the settings, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        positive("particle_radius", self.particle_radius)?;
        positive("particle_scale", self.particle_scale)?;
        positive("max_rho", self.max_rho)?;
        positive("water_height", self.water_height)?;
        if !self.decrease_ring_height.is_finite()
            || self.decrease_ring_height < 0.0
            || self.decrease_ring_height > self.water_height
        {
            return Err(Error::InvalidConfig(
                "decrease_ring_height must be within [0, water_height]".into(),
            ));
        }
        Ok(())
    }
}

/// Size of the single wall part every wall, floor and ceiling instance is scaled from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSettings {
    /// Width (x), height (y) and thickness (z) of one wall part.
    pub part: Vec3,
}

impl Default for WallSettings {
    fn default() -> Self {
        Self {
            part: Vec3::new(0.5, 0.5, 0.04),
        }
    }
}

impl WallSettings {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            part: Vec3::new(width, height, depth),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.part.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.part.y
    }

    /// Wall thickness.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.part.z
    }

    pub fn validate(&self) -> Result<()> {
        positive("wall width", self.width())?;
        positive("wall height", self.height())?;
        positive("wall depth", self.depth())?;
        if 2.0 * self.depth() >= self.height() {
            return Err(Error::InvalidConfig(
                "wall depth must be less than half the wall height".into(),
            ));
        }
        Ok(())
    }
}

/// Size of the cubic particles that fill a building floor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingParticleSettings {
    pub original_scale: f32,
    pub scale: f32,
}

impl Default for BuildingParticleSettings {
    fn default() -> Self {
        Self {
            original_scale: 0.04,
            scale: 1.0,
        }
    }
}

impl BuildingParticleSettings {
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Edge length of one particle.
    #[inline]
    pub fn particle_size(&self) -> f32 {
        self.original_scale * self.scale
    }

    pub fn validate(&self) -> Result<()> {
        positive("particle original_scale", self.original_scale)?;
        positive("particle scale", self.scale)
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{name} must be > 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        TankSettings::default().validate().unwrap();
        WallSettings::default().validate().unwrap();
        BuildingParticleSettings::default().validate().unwrap();
    }

    #[test]
    fn far_distance_divides_by_scale() {
        let s = TankSettings::default().with_max_rho(1.4).with_particle_scale(0.7);
        assert!((s.far_distance() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn tank_validate_rejects_bad_values() {
        assert!(TankSettings::default()
            .with_particle_scale(0.0)
            .validate()
            .is_err());
        assert!(TankSettings::default()
            .with_particle_radius(f32::NAN)
            .validate()
            .is_err());
        assert!(TankSettings::default()
            .with_decrease_ring_height(2.0)
            .validate()
            .is_err());
    }

    #[test]
    fn wall_validate_rejects_thick_walls() {
        assert!(WallSettings::new(0.5, 0.5, 0.3).validate().is_err());
    }

    #[test]
    fn particle_size_multiplies_scales() {
        let s = BuildingParticleSettings::default().with_scale(2.0);
        assert!((s.particle_size() - 0.08).abs() < 1e-6);
    }
}
