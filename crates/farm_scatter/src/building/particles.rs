//! Regular particle grid filling the interior of one floor.
//!
//! The grid is aligned to the inner faces of the walls: particles run along X in stripes,
//! stripes step backwards along -Z, and layers stack upwards. The last stripe and the last
//! particle of each stripe are left out as a margin against the walls.
use glam::Vec3;
use mint::Vector3;
use tracing::{debug, info};

use crate::buffers;
use crate::building::footprint::floor_shift;
use crate::building::outline::{FloorOutline, Outline};
use crate::distribution::{Degenerate, ParticleDistribution, Termination};
use crate::error::Result;
use crate::settings::{BuildingParticleSettings, WallSettings};

/// Interior volume of a floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorSize {
    /// Wall parts along X.
    pub width: usize,
    /// Wall parts along Z.
    pub depth: usize,
    /// Clear height between floor and ceiling slab, in world units.
    pub height: f32,
}

pub fn floor_size(floor: &FloorOutline, wall: &WallSettings) -> FloorSize {
    let footprint = floor.footprint();
    FloorSize {
        width: footprint.width,
        depth: footprint.depth,
        height: wall.height() - 2.0 * wall.depth(),
    }
}

/// Corner of the particle grid on `floor`: left, bottom, front.
///
/// Applies the same floating shift as the walls of that floor.
pub fn floor_origin(
    outline: &Outline,
    floor: usize,
    wall: &WallSettings,
    particle_size: f32,
) -> Result<Vec3> {
    let footprint = outline.floor(floor)?.footprint();
    let shift = floor_shift(outline, floor, wall)?;
    let origin = Vec3::new(
        -footprint.inner_width(wall) / 2.0 + 0.5 * particle_size,
        floor as f32 * wall.height() - 0.5 * wall.width() + particle_size,
        footprint.world_depth(wall) / 2.0 - 0.5 * particle_size,
    );
    Ok(origin + shift)
}

/// Cell counts of a floor grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloorGrid {
    pub layers: usize,
    pub stripes: usize,
    pub particles_per_stripe: usize,
}

impl FloorGrid {
    pub fn new(size: &FloorSize, wall: &WallSettings, particle_size: f32) -> Self {
        let inner_width = size.width as f32 * wall.width() - 2.0 * wall.depth();
        Self {
            layers: (size.height / particle_size).floor() as usize,
            stripes: (size.depth as f32 * wall.width() / particle_size).floor() as usize,
            particles_per_stripe: (inner_width / particle_size).floor() as usize,
        }
    }

    /// Particles actually emitted, with the trailing stripe and particle left out.
    pub fn cell_count(&self) -> usize {
        self.layers * self.stripes.saturating_sub(1) * self.particles_per_stripe.saturating_sub(1)
    }
}

/// Output of one floor fill.
#[derive(Clone, Debug, Default)]
pub struct BuildingParticles {
    pub floor: usize,
    pub positions: Vec<Vec3>,
    pub grid: FloorGrid,
    pub termination: Termination,
}

impl BuildingParticles {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position_buffer(&self) -> Vec<f32> {
        buffers::flatten_positions(self.positions.iter().copied())
    }
}

/// Fills one floor of a building with particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorParticleDistributor {
    floor: usize,
    origin: Vec3,
    grid: FloorGrid,
    particle_size: f32,
}

impl FloorParticleDistributor {
    /// Fails if `floor` does not exist in `outline` or the settings are invalid.
    pub fn new(
        outline: &Outline,
        floor: usize,
        wall: &WallSettings,
        particles: &BuildingParticleSettings,
    ) -> Result<Self> {
        wall.validate()?;
        particles.validate()?;
        let particle_size = particles.particle_size();
        let size = floor_size(outline.floor(floor)?, wall);
        Ok(Self {
            floor,
            origin: floor_origin(outline, floor, wall, particle_size)?,
            grid: FloorGrid::new(&size, wall, particle_size),
            particle_size,
        })
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn grid(&self) -> FloorGrid {
        self.grid
    }

    pub fn generate(&self) -> BuildingParticles {
        let positions: Vec<Vec3> = self.cells().collect();
        let termination = if positions.is_empty() {
            debug!("Floor {} has no room for particles.", self.floor);
            Termination::Degenerate(Degenerate::EmptyFloor { floor: self.floor })
        } else {
            Termination::Complete
        };
        info!(
            "Floor {}: {} particles ({} layers).",
            self.floor,
            positions.len(),
            self.grid.layers
        );
        BuildingParticles {
            floor: self.floor,
            positions,
            grid: self.grid,
            termination,
        }
    }

    /// Cell centers in layer, stripe, particle order.
    fn cells(&self) -> impl Iterator<Item = Vec3> + '_ {
        let ps = self.particle_size;
        let half = 0.5 * ps;
        let stripes = self.grid.stripes.saturating_sub(1);
        let per_stripe = self.grid.particles_per_stripe.saturating_sub(1);
        (0..self.grid.layers).flat_map(move |layer| {
            (0..stripes).flat_map(move |stripe| {
                (0..per_stripe).map(move |particle| {
                    self.origin
                        + Vec3::new(
                            particle as f32 * ps + half,
                            layer as f32 * ps + half,
                            -(stripe as f32) * ps - half,
                        )
                })
            })
        })
    }
}

impl ParticleDistribution for FloorParticleDistributor {
    fn positions(&self) -> Vec<Vector3<f32>> {
        self.cells().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::footprint::Footprint;
    use crate::building::outline::{XFloat, ZFloat};
    use crate::building::presets::default_building;
    use crate::error::Error;

    #[test]
    fn count_matches_grid_with_margin() {
        let outline = default_building();
        let wall = WallSettings::default();
        let dist =
            FloorParticleDistributor::new(&outline, 0, &wall, &BuildingParticleSettings::default())
                .unwrap();
        let grid = dist.grid();
        let out = dist.generate();
        assert!(grid.layers > 0 && grid.stripes > 1 && grid.particles_per_stripe > 1);
        assert_eq!(
            out.len(),
            grid.layers * (grid.stripes - 1) * (grid.particles_per_stripe - 1)
        );
        assert_eq!(out.termination, Termination::Complete);
        assert_eq!(out.position_buffer().len(), out.len() * 3);
    }

    #[test]
    fn first_particle_sits_half_a_cell_from_origin() {
        let outline = default_building();
        let wall = WallSettings::default();
        let settings = BuildingParticleSettings::default();
        let dist = FloorParticleDistributor::new(&outline, 1, &wall, &settings).unwrap();
        let out = dist.generate();
        let ps = settings.particle_size();
        let expected = dist.origin() + Vec3::new(0.5 * ps, 0.5 * ps, -0.5 * ps);
        assert!((out.positions[0] - expected).length() < 1e-6);
        // Ground floor origin: y = -0.25 + ps; floor 1 adds one wall height.
        assert!((dist.origin().y - (0.5 - 0.25 + ps)).abs() < 1e-6);
    }

    #[test]
    fn particles_stay_inside_the_walls() {
        let outline = default_building();
        let wall = WallSettings::default();
        let out =
            FloorParticleDistributor::new(&outline, 0, &wall, &BuildingParticleSettings::default())
                .unwrap()
                .generate();
        let fp = Footprint::new(6, 4);
        let half_inner = fp.inner_width(&wall) / 2.0;
        let half_depth = fp.world_depth(&wall) / 2.0;
        for p in &out.positions {
            assert!(p.x > -half_inner && p.x < half_inner);
            assert!(p.z > -half_depth && p.z < half_depth);
        }
    }

    #[test]
    fn floating_floor_moves_with_its_walls() {
        let outline = Outline::new(vec![
            FloorOutline::plain(6, 4),
            FloorOutline::plain(4, 4).with_float(XFloat::Left, ZFloat::None),
        ])
        .unwrap();
        let plain = Outline::new(vec![FloorOutline::plain(4, 4), FloorOutline::plain(4, 4)])
            .unwrap();
        let wall = WallSettings::default();
        let a = floor_origin(&outline, 1, &wall, 0.04).unwrap();
        let b = floor_origin(&plain, 1, &wall, 0.04).unwrap();
        assert!(((a - b) - Vec3::new(-0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn oversized_particles_yield_empty_floor() {
        let outline = default_building();
        let settings = BuildingParticleSettings::default().with_scale(20.0);
        let out = FloorParticleDistributor::new(&outline, 0, &WallSettings::default(), &settings)
            .unwrap()
            .generate();
        assert!(out.is_empty());
        assert_eq!(
            out.termination,
            Termination::Degenerate(Degenerate::EmptyFloor { floor: 0 })
        );
    }

    #[test]
    fn missing_floor_is_an_error() {
        let res = FloorParticleDistributor::new(
            &default_building(),
            5,
            &WallSettings::default(),
            &BuildingParticleSettings::default(),
        );
        assert!(matches!(res, Err(Error::FloorOutOfRange { floor: 5, floors: 2 })));
    }

    #[test]
    fn distribution_trait_matches_generate() {
        let dist = FloorParticleDistributor::new(
            &default_building(),
            0,
            &WallSettings::default(),
            &BuildingParticleSettings::default(),
        )
        .unwrap();
        let positions = dist.positions();
        let out = dist.generate();
        assert_eq!(positions.len(), out.len());
        assert_eq!(Vec3::from(positions[7]), out.positions[7]);
    }
}
