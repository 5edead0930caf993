//! Polar ring packing of particles inside the tank net.
//!
//! Layers are stacked downwards from the surface. Each layer holds concentric rings one
//! particle diameter apart, and each ring holds as many particles as fit on its circumference.
//! Positions are fully determined by the settings; no randomness is involved.
use std::convert::Infallible;

use glam::Vec3;
use mint::Vector3;
use tracing::{debug, info};

use crate::buffers;
use crate::color::{Rgb, SonarGrid};
use crate::coords::Polar;
use crate::distribution::{Degenerate, ParticleDistribution, Termination};
use crate::error::{Error, Result};
use crate::settings::{NetShape, TankSettings};
use crate::tank::layers::{layer_count, ring_count, ring_particle_count};

/// Where tank particle colors come from.
#[derive(Clone, Copy, Debug, Default)]
pub enum TankColoring<'a> {
    /// Colors are computed by the renderer from hotspot proximity.
    #[default]
    Deferred,
    /// Each particle takes the sonar cell under it.
    Sonar(&'a SonarGrid),
}

/// One generated tank particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankParticle {
    /// Render-space position.
    pub position: Vec3,
    /// Polar record kept for hotspot placement.
    pub polar: Polar,
}

/// Output of one tank generation pass.
#[derive(Clone, Debug, Default)]
pub struct TankParticles {
    pub particles: Vec<TankParticle>,
    /// One color per particle when sonar coloring was requested.
    pub sonar_colors: Option<Vec<Rgb>>,
    /// Layers that produced at least one ring.
    pub layers_generated: u32,
    pub termination: Termination,
}

impl TankParticles {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    /// Flat `[x, y, z, ...]` position buffer.
    pub fn position_buffer(&self) -> Vec<f32> {
        buffers::flatten_positions(self.positions())
    }

    /// Flat `[r, g, b, ...]` buffer of sonar colors, if any.
    pub fn color_buffer(&self) -> Option<Vec<f32>> {
        self.sonar_colors.as_deref().map(buffers::flatten_colors)
    }
}

/// Generates tank particles for one net shape and settings snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct TankDistributor {
    pub shape: NetShape,
    pub settings: TankSettings,
}

impl TankDistributor {
    pub fn new(shape: NetShape, settings: TankSettings) -> Self {
        Self { shape, settings }
    }

    /// Like [`TankDistributor::new`] but validates the settings first.
    pub fn try_new(shape: NetShape, settings: TankSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(shape, settings))
    }

    /// Runs a full generation pass.
    ///
    /// Fails only when sonar coloring is requested and a particle falls outside the grid.
    pub fn generate(&self, coloring: TankColoring<'_>) -> Result<TankParticles> {
        let mut particles = Vec::new();
        let mut colors = match coloring {
            TankColoring::Deferred => None,
            TankColoring::Sonar(_) => Some(Vec::new()),
        };
        let scaled_diameter = self.settings.scaled_diameter();
        let max_rho = self.settings.max_rho;

        let (layers_generated, termination) = self.walk::<Error, _>(|particle, ring| {
            if let (TankColoring::Sonar(grid), Some(colors)) = (coloring, colors.as_mut()) {
                // Sample where the particle is drawn, i.e. at its scaled radius.
                let drawn = Polar::new(
                    particle.polar.theta,
                    ring as f32 * scaled_diameter,
                    particle.polar.depth,
                );
                colors.push(grid.sample(drawn, max_rho)?);
            }
            particles.push(particle);
            Ok(())
        })?;

        info!(
            "Tank ({:?}): {} particles in {} layers.",
            self.shape,
            particles.len(),
            layers_generated
        );

        Ok(TankParticles {
            particles,
            sonar_colors: colors,
            layers_generated,
            termination,
        })
    }

    /// Visits every particle in generation order: layer, then ring, then angle.
    fn walk<E, F>(&self, mut emit: F) -> std::result::Result<(u32, Termination), E>
    where
        F: FnMut(TankParticle, u32) -> std::result::Result<(), E>,
    {
        let s = &self.settings;
        let layers = layer_count(self.shape, s);
        if layers == 0 {
            debug!("Tank settings yield no layers.");
            return Ok((0, Termination::Degenerate(Degenerate::NoLayers)));
        }

        let delta_rho = 2.0 * s.particle_radius;
        let mut generated = 0;
        for layer in 1..=layers {
            let depth = -(layer as f32) * delta_rho;
            let rings = ring_count(self.shape, layer, s);
            if rings <= 0 {
                debug!("Tank net exhausted at layer {}.", layer);
                return Ok((generated, Termination::Degenerate(Degenerate::NoRings { layer })));
            }
            for ring in 1..=rings as u32 {
                let rho = ring as f32 * delta_rho;
                let count = ring_particle_count(rho, s.particle_radius);
                if count == 0 {
                    continue;
                }
                let delta_theta = std::f32::consts::TAU / count as f32;
                for idx in 1..=count {
                    let polar = Polar::new(idx as f32 * delta_theta, rho, depth);
                    emit(
                        TankParticle {
                            position: polar.to_cartesian(),
                            polar,
                        },
                        ring,
                    )?;
                }
            }
            generated += 1;
        }
        Ok((generated, Termination::Complete))
    }
}

impl ParticleDistribution for TankDistributor {
    fn positions(&self) -> Vec<Vector3<f32>> {
        let mut out = Vec::new();
        let walked = self.walk::<Infallible, _>(|particle, _| {
            out.push(particle.position.into());
            Ok(())
        });
        match walked {
            Ok(_) => out,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU as TAU64;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::hotspot::pick_tank_hotspots;

    /// Straightforward double-precision count of the conical layout.
    fn reference_conical_count(s: &TankSettings) -> usize {
        let r = s.particle_radius as f64;
        let k = s.particle_scale as f64;
        let max_rho = s.max_rho as f64;
        let layers = (2.0 / (2.0 * r * k)).floor() as i64;
        let mut total = 0;
        for layer in 1..=layers {
            let rings = ((max_rho - layer as f64 * r * k) / (2.0 * r * k)).floor() as i64;
            if rings <= 0 {
                break;
            }
            for ring in 1..=rings {
                let rho = ring as f64 * 2.0 * r;
                total += (TAU64 * rho / (2.0 * r)).round() as usize;
            }
        }
        total
    }

    #[test]
    fn conical_count_matches_reference() {
        let s = TankSettings::default();
        let out = TankDistributor::new(NetShape::Conical, s)
            .generate(TankColoring::Deferred)
            .unwrap();
        assert_eq!(out.len(), reference_conical_count(&s));
        assert_eq!(out.layers_generated, 65);
        assert_eq!(
            out.termination,
            Termination::Degenerate(Degenerate::NoRings { layer: 66 })
        );
        assert!(out.sonar_colors.is_none());
    }

    #[test]
    fn positions_do_not_depend_on_hotspot_seed() {
        let dist = TankDistributor::new(NetShape::Conical, TankSettings::default());
        let a = dist.generate(TankColoring::Deferred).unwrap();
        let b = dist.generate(TankColoring::Deferred).unwrap();
        assert_eq!(a.particles, b.particles);

        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        let _ = pick_tank_hotspots(&a.particles, 10, &mut rng_a);
        let _ = pick_tank_hotspots(&b.particles, 10, &mut rng_b);
        assert_eq!(a.particles, b.particles);
    }

    #[test]
    fn first_ring_is_six_particles_one_diameter_out() {
        let s = TankSettings::default();
        let out = TankDistributor::new(NetShape::Conical, s)
            .generate(TankColoring::Deferred)
            .unwrap();
        let first: Vec<_> = out.particles.iter().take(6).collect();
        for p in &first {
            assert!((p.polar.rho - 0.04).abs() < 1e-6);
            assert!((p.polar.depth + 0.04).abs() < 1e-6);
            assert!((p.position.y - p.polar.depth).abs() < 1e-6);
        }
        // Seventh particle starts the second ring.
        assert!((out.particles[6].polar.rho - 0.08).abs() < 1e-6);
    }

    #[test]
    fn cylindrical_keeps_full_radius_above_taper() {
        let s = TankSettings::default();
        let out = TankDistributor::new(NetShape::Cylindrical, s)
            .generate(TankColoring::Deferred)
            .unwrap();
        let max_rho_layer_1 = out
            .particles
            .iter()
            .filter(|p| (p.polar.depth + 0.04).abs() < 1e-6)
            .map(|p| p.polar.rho)
            .fold(0.0f32, f32::max);
        assert!((max_rho_layer_1 - 33.0 * 0.04).abs() < 1e-4);
        assert_eq!(out.layers_generated, 30);
    }

    #[test]
    fn degenerate_settings_yield_empty_result() {
        let s = TankSettings::default().with_particle_radius(5.0);
        let out = TankDistributor::new(NetShape::Conical, s)
            .generate(TankColoring::Deferred)
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(out.termination, Termination::Degenerate(Degenerate::NoLayers));
    }

    #[test]
    fn sonar_coloring_assigns_one_color_per_particle() {
        let grid = SonarGrid::new(64, 64, vec![[0.25, 0.5, 0.75]; 64 * 64]).unwrap();
        let out = TankDistributor::new(NetShape::Conical, TankSettings::default())
            .generate(TankColoring::Sonar(&grid))
            .unwrap();
        let colors = out.sonar_colors.as_ref().unwrap();
        assert_eq!(colors.len(), out.len());
        assert!(colors.iter().all(|c| *c == [0.25, 0.5, 0.75]));
        assert_eq!(out.color_buffer().unwrap().len(), out.len() * 3);
    }

    #[test]
    fn sonar_lookup_failure_propagates() {
        // On a coarse grid the outer ring rounds past the last column.
        let grid = SonarGrid::new(4, 4, vec![[0.0; 3]; 16]).unwrap();
        let res = TankDistributor::new(NetShape::Conical, TankSettings::default())
            .generate(TankColoring::Sonar(&grid));
        assert!(matches!(res, Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn distribution_trait_matches_generate() {
        let dist = TankDistributor::new(NetShape::Conical, TankSettings::default());
        let out = dist.generate(TankColoring::Deferred).unwrap();
        let positions = dist.positions();
        assert_eq!(positions.len(), out.len());
        assert_eq!(Vec3::from(positions[10]), out.particles[10].position);
    }
}
