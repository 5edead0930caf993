//! Placement and animation of tank hotspots.
use std::f32::consts::PI;

use rand::RngCore;
use tracing::debug;

use crate::coords::Polar;
use crate::distribution::{pick_index, rand01};
use crate::hotspot::TankHotspot;
use crate::settings::TankSettings;
use crate::tank::TankParticle;

/// Picks `count` hotspots among the particles, with replacement.
///
/// Returns an empty set when there are no particles.
pub fn pick_tank_hotspots(
    particles: &[TankParticle],
    count: usize,
    rng: &mut dyn RngCore,
) -> Vec<TankHotspot> {
    let hotspots: Vec<TankHotspot> = (0..count)
        .filter_map(|_| pick_index(rng, particles.len()))
        .map(|i| TankHotspot {
            position: particles[i].polar,
        })
        .collect();
    debug!("Placed {} tank hotspots.", hotspots.len());
    hotspots
}

/// One step of the hotspot random walk.
///
/// Each hotspot turns by `pi / 30`, moves radially by `max_rho / 100` and vertically by
/// `water_height / 100`, each in a random direction. The radius never steps below zero:
/// a decrease drawn at `rho <= 0` becomes an increase. Depth is unclamped.
pub fn animate_tank_hotspots(
    hotspots: &[TankHotspot],
    settings: &TankSettings,
    rng: &mut dyn RngCore,
) -> Vec<TankHotspot> {
    let delta_theta = PI / 30.0;
    let delta_rho = settings.max_rho / 100.0;
    let delta_depth = settings.water_height / 100.0;

    hotspots
        .iter()
        .map(|h| {
            let Polar { theta, rho, depth } = h.position;
            let theta = if rand01(rng) > 0.5 {
                theta - delta_theta
            } else {
                theta + delta_theta
            };
            let rho = if rand01(rng) > 0.5 && rho > 0.0 {
                rho - delta_rho
            } else {
                rho + delta_rho
            };
            let depth = if rand01(rng) > 0.5 {
                depth + delta_depth
            } else {
                depth - delta_depth
            };
            TankHotspot::new(theta, rho, depth)
        })
        .collect()
}
