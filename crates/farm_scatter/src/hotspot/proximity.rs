//! Nearest-hotspot distances and the isolation and coloring built on them.
use glam::Vec3;

use crate::color::{heat_map_color, Rgb};
use crate::coords::Polar;
use crate::hotspot::{ResolvedBuildingHotspot, TankHotspot};
use crate::settings::TankSettings;
use crate::tank::TankParticle;

/// Default isolation radius around tank hotspots.
pub const TANK_ISOLATION_THRESHOLD: f32 = 0.2;
/// Default isolation radius around building hotspots.
pub const BUILDING_ISOLATION_THRESHOLD: f32 = 0.4;

/// Smallest distance from `query` to any of `points`, or `far` if none is closer.
pub fn nearest_distance<I>(query: Vec3, points: I, far: f32) -> f32
where
    I: IntoIterator<Item = Vec3>,
{
    points
        .into_iter()
        .map(|p| query.distance(p))
        .fold(far, f32::min)
}

/// Distance from a tank position to its nearest hotspot.
///
/// Both sides are compared in Cartesian space. With no hotspot closer than
/// [`TankSettings::far_distance`], that sentinel is returned; an empty set returns it too.
pub fn nearest_hotspot_distance(
    query: Polar,
    hotspots: &[TankHotspot],
    settings: &TankSettings,
) -> f32 {
    nearest_distance(
        query.to_cartesian(),
        hotspots.iter().map(TankHotspot::cartesian),
        settings.far_distance(),
    )
}

/// Indices of tank particles within `threshold` of a hotspot.
pub fn isolate_tank_particles(
    particles: &[TankParticle],
    hotspots: &[TankHotspot],
    settings: &TankSettings,
    threshold: f32,
) -> Vec<usize> {
    particles
        .iter()
        .enumerate()
        .filter(|(_, p)| nearest_hotspot_distance(p.polar, hotspots, settings) <= threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Indices of building particles within `threshold` of a hotspot.
pub fn isolate_building_particles(
    positions: &[Vec3],
    hotspots: &[ResolvedBuildingHotspot],
    threshold: f32,
) -> Vec<usize> {
    positions
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            nearest_distance(**p, hotspots.iter().map(|h| h.position), f32::INFINITY)
                <= threshold
        })
        .map(|(i, _)| i)
        .collect()
}

/// Heat-map color of each position's nearest-hotspot distance over `[0, far]`.
///
/// Near particles come out green, far ones blue.
pub fn proximity_colors<I>(positions: I, hotspots: &[Vec3], far: f32) -> Vec<Rgb>
where
    I: IntoIterator<Item = Vec3>,
{
    positions
        .into_iter()
        .map(|p| heat_map_color(0.0, far, nearest_distance(p, hotspots.iter().copied(), far)))
        .collect()
}
