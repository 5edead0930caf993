//! Hotspots: marked points used to highlight particles by proximity.
//!
//! Tank hotspots live in polar space and drift with a small random walk. Building hotspots
//! are stored relative to their floor and resolved to world space on every query, so they
//! follow the outline when it changes.
use std::collections::BTreeMap;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffers;
use crate::coords::Polar;

pub mod building;
pub mod proximity;
pub mod tank;

pub use building::{generate_building_hotspots, resolve_building_hotspots};
pub use proximity::{
    isolate_building_particles, isolate_tank_particles, nearest_distance,
    nearest_hotspot_distance, proximity_colors, BUILDING_ISOLATION_THRESHOLD,
    TANK_ISOLATION_THRESHOLD,
};
pub use tank::{animate_tank_hotspots, pick_tank_hotspots};

/// Hotspots placed per tank and per building.
pub const HOTSPOT_COUNT: usize = 10;

/// Hotspot inside the tank.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TankHotspot {
    pub position: Polar,
}

impl TankHotspot {
    pub const fn new(theta: f32, rho: f32, depth: f32) -> Self {
        Self {
            position: Polar::new(theta, rho, depth),
        }
    }

    #[inline]
    pub fn cartesian(&self) -> Vec3 {
        self.position.to_cartesian()
    }
}

/// Hotspot on a building floor, relative to that floor's particle grid origin.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuildingHotspot {
    pub floor: usize,
    pub offset: Vec3,
}

/// Building hotspot in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedBuildingHotspot {
    pub position: Vec3,
    pub floor: usize,
}

/// Building hotspots keyed by building id.
pub type BuildingHotspots = BTreeMap<String, Vec<BuildingHotspot>>;

/// Cartesian `[x, y, z, ...]` buffer of tank hotspots.
pub fn tank_hotspot_buffer(hotspots: &[TankHotspot]) -> Vec<f32> {
    buffers::flatten_positions(hotspots.iter().map(TankHotspot::cartesian))
}

/// `[x, y, z, floor, ...]` buffer of resolved building hotspots.
pub fn building_hotspot_buffer(hotspots: &[ResolvedBuildingHotspot]) -> Vec<f32> {
    buffers::flatten_tagged(hotspots.iter().map(|h| (h.position, h.floor)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tank_buffer_is_cartesian() {
        let buf = tank_hotspot_buffer(&[TankHotspot::new(0.0, 0.5, -0.2)]);
        assert_eq!(buf, vec![0.5, -0.2, 0.0]);
    }

    #[test]
    fn building_buffer_appends_floor() {
        let buf = building_hotspot_buffer(&[ResolvedBuildingHotspot {
            position: Vec3::new(1.0, 2.0, 3.0),
            floor: 1,
        }]);
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 1.0]);
    }
}
