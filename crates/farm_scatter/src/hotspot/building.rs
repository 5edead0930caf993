//! Placement and world-space resolution of building hotspots.
use glam::Vec3;
use rand::RngCore;
use tracing::{debug, warn};

use crate::building::particles::{floor_origin, floor_size};
use crate::building::{BuildingTable, Outline};
use crate::distribution::{rand01, uniform_index};
use crate::hotspot::{BuildingHotspot, BuildingHotspots, ResolvedBuildingHotspot};
use crate::settings::{BuildingParticleSettings, WallSettings};

/// Places `count` hotspots in every building of the table.
///
/// Each hotspot picks a floor uniformly, then an offset inside that floor's box:
/// `x` across the width, `y` up the clear height and `z` back along the depth (negative).
/// Buildings are visited in id order, so a seeded rng gives a reproducible set.
pub fn generate_building_hotspots(
    table: &BuildingTable,
    wall: &WallSettings,
    count: usize,
    rng: &mut dyn RngCore,
) -> BuildingHotspots {
    let mut out = BuildingHotspots::new();
    for (id, outline) in table.iter() {
        let hotspots = building_hotspots(outline, wall, count, rng);
        debug!("Placed {} hotspots in building '{}'.", hotspots.len(), id);
        out.insert(id.to_owned(), hotspots);
    }
    out
}

fn building_hotspots(
    outline: &Outline,
    wall: &WallSettings,
    count: usize,
    rng: &mut dyn RngCore,
) -> Vec<BuildingHotspot> {
    let floors = outline.floors();
    let mut hotspots = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(floor) = uniform_index(rng, floors.len()) else {
            break;
        };
        let size = floor_size(&floors[floor], wall);
        let x = rand01(rng) * size.width as f32 * wall.width();
        let y = rand01(rng) * size.height;
        let z = -rand01(rng) * size.depth as f32 * wall.width();
        hotspots.push(BuildingHotspot {
            floor,
            offset: Vec3::new(x, y, z),
        });
    }
    hotspots
}

/// Resolves stored hotspots against the current outline.
///
/// Each offset is added to its floor's particle grid origin, recomputed on every call.
/// Hotspots on floors the outline no longer has are skipped.
pub fn resolve_building_hotspots(
    outline: &Outline,
    hotspots: &[BuildingHotspot],
    wall: &WallSettings,
    particles: &BuildingParticleSettings,
) -> Vec<ResolvedBuildingHotspot> {
    let particle_size = particles.particle_size();
    hotspots
        .iter()
        .filter_map(|h| match floor_origin(outline, h.floor, wall, particle_size) {
            Ok(origin) => Some(ResolvedBuildingHotspot {
                position: origin + h.offset,
                floor: h.floor,
            }),
            Err(e) => {
                warn!("Skipping building hotspot: {}.", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::building::presets::default_building;
    use crate::building::{FloorOutline, XFloat, ZFloat};
    use crate::distribution::tests::FixedRng;
    use crate::hotspot::HOTSPOT_COUNT;

    #[test]
    fn every_building_gets_count_hotspots() {
        let table = BuildingTable::standard().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let hotspots =
            generate_building_hotspots(&table, &WallSettings::default(), HOTSPOT_COUNT, &mut rng);
        assert_eq!(hotspots.len(), table.len());
        for (id, outline) in table.iter() {
            let set = &hotspots[id];
            assert_eq!(set.len(), HOTSPOT_COUNT);
            assert!(set.iter().all(|h| h.floor < outline.len()));
        }
    }

    #[test]
    fn offsets_stay_inside_the_floor_box() {
        let table = BuildingTable::new()
            .with_building("default", default_building())
            .unwrap();
        let wall = WallSettings::default();
        let mut rng = StdRng::seed_from_u64(5);
        let hotspots = generate_building_hotspots(&table, &wall, 50, &mut rng);
        for h in &hotspots["default"] {
            assert!((0.0..=3.0).contains(&h.offset.x));
            assert!((0.0..=0.42 + 1e-6).contains(&h.offset.y));
            assert!((-2.0..=0.0).contains(&h.offset.z));
        }
    }

    #[test]
    fn fixed_draws_pick_last_floor_and_far_corner() {
        let table = BuildingTable::new()
            .with_building("default", default_building())
            .unwrap();
        let mut rng = FixedRng { value: u32::MAX };
        let hotspots = generate_building_hotspots(&table, &WallSettings::default(), 1, &mut rng);
        let h = hotspots["default"][0];
        assert_eq!(h.floor, 1);
        assert!((h.offset - Vec3::new(3.0, 0.42, -2.0)).length() < 1e-5);
    }

    #[test]
    fn resolution_adds_current_floor_origin() {
        let wall = WallSettings::default();
        let particles = BuildingParticleSettings::default();
        let stored = [BuildingHotspot {
            floor: 1,
            offset: Vec3::new(0.1, 0.1, -0.1),
        }];

        let wide = Outline::new(vec![FloorOutline::plain(6, 4), FloorOutline::plain(6, 4)])
            .unwrap();
        let narrow = Outline::new(vec![
            FloorOutline::plain(6, 4),
            FloorOutline::plain(4, 4).with_float(XFloat::Right, ZFloat::None),
        ])
        .unwrap();

        let a = resolve_building_hotspots(&wide, &stored, &wall, &particles);
        let b = resolve_building_hotspots(&narrow, &stored, &wall, &particles);
        let origin_a = floor_origin(&wide, 1, &wall, particles.particle_size()).unwrap();
        let origin_b = floor_origin(&narrow, 1, &wall, particles.particle_size()).unwrap();
        assert_eq!(a[0].position, origin_a + stored[0].offset);
        assert_eq!(b[0].position, origin_b + stored[0].offset);
        assert_eq!(a[0].floor, 1);
        assert_ne!(a[0].position, b[0].position);
    }

    #[test]
    fn hotspots_on_missing_floors_are_skipped() {
        let stored = [
            BuildingHotspot {
                floor: 0,
                offset: Vec3::ZERO,
            },
            BuildingHotspot {
                floor: 9,
                offset: Vec3::ZERO,
            },
        ];
        let out = resolve_building_hotspots(
            &default_building(),
            &stored,
            &WallSettings::default(),
            &BuildingParticleSettings::default(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].floor, 0);
    }
}
