use farm_scatter::hotspot::{proximity_colors, resolve_building_hotspots};
use farm_scatter::prelude::*;
use farm_scatter_examples::{
    color_to_rgb8, init_tracing, render_points_to_png, render_wall_segments_to_png, Projection,
    RenderConfig,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Buildings from a RON table given on the command line, or the stock set.
    let table = match std::env::args().nth(1) {
        Some(path) => BuildingTable::from_ron_file(path)?,
        None => BuildingTable::standard()?,
    };
    let wall = WallSettings::default();
    let particles = BuildingParticleSettings::default().with_scale(2.0);
    let mut rng = StdRng::seed_from_u64(7);
    let hotspots = farm_scatter::hotspot::generate_building_hotspots(
        &table,
        &wall,
        HOTSPOT_COUNT,
        &mut rng,
    );

    for (id, outline) in table.iter() {
        let layout = resolve_rooms(outline, &wall);
        let reach = farm_scatter::building::max_floor_distance(outline, &wall).max(1.0);
        let height = outline.len() as f32 * wall.width() + 0.5;

        let side = RenderConfig::new(
            (900, 900),
            Vec2::new(-reach, -height),
            Vec2::new(reach, 0.5),
            Projection::Side,
        );
        render_wall_segments_to_png(
            &layout.segments,
            wall.part,
            &side,
            format!("rooms-{id}-side.png"),
        )?;

        // Fill the top floor and color it by distance to the building's hotspots.
        let top = outline.len() - 1;
        let filled = FloorParticleDistributor::new(outline, top, &wall, &particles)?.generate();
        let resolved = resolve_building_hotspots(
            outline,
            hotspots.get(id).map(Vec::as_slice).unwrap_or_default(),
            &wall,
            &particles,
        );
        let hotspot_points: Vec<_> = resolved.iter().map(|h| h.position).collect();
        let colors = proximity_colors(filled.positions.iter().copied(), &hotspot_points, reach);
        let points = filled
            .positions
            .iter()
            .copied()
            .zip(colors.into_iter().map(color_to_rgb8))
            .chain(
                resolved
                    .iter()
                    .filter(|h| h.floor == top)
                    .map(|h| (h.position, [255, 60, 60])),
            );
        let plan = RenderConfig::new(
            (900, 900),
            Vec2::splat(-reach),
            Vec2::splat(reach),
            Projection::TopDown,
        )
        .with_point_radius(1);
        render_points_to_png(points, &plan, format!("rooms-{id}-floor{top}-top.png"))?;

        println!(
            "{id}: {} floors, {} wall instances, {} particles on floor {top}",
            outline.len(),
            layout.len(),
            filled.len()
        );
    }

    Ok(())
}
