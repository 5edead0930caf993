use farm_scatter::hotspot::proximity_colors;
use farm_scatter::prelude::*;
use farm_scatter_examples::{
    color_to_rgb8, init_tracing, render_points_to_png, Projection, RenderConfig,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = TankSettings::default();
    let mut rng = StdRng::seed_from_u64(42);

    for (shape, name) in [
        (NetShape::Conical, "conical"),
        (NetShape::Cylindrical, "cylindrical"),
    ] {
        let tank = TankDistributor::try_new(shape, settings)?.generate(TankColoring::Deferred)?;
        let hotspots = pick_tank_hotspots(&tank.particles, HOTSPOT_COUNT, &mut rng);
        let hotspot_points: Vec<_> = hotspots.iter().map(TankHotspot::cartesian).collect();

        // Color by distance to the nearest hotspot: green near, blue far.
        let colors = proximity_colors(tank.positions(), &hotspot_points, settings.far_distance());
        let points: Vec<_> = tank
            .positions()
            .zip(colors.iter().copied().map(color_to_rgb8))
            .chain(hotspot_points.iter().map(|&p| (p, [255, 60, 60])))
            .collect();

        let r = settings.max_rho * 1.05;
        let side = RenderConfig::new(
            (900, 900),
            Vec2::new(-r, -0.1),
            Vec2::new(r, settings.water_height.max(2.0) + 0.1),
            Projection::Side,
        );
        render_points_to_png(points.iter().copied(), &side, format!("tank-{name}-side.png"))?;

        let top =
            RenderConfig::new((900, 900), Vec2::splat(-r), Vec2::splat(r), Projection::TopDown)
                .with_point_radius(1);
        render_points_to_png(points, &top, format!("tank-{name}-top.png"))?;

        println!(
            "{name}: {} particles in {} layers ({:?})",
            tank.len(),
            tank.layers_generated,
            tank.termination
        );
    }

    Ok(())
}
