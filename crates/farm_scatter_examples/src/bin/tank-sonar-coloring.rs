use farm_scatter::prelude::*;
use farm_scatter_examples::{
    color_to_rgb8, init_tracing, render_points_to_png, Projection, RenderConfig,
};
use glam::Vec2;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A sonar JSON document given on the command line, or a synthetic grid.
    let grid = match std::env::args().nth(1) {
        Some(path) => SonarGrid::from_json_reader(std::fs::File::open(path)?)?,
        None => synthetic_grid(128)?,
    };

    let settings = TankSettings::default();
    let tank = TankDistributor::try_new(NetShape::Cylindrical, settings)?
        .generate(TankColoring::Sonar(&grid))?;
    let Some(colors) = tank.sonar_colors.as_ref() else {
        anyhow::bail!("sonar coloring produced no colors");
    };

    let r = settings.max_rho * 1.05;
    let rc = RenderConfig::new((900, 900), Vec2::splat(-r), Vec2::splat(r), Projection::TopDown)
        .with_point_radius(1);
    render_points_to_png(
        tank.positions().zip(colors.iter().copied().map(color_to_rgb8)),
        &rc,
        "tank-sonar-top.png",
    )?;

    println!(
        "{} particles colored from a {}x{} sonar grid",
        tank.len(),
        grid.width(),
        grid.height()
    );
    Ok(())
}

/// Concentric bands with a dense echo patch off-center.
fn synthetic_grid(n: usize) -> Result<SonarGrid> {
    let c = (n as f32 - 1.0) / 2.0;
    let samples = (0..n * n)
        .map(|i| {
            let (row, col) = ((i / n) as f32, (i % n) as f32);
            let d = ((row - c).hypot(col - c) / c).min(1.0);
            let spread = (0.1 * n as f32).powi(2);
            let echo = (-((row - 0.3 * c).powi(2) + (col - 1.4 * c).powi(2)) / spread).exp();
            heat_map_color(0.0, 1.0, (d - echo).clamp(0.0, 1.0))
        })
        .collect();
    SonarGrid::new(n, n, samples)
}
