use farm_scatter::prelude::*;
use farm_scatter_examples::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(2024);

    // Print counts the way a settings panel would show them.
    let kinds = [
        GenerationEventKind::TankGenerated,
        GenerationEventKind::BuildingParticlesGenerated,
        GenerationEventKind::Warning,
    ];
    let mut sink = FnSink::for_kinds(kinds, |event| match event {
        GenerationEvent::TankGenerated {
            particle_count,
            layers,
            ..
        } => println!("  tank: {particle_count} particles, {layers} layers"),
        GenerationEvent::BuildingParticlesGenerated {
            floor,
            particle_count,
            ..
        } => println!("  floor {floor}: {particle_count} particles"),
        GenerationEvent::Warning { context, message } => {
            println!("  warning [{context}]: {message}")
        }
        _ => {}
    });

    println!("initial scene");
    let mut scene = Scene::new(
        SceneConfig::default(),
        BuildingTable::standard()?,
        None,
        &mut rng,
        &mut sink,
    )?;

    let changes = [
        SceneChange::ParticleScale(0.5),
        SceneChange::NetShape(NetShape::Cylindrical),
        SceneChange::ActiveBuilding("scraper".into()),
        SceneChange::ActiveFloor(6),
        SceneChange::BuildingParticleScale(1.5),
        // Rejected: the scraper has ten floors. The previous scene stays.
        SceneChange::ActiveFloor(12),
        SceneChange::ActiveBuilding("default".into()),
    ];
    for change in changes {
        println!("{change:?}");
        if let Err(e) = scene.apply(change, &mut rng, &mut sink) {
            println!("  rejected: {e}");
        }
    }

    for _ in 0..60 {
        scene.animate_hotspots(&mut rng);
    }
    let cfg = scene.config();
    println!(
        "final: building '{}' floor {}, {} tank hotspots, {} building hotspots, {} wall floats",
        cfg.building,
        cfg.floor,
        scene.output().tank_hotspots.len(),
        scene.resolved_building_hotspots().len(),
        scene.wall_instance_data().len()
    );
    Ok(())
}
