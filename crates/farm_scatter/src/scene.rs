//! Whole-scene regeneration.
//!
//! A [`SceneConfig`] is the immutable snapshot one pass reads. [`SceneGenerator`] turns a
//! snapshot into a [`SceneOutput`] from scratch, and [`Scene`] keeps the current snapshot and
//! output, swapping both only when a change yields a valid snapshot.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::building::{
    max_floor_distance, resolve_rooms, BuildingParticles, BuildingTable, FloorParticleDistributor,
    Outline, RoomLayout,
};
use crate::color::SonarGrid;
use crate::error::{Error, Result};
use crate::events::{EventSink, GenerationEvent, GenerationEventKind};
use crate::hotspot::{
    animate_tank_hotspots, building_hotspot_buffer, generate_building_hotspots,
    pick_tank_hotspots, resolve_building_hotspots, tank_hotspot_buffer, BuildingHotspots,
    ResolvedBuildingHotspot, TankHotspot, HOTSPOT_COUNT,
};
use crate::settings::{BuildingParticleSettings, NetShape, TankSettings, WallSettings};
use crate::tank::{TankColoring, TankDistributor, TankParticles};

/// Snapshot of every setting a regeneration pass reads.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub tank: TankSettings,
    pub net_shape: NetShape,
    pub wall: WallSettings,
    pub building_particles: BuildingParticleSettings,
    /// Id of the active building in the table.
    pub building: String,
    /// Active floor, 0-indexed.
    pub floor: usize,
    /// Color tank particles from the sonar grid.
    pub sonar: bool,
    /// Hotspots per tank and per building.
    pub hotspot_count: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tank: TankSettings::default(),
            net_shape: NetShape::Conical,
            wall: WallSettings::default(),
            building_particles: BuildingParticleSettings::default(),
            building: "default".into(),
            floor: 1,
            sonar: false,
            hotspot_count: HOTSPOT_COUNT,
        }
    }
}

impl SceneConfig {
    pub fn with_tank(mut self, tank: TankSettings) -> Self {
        self.tank = tank;
        self
    }

    pub fn with_net_shape(mut self, net_shape: NetShape) -> Self {
        self.net_shape = net_shape;
        self
    }

    pub fn with_building(mut self, building: impl Into<String>, floor: usize) -> Self {
        self.building = building.into();
        self.floor = floor;
        self
    }

    pub fn with_sonar(mut self, sonar: bool) -> Self {
        self.sonar = sonar;
        self
    }

    /// The snapshot that results from applying `change`.
    pub fn with_change(&self, change: &SceneChange) -> Self {
        let mut next = self.clone();
        match change {
            SceneChange::ParticleScale(scale) => next.tank.particle_scale = *scale,
            SceneChange::BuildingParticleScale(scale) => next.building_particles.scale = *scale,
            SceneChange::ActiveBuilding(id) => next.building = id.clone(),
            SceneChange::ActiveFloor(floor) => next.floor = *floor,
            SceneChange::NetShape(shape) => next.net_shape = *shape,
            SceneChange::Sonar(on) => next.sonar = *on,
        }
        next
    }

    /// Validates the settings and checks the active building and floor exist in `table`.
    pub fn validate(&self, table: &BuildingTable) -> Result<()> {
        self.tank.validate()?;
        self.wall.validate()?;
        self.building_particles.validate()?;
        let outline = table.get(&self.building)?;
        if self.floor >= outline.len() {
            return Err(Error::FloorOutOfRange {
                floor: self.floor,
                floors: outline.len(),
            });
        }
        Ok(())
    }
}

/// A user-facing setting change that triggers regeneration.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneChange {
    /// Tank particle scale.
    ParticleScale(f32),
    BuildingParticleScale(f32),
    ActiveBuilding(String),
    ActiveFloor(usize),
    NetShape(NetShape),
    Sonar(bool),
}

impl SceneChange {
    /// Whether the tank particle set changes, so its hotspots must be picked again.
    pub fn reseeds_tank_hotspots(&self) -> bool {
        matches!(
            self,
            SceneChange::ParticleScale(_) | SceneChange::NetShape(_)
        )
    }

    /// Whether building hotspots must be placed again.
    pub fn reseeds_building_hotspots(&self) -> bool {
        matches!(self, SceneChange::ActiveBuilding(_))
    }
}

/// Tank hotspots carried into a pass, with the particle count they were picked from.
#[derive(Clone, Debug, PartialEq)]
pub struct KeptTankHotspots {
    pub hotspots: Vec<TankHotspot>,
    pub particle_count: usize,
}

impl KeptTankHotspots {
    pub fn new(hotspots: Vec<TankHotspot>, particle_count: usize) -> Self {
        Self {
            hotspots,
            particle_count,
        }
    }

    /// Whether the set still fits `tank`: non-empty and picked from the same particle count.
    pub fn fits(&self, tank: &TankParticles) -> bool {
        !self.hotspots.is_empty() && self.particle_count == tank.len()
    }
}

/// Everything one pass produces.
#[derive(Clone, Debug, Default)]
pub struct SceneOutput {
    pub tank: TankParticles,
    pub tank_hotspots: Vec<TankHotspot>,
    /// Walls of the active building.
    pub rooms: RoomLayout,
    /// Particles of the active floor.
    pub building_particles: BuildingParticles,
    /// Hotspots of every building, relative to their floors.
    pub building_hotspots: BuildingHotspots,
    /// Widest floor of the active building, for proximity coloring.
    pub max_floor_distance: f32,
}

/// Runs regeneration passes for one validated snapshot.
pub struct SceneGenerator<'a> {
    config: SceneConfig,
    table: &'a BuildingTable,
    outline: &'a Outline,
    sonar: Option<&'a SonarGrid>,
}

impl<'a> SceneGenerator<'a> {
    /// Validates `config` against `table`. Sonar coloring needs a grid.
    pub fn try_new(
        config: SceneConfig,
        table: &'a BuildingTable,
        sonar: Option<&'a SonarGrid>,
    ) -> Result<Self> {
        config.validate(table)?;
        if config.sonar && sonar.is_none() {
            return Err(Error::InvalidConfig(
                "sonar coloring requested without a sonar grid".into(),
            ));
        }
        let outline = table.get(&config.building)?;
        Ok(Self {
            config,
            table,
            outline,
            sonar,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Runs a full pass with fresh hotspots.
    pub fn generate(&self, rng: &mut dyn RngCore, sink: &mut dyn EventSink) -> SceneOutput {
        self.generate_keeping(None, None, rng, sink)
    }

    /// Runs a full pass, reusing the given hotspot sets instead of placing new ones.
    ///
    /// Kept tank hotspots are picked again when the tank particle count no longer matches.
    pub fn generate_keeping(
        &self,
        tank_hotspots: Option<KeptTankHotspots>,
        building_hotspots: Option<BuildingHotspots>,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> SceneOutput {
        let cfg = &self.config;
        if sink.wants(GenerationEventKind::RegenerationStarted) {
            sink.send(GenerationEvent::RegenerationStarted {
                building: cfg.building.clone(),
                floor: cfg.floor,
                shape: cfg.net_shape,
            });
        }

        let tank = self.generate_tank(sink);
        let tank_hotspots = match tank_hotspots {
            Some(kept) if kept.fits(&tank) => kept.hotspots,
            _ => pick_tank_hotspots(&tank.particles, cfg.hotspot_count, rng),
        };

        let rooms = resolve_rooms(self.outline, &cfg.wall);
        if sink.wants(GenerationEventKind::RoomsResolved) {
            sink.send(GenerationEvent::RoomsResolved {
                building: cfg.building.clone(),
                floors: self.outline.len(),
                segment_count: rooms.len(),
            });
        }

        let building_particles = self.fill_floor(sink);
        let building_hotspots = match building_hotspots {
            Some(kept) => kept,
            None => generate_building_hotspots(self.table, &cfg.wall, cfg.hotspot_count, rng),
        };
        if sink.wants(GenerationEventKind::HotspotsPlaced) {
            sink.send(GenerationEvent::HotspotsPlaced {
                tank: tank_hotspots.len(),
                building: building_hotspots.values().map(Vec::len).sum(),
            });
        }

        let output = SceneOutput {
            max_floor_distance: max_floor_distance(self.outline, &cfg.wall),
            tank,
            tank_hotspots,
            rooms,
            building_particles,
            building_hotspots,
        };
        info!(
            "Regenerated scene: {} tank particles, {} wall instances, {} floor particles.",
            output.tank.len(),
            output.rooms.len(),
            output.building_particles.len()
        );
        if sink.wants(GenerationEventKind::RegenerationFinished) {
            sink.send(GenerationEvent::RegenerationFinished {
                tank_particles: output.tank.len(),
                building_particles: output.building_particles.len(),
                wall_segments: output.rooms.len(),
            });
        }
        output
    }

    fn generate_tank(&self, sink: &mut dyn EventSink) -> TankParticles {
        let coloring = match (self.config.sonar, self.sonar) {
            (true, Some(grid)) => TankColoring::Sonar(grid),
            _ => TankColoring::Deferred,
        };
        let distributor = TankDistributor::new(self.config.net_shape, self.config.tank);
        let tank = match distributor.generate(coloring) {
            Ok(tank) => tank,
            Err(e) => {
                warn!("Tank generation failed: {}.", e);
                if sink.wants(GenerationEventKind::Warning) {
                    sink.send(GenerationEvent::warning("tank", e.to_string()));
                }
                TankParticles::default()
            }
        };
        if sink.wants(GenerationEventKind::TankGenerated) {
            sink.send(GenerationEvent::TankGenerated {
                particle_count: tank.len(),
                layers: tank.layers_generated,
                termination: tank.termination,
                sonar: tank.sonar_colors.is_some(),
            });
        }
        tank
    }

    fn fill_floor(&self, sink: &mut dyn EventSink) -> BuildingParticles {
        let cfg = &self.config;
        let particles = FloorParticleDistributor::new(
            self.outline,
            cfg.floor,
            &cfg.wall,
            &cfg.building_particles,
        )
        .map(|d| d.generate());
        let particles = match particles {
            Ok(particles) => particles,
            Err(e) => {
                warn!("Floor {} could not be filled: {}.", cfg.floor, e);
                if sink.wants(GenerationEventKind::Warning) {
                    sink.send(GenerationEvent::warning(
                        format!("building:{}", cfg.building),
                        e.to_string(),
                    ));
                }
                BuildingParticles {
                    floor: cfg.floor,
                    ..Default::default()
                }
            }
        };
        if sink.wants(GenerationEventKind::BuildingParticlesGenerated) {
            sink.send(GenerationEvent::BuildingParticlesGenerated {
                floor: particles.floor,
                particle_count: particles.len(),
                termination: particles.termination,
            });
        }
        particles
    }
}

/// Current snapshot and output of the visualization.
pub struct Scene {
    config: SceneConfig,
    table: BuildingTable,
    sonar: Option<SonarGrid>,
    output: SceneOutput,
}

impl Scene {
    /// Validates `config` and runs the first pass.
    pub fn new(
        config: SceneConfig,
        table: BuildingTable,
        sonar: Option<SonarGrid>,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<Self> {
        let output = SceneGenerator::try_new(config.clone(), &table, sonar.as_ref())?
            .generate(rng, sink);
        Ok(Self {
            config,
            table,
            sonar,
            output,
        })
    }

    /// Applies `change` and regenerates from scratch.
    ///
    /// On error the previous snapshot and output stay in place. Switching building clamps
    /// the active floor to the new building's top floor. Hotspots are kept unless the
    /// change invalidates them or the tank particle count changed.
    pub fn apply(
        &mut self,
        change: SceneChange,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        let mut next = self.config.with_change(&change);
        if let SceneChange::ActiveBuilding(id) = &change {
            let floors = self.table.get(id)?.len();
            next.floor = next.floor.min(floors.saturating_sub(1));
        }

        let generator = SceneGenerator::try_new(next, &self.table, self.sonar.as_ref())?;
        let keep_tank = (!change.reseeds_tank_hotspots()).then(|| {
            KeptTankHotspots::new(self.output.tank_hotspots.clone(), self.output.tank.len())
        });
        let keep_building =
            (!change.reseeds_building_hotspots()).then(|| self.output.building_hotspots.clone());
        let output = generator.generate_keeping(keep_tank, keep_building, rng, sink);

        self.config = generator.config;
        self.output = output;
        Ok(())
    }

    /// Advances the tank hotspot random walk by one step.
    pub fn animate_hotspots(&mut self, rng: &mut dyn RngCore) {
        self.output.tank_hotspots =
            animate_tank_hotspots(&self.output.tank_hotspots, &self.config.tank, rng);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn output(&self) -> &SceneOutput {
        &self.output
    }

    pub fn table(&self) -> &BuildingTable {
        &self.table
    }

    /// Hotspots of the active building in world space.
    pub fn resolved_building_hotspots(&self) -> Vec<ResolvedBuildingHotspot> {
        let (Ok(outline), Some(hotspots)) = (
            self.table.get(&self.config.building),
            self.output.building_hotspots.get(&self.config.building),
        ) else {
            return Vec::new();
        };
        resolve_building_hotspots(
            outline,
            hotspots,
            &self.config.wall,
            &self.config.building_particles,
        )
    }

    pub fn tank_position_buffer(&self) -> Vec<f32> {
        self.output.tank.position_buffer()
    }

    pub fn building_position_buffer(&self) -> Vec<f32> {
        self.output.building_particles.position_buffer()
    }

    pub fn wall_instance_data(&self) -> Vec<f32> {
        self.output.rooms.instance_data()
    }

    pub fn tank_hotspot_buffer(&self) -> Vec<f32> {
        tank_hotspot_buffer(&self.output.tank_hotspots)
    }

    pub fn building_hotspot_buffer(&self) -> Vec<f32> {
        building_hotspot_buffer(&self.resolved_building_hotspots())
    }
}
