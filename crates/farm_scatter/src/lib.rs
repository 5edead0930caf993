#![forbid(unsafe_code)]
//! farm_scatter: Particle layouts and room geometry for fish-farm tank and building views.
//!
//! Modules:
//! - tank: polar ring packing for conical and cylindrical nets, sonar coloring, heat layers
//! - building: floor outlines, wall/window resolution, floor particle grids, building table
//! - hotspot: tank and building hotspots, random-walk animation, proximity queries
//! - scene: whole-scene regeneration from a settings snapshot, with events
//! - coords, color, buffers: shared math, heat-map ramp and flat render buffers
//!
//! For examples and docs, see README and docs.rs.
pub mod buffers;
pub mod building;
pub mod color;
pub mod coords;
pub mod distribution;
pub mod error;
pub mod events;
pub mod hotspot;
pub mod scene;
pub mod settings;
pub mod tank;

/// Convenient re-exports for common types. Import with `use farm_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::building::{
        resolve_rooms, BuildingParticles, BuildingTable, FloorOutline, FloorParticleDistributor,
        Outline, RoomLayout, SegmentKind, WallSegmentSpec, WallSide, WindowSize, XFloat, ZFloat,
    };
    pub use crate::color::{heat_map_color, Rgb, SonarGrid};
    pub use crate::coords::{cartesian_to_polar, polar_to_cartesian, Polar};
    pub use crate::distribution::{Degenerate, ParticleDistribution, Termination};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, GenerationEvent, GenerationEventKind, VecSink};
    pub use crate::hotspot::{
        animate_tank_hotspots, isolate_building_particles, isolate_tank_particles,
        nearest_hotspot_distance, pick_tank_hotspots, BuildingHotspot, TankHotspot,
        HOTSPOT_COUNT,
    };
    pub use crate::scene::{
        KeptTankHotspots, Scene, SceneChange, SceneConfig, SceneGenerator, SceneOutput,
    };
    pub use crate::settings::{BuildingParticleSettings, NetShape, TankSettings, WallSettings};
    pub use crate::tank::{heat_layers, TankColoring, TankDistributor, TankParticles};
}
