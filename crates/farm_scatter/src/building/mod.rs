//! Building rooms and floor particles.
//!
//! - `outline`: declarative per-floor wall and window layout
//! - `footprint`: floor sizes and the floating-floor shift
//! - `resolver`: positioned wall, slab and window instances
//! - `particles`: particle grid filling one floor
//! - `presets` / `table`: stock buildings and the id lookup
pub mod footprint;
pub mod outline;
pub mod particles;
pub mod presets;
pub mod resolver;
pub mod table;

pub use footprint::{float_shift, floor_shift, max_floor_distance, Footprint};
pub use outline::{FloorOutline, Outline, WallSegmentSpec, WallSide, WindowSize, XFloat, ZFloat};
pub use particles::{
    floor_origin, floor_size, BuildingParticles, FloorGrid, FloorParticleDistributor, FloorSize,
};
pub use resolver::{resolve_rooms, ResolvedWallSegment, RoomLayout, SegmentKind, WindowPart};
pub use table::BuildingTable;
