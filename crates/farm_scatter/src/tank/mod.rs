//! Tank particle generation.
//!
//! - [`layers`]: layer and ring counts for each net shape
//! - [`distributor`]: polar ring packing, sonar coloring
//! - [`heat_layers`]: stacked heat-map shells for the heat-map view
pub mod distributor;
pub mod heat_layers;
pub mod layers;

pub use distributor::{TankColoring, TankDistributor, TankParticle, TankParticles};
pub use heat_layers::{heat_layers, HeatLayer, HeatLayerSettings};
