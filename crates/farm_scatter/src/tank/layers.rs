//! Layer and ring counts for the tank net shapes.
//!
//! Counts are derived from the scaled particle diameter `2 * radius * scale` because the
//! renderer scales each particle about its own center after positioning it.
use std::f32::consts::TAU;

use crate::settings::{NetShape, TankSettings};

/// Vertical span filled by a conical net, in tank units.
pub const CONICAL_SPAN: f32 = 2.0;

/// Radius lost per layer below the decrease layer of a cylindrical net, in scaled radii.
pub const TAPER_PER_LAYER: f32 = 5.5;

/// Number of depth layers for the given net shape.
pub fn layer_count(shape: NetShape, settings: &TankSettings) -> u32 {
    match shape {
        NetShape::Conical => (CONICAL_SPAN / settings.scaled_diameter()).floor().max(0.0) as u32,
        NetShape::Cylindrical => cylindrical_layer_count(settings),
    }
}

/// Layers above the taper plus one layer per tapered step that still has rings.
///
/// The ring budget starts at the full-radius ring count and loses
/// `floor(2 * (1 + scale))` rings per tapered layer.
fn cylindrical_layer_count(s: &TankSettings) -> u32 {
    let cell = s.scaled_diameter();
    let mut layers = ((s.water_height - s.decrease_ring_height) / cell)
        .floor()
        .max(0.0) as u32;
    let taper_layers = (s.decrease_ring_height / cell).floor().max(0.0) as u32;
    let mut ring_budget = (s.max_rho / cell).floor() as i64;
    let step = (2.0 * (1.0 + s.particle_scale)).floor() as i64;
    for _ in 0..taper_layers {
        ring_budget -= step;
        if ring_budget <= 0 {
            break;
        }
        layers += 1;
    }
    layers
}

/// First layer at which a cylindrical net starts to taper.
pub fn decrease_layer(settings: &TankSettings) -> u32 {
    (settings.decrease_ring_height / settings.scaled_diameter())
        .round()
        .max(0.0) as u32
}

/// Number of rings in `layer` (1-indexed). Zero or negative means the net is exhausted.
pub fn ring_count(shape: NetShape, layer: u32, settings: &TankSettings) -> i32 {
    let cell = settings.scaled_diameter();
    let scaled_radius = settings.particle_radius * settings.particle_scale;
    let reach = match shape {
        NetShape::Conical => settings.max_rho - layer as f32 * scaled_radius,
        NetShape::Cylindrical => {
            let dec = decrease_layer(settings);
            if layer > dec {
                settings.max_rho - (layer - dec) as f32 * TAPER_PER_LAYER * scaled_radius
            } else {
                settings.max_rho
            }
        }
    };
    (reach / cell).floor() as i32
}

/// Particles that fit around a ring of radius `rho` at one particle diameter spacing.
pub fn ring_particle_count(rho: f32, particle_radius: f32) -> u32 {
    (TAU * rho / (2.0 * particle_radius)).round().max(0.0) as u32
}
