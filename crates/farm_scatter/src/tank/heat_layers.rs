//! Stacked heat-map shells for the tank heat-map view.
//!
//! A run of full-width layers is followed by layers whose radius shrinks linearly, tracing
//! the tapered bottom of the net. Each layer is colored by its index on the heat-map ramp.
use std::f32::consts::FRAC_PI_4;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{heat_map_color, Rgb};

/// Placement of one heat-map shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatLayer {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub color: Rgb,
    /// Full-width layers are drawn textured, shrinking ones as plain geometry.
    pub textured: bool,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatLayerSettings {
    /// Layers drawn at full radius.
    pub full_layers: usize,
    /// Layers below those, shrinking towards the bottom.
    pub shrinking_layers: usize,
    /// Vertical spacing between layers, before `vertical_scale`.
    pub spacing: f32,
    /// Vertical scale of each shell mesh.
    pub vertical_scale: f32,
    /// Horizontal scale of a full-width shell.
    pub base_radius: f32,
}

impl Default for HeatLayerSettings {
    fn default() -> Self {
        Self {
            full_layers: 40,
            shrinking_layers: 20,
            spacing: 0.06,
            vertical_scale: 0.23,
            base_radius: 1.03,
        }
    }
}

impl HeatLayerSettings {
    pub fn total_layers(&self) -> usize {
        self.full_layers + self.shrinking_layers
    }
}

/// Builds the heat-map shells from the surface down.
pub fn heat_layers(settings: &HeatLayerSettings) -> Vec<HeatLayer> {
    let total = settings.total_layers();
    let color_max = total as f32;
    let rotation = Vec3::new(0.0, -FRAC_PI_4, 0.0);
    let step = settings.spacing * settings.vertical_scale;

    (0..total)
        .map(|i| {
            let shrink_idx = i.checked_sub(settings.full_layers);
            let radius = match shrink_idx {
                None => settings.base_radius,
                Some(j) => settings.base_radius - j as f32 / settings.shrinking_layers as f32,
            };
            HeatLayer {
                position: Vec3::new(0.0, -(i as f32) * step, 0.0),
                rotation,
                scale: Vec3::new(radius, settings.vertical_scale, radius),
                color: heat_map_color(0.0, color_max, i as f32),
                textured: shrink_idx.is_none(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stack_has_sixty_layers() {
        let layers = heat_layers(&HeatLayerSettings::default());
        assert_eq!(layers.len(), 60);
        assert_eq!(layers.iter().filter(|l| l.textured).count(), 40);
    }

    #[test]
    fn layers_descend_evenly() {
        let layers = heat_layers(&HeatLayerSettings::default());
        assert_eq!(layers[0].position, Vec3::ZERO);
        let step = 0.06 * 0.23;
        assert!((layers[10].position.y + 10.0 * step).abs() < 1e-5);
        assert!((layers[59].position.y + 59.0 * step).abs() < 1e-5);
    }

    #[test]
    fn shrinking_layers_lose_radius_linearly() {
        let layers = heat_layers(&HeatLayerSettings::default());
        assert_eq!(layers[39].scale.x, 1.03);
        assert_eq!(layers[40].scale.x, 1.03);
        assert!((layers[41].scale.x - 0.98).abs() < 1e-6);
        assert!((layers[59].scale.z - (1.03 - 19.0 / 20.0)).abs() < 1e-6);
    }

    #[test]
    fn colors_follow_heat_map_over_layer_index() {
        let layers = heat_layers(&HeatLayerSettings::default());
        assert_eq!(layers[0].color, heat_map_color(0.0, 60.0, 0.0));
        assert_eq!(layers[45].color, heat_map_color(0.0, 60.0, 45.0));
    }

    #[test]
    fn empty_settings_give_no_layers() {
        let settings = HeatLayerSettings {
            full_layers: 0,
            shrinking_layers: 0,
            ..Default::default()
        };
        assert!(heat_layers(&settings).is_empty());
    }
}
