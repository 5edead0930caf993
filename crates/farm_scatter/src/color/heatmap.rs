//! Three-band heat-map ramp used for heat layers and proximity coloring.
use crate::color::Rgb;

const BLUE_FLOOR: f32 = 150.0;
const GREEN_FLOOR: f32 = 100.0;

/// Maps `value` in `[min, max]` onto the blue/green/red ramp, clamped to `[0, 1]` per channel.
///
/// The red channel of the raw ramp is `255 - g - b` and leaves `[0, 255]` near both ends
/// of the range; this variant clamps it. Use [`heat_map_color_raw`] for the unclamped values.
pub fn heat_map_color(min: f32, max: f32, value: f32) -> Rgb {
    let [r, g, b] = channels(min, max, value);
    [
        r.clamp(0.0, 255.0) / 255.0,
        g.clamp(0.0, 255.0) / 255.0,
        b.clamp(0.0, 255.0) / 255.0,
    ]
}

/// Unclamped ramp. The red channel goes negative at the ends of the range.
pub fn heat_map_color_raw(min: f32, max: f32, value: f32) -> Rgb {
    let [r, g, b] = channels(min, max, value);
    [r / 255.0, g / 255.0, b / 255.0]
}

fn channels(min: f32, max: f32, value: f32) -> [f32; 3] {
    let span = max - min;
    // An empty range collapses to the low end.
    let ratio = if span > 0.0 {
        2.0 * (value - min) / span
    } else {
        0.0
    };
    let b = (255.0 * (ratio - 1.0)).max(BLUE_FLOOR).trunc();
    let g = (255.0 * (1.0 - ratio)).max(GREEN_FLOOR).trunc();
    let r = 255.0 - g - b;
    [r, g, b]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Rgb, b: Rgb) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-6)
    }

    #[test]
    fn low_end_is_green_with_blue_floor() {
        let c = heat_map_color(0.0, 60.0, 0.0);
        assert!(approx(c, [0.0, 1.0, 150.0 / 255.0]));
    }

    #[test]
    fn high_end_is_blue_with_green_floor() {
        let c = heat_map_color(0.0, 60.0, 60.0);
        assert!(approx(c, [0.0, 100.0 / 255.0, 1.0]));
    }

    #[test]
    fn raw_variant_keeps_negative_red() {
        let c = heat_map_color_raw(0.0, 60.0, 0.0);
        assert!((c[0] + 150.0 / 255.0).abs() < 1e-6);
        let c = heat_map_color_raw(0.0, 60.0, 60.0);
        assert!((c[0] + 100.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn ramp_is_monotonic_across_domain() {
        let mut prev = heat_map_color(0.0, 60.0, 0.0);
        for i in 1..=60 {
            let c = heat_map_color(0.0, 60.0, i as f32);
            assert!(c[2] >= prev[2], "blue decreased at {i}");
            assert!(c[1] <= prev[1], "green increased at {i}");
            assert!(c.iter().all(|ch| (0.0..=1.0).contains(ch)));
            prev = c;
        }
    }

    #[test]
    fn empty_range_maps_to_low_end() {
        let c = heat_map_color(5.0, 5.0, 5.0);
        assert!(approx(c, heat_map_color(0.0, 1.0, 0.0)));
    }
}
