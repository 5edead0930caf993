//! Stock building outlines.
use crate::building::outline::{FloorOutline, Outline, WallSegmentSpec, WallSide, XFloat, ZFloat};
use crate::error::Result;

const W: WallSegmentSpec = WallSegmentSpec::Wall;

const fn win(width: f32, height: f32) -> WallSegmentSpec {
    WallSegmentSpec::window(width, height)
}

/// Two floors, six parts wide and four deep.
pub fn default_building() -> Outline {
    let ground = FloorOutline {
        facing: vec![W, win(0.9, 0.1), W, W, W, W],
        back: vec![W; 6],
        left: vec![W; 4],
        right: vec![W, win(0.1, 0.5), W, W],
        ..Default::default()
    };
    let first = FloorOutline {
        facing: vec![W, W, W, win(0.3, 0.2), W, W],
        back: vec![W, win(0.3, 0.2), W, W, W, W],
        left: vec![W; 4],
        right: vec![W, win(0.3, 0.2), W, W],
        ..Default::default()
    };
    Outline {
        floors: vec![ground, first],
    }
}

/// Three floors; the top floor is narrower and floats left and to the front.
pub fn experimental_building() -> Outline {
    let s = win(0.3, 0.2);
    let ground = FloorOutline {
        facing: vec![W, s, W, W, W, W, s, W],
        back: vec![W, s, W, W, W, s, W, W],
        left: vec![W, W, s, W, W],
        right: vec![W, s, W, W, W],
        ..Default::default()
    };
    let first = FloorOutline {
        facing: vec![W, W, W, s, s, W, W, W],
        back: vec![W, s, W, s, W, W, W, W],
        left: vec![W, W, s, W, W],
        right: vec![W, s, W, W, W],
        ..Default::default()
    };
    let top = FloorOutline {
        x_float: XFloat::Left,
        z_float: ZFloat::Front,
        facing: vec![W, W, W, W, win(0.4, 0.2), win(0.2, 0.5), W],
        back: vec![W, s, W, s, s, W, W],
        left: vec![W, W, s, W],
        right: vec![W, win(0.9, 0.1), win(0.5, 0.3), W],
        ..Default::default()
    };
    Outline {
        floors: vec![ground, first, top],
    }
}

/// A tower of identical floors with windows on every second part.
///
/// Even `width` and `depth` are bumped to the next odd number so each side starts and ends
/// with a plain wall. The ground floor gets a low, wide entrance in the middle of the facing
/// side.
pub fn skyscraper(floors: usize, width: usize, depth: usize) -> Result<Outline> {
    let width = if width % 2 == 0 { width + 1 } else { width };
    let depth = if depth % 2 == 0 { depth + 1 } else { depth };
    let window = win(0.3, 0.2);
    let entrance = width / 2;

    let floors = (0..floors)
        .map(|floor| {
            let mut outline = FloorOutline::plain(width, depth);
            // Positions are 1-based in the pattern: even positions hold windows.
            for i in (1..width).step_by(2) {
                outline = outline
                    .with_segment(WallSide::Facing, i, window)
                    .with_segment(WallSide::Back, i, window);
            }
            for i in (1..depth).step_by(2) {
                outline = outline
                    .with_segment(WallSide::Left, i, window)
                    .with_segment(WallSide::Right, i, window);
            }
            if floor == 0 {
                outline = outline
                    .with_segment(WallSide::Facing, entrance, win(0.8, 0.04))
                    .with_segment(WallSide::Back, entrance, W);
            }
            outline
        })
        .collect();
    Outline::new(floors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        default_building().validate().unwrap();
        experimental_building().validate().unwrap();
        skyscraper(10, 15, 9).unwrap();
    }

    #[test]
    fn default_building_has_two_six_by_four_floors() {
        let b = default_building();
        assert_eq!(b.len(), 2);
        for f in b.floors() {
            assert_eq!((f.footprint().width, f.footprint().depth), (6, 4));
        }
        assert_eq!(b.floors()[0].window_count(), 2);
    }

    #[test]
    fn experimental_top_floor_floats() {
        let b = experimental_building();
        let top = &b.floors()[2];
        assert_eq!(top.x_float, XFloat::Left);
        assert_eq!(top.z_float, ZFloat::Front);
        assert_eq!((top.footprint().width, top.footprint().depth), (7, 4));
    }

    #[test]
    fn skyscraper_bumps_even_sizes() {
        let b = skyscraper(2, 4, 6).unwrap();
        let f = &b.floors()[1];
        assert_eq!((f.footprint().width, f.footprint().depth), (5, 7));
        assert_eq!(f.facing[0], W);
        assert!(f.facing[1].is_window());
        assert_eq!(f.facing[4], W);
    }

    #[test]
    fn skyscraper_entrance_on_ground_floor_only() {
        let b = skyscraper(3, 15, 9).unwrap();
        assert_eq!(b.floors()[0].facing[7], win(0.8, 0.04));
        assert_eq!(b.floors()[0].back[7], W);
        assert!(b.floors()[1].facing[7].is_window());
        assert_eq!(b.floors()[1].back[7], b.floors()[1].facing[7]);
    }
}
