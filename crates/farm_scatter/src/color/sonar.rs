//! Static sonar image used to color tank particles.
//!
//! The grid covers the square `[-max_rho, max_rho]` on the horizontal plane: columns run
//! along X, rows along Z. A particle takes the color of the cell nearest to its projected
//! position.
use crate::color::Rgb;
use crate::coords::Polar;
use crate::error::{Error, Result};

/// A 2D grid of RGB samples stored row-major and indexed `[row][col]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SonarGrid {
    width: usize,
    height: usize,
    samples: Vec<Rgb>,
}

impl SonarGrid {
    /// Creates a grid from row-major samples. Fails if `samples.len() != width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<Rgb>) -> Result<Self> {
        if samples.len() != width * height {
            return Err(Error::InvalidInput(format!(
                "sonar grid expects {} samples for {width}x{height}, got {}",
                width * height,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Builds a grid from nested rows of channel vectors such as decoded RGBA image rows.
    ///
    /// Every pixel needs at least three channels; extra channels (alpha) are dropped.
    /// Rows must all have the same length.
    pub fn from_rows<R, P>(rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = Vec<P>>,
        P: AsRef<[f32]>,
    {
        let mut samples = Vec::new();
        let mut width = None;
        let mut height = 0;
        for (row_idx, row) in rows.into_iter().enumerate() {
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(Error::InvalidInput(format!(
                        "sonar row {row_idx} has {} pixels, expected {w}",
                        row.len()
                    )));
                }
                Some(_) => {}
            }
            for (col, pixel) in row.iter().enumerate() {
                let ch = pixel.as_ref();
                if ch.len() < 3 {
                    return Err(Error::InvalidInput(format!(
                        "sonar pixel ({row_idx}, {col}) has {} channels",
                        ch.len()
                    )));
                }
                samples.push([ch[0], ch[1], ch[2]]);
            }
            height += 1;
        }
        Self::new(width.unwrap_or(0), height, samples)
    }

    /// Parses a `{"samples": [[[r, g, b, a], ...], ...]}` document of image rows.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let doc: SonarDocument = serde_json::from_str(s)?;
        Self::from_rows(doc.samples)
    }

    /// Reads a sonar JSON document from any reader.
    #[cfg(feature = "json")]
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let doc: SonarDocument = serde_json::from_reader(reader)?;
        Self::from_rows(doc.samples)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        if row < self.height && col < self.width {
            Some(self.samples[row * self.width + col])
        } else {
            None
        }
    }

    /// Samples the cell nearest to a tank position.
    ///
    /// The Cartesian X/Z of `position` are normalized with `(c + max_rho) / (2 max_rho)`,
    /// scaled by the grid size and rounded. Positions whose rounded index falls outside the
    /// grid, including the far rim at exactly `max_rho`, fail with [`Error::OutOfBounds`].
    pub fn sample(&self, position: Polar, max_rho: f32) -> Result<Rgb> {
        if max_rho.is_nan() || max_rho <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "max_rho must be > 0, got {max_rho}"
            )));
        }
        let cart = position.to_cartesian();
        if !cart.x.is_finite() || !cart.z.is_finite() {
            return Err(Error::InvalidInput("sonar position is not finite".into()));
        }
        let span = 2.0 * max_rho;
        let col = (((cart.x + max_rho) / span) * self.width as f32).round() as i64;
        let row = (((cart.z + max_rho) / span) * self.height as f32).round() as i64;

        let in_range = |i: i64, n: usize| i >= 0 && (i as u64) < n as u64;
        if !in_range(row, self.height) || !in_range(col, self.width) {
            return Err(Error::OutOfBounds {
                row,
                col,
                rows: self.height,
                cols: self.width,
            });
        }
        Ok(self.samples[row as usize * self.width + col as usize])
    }
}

#[cfg(feature = "json")]
#[derive(serde::Deserialize)]
struct SonarDocument {
    samples: Vec<Vec<Vec<f32>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x4 grid where each cell stores `[row, col, 0]`.
    fn indexed_grid() -> SonarGrid {
        let mut samples = Vec::new();
        for row in 0..4 {
            for col in 0..4 {
                samples.push([row as f32, col as f32, 0.0]);
            }
        }
        SonarGrid::new(4, 4, samples).unwrap()
    }

    #[test]
    fn new_rejects_sample_count_mismatch() {
        assert!(SonarGrid::new(2, 2, vec![[0.0; 3]; 3]).is_err());
    }

    #[test]
    fn from_rows_drops_alpha_and_rejects_ragged_rows() {
        let grid = SonarGrid::from_rows(vec![
            vec![vec![0.1f32, 0.2, 0.3, 1.0], vec![0.4, 0.5, 0.6, 1.0]],
            vec![vec![0.7f32, 0.8, 0.9, 1.0], vec![0.0, 0.0, 0.0, 1.0]],
        ])
        .unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.get(1, 0), Some([0.7, 0.8, 0.9]));

        let ragged = SonarGrid::from_rows(vec![vec![[0.0f32; 3]; 2], vec![[0.0f32; 3]; 1]]);
        assert!(ragged.is_err());
    }

    #[test]
    fn from_rows_rejects_short_pixels() {
        let res = SonarGrid::from_rows(vec![vec![vec![0.1f32, 0.2]]]);
        assert!(matches!(res, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn sample_maps_center_to_middle_cell() {
        let grid = indexed_grid();
        let c = grid.sample(Polar::new(0.0, 0.0, -0.3), 1.0).unwrap();
        assert_eq!(c, [2.0, 2.0, 0.0]);
    }

    #[test]
    fn sample_maps_negative_x_to_first_column() {
        let grid = indexed_grid();
        // x = -0.9 normalizes to 0.05 -> col 0; z = 0 -> row 2
        let c = grid
            .sample(Polar::new(std::f32::consts::PI, 0.9, 0.0), 1.0)
            .unwrap();
        assert_eq!(c, [2.0, 0.0, 0.0]);
    }

    #[test]
    fn sample_at_rim_is_out_of_bounds() {
        let grid = indexed_grid();
        let err = grid.sample(Polar::new(0.0, 1.0, 0.0), 1.0).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { col: 4, .. }));
    }

    #[test]
    fn sample_rejects_non_positive_max_rho() {
        let grid = indexed_grid();
        assert!(grid.sample(Polar::default(), 0.0).is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn from_json_reads_sample_document() {
        let grid = SonarGrid::from_json_str(
            r#"{"samples": [[[0.0, 0.5, 1.0, 1.0], [1.0, 1.0, 1.0, 1.0]]]}"#,
        )
        .unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 1));
        assert_eq!(grid.get(0, 0), Some([0.0, 0.5, 1.0]));
    }
}
