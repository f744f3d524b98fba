//! Chamfer distance transform over a binary mask.
//!
//! Two raster passes propagate integer step costs (`c1` per axis move,
//! `c2` per diagonal move) from the background inward, giving every
//! foreground pixel an approximation of its distance to the nearest
//! background pixel, scaled by `c1`. With the default `(3, 4)` costs this
//! is the classic 3-4 chamfer metric, a close integer approximation of
//! 3× Euclidean distance.
//!
//! Border rows and columns are forced to 0 so that shapes touching the
//! image edge do not propagate unbounded distances inward.

use crate::binarize::BinaryMask;
use crate::grid::PixelGrid;
use crate::types::{Dimensions, PipelineError};

/// Integer distance-to-background field, scaled by the axis cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    grid: PixelGrid<u32>,
    coeff: u32,
}

impl DistanceField {
    pub(crate) const fn from_grid(grid: PixelGrid<u32>, coeff: u32) -> Self {
        Self { grid, coeff }
    }

    /// Compute the chamfer distance field of `mask`.
    ///
    /// Pixels whose mask value equals `background` keep distance 0, as do
    /// all border pixels. `c1` is the axis step cost, `c2` the diagonal
    /// step cost.
    ///
    /// The forward pass (top-left to bottom-right) relaxes each pixel
    /// against its upper-left, upper, left, and upper-right neighbors;
    /// the backward pass (bottom-right to top-left) relaxes against the
    /// lower-right, lower, lower-left, and right neighbors.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] when `c1` is zero (the
    /// coefficient later divides node weights) or `c2 < c1`.
    pub fn compute(
        mask: &BinaryMask,
        c1: u32,
        c2: u32,
        background: u8,
    ) -> Result<Self, PipelineError> {
        if c1 == 0 {
            return Err(PipelineError::InvalidConfig(
                "chamfer axis cost c1 must be at least 1".to_string(),
            ));
        }
        if c2 < c1 {
            return Err(PipelineError::InvalidConfig(format!(
                "chamfer diagonal cost c2 ({c2}) must be at least c1 ({c1})",
            )));
        }

        let w = mask.width() as usize;
        let h = mask.height() as usize;
        let mut data = vec![0u32; w * h];

        if w >= 3 && h >= 3 {
            let source = mask.data();

            // Forward pass. The first row, first column, and last column
            // stay 0; each interior pixel takes the cheapest extension of
            // the already-visited half of its neighborhood.
            for j in 1..h - 1 {
                for i in 1..w - 1 {
                    let k = j * w + i;
                    if source[k] == background {
                        continue;
                    }
                    let mut dist = data[k - w - 1].saturating_add(c2);
                    dist = dist.min(data[k - w].saturating_add(c1));
                    dist = dist.min(data[k - 1].saturating_add(c1));
                    dist = dist.min(data[k - w + 1].saturating_add(c2));
                    data[k] = dist;
                }
            }

            // Backward pass over the same interior, relaxing against the
            // other half of the neighborhood.
            for j in (1..h - 1).rev() {
                for i in (1..w - 1).rev() {
                    let k = j * w + i;
                    if source[k] == background {
                        continue;
                    }
                    let mut dist = data[k];
                    dist = dist.min(data[k + w + 1].saturating_add(c2));
                    dist = dist.min(data[k + w].saturating_add(c1));
                    dist = dist.min(data[k + w - 1].saturating_add(c2));
                    dist = dist.min(data[k + 1].saturating_add(c1));
                    data[k] = dist;
                }
            }
        }

        let grid = PixelGrid::from_raw(mask.width(), mask.height(), data)
            .unwrap_or_else(|| PixelGrid::new(mask.width(), mask.height()));
        Ok(Self { grid, coeff: c1 })
    }

    /// The axis cost the field is scaled by (`c1`).
    #[must_use]
    pub const fn coeff(&self) -> u32 {
        self.coeff
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Field dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Scaled distance value at `(x, y)`.
    #[must_use]
    pub fn value(&self, x: u32, y: u32) -> u32 {
        *self.grid.get(x, y)
    }

    /// Distance at `(x, y)` in pixel units (`value / coeff`).
    #[must_use]
    pub fn normalized(&self, x: u32, y: u32) -> f64 {
        f64::from(self.value(x, y)) / f64::from(self.coeff)
    }

    /// The underlying row-major buffer of scaled distances.
    #[must_use]
    pub fn data(&self) -> &[u32] {
        self.grid.data()
    }

    /// Largest scaled distance anywhere in the field.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.grid.data().iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::binarize::binarize;

    /// Build a mask from ASCII art rows (`#` = foreground).
    fn mask_from_rows(rows: &[&str]) -> BinaryMask {
        let height = u32::try_from(rows.len()).unwrap();
        let width = u32::try_from(rows[0].len()).unwrap();
        let mut buf = Vec::with_capacity(4 * rows.len() * rows[0].len());
        for row in rows {
            for c in row.chars() {
                if c == '#' {
                    buf.extend_from_slice(&[0, 0, 0, 255]);
                } else {
                    buf.extend_from_slice(&[255, 255, 255, 255]);
                }
            }
        }
        binarize(&buf, width, height).unwrap()
    }

    #[test]
    fn zero_axis_cost_is_rejected() {
        let mask = mask_from_rows(&["...", ".#.", "..."]);
        assert!(matches!(
            DistanceField::compute(&mask, 0, 4, 0),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn diagonal_below_axis_is_rejected() {
        let mask = mask_from_rows(&["...", ".#.", "..."]);
        assert!(matches!(
            DistanceField::compute(&mask, 3, 2, 0),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn background_pixels_stay_zero() {
        let mask = mask_from_rows(&["....", ".##.", ".##.", "...."]);
        let field = DistanceField::compute(&mask, 3, 4, 0).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                if mask.value(x, y) == 0 {
                    assert_eq!(field.value(x, y), 0, "background at ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn border_rows_and_columns_are_zero() {
        // Foreground touching every border: the border must still read 0.
        let mask = mask_from_rows(&["#####", "#####", "#####", "#####", "#####"]);
        let field = DistanceField::compute(&mask, 3, 4, 0).unwrap();
        for i in 0..5 {
            assert_eq!(field.value(i, 0), 0);
            assert_eq!(field.value(i, 4), 0);
            assert_eq!(field.value(0, i), 0);
            assert_eq!(field.value(4, i), 0);
        }
        // Center of a 5x5 block with zeroed borders is two axis steps in.
        assert_eq!(field.value(2, 2), 6);
    }

    #[test]
    fn single_interior_pixel_gets_axis_cost() {
        let mask = mask_from_rows(&["...", ".#.", "..."]);
        let field = DistanceField::compute(&mask, 3, 4, 0).unwrap();
        assert_eq!(field.value(1, 1), 3);
        assert!((field.normalized(1, 1) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn four_neighbor_monotonicity() {
        // |d(p) - d(q)| <= c1 for any 4-connected pair of pixels.
        let mask = mask_from_rows(&[
            "..........",
            ".########.",
            ".########.",
            ".########.",
            ".########.",
            ".########.",
            "..........",
        ]);
        let c1 = 3;
        let field = DistanceField::compute(&mask, c1, 4, 0).unwrap();
        for y in 0..field.height() {
            for x in 0..field.width() {
                let d = i64::from(field.value(x, y));
                if x + 1 < field.width() {
                    let r = i64::from(field.value(x + 1, y));
                    assert!((d - r).abs() <= i64::from(c1), "({x},{y}) vs right");
                }
                if y + 1 < field.height() {
                    let b = i64::from(field.value(x, y + 1));
                    assert!((d - b).abs() <= i64::from(c1), "({x},{y}) vs below");
                }
            }
        }
    }

    #[test]
    fn inverted_background_value() {
        // With background = 1, the roles flip: dots become foreground.
        let mask = mask_from_rows(&["###", "#.#", "###"]);
        let field = DistanceField::compute(&mask, 3, 4, 1).unwrap();
        assert_eq!(field.value(1, 1), 3);
        assert_eq!(field.value(0, 0), 0);
    }

    #[test]
    fn degenerate_sizes_produce_all_zero() {
        let mask = mask_from_rows(&["##"]);
        let field = DistanceField::compute(&mask, 3, 4, 0).unwrap();
        assert_eq!(field.data(), &[0, 0]);
        assert_eq!(field.max_value(), 0);
    }
}
