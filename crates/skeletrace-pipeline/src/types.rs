//! Shared types for the skeletrace extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::binarize::BinaryMask;
use crate::distance::DistanceField;
use crate::graph::SkeletonGraph;
use crate::thin::SkeletonMask;

/// Re-export `RgbaImage` so downstream crates can reference decoded
/// images without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point in image coordinates.
///
/// Skeleton node positions sit at pixel centers, i.e. `(x + 0.5, y + 0.5)`
/// for the pixel at integer coordinates `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for the skeleton extraction pipeline.
///
/// All defaults match the reference parameterization: chamfer costs
/// `(3, 4)` (a 3-scaled Euclidean approximation), up to 2000 thinning
/// rounds, tips pruned below 0.8× the peak distance, branches collapsed
/// while the deviation stays under π/13 and adjacent weights stay within
/// a 1.25 ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonConfig {
    /// Chamfer cost of an axis-aligned step (`c1`). The distance field is
    /// scaled by this coefficient; dividing by it recovers pixel units.
    pub axis_cost: u32,

    /// Chamfer cost of a diagonal step (`c2`). Must be at least
    /// `axis_cost` for the field to be a sane metric approximation.
    pub diagonal_cost: u32,

    /// Upper bound on thinning rounds; thinning converges earlier when a
    /// round removes no pixel.
    pub max_iterations: usize,

    /// Fraction of the peak distance-field value below which a
    /// single-neighbor pixel counts as a thin protrusion and is eroded.
    ///
    /// Empirically tuned; see [`Self::DEFAULT_TIP_PRUNE_FACTOR`].
    pub tip_prune_factor: f64,

    /// Maximum angular deviation (radians) between a branch's running
    /// direction and the root-to-current vector before collapsing stops.
    ///
    /// Empirically tuned; π/13 is the largest angle accepting a run of
    /// four pixels laid out as three straight plus one offset.
    pub branch_angle: f64,

    /// Maximum ratio between the larger and smaller of two node weights
    /// along a collapsing branch, in `[1.0, +inf)`. Values below 1.0 are
    /// rejected by validation since the compared ratio is always ≥ 1.
    pub weight_ratio: f64,
}

impl SkeletonConfig {
    /// Default axis step cost (`c1`).
    pub const DEFAULT_AXIS_COST: u32 = 3;
    /// Default diagonal step cost (`c2`).
    pub const DEFAULT_DIAGONAL_COST: u32 = 4;
    /// Default bound on thinning rounds.
    pub const DEFAULT_MAX_ITERATIONS: usize = 2000;
    /// Default tip-prune fraction of the peak distance value.
    pub const DEFAULT_TIP_PRUNE_FACTOR: f64 = 0.8;
    /// Default branch-collapse angle threshold (radians).
    pub const DEFAULT_BRANCH_ANGLE: f64 = std::f64::consts::PI / 13.0;
    /// Default branch-collapse weight-ratio threshold.
    pub const DEFAULT_WEIGHT_RATIO: f64 = 1.25;

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] when `axis_cost` is zero,
    /// `diagonal_cost < axis_cost`, or `weight_ratio < 1.0`. The weight
    /// ratio check runs before any graph work begins: the compared ratio
    /// is always ≥ 1 by construction, so a smaller threshold would reject
    /// every edge.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.axis_cost == 0 {
            return Err(PipelineError::InvalidConfig(
                "axis_cost must be at least 1".to_string(),
            ));
        }
        if self.diagonal_cost < self.axis_cost {
            return Err(PipelineError::InvalidConfig(format!(
                "diagonal_cost ({}) must be at least axis_cost ({})",
                self.diagonal_cost, self.axis_cost,
            )));
        }
        if self.weight_ratio < 1.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "weight_ratio ({}) must be at least 1.0",
                self.weight_ratio,
            )));
        }
        Ok(())
    }
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            axis_cost: Self::DEFAULT_AXIS_COST,
            diagonal_cost: Self::DEFAULT_DIAGONAL_COST,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tip_prune_factor: Self::DEFAULT_TIP_PRUNE_FACTOR,
            branch_angle: Self::DEFAULT_BRANCH_ANGLE,
            weight_ratio: Self::DEFAULT_WEIGHT_RATIO,
        }
    }
}

/// Result of running the full extraction pipeline.
#[derive(Debug, Clone)]
pub struct SkeletonResult {
    /// The simplified skeleton graph.
    pub graph: SkeletonGraph,
    /// Dimensions of the source image in pixels.
    pub dimensions: Dimensions,
}

/// Result of running the pipeline with all intermediate stage outputs
/// preserved.
///
/// Each field captures the output of one pipeline stage. Callers that hit
/// a downstream failure can still inspect every stage that completed, and
/// interactive frontends can render per-stage previews from these buffers.
#[derive(Debug, Clone)]
pub struct StagedResult {
    /// Stage 1: binarized foreground mask.
    pub binary: BinaryMask,
    /// Stage 2: chamfer distance field.
    pub distance: DistanceField,
    /// Stage 3: thinned one-pixel-wide skeleton mask.
    pub skeleton: SkeletonMask,
    /// Stage 4: simplified skeleton graph.
    pub graph: SkeletonGraph,
    /// Source image dimensions in pixels.
    pub dimensions: Dimensions,
}

/// Errors that can occur during pipeline processing.
///
/// All variants are local precondition failures detected at stage entry.
/// None are transient: the pipeline is deterministic, so nothing is
/// retried and any failure aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image bytes.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The RGBA buffer length does not match the stated dimensions.
    #[error("RGBA buffer holds {actual} bytes but {expected} (4 * width * height) were expected")]
    BufferLength {
        /// `4 * width * height`.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// Two stage inputs disagree on image dimensions.
    #[error("dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        /// Width of the first input.
        left_width: u32,
        /// Height of the first input.
        left_height: u32,
        /// Width of the second input.
        right_width: u32,
        /// Height of the second input.
        right_height: u32,
    },

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Build a [`PipelineError::DimensionMismatch`] from two dimension pairs.
    pub(crate) const fn dimension_mismatch(left: Dimensions, right: Dimensions) -> Self {
        Self::DimensionMismatch {
            left_width: left.width,
            left_height: left.height,
            right_width: right.width,
            right_height: right.height,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance_to_self_is_zero() {
        let p = Point::new(7.0, 11.0);
        assert!(p.distance(p).abs() < f64::EPSILON);
    }

    #[test]
    fn config_defaults_match_reference() {
        let config = SkeletonConfig::default();
        assert_eq!(config.axis_cost, 3);
        assert_eq!(config.diagonal_cost, 4);
        assert_eq!(config.max_iterations, 2000);
        assert!((config.tip_prune_factor - 0.8).abs() < f64::EPSILON);
        assert!((config.branch_angle - std::f64::consts::PI / 13.0).abs() < f64::EPSILON);
        assert!((config.weight_ratio - 1.25).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_weight_ratio_below_one() {
        let config = SkeletonConfig {
            weight_ratio: 0.9,
            ..SkeletonConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_rejects_zero_axis_cost() {
        let config = SkeletonConfig {
            axis_cost: 0,
            ..SkeletonConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_rejects_diagonal_below_axis() {
        let config = SkeletonConfig {
            axis_cost: 3,
            diagonal_cost: 2,
            ..SkeletonConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_serde_round_trip() {
        let config = SkeletonConfig {
            axis_cost: 5,
            diagonal_cost: 7,
            max_iterations: 100,
            tip_prune_factor: 0.5,
            branch_angle: 0.3,
            weight_ratio: 2.0,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SkeletonConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn error_display_messages() {
        assert_eq!(
            PipelineError::EmptyInput.to_string(),
            "input image data is empty"
        );
        assert_eq!(
            PipelineError::BufferLength {
                expected: 16,
                actual: 12
            }
            .to_string(),
            "RGBA buffer holds 12 bytes but 16 (4 * width * height) were expected",
        );
        assert_eq!(
            PipelineError::InvalidConfig("bad".to_string()).to_string(),
            "invalid pipeline configuration: bad",
        );
    }
}
