//! Pipeline diagnostics: timing and counts for each stage.
//!
//! These diagnostics are permanent instrumentation intended for
//! algorithm tuning and parameter experimentation. Every call to
//! [`skeletonize_staged`](crate::skeletonize_staged) collects them
//! alongside the stage results.
//!
//! Duration measurements use [`std::time::Duration`] (platform-agnostic).
//! Timestamps are captured internally via the `web-time` crate, which
//! uses `performance.now()` on WASM and `std::time::Instant` on native.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDiagnostics {
    /// Stage 0: image decoding (absent when the caller provided an
    /// already-decoded buffer).
    pub decode: Option<StageDiagnostics>,
    /// Stage 1: binarization.
    pub binarize: StageDiagnostics,
    /// Stage 2: chamfer distance transform.
    pub distance: StageDiagnostics,
    /// Stage 3: topological thinning.
    pub thinning: StageDiagnostics,
    /// Stage 4: graph construction and simplification.
    pub graph: StageDiagnostics,
    /// Total wall-clock duration of the entire pipeline (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across all stages.
    pub summary: PipelineSummary,
}

/// Diagnostics for a single pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics (counts, sizes, etc.).
    pub metrics: StageMetrics,
}

/// Stage-specific metrics that vary by pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Image decoding metrics.
    Decode {
        /// Size of the input image bytes.
        input_bytes: usize,
        /// Decoded image width in pixels.
        width: u32,
        /// Decoded image height in pixels.
        height: u32,
    },
    /// Binarization metrics.
    Binarize {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Number of foreground pixels in the mask.
        foreground_count: usize,
    },
    /// Chamfer distance transform metrics.
    Distance {
        /// Axis step cost (`c1`).
        axis_cost: u32,
        /// Diagonal step cost (`c2`).
        diagonal_cost: u32,
        /// Largest scaled distance value in the field.
        max_value: u32,
    },
    /// Topological thinning metrics.
    Thinning {
        /// Number of erosion rounds until convergence (or the cap).
        rounds: usize,
        /// Foreground pixels before thinning.
        pixels_before: usize,
        /// Skeleton pixels after thinning.
        pixels_after: usize,
    },
    /// Graph construction metrics.
    GraphBuild {
        /// Connected components (one root each).
        root_count: usize,
        /// Nodes surviving simplification.
        node_count: usize,
        /// Edges surviving simplification.
        edge_count: usize,
    },
}

/// High-level summary counts for the entire pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
    /// Foreground pixels in the binarized mask.
    pub foreground_count: usize,
    /// Nodes in the final graph.
    pub node_count: usize,
    /// Edges in the final graph.
    pub edge_count: usize,
}

impl PipelineDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Skeleton Pipeline Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Image: {}x{} ({} foreground pixels)",
            self.summary.image_width, self.summary.image_height, self.summary.foreground_count,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<16} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(72));

        let total_ms = duration_ms(self.total_duration);

        let stages: Vec<(&str, &StageDiagnostics)> = {
            let mut s = Vec::new();
            if let Some(ref decode) = self.decode {
                s.push(("Decode", decode));
            }
            s.push(("Binarize", &self.binarize));
            s.push(("Distance", &self.distance));
            s.push(("Thinning", &self.thinning));
            s.push(("Graph", &self.graph));
            s
        };

        for (name, diag) in &stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<16} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "Nodes: {}  |  Edges: {}",
            self.summary.node_count, self.summary.edge_count,
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Decode {
            input_bytes,
            width,
            height,
        } => format!("{input_bytes} bytes -> {width}x{height}"),
        StageMetrics::Binarize {
            width,
            height,
            foreground_count,
        } => {
            #[allow(clippy::cast_precision_loss)]
            let density = if *width > 0 && *height > 0 {
                *foreground_count as f64 / (f64::from(*width) * f64::from(*height)) * 100.0
            } else {
                0.0
            };
            format!("{width}x{height}, {foreground_count} foreground ({density:.1}%)")
        }
        StageMetrics::Distance {
            axis_cost,
            diagonal_cost,
            max_value,
        } => format!("costs=({axis_cost},{diagonal_cost}) max={max_value}"),
        StageMetrics::Thinning {
            rounds,
            pixels_before,
            pixels_after,
        } => format!("{rounds} rounds, {pixels_before} -> {pixels_after} px"),
        StageMetrics::GraphBuild {
            root_count,
            node_count,
            edge_count,
        } => format!("{root_count} components, {node_count} nodes, {edge_count} edges"),
    }
}
