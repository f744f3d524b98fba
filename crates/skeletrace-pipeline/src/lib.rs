//! skeletrace-pipeline: raster skeleton extraction (sans-IO).
//!
//! Converts raster images into simplified skeleton graphs through:
//! binarization -> chamfer distance transform -> topological thinning ->
//! graph construction and simplification.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and decoded buffers and returns structured data. File
//! loading and result serialization live with the callers.

pub mod binarize;
pub mod capsule;
pub mod diagnostics;
pub mod distance;
pub mod graph;
pub mod grid;
pub mod thin;
pub mod types;

pub use binarize::{BinaryMask, INK_THRESHOLD, binarize, binarize_image};
pub use capsule::{capsule_distance, coverage_ratio};
pub use diagnostics::{PipelineDiagnostics, PipelineSummary, StageDiagnostics, StageMetrics};
pub use distance::DistanceField;
pub use graph::{GraphParams, SkeletonGraph, SkeletonNode, build_graph};
pub use thin::{SkeletonMask, ThinParams, thin};
pub use types::{
    Dimensions, PipelineError, Point, RgbaImage, SkeletonConfig, SkeletonResult, StagedResult,
};

use web_time::Instant;

/// Run the full skeleton extraction pipeline on a decoded image.
///
/// # Pipeline steps
///
/// 1. Binarize (near-black test on all three color channels)
/// 2. Chamfer distance transform (3-4 costs by default)
/// 3. Topological thinning (invariant erosion + spur clipping)
/// 4. Graph construction and branch simplification
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] if `config` fails
/// validation. Stage-level dimension checks cannot fail here because
/// every stage consumes the previous stage's output.
pub fn skeletonize(
    image: &RgbaImage,
    config: &SkeletonConfig,
) -> Result<SkeletonResult, PipelineError> {
    let staged = run_stages(image, config)?;
    Ok(SkeletonResult {
        graph: staged.graph,
        dimensions: staged.dimensions,
    })
}

/// Run the full pipeline on encoded image bytes (PNG, JPEG, BMP, WebP).
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty,
/// [`PipelineError::ImageDecode`] if the bytes are not a decodable
/// image, and [`PipelineError::InvalidConfig`] if `config` fails
/// validation.
pub fn skeletonize_bytes(
    image_bytes: &[u8],
    config: &SkeletonConfig,
) -> Result<SkeletonResult, PipelineError> {
    let image = decode(image_bytes)?;
    skeletonize(&image, config)
}

/// Run the pipeline on encoded bytes, keeping every intermediate stage
/// output and collecting per-stage diagnostics.
///
/// # Errors
///
/// Same failure modes as [`skeletonize_bytes`].
pub fn skeletonize_staged(
    image_bytes: &[u8],
    config: &SkeletonConfig,
) -> Result<(StagedResult, PipelineDiagnostics), PipelineError> {
    let total_start = Instant::now();

    let decode_start = Instant::now();
    let image = decode(image_bytes)?;
    let decode_stage = StageDiagnostics {
        duration: decode_start.elapsed(),
        metrics: StageMetrics::Decode {
            input_bytes: image_bytes.len(),
            width: image.width(),
            height: image.height(),
        },
    };

    let (staged, mut diagnostics) = skeletonize_staged_image(&image, config)?;
    diagnostics.decode = Some(decode_stage);
    diagnostics.total_duration = total_start.elapsed();
    Ok((staged, diagnostics))
}

/// Run the pipeline on an already-decoded image, keeping every
/// intermediate stage output and collecting per-stage diagnostics.
///
/// The returned diagnostics carry no decode stage.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] if `config` fails
/// validation.
pub fn skeletonize_staged_image(
    image: &RgbaImage,
    config: &SkeletonConfig,
) -> Result<(StagedResult, PipelineDiagnostics), PipelineError> {
    config.validate()?;
    let total_start = Instant::now();

    // 1. Binarize.
    let stage_start = Instant::now();
    let binary = binarize_image(image);
    let binarize_stage = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::Binarize {
            width: binary.width(),
            height: binary.height(),
            foreground_count: binary.foreground_count(),
        },
    };

    // 2. Chamfer distance transform.
    let stage_start = Instant::now();
    let distance =
        DistanceField::compute(&binary, config.axis_cost, config.diagonal_cost, 0)?;
    let distance_stage = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::Distance {
            axis_cost: config.axis_cost,
            diagonal_cost: config.diagonal_cost,
            max_value: distance.max_value(),
        },
    };

    // 3. Topological thinning.
    let stage_start = Instant::now();
    let skeleton = thin(
        &binary,
        &distance,
        &ThinParams {
            background: 0,
            max_iterations: config.max_iterations,
            tip_prune_factor: config.tip_prune_factor,
        },
    )?;
    let thinning_stage = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::Thinning {
            rounds: skeleton.rounds(),
            pixels_before: binary.foreground_count(),
            pixels_after: skeleton.pixel_count(),
        },
    };

    // 4. Graph construction and simplification.
    let stage_start = Instant::now();
    let graph = build_graph(
        &skeleton,
        &distance,
        &GraphParams {
            branch_angle: config.branch_angle,
            weight_ratio: config.weight_ratio,
        },
    )?;
    let graph_stage = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::GraphBuild {
            root_count: graph.roots().len(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
        },
    };

    let dimensions = binary.dimensions();
    let summary = PipelineSummary {
        image_width: dimensions.width,
        image_height: dimensions.height,
        foreground_count: binary.foreground_count(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
    };
    let diagnostics = PipelineDiagnostics {
        decode: None,
        binarize: binarize_stage,
        distance: distance_stage,
        thinning: thinning_stage,
        graph: graph_stage,
        total_duration: total_start.elapsed(),
        summary,
    };
    let staged = StagedResult {
        binary,
        distance,
        skeleton,
        graph,
        dimensions,
    };
    Ok((staged, diagnostics))
}

fn decode(image_bytes: &[u8]) -> Result<RgbaImage, PipelineError> {
    if image_bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    Ok(image::load_from_memory(image_bytes)?.to_rgba8())
}

/// Shared stage runner for the non-diagnostic entry points.
fn run_stages(image: &RgbaImage, config: &SkeletonConfig) -> Result<StagedResult, PipelineError> {
    config.validate()?;
    let binary = binarize_image(image);
    let distance = DistanceField::compute(&binary, config.axis_cost, config.diagonal_cost, 0)?;
    let skeleton = thin(
        &binary,
        &distance,
        &ThinParams {
            background: 0,
            max_iterations: config.max_iterations,
            tip_prune_factor: config.tip_prune_factor,
        },
    )?;
    let graph = build_graph(
        &skeleton,
        &distance,
        &GraphParams {
            branch_angle: config.branch_angle,
            weight_ratio: config.weight_ratio,
        },
    )?;
    let dimensions = binary.dimensions();
    Ok(StagedResult {
        binary,
        distance,
        skeleton,
        graph,
        dimensions,
    })
}
