//! skeletrace-bench: CLI tool for pipeline parameter experimentation.
//!
//! Runs the skeleton extraction pipeline on a given image file with
//! configurable parameters, printing detailed per-stage diagnostics.
//! Useful for:
//!
//! - Tuning chamfer costs, tip pruning, and branch collapse thresholds
//! - Measuring per-stage durations to identify bottlenecks
//! - Understanding how parameter changes affect node/edge counts
//! - Checking how much of the input stroke the graph covers
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin skeletrace-bench -- [OPTIONS] <IMAGE_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use skeletrace_pipeline::{PipelineDiagnostics, SkeletonConfig};

/// Pipeline parameter experimentation and diagnostics for skeletrace.
///
/// Runs the skeleton extraction pipeline on a given image with
/// configurable parameters and prints detailed per-stage timing and
/// count diagnostics.
#[derive(Parser)]
#[command(name = "skeletrace-bench", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Chamfer axis step cost (c1).
    #[arg(long, default_value_t = SkeletonConfig::DEFAULT_AXIS_COST)]
    axis_cost: u32,

    /// Chamfer diagonal step cost (c2).
    #[arg(long, default_value_t = SkeletonConfig::DEFAULT_DIAGONAL_COST)]
    diagonal_cost: u32,

    /// Upper bound on thinning rounds.
    #[arg(long, default_value_t = SkeletonConfig::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Tip pruning as a fraction of the peak distance value.
    #[arg(long, default_value_t = SkeletonConfig::DEFAULT_TIP_PRUNE_FACTOR)]
    tip_prune_factor: f64,

    /// Branch collapse angle threshold in radians.
    #[arg(long, default_value_t = SkeletonConfig::DEFAULT_BRANCH_ANGLE)]
    branch_angle: f64,

    /// Branch collapse weight-ratio threshold (>= 1.0).
    #[arg(long, default_value_t = SkeletonConfig::DEFAULT_WEIGHT_RATIO)]
    weight_ratio: f64,

    /// Also compute the capsule coverage ratio of the final graph.
    #[arg(long)]
    coverage: bool,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of human-readable report.
    #[arg(long)]
    json: bool,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, all other pipeline parameter flags are ignored.
    /// The JSON must be a valid `SkeletonConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

/// Build a [`SkeletonConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual parameter flags are ignored. Otherwise, a config is
/// assembled from the individual flags.
fn config_from_cli(cli: &Cli) -> Result<SkeletonConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(SkeletonConfig {
        axis_cost: cli.axis_cost,
        diagonal_cost: cli.diagonal_cost,
        max_iterations: cli.max_iterations,
        tip_prune_factor: cli.tip_prune_factor,
        branch_angle: cli.branch_angle,
        weight_ratio: cli.weight_ratio,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let image_bytes = match std::fs::read(&cli.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "Image: {} ({} bytes)",
        cli.image_path.display(),
        image_bytes.len(),
    );
    eprintln!("Config: {config:#?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        match skeletrace_pipeline::skeletonize_staged(&image_bytes, &config) {
            Ok((staged, diagnostics)) => {
                if cli.json {
                    match serde_json::to_string_pretty(&diagnostics) {
                        Ok(json) => println!("{json}"),
                        Err(e) => {
                            eprintln!("Error serializing diagnostics: {e}");
                            return ExitCode::FAILURE;
                        }
                    }
                } else {
                    println!("{}", diagnostics.report());
                }

                // Coverage is independent of timing, so first run only.
                if run == 0 && cli.coverage {
                    let ratio =
                        skeletrace_pipeline::coverage_ratio(&staged.binary, &staged.graph);
                    println!("Capsule coverage: {:.1}%", ratio * 100.0);
                }

                all_diagnostics.push(diagnostics);
            }
            Err(e) => {
                eprintln!("Pipeline error: {e}");
                return ExitCode::FAILURE;
            }
        }

        if cli.runs > 1 {
            eprintln!();
        }
    }

    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    ExitCode::SUCCESS
}

/// Function pointer type for extracting a stage duration from diagnostics.
type StageExtractor = fn(&PipelineDiagnostics) -> Option<std::time::Duration>;

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[PipelineDiagnostics]) {
    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.total_duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Total duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    println!();
    println!("{:<16} {:>12}", "Stage", "Mean (ms)");
    println!("{}", "-".repeat(32));

    let stage_extractors: &[(&str, StageExtractor)] = &[
        ("Decode", |d| d.decode.as_ref().map(|s| s.duration)),
        ("Binarize", |d| Some(d.binarize.duration)),
        ("Distance", |d| Some(d.distance.duration)),
        ("Thinning", |d| Some(d.thinning.duration)),
        ("Graph", |d| Some(d.graph.duration)),
    ];

    for (name, extractor) in stage_extractors {
        let stage_durations: Vec<f64> = all_diagnostics
            .iter()
            .filter_map(extractor)
            .map(|dur| dur.as_secs_f64() * 1000.0)
            .collect();

        if stage_durations.is_empty() {
            continue;
        }

        let stage_mean = stage_durations.iter().sum::<f64>() / stage_durations.len() as f64;
        println!("{name:<16} {stage_mean:>10.3}ms");
    }
}
