//! Benchmark module - runs each assembler implementation on each dataset,
//! times it and scores its contigs by N50.
//!
//! Runs are strictly sequential: datasets in the outer loop, implementations
//! in the inner loop. A failing run is recorded once with no runtime and the
//! harness moves on.

pub mod command;
pub mod config;
pub mod report;

use serde::{Serialize, Serializer};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::stats::file_n50;
use command::{resolve_program, run_timed};
use config::{labeled_contig_path, BenchConfig, Implementation, Language, CONTIG_FILE};

/// Outcome of one (dataset, implementation) run
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    pub dataset: String,
    pub language: Language,
    /// Wall-clock time, `None` when the run failed
    #[serde(rename = "runtime_secs", serialize_with = "serialize_secs")]
    pub runtime: Option<Duration>,
    pub n50: usize,
}

fn serialize_secs<S: Serializer>(runtime: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match runtime {
        Some(d) => s.serialize_some(&d.as_secs_f64()),
        None => s.serialize_none(),
    }
}

/// Run every configured implementation on every dataset.
///
/// Datasets whose directory is missing are skipped without records.
pub fn run(config: &BenchConfig) -> Vec<BenchmarkRecord> {
    let mut records = Vec::new();

    for dataset in &config.datasets {
        let dataset_dir = config.dataset_dir(dataset);
        if !dataset_dir.is_dir() {
            warn!("Dataset {} not found at {}", dataset, dataset_dir.display());
            continue;
        }

        for implementation in &config.implementations {
            records.push(run_one(config, dataset, &dataset_dir, implementation));
        }
    }

    records
}

fn run_one(
    config: &BenchConfig,
    dataset: &str,
    dataset_dir: &Path,
    implementation: &Implementation,
) -> BenchmarkRecord {
    let label = implementation.label();
    let output = dataset_dir.join(CONTIG_FILE);
    let labeled = labeled_contig_path(dataset_dir, label);

    if config.fresh {
        remove_stale(&output);
        remove_stale(&labeled);
    }

    let program = resolve_program(implementation, &config.ci_env_var);
    let args = implementation.args_for(dataset);

    info!("Running {} on {}", label, dataset);
    let runtime = match run_timed(&program, &args, &config.root, config.stack_limit_kib) {
        Ok(elapsed) => {
            info!("{} on {} finished in {:.2?}", label, dataset, elapsed);
            Some(elapsed)
        }
        Err(e) => {
            error!("{} on {}: {}", label, dataset, e);
            if let Some(stderr) = e.stderr() {
                error!("stderr: {}", stderr.trim_end());
            }
            None
        }
    };

    stage_output(&output, &labeled);

    let n50 = file_n50(&labeled).unwrap_or_else(|e| {
        error!("Failed to read contigs from {}: {}", labeled.display(), e);
        0
    });

    BenchmarkRecord {
        dataset: dataset.to_string(),
        language: implementation.language,
        runtime,
        n50,
    }
}

/// Copy the assembler output to its implementation-labeled path, regardless
/// of how the run ended. An existing labeled copy is overwritten.
fn stage_output(output: &Path, labeled: &Path) {
    if output.exists() {
        if let Err(e) = fs::copy(output, labeled) {
            error!(
                "Failed to copy {} to {}: {}",
                output.display(),
                labeled.display(),
                e
            );
        }
    } else if labeled.exists() {
        warn!(
            "No new output at {}, scoring the earlier copy {}",
            output.display(),
            labeled.display()
        );
    }
}

fn remove_stale(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
