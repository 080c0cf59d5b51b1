use serde::Serialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Datasets processed when none are given, in order
pub const DEFAULT_DATASETS: [&str; 4] = ["data1", "data2", "data3", "data4"];

/// Where the assembler writes its contigs, relative to the dataset directory
pub const CONTIG_FILE: &str = "contig.fasta";

/// Stack limit handed to the assembler, in KiB (`ulimit -s` units)
pub const DEFAULT_STACK_LIMIT_KIB: u64 = 8_192_000;

/// Environment variable marking a CI run
pub const DEFAULT_CI_ENV_VAR: &str = "GITHUB_ACTIONS";

/// Placeholder substituted with the dataset name in invocation arguments
pub const DATASET_PLACEHOLDER: &str = "{dataset}";

/// The assembler implementations being compared
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Reference implementation
    Python,
    /// Optimized implementation
    Codon,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Codon => "codon",
        }
    }

    /// The stock invocation for this implementation
    pub fn implementation(&self) -> Implementation {
        match self {
            Language::Python => Implementation::new(
                *self,
                "python3",
                &["code/main.py", "data/{dataset}"],
            ),
            Language::Codon => Implementation::new(
                *self,
                "codon",
                &["run", "-release", "code/main.codon", "data/{dataset}"],
            )
            .with_ci_fallback(codon_ci_install()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Install location of codon on CI runners
fn codon_ci_install() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(".codon").join("bin").join("codon"))
}

/// How to invoke one implementation for a dataset
#[derive(Debug, Clone)]
pub struct Implementation {
    pub language: Language,
    /// Program name (looked up on PATH) or path
    pub program: String,
    /// Argument templates, `{dataset}` is replaced per run
    pub args: Vec<String>,
    /// Used when the program isn't on PATH and the CI marker is set
    pub ci_fallback: Option<PathBuf>,
}

impl Implementation {
    pub fn new(language: Language, program: &str, args: &[&str]) -> Self {
        Self {
            language,
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            ci_fallback: None,
        }
    }

    pub fn with_ci_fallback(mut self, fallback: Option<PathBuf>) -> Self {
        self.ci_fallback = fallback;
        self
    }

    pub fn label(&self) -> &'static str {
        self.language.label()
    }

    /// Arguments for a run against `dataset`
    pub fn args_for(&self, dataset: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(DATASET_PLACEHOLDER, dataset))
            .collect()
    }
}

/// Configuration for a benchmark run
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Harness root, used as the working directory of every run
    pub root: PathBuf,
    /// Dataset names, each a directory under `<root>/data`
    pub datasets: Vec<String>,
    /// Implementations, run in order for every dataset
    pub implementations: Vec<Implementation>,
    /// Stack limit for the assembler in KiB, 0 leaves it untouched
    pub stack_limit_kib: u64,
    /// Environment variable that marks a CI run
    pub ci_env_var: String,
    /// Remove earlier contig outputs before each run
    pub fresh: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            datasets: DEFAULT_DATASETS.iter().map(|d| d.to_string()).collect(),
            implementations: vec![
                Language::Python.implementation(),
                Language::Codon.implementation(),
            ],
            stack_limit_kib: DEFAULT_STACK_LIMIT_KIB,
            ci_env_var: DEFAULT_CI_ENV_VAR.to_string(),
            fresh: false,
        }
    }
}

impl BenchConfig {
    pub fn dataset_dir(&self, dataset: &str) -> PathBuf {
        self.root.join("data").join(dataset)
    }
}

/// Implementation-labeled copy of the assembler output
pub fn labeled_contig_path(dataset_dir: &Path, label: &str) -> PathBuf {
    dataset_dir.join(format!("contig_{}.fasta", label))
}
