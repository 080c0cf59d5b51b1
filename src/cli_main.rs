use asmeval::bench::config::{BenchConfig, Language, DEFAULT_STACK_LIMIT_KIB};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "asmeval", version, about = "Runtime and N50 comparison of genome assembler implementations", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options for `run` when no subcommand is given
    #[command(flatten)]
    pub run: RunArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every implementation on every dataset and print the comparison table
    Run(RunArgs),

    /// Print contig statistics for a FASTA(.gz) file
    Stats(StatsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Harness root containing code/ and data/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Dataset to process (repeatable), defaults to data1..data4
    #[arg(short, long = "dataset")]
    pub datasets: Vec<String>,

    /// Implementation to run (repeatable), defaults to python then codon
    #[arg(short, long = "implementation", value_enum)]
    pub implementations: Vec<Language>,

    /// Stack limit for the assembler in KiB, 0 leaves it untouched
    #[arg(long, default_value_t = DEFAULT_STACK_LIMIT_KIB)]
    pub stack_limit: u64,

    /// Delete earlier contig outputs before each run
    #[arg(long)]
    pub fresh: bool,

    /// Also write the results as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Contig FASTA(.gz) file
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl RunArgs {
    pub fn to_config(&self) -> BenchConfig {
        let mut config = BenchConfig {
            root: self.root.clone(),
            stack_limit_kib: self.stack_limit,
            fresh: self.fresh,
            ..Default::default()
        };

        if !self.datasets.is_empty() {
            config.datasets = self.datasets.clone();
        }
        if !self.implementations.is_empty() {
            config.implementations = self
                .implementations
                .iter()
                .map(|language| language.implementation())
                .collect();
        }

        config
    }
}
