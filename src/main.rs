mod cli_main;

use anyhow::{ensure, Context};
use asmeval::bench;
use asmeval::bench::report::{render_table, write_json};
use asmeval::stats::calculate_stats;
use clap::Parser;
use cli_main::{Cli, Commands, OutputFormat, RunArgs, StatsArgs};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The report owns stdout, diagnostics go to stderr
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Setting tracing default failed")?;

    match cli.command.unwrap_or(Commands::Run(cli.run)) {
        Commands::Run(args) => run_benchmark(args),
        Commands::Stats(args) => print_stats(args),
    }
}

fn run_benchmark(args: RunArgs) -> anyhow::Result<()> {
    let config = args.to_config();
    info!(
        "Benchmarking {} implementation(s) on {} dataset(s) under {}",
        config.implementations.len(),
        config.datasets.len(),
        config.root.display()
    );

    let records = bench::run(&config);
    print!("{}", render_table(&records));

    if let Some(path) = args.json {
        write_json(&records, &path)
            .with_context(|| format!("Failed to write results to {}", path.display()))?;
        info!("Results written to {}", path.display());
    }

    Ok(())
}

fn print_stats(args: StatsArgs) -> anyhow::Result<()> {
    ensure!(args.input.exists(), "Contig file {} does not exist", args.input.display());
    info!("Calculating assembly statistics for: {}", args.input.display());

    let stats = calculate_stats(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    match args.format {
        OutputFormat::Text => println!("{}", stats),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }

    Ok(())
}
