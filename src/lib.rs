//! # asmeval
//!
//! Compares genome assembler implementations: runs each one on a set of
//! datasets, times it, and scores the contigs it writes by N50.
//!
//! ```rust,no_run
//! use asmeval::bench::{self, config::BenchConfig, report::render_table};
//!
//! let records = bench::run(&BenchConfig::default());
//! print!("{}", render_table(&records));
//! ```

pub mod bench;
pub mod eval;
pub mod io;
pub mod stats;

pub use bench::config::{BenchConfig, Implementation, Language};
pub use bench::BenchmarkRecord;
pub use eval::metrics::n50;
pub use io::fasta::contig_lengths;
