use crate::eval::metrics::evaluate_lengths;
use crate::io::fasta::contig_lengths;
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::Path;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_contigs: usize,
    pub total_length: usize,
    pub average_length: f64,
    pub longest: usize,
    pub n50: usize,
}

/// Contig statistics for a FASTA(.gz) file. A missing file gives all zeros.
pub fn calculate_stats<P: AsRef<Path>>(path: P) -> io::Result<Stats> {
    let lengths = contig_lengths(path)?;
    let summary = evaluate_lengths(&lengths);

    Ok(Stats {
        total_contigs: summary.total,
        total_length: summary.total_length,
        average_length: summary.avg_length,
        longest: summary.longest,
        n50: summary.n50,
    })
}

/// N50 of the contigs in a file
pub fn file_n50<P: AsRef<Path>>(path: P) -> io::Result<usize> {
    calculate_stats(path).map(|stats| stats.n50)
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total contigs: {}", self.total_contigs)?;
        writeln!(f, "Total length: {}", self.total_length)?;
        writeln!(f, "Average length: {:.2}", self.average_length)?;
        writeln!(f, "Longest contig: {}", self.longest)?;
        write!(f, "N50: {}", self.n50)
    }
}
