//! I/O module - contig file readers

pub mod fasta;
