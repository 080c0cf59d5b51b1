use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use super::BenchmarkRecord;

/// Marker printed in place of the runtime of a failed run
pub const ERROR_MARKER: &str = "ERROR";

const RULE_WIDTH: usize = 70;

/// Format a runtime as `H:MM:SS`, truncating fractional seconds
pub fn format_time(runtime: Option<Duration>) -> String {
    match runtime {
        Some(d) => {
            let secs = d.as_secs();
            format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
        None => ERROR_MARKER.to_string(),
    }
}

/// Render the comparison table: header, rule, one row per record
pub fn render_table(records: &[BenchmarkRecord]) -> String {
    let mut out = String::new();
    out.push_str("Dataset\tLanguage\tRuntime\t\tN50\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for record in records {
        let _ = writeln!(
            out,
            "{}\t{}\t\t{}\t\t{}",
            record.dataset,
            record.language,
            format_time(record.runtime),
            record.n50
        );
    }

    out
}

/// Write all records to a JSON file
pub fn write_json<P: AsRef<Path>>(records: &[BenchmarkRecord], path: P) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()
}
