// src/io/fasta.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use flate2::read::MultiGzDecoder;

/// Open a contig file for reading, handles gzipped files automatically
pub fn open_fasta<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let gzipped = path.extension().map_or(false, |ext| ext == "gz");
    if gzipped {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read the per-contig sequence lengths of a FASTA-like file.
///
/// A missing file yields an empty set rather than an error, so an assembly
/// that never produced output simply scores zero.
pub fn contig_lengths<P: AsRef<Path>>(path: P) -> io::Result<Vec<usize>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_contig_lengths(open_fasta(path)?)
}

/// Line-based length extraction.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Every `>` line closes the record
/// that was open before it; every other line adds its trimmed length, in
/// characters, to the open record. Records that end up with zero length are
/// never emitted. Content is not validated.
pub fn read_contig_lengths<R: BufRead>(mut reader: R) -> io::Result<Vec<usize>> {
    let mut lengths = Vec::new();
    let mut current = 0usize;
    let mut chunk = Vec::new();

    loop {
        chunk.clear();
        if reader.read_until(b'\n', &mut chunk)? == 0 {
            break;
        }

        // A `\r\n` pair leaves an empty piece behind, which counts for nothing
        for raw in chunk.split(|&b| b == b'\r' || b == b'\n') {
            let line = String::from_utf8_lossy(raw);
            let trimmed = line.trim_matches(is_space);
            if trimmed.starts_with('>') {
                if current > 0 {
                    lengths.push(current);
                    current = 0;
                }
            } else {
                current += trimmed.chars().count();
            }
        }
    }

    if current > 0 {
        lengths.push(current);
    }

    Ok(lengths)
}

/// Unicode whitespace plus the ASCII information separators `\x1c`..`\x1f`
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}
