//! Output adapters: CSV file sink and console table.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use matcher::MatchResult;
use thiserror::Error;
use tracing::info;

pub const CSV_HEADER: [&str; 3] = ["Original", "Paraphrase", "JaccardDistance"];

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Appends ranked results to a CSV file.
///
/// The header row is written only when the file is new or empty, so repeated
/// runs against the same path accumulate rows under one header.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `results`, returning the number of rows written.
    pub fn append(&self, results: &[MatchResult]) -> Result<usize, SinkError> {
        let io_err = |source| SinkError::Io {
            path: self.path.display().to_string(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        let needs_header = file.metadata().map_err(io_err)?.len() == 0;

        write_rows(file, results, needs_header).map_err(io_err)?;
        info!(
            path = %self.path.display(),
            rows = results.len(),
            header = needs_header,
            "csv_appended"
        );
        Ok(results.len())
    }
}

fn write_rows(file: File, results: &[MatchResult], header: bool) -> io::Result<()> {
    let mut out = BufWriter::new(file);
    if header {
        writeln!(out, "{}", CSV_HEADER.join(","))?;
    }
    for r in results {
        writeln!(
            out,
            "{},{},{}",
            escape_field(&r.original_id),
            escape_field(&r.paraphrase_id),
            r.distance
        )?;
    }
    out.flush()
}

/// Quote a field when it holds a comma, a quote or a line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render results as a fixed-width table with no truncation.
pub fn render_table(results: &[MatchResult]) -> String {
    let distances: Vec<String> = results.iter().map(|r| r.distance.to_string()).collect();
    let widths = [
        column_width(CSV_HEADER[0], results.iter().map(|r| r.original_id.as_str())),
        column_width(CSV_HEADER[1], results.iter().map(|r| r.paraphrase_id.as_str())),
        column_width(CSV_HEADER[2], distances.iter().map(String::as_str)),
    ];

    let border = {
        let mut line = String::from("+");
        for w in widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    };
    let row = |cells: [&str; 3]| {
        let mut line = String::from("|");
        for (cell, w) in cells.iter().zip(widths) {
            line.push_str(&format!(" {cell:<w$} |"));
        }
        line
    };

    let mut lines = vec![border.clone(), row(CSV_HEADER), border.clone()];
    for (r, d) in results.iter().zip(&distances) {
        lines.push(row([r.original_id.as_str(), r.paraphrase_id.as_str(), d.as_str()]));
    }
    lines.push(border);
    lines.join("\n")
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}
