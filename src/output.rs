//! Output sinks: plain lines, aligned table, CSV file.
//!
//! The first row of a result set is always the header row; all rows of one
//! call share the same column count.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::info;

use crate::constants::{DATETIME_FORMAT, RESULTS_DIR};
use crate::error::Result;
use crate::extractors::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table on stdout.
    Pretty,
    /// CSV file under results/.
    File,
}

pub fn control_output(results: &[Row], mode: &str, format: Option<OutputFormat>) -> Result<()> {
    match format {
        Some(OutputFormat::Pretty) => pretty_output(results),
        Some(OutputFormat::File) => file_output(results, mode)?,
        None => default_output(results),
    }
    Ok(())
}

fn default_output(results: &[Row]) {
    for row in results {
        println!("{}", row.join(" "));
    }
}

fn pretty_output(results: &[Row]) {
    let Some(header) = results.first() else {
        return;
    };

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &results[1..] {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    print_aligned(header, &widths);
    let total: usize = widths.iter().sum::<usize>() + 3 * (widths.len().saturating_sub(1));
    println!("{}", "-".repeat(total));
    for row in &results[1..] {
        print_aligned(row, &widths);
    }
}

fn print_aligned(row: &[String], widths: &[usize]) {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join(" | ");
    println!("{}", line.trim_end());
}

fn file_output(results: &[Row], mode: &str) -> Result<()> {
    let results_dir = PathBuf::from(RESULTS_DIR);
    fs::create_dir_all(&results_dir)?;

    let now = chrono::Local::now().format(DATETIME_FORMAT);
    let file_path = results_dir.join(format!("{}_{}.csv", mode, now));
    write_csv(results, &file_path)?;

    info!("Results saved to {}", file_path.display());
    Ok(())
}

/// Every field quoted, embedded quotes doubled, LF line endings.
fn write_csv(results: &[Row], path: &Path) -> Result<()> {
    let mut out = String::new();
    for row in results {
        let line = row
            .iter()
            .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}
