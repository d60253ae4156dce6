/*!
 * Output of the difference table.
 *
 * The CSV report has a `path` column followed by one column per era.
 * The console rendering pads every column to its widest cell.
 */

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::comparison::ComparisonTable;
use crate::errors::ReportError;
use crate::file_utils::FileManager;

const PATH_HEADER: &str = "path";

/// Write the table as CSV to any writer
pub fn write_csv_to<W: Write>(table: &ComparisonTable, writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![PATH_HEADER];
    header.extend(table.eras.iter().map(String::as_str));
    csv_writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.path.as_str()];
        record.extend(row.cells.iter().map(|cell| cell.as_str()));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the table as CSV to `path`, creating parent directories
pub fn write_csv<P: AsRef<Path>>(table: &ComparisonTable, path: P) -> Result<()> {
    let path = path.as_ref();
    FileManager::ensure_parent(path)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {:?}", path))?;
    write_csv_to(table, file).with_context(|| format!("Failed to write report: {:?}", path))?;
    Ok(())
}

/// Plain-text table for the console
pub fn render_table(table: &ComparisonTable) -> String {
    let mut header = vec![PATH_HEADER.to_string()];
    header.extend(table.eras.iter().cloned());

    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut line = vec![row.path.clone()];
            line.extend(row.cells.iter().map(|cell| cell.to_string()));
            line
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &body {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(&header));
    out.push('\n');
    for line in &body {
        out.push_str(&format_line(line));
        out.push('\n');
    }
    out
}
