//! Matrix file reading and result writing.
//!
//! Input files are headerless CSV (or TSV, by extension), one matrix row per
//! line. An empty field is an empty cell at the draft level; it only becomes
//! 0.0 when the caller resolves the draft.
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::draft::MatrixDraft;
use matrixcalc_engine::format::format_complex;
use matrixcalc_engine::ops::OperationResult;

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

/// Read a matrix draft from a CSV/TSV file.
pub fn read_matrix_file<P: AsRef<Path>>(path: P) -> Result<MatrixDraft> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open matrix file: {}", path.display()))?;

    let mut cells: Vec<Vec<Option<f64>>> = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Failed to read row {} of {}", row_idx + 1, path.display()))?;
        let mut row = Vec::with_capacity(record.len());
        for (col_idx, field) in record.iter().enumerate() {
            let field = field.trim();
            if field.is_empty() {
                row.push(None);
            } else {
                let value = field.parse::<f64>().with_context(|| {
                    format!(
                        "Invalid number '{}' at row {}, column {} of {}",
                        field,
                        row_idx + 1,
                        col_idx + 1,
                        path.display()
                    )
                })?;
                row.push(Some(value));
            }
        }
        cells.push(row);
    }

    if cells.is_empty() {
        return Err(anyhow!("Matrix file is empty: {}", path.display()));
    }

    MatrixDraft::from_cells(cells)
        .with_context(|| format!("Matrix file is not rectangular: {}", path.display()))
}

/// Write a result as CSV: real cells as plain numbers, complex cells in the
/// display format (`re{+/-}im i`).
pub fn write_result_file<P: AsRef<Path>>(
    path: P,
    result: &OperationResult,
    precision: usize,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter_for(path))
        .from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    match result {
        OperationResult::Real(m) => {
            for row in m.to_rows() {
                let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                writer.write_record(&fields)?;
            }
        }
        OperationResult::Complex(m) => {
            for row in m.to_rows() {
                let fields: Vec<String> =
                    row.iter().map(|z| format_complex(*z, precision)).collect();
                writer.write_record(&fields)?;
            }
        }
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}
