//! Persisted calculation history.
//!
//! Records live in a single JSON file (the durable key-value store), one
//! array of `{id, matrix_a, matrix_b, result, timestamp}` entries keyed by an
//! opaque id. No schema migration or versioning.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::draft::MatrixDraft;
use matrixcalc_engine::ops::OperationResult;

/// A result as it is persisted: plain nested rows, complex cells as
/// `[re, im]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoredResult {
    Real(Vec<Vec<f64>>),
    Complex(Vec<Vec<(f64, f64)>>),
}

impl From<&OperationResult> for StoredResult {
    fn from(result: &OperationResult) -> Self {
        match result {
            OperationResult::Real(m) => StoredResult::Real(m.to_rows()),
            OperationResult::Complex(m) => StoredResult::Complex(
                m.to_rows()
                    .into_iter()
                    .map(|row| row.into_iter().map(|z| (z.re, z.im)).collect())
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: String,
    pub matrix_a: MatrixDraft,
    /// Absent for unary operations invoked without a second matrix.
    pub matrix_b: Option<MatrixDraft>,
    pub result: StoredResult,
    pub timestamp: String,
}

impl CalculationRecord {
    /// Stamp a new record with a millisecond-derived id and an RFC 3339
    /// timestamp.
    pub fn new(
        matrix_a: MatrixDraft,
        matrix_b: Option<MatrixDraft>,
        result: &OperationResult,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            matrix_a,
            matrix_b,
            result: StoredResult::from(result),
            timestamp: now.to_rfc3339(),
        }
    }
}

/// Storage contract for saved calculations. Injected into the application
/// layer so the store backing can change without touching callers.
pub trait HistoryStore {
    fn load_all(&self) -> Result<Vec<CalculationRecord>>;
    fn append(&self, record: CalculationRecord) -> Result<()>;
    /// Returns whether a record with that id existed.
    fn delete_by_id(&self, id: &str) -> Result<bool>;
    fn clear_all(&self) -> Result<()>;
}

/// File-backed store: the whole history is one JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonHistory {
    path: PathBuf,
}

impl JsonHistory {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, records: &[CalculationRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .context("Failed to serialize calculation history")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))
    }
}

impl HistoryStore for JsonHistory {
    fn load_all(&self) -> Result<Vec<CalculationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history file: {}", self.path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed history file: {}", self.path.display()))
    }

    fn append(&self, record: CalculationRecord) -> Result<()> {
        let mut records = self.load_all()?;
        records.push(record);
        self.write_all(&records)
    }

    fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records)?;
        Ok(true)
    }

    fn clear_all(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove history file: {}", self.path.display())
            })?;
        }
        Ok(())
    }
}
