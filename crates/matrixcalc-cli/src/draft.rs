//! Editable working matrices with possibly-empty cells.
//!
//! A draft is the application-side representation of a matrix being typed in:
//! a rectangular grid of `Option<f64>` where `None` is an untouched cell. The
//! engine never receives a draft; callers resolve empties first, either to
//! 0.0 ([`MatrixDraft::resolve_zeros`]) or by failing validation
//! ([`MatrixDraft::resolve_strict`]).
use serde::{Deserialize, Serialize};

use matrixcalc_engine::math::{Matrix, ShapeError};
use matrixcalc_engine::OperationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixDraft {
    cells: Vec<Vec<Option<f64>>>,
}

impl MatrixDraft {
    /// A `rows x cols` draft of entirely empty cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "draft shape must be at least 1x1");
        Self {
            cells: vec![vec![None; cols]; rows],
        }
    }

    /// Build from nested rows, validating rectangularity.
    pub fn from_cells(cells: Vec<Vec<Option<f64>>>) -> Result<Self, ShapeError> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(ShapeError::Empty);
        }
        let cols = cells[0].len();
        for (idx, row) in cells.iter().enumerate() {
            if row.len() != cols {
                return Err(ShapeError::RaggedRow {
                    row: idx,
                    expected: cols,
                    found: row.len(),
                });
            }
        }
        Ok(Self { cells })
    }

    pub fn from_matrix(matrix: &Matrix<f64>) -> Self {
        Self {
            cells: matrix
                .to_rows()
                .into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<f64>) {
        self.cells[row][col] = value;
    }

    pub fn add_row(&mut self) {
        let cols = self.cols();
        self.cells.push(vec![None; cols]);
    }

    /// Drop the last row; a draft never shrinks below 1x1.
    pub fn remove_row(&mut self) {
        if self.rows() > 1 {
            self.cells.pop();
        }
    }

    pub fn add_column(&mut self) {
        for row in &mut self.cells {
            row.push(None);
        }
    }

    /// Drop the last column; a draft never shrinks below 1x1.
    pub fn remove_column(&mut self) {
        if self.cols() > 1 {
            for row in &mut self.cells {
                row.pop();
            }
        }
    }

    pub fn has_empty_cells(&self) -> bool {
        self.cells.iter().any(|row| row.iter().any(Option::is_none))
    }

    pub fn empty_cell_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_none()).count())
            .sum()
    }

    /// Resolve to an engine matrix, treating empty cells as zeros.
    ///
    /// Logs a warning when anything was substituted, matching the
    /// "empty cells will be treated as zeros" notice the user sees while
    /// editing.
    pub fn resolve_zeros(&self) -> Matrix<f64> {
        let empties = self.empty_cell_count();
        if empties > 0 {
            log::warn!("Treating {} empty cell(s) as zeros", empties);
        }
        let rows = self
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.unwrap_or(0.0)).collect())
            .collect();
        Matrix::from_rows(rows).expect("draft invariant guarantees a valid shape")
    }

    /// Resolve to an engine matrix, failing if any cell is still empty.
    pub fn resolve_strict(&self) -> Result<Matrix<f64>, OperationError> {
        let empties = self.empty_cell_count();
        if empties > 0 {
            return Err(OperationError::IncompleteInput {
                empty_cells: empties,
            });
        }
        Ok(self.resolve_zeros())
    }
}
