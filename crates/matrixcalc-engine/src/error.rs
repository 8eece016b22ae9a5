use std::error::Error;
use std::fmt;

/// Failure reasons for engine operations.
///
/// Every failed call signals exactly one of these; the `Display` text is the
/// single user-facing message for the failure.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationError {
    /// Operand shapes are incompatible for the requested operation.
    DimensionMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// A square-only operation received a non-square matrix.
    NotSquare { rows: usize, cols: usize },
    /// Inverse requested on a matrix whose determinant is below the
    /// singularity threshold.
    Singular,
    /// Unrecognized operation identifier.
    InvalidOperation(String),
    /// Input still contains unresolved empty cells.
    IncompleteInput { empty_cells: usize },
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::DimensionMismatch { lhs, rhs } => write!(
                f,
                "Matrix dimensions {}x{} and {}x{} are incompatible for this operation",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            OperationError::NotSquare { rows, cols } => {
                write!(f, "Matrix must be square ({}x{} given)", rows, cols)
            }
            OperationError::Singular => {
                write!(f, "Matrix is not invertible (determinant is zero)")
            }
            OperationError::InvalidOperation(name) => {
                write!(f, "Invalid operation '{}'", name)
            }
            OperationError::IncompleteInput { empty_cells } => write!(
                f,
                "Please fill in all empty cells before performing operations ({} empty)",
                empty_cells
            ),
        }
    }
}

impl Error for OperationError {}
