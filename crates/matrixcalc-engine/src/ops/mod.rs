//! Operation identifiers and the evaluation dispatcher.
use std::fmt;
use std::str::FromStr;

use crate::error::OperationError;
use crate::math::{Complex, Matrix};

pub mod eigen;
pub mod elementwise;
pub mod lu;

pub use eigen::eigenvalues;
pub use elementwise::{add, multiply, subtract, transpose};
pub use lu::{determinant, echelon_form, inverse, lu_decompose, LuDecomposition};

/// The operations the calculator exposes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Determinant,
    Inverse,
    Transpose,
    Eigenvalues,
    EchelonForm,
}

impl Operation {
    /// All identifiers accepted by [`Operation::from_str`].
    pub const NAMES: [&'static str; 8] = [
        "add",
        "subtract",
        "multiply",
        "determinant",
        "inverse",
        "transpose",
        "eigenvalues",
        "echelon",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Determinant => "determinant",
            Operation::Inverse => "inverse",
            Operation::Transpose => "transpose",
            Operation::Eigenvalues => "eigenvalues",
            Operation::EchelonForm => "echelon",
        }
    }

    /// Binary operations consume two operands; the rest take only the first.
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Operation::Add | Operation::Subtract | Operation::Multiply
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "determinant" => Ok(Operation::Determinant),
            "inverse" => Ok(Operation::Inverse),
            "transpose" => Ok(Operation::Transpose),
            "eigenvalues" => Ok(Operation::Eigenvalues),
            "echelon" => Ok(Operation::EchelonForm),
            _ => Err(OperationError::InvalidOperation(s.to_string())),
        }
    }
}

/// Successful evaluation output: a real matrix, or a complex one for
/// eigenvalues.
#[derive(Clone, Debug, PartialEq)]
pub enum OperationResult {
    Real(Matrix<f64>),
    Complex(Matrix<Complex>),
}

impl OperationResult {
    pub fn shape(&self) -> (usize, usize) {
        match self {
            OperationResult::Real(m) => m.shape(),
            OperationResult::Complex(m) => m.shape(),
        }
    }

    pub fn as_real(&self) -> Option<&Matrix<f64>> {
        match self {
            OperationResult::Real(m) => Some(m),
            OperationResult::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&Matrix<Complex>> {
        match self {
            OperationResult::Real(_) => None,
            OperationResult::Complex(m) => Some(m),
        }
    }
}

/// Evaluate `op` over the selected operands.
///
/// Binary operations require `second`; unary operations ignore it. The
/// determinant is wrapped as a 1x1 matrix and eigenvalues as an n x 1 complex
/// column, so every success is matrix-shaped for display.
pub fn evaluate(
    op: Operation,
    first: &Matrix<f64>,
    second: Option<&Matrix<f64>>,
) -> Result<OperationResult, OperationError> {
    if op.is_binary() && second.is_none() {
        return Err(OperationError::InvalidOperation(format!(
            "{} requires two operands",
            op
        )));
    }

    match op {
        Operation::Add => add(first, second.unwrap()).map(OperationResult::Real),
        Operation::Subtract => subtract(first, second.unwrap()).map(OperationResult::Real),
        Operation::Multiply => multiply(first, second.unwrap()).map(OperationResult::Real),
        Operation::Determinant => {
            let det = determinant(first)?;
            let wrapped = Matrix::from_shape_vec((1, 1), vec![det])
                .expect("1x1 shape is always valid");
            Ok(OperationResult::Real(wrapped))
        }
        Operation::Inverse => inverse(first).map(OperationResult::Real),
        Operation::Transpose => Ok(OperationResult::Real(transpose(first))),
        Operation::Eigenvalues => {
            let values = eigenvalues(first)?;
            let n = values.len();
            let column = Matrix::from_shape_vec((n, 1), values)
                .expect("eigenvalue count matches matrix order");
            Ok(OperationResult::Complex(column))
        }
        Operation::EchelonForm => Ok(OperationResult::Real(echelon_form(first))),
    }
}
