//! matrixcalc-engine: dense linear-algebra evaluation for the matrix calculator.
//!
//! This crate provides the numeric core: small dense matrix and complex value
//! types, one pure function per supported operation (add, subtract, multiply,
//! determinant, inverse, transpose, eigenvalues, echelon form), and a
//! dispatcher that maps an operation identifier onto those functions.
//!
//! All functions are stateless and deterministic; they never mutate their
//! inputs and hold no state between calls, so they are safe to invoke from
//! concurrent callers without coordination. Failures are reported through the
//! enumerated [`error::OperationError`] type rather than panics.
pub mod error;
pub mod format;
pub mod math;
pub mod ops;

pub use error::OperationError;
pub use math::{Complex, Matrix, ShapeError};
pub use ops::{evaluate, Operation, OperationResult};
