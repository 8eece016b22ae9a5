//! Small dense math types used by the engine.
//!
//! Provides a row-major `Matrix<T>` container and a `Complex` value type.
//! These types are intentionally small and dependency-free so the engine
//! stays portable and easy to test.
pub mod complex;
pub mod matrix;

pub use complex::Complex;
pub use matrix::{Matrix, ShapeError};
