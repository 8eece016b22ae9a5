//! matrixcalc-cli: the hosting application around the evaluation engine.
//!
//! Owns everything the engine deliberately does not: editable draft matrices
//! with empty cells, matrix file I/O, user settings, and the persisted
//! calculation history. The engine itself never sees an unresolved cell;
//! resolution (empty => 0.0, or a strict failure) happens here.
pub mod draft;
pub mod history;
pub mod io;
pub mod settings;
