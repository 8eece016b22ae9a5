//! Fixed-precision rendering of results.
//!
//! Real cells print with a fixed number of decimals; complex cells print as
//! `{re}{+/-}{im}i` with the sign of the imaginary part always shown.
use crate::math::Complex;
use crate::ops::OperationResult;

/// Default number of decimals shown in rendered results.
pub const DEFAULT_PRECISION: usize = 2;

pub fn format_real(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

pub fn format_complex(value: Complex, precision: usize) -> String {
    // Normalize -0.0 so a vanishing imaginary part renders as "+0.00i".
    let im = if value.im == 0.0 { 0.0 } else { value.im };
    format!("{:.*}{:+.*}i", precision, value.re, precision, im)
}

/// Render a result as one line per row, cells separated by two spaces.
pub fn format_result(result: &OperationResult, precision: usize) -> String {
    let rows = match result {
        OperationResult::Real(m) => m
            .to_rows()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|v| format_real(v, precision))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>(),
        OperationResult::Complex(m) => m
            .to_rows()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|v| format_complex(v, precision))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>(),
    };

    rows.iter()
        .map(|row| row.join("  "))
        .collect::<Vec<_>>()
        .join("\n")
}
