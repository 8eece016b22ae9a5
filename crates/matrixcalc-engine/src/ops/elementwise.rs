//! Element-wise arithmetic, the matrix product, and transposition.
use crate::error::OperationError;
use crate::math::Matrix;

fn check_same_shape(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<(), OperationError> {
    if a.shape() != b.shape() {
        return Err(OperationError::DimensionMismatch {
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    Ok(())
}

/// Element-wise sum. Fails unless shapes match.
pub fn add(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>, OperationError> {
    check_same_shape(a, b)?;
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| x + y)
        .collect();
    Ok(Matrix::from_shape_vec(a.shape(), data).expect("shape preserved"))
}

/// Element-wise difference. Fails unless shapes match.
pub fn subtract(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>, OperationError> {
    check_same_shape(a, b)?;
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| x - y)
        .collect();
    Ok(Matrix::from_shape_vec(a.shape(), data).expect("shape preserved"))
}

/// Standard matrix product, `rows(a) x cols(b)`.
///
/// Input sizes are interactive-scale, so the triple-nested definition is
/// used as-is.
pub fn multiply(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>, OperationError> {
    if a.ncols() != b.nrows() {
        return Err(OperationError::DimensionMismatch {
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }

    let (m, k) = a.shape();
    let n = b.ncols();
    let mut out = Matrix::zeros(m, n);
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            for p in 0..k {
                sum += a[(i, p)] * b[(p, j)];
            }
            out[(i, j)] = sum;
        }
    }
    Ok(out)
}

/// Transpose; defined for every shape.
pub fn transpose(a: &Matrix<f64>) -> Matrix<f64> {
    a.transposed()
}
