//! LU decomposition with partial pivoting, and the operations built on it:
//! determinant, inverse, and row-echelon form.
use crate::error::OperationError;
use crate::math::Matrix;

/// Determinants with magnitude below this are treated as zero for inversion.
pub const SINGULARITY_EPS: f64 = 1e-10;

/// Pivots with magnitude below this are left in place without elimination,
/// so rank-deficient input still reduces to a usable U factor.
const PIVOT_EPS: f64 = 1e-12;

/// Factors of `PA = LU` stored in one buffer.
#[derive(Clone, Debug)]
pub struct LuDecomposition {
    /// U on and above the diagonal; unit-lower-triangular multipliers below.
    pub lu: Matrix<f64>,
    /// `pivots[col]` is the row swapped into position `col` at step `col`.
    pub pivots: Vec<usize>,
    /// Number of row swaps performed, for the determinant sign.
    pub num_swaps: usize,
}

/// LU decomposition with partial pivoting (Doolittle scheme).
///
/// The pivot for each column is the remaining row with the largest absolute
/// value in that column. Never fails: a column whose best pivot is
/// negligible is skipped, leaving a zero row in U.
pub fn lu_decompose(a: &Matrix<f64>) -> LuDecomposition {
    let (m, n) = a.shape();
    let k = m.min(n);

    let mut lu = a.clone();
    let mut pivots = vec![0usize; k];
    let mut num_swaps = 0usize;

    for col in 0..k {
        // Largest absolute value in column col among rows col..m.
        let mut pivot_row = col;
        let mut max_val = lu[(col, col)].abs();
        for row in (col + 1)..m {
            let val = lu[(row, col)].abs();
            if val > max_val {
                max_val = val;
                pivot_row = row;
            }
        }
        pivots[col] = pivot_row;

        if pivot_row != col {
            let buf = lu.as_mut_slice();
            for j in 0..n {
                buf.swap(col * n + j, pivot_row * n + j);
            }
            num_swaps += 1;
        }

        let pivot = lu[(col, col)];
        if pivot.abs() < PIVOT_EPS {
            continue;
        }

        // Multipliers (the L column), then the trailing submatrix update.
        for row in (col + 1)..m {
            lu[(row, col)] /= pivot;
        }
        for row in (col + 1)..m {
            let multiplier = lu[(row, col)];
            for j in (col + 1)..n {
                let update = multiplier * lu[(col, j)];
                lu[(row, j)] -= update;
            }
        }
    }

    LuDecomposition {
        lu,
        pivots,
        num_swaps,
    }
}

fn determinant_of(decomp: &LuDecomposition) -> f64 {
    let n = decomp.lu.nrows();
    let sign = if decomp.num_swaps % 2 == 0 { 1.0 } else { -1.0 };
    let mut product = 1.0;
    for i in 0..n {
        product *= decomp.lu[(i, i)];
    }
    sign * product
}

/// Determinant of a square matrix: swap sign times the product of pivots.
pub fn determinant(a: &Matrix<f64>) -> Result<f64, OperationError> {
    if !a.is_square() {
        return Err(OperationError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    Ok(determinant_of(&lu_decompose(a)))
}

/// Solve `Ax = b` against precomputed square LU factors: apply the row
/// permutation, then forward substitution (unit L) and back substitution (U).
fn solve_column(decomp: &LuDecomposition, b: &[f64]) -> Vec<f64> {
    let n = decomp.lu.nrows();

    let mut pb = b.to_vec();
    for (i, &pivot_row) in decomp.pivots.iter().enumerate() {
        if pivot_row != i {
            pb.swap(i, pivot_row);
        }
    }

    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += decomp.lu[(i, j)] * y[j];
        }
        y[i] = pb[i] - sum;
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += decomp.lu[(i, j)] * x[j];
        }
        x[i] = (y[i] - sum) / decomp.lu[(i, i)];
    }
    x
}

/// Inverse of a square, non-singular matrix.
///
/// Solves `A * X = I` column by column against the LU factors. Singularity
/// is decided by `|det| < SINGULARITY_EPS` before any solving happens.
pub fn inverse(a: &Matrix<f64>) -> Result<Matrix<f64>, OperationError> {
    if !a.is_square() {
        return Err(OperationError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    let n = a.nrows();

    let decomp = lu_decompose(a);
    if determinant_of(&decomp).abs() < SINGULARITY_EPS {
        return Err(OperationError::Singular);
    }

    let mut out = Matrix::zeros(n, n);
    let mut unit = vec![0.0; n];
    for col in 0..n {
        unit[col] = 1.0;
        let x = solve_column(&decomp, &unit);
        unit[col] = 0.0;
        for row in 0..n {
            out[(row, col)] = x[row];
        }
    }
    Ok(out)
}

/// Row-echelon form: the U factor of `PA = LU`.
///
/// Defined for every shape; degenerate pivot columns simply stay zero.
pub fn echelon_form(a: &Matrix<f64>) -> Matrix<f64> {
    let decomp = lu_decompose(a);
    let (m, n) = decomp.lu.shape();
    let mut u = Matrix::zeros(m, n);
    for i in 0..m {
        for j in i..n {
            u[(i, j)] = decomp.lu[(i, j)];
        }
    }
    u
}
