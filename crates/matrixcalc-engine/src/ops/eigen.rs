//! Eigenvalues of general real matrices.
//!
//! Householder reduction to upper Hessenberg form, then QR iteration with a
//! Wilkinson shift applied through Givens rotations until the matrix is
//! quasi-triangular. Eigenvalues are read off the diagonal; a 2x2 block with
//! negative discriminant yields a complex-conjugate pair.
use crate::error::OperationError;
use crate::math::{Complex, Matrix};

const EPS: f64 = f64::EPSILON;

/// Eigenvalues of a square matrix, with algebraic multiplicity, in the order
/// of the converged quasi-triangular diagonal (top-left to bottom-right).
/// Deterministic for identical input: the iteration count is capped at
/// `30 * n` and nothing here draws on randomness.
pub fn eigenvalues(a: &Matrix<f64>) -> Result<Vec<Complex>, OperationError> {
    if !a.is_square() {
        return Err(OperationError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    let n = a.nrows();

    if n == 1 {
        return Ok(vec![Complex::real(a[(0, 0)])]);
    }

    let mut h = a.to_vec();
    hessenberg_reduction(&mut h, n);

    let max_iter = 30 * n;
    for _ in 0..max_iter {
        if is_quasi_triangular(&h, n) {
            break;
        }
        qr_iteration_step(&mut h, n);
    }
    if !is_quasi_triangular(&h, n) {
        log::warn!(
            "QR iteration hit the {} step cap before full convergence",
            max_iter
        );
    }

    // Flush negligible subdiagonal entries so block detection is exact.
    for i in 0..(n - 1) {
        if subdiag_negligible(&h, n, i) {
            h[(i + 1) * n + i] = 0.0;
        }
    }

    Ok(extract_eigenvalues(&h, n))
}

fn subdiag_threshold(h: &[f64], n: usize, i: usize) -> f64 {
    let scale = h[i * n + i].abs() + h[(i + 1) * n + (i + 1)].abs();
    EPS * scale.max(1.0)
}

fn subdiag_negligible(h: &[f64], n: usize, i: usize) -> bool {
    h[(i + 1) * n + i].abs() <= subdiag_threshold(h, n, i)
}

/// Discriminant of the 2x2 block starting at `(i, i)`; negative means a
/// complex-conjugate pair.
fn block_discriminant(h: &[f64], n: usize, i: usize) -> f64 {
    let a = h[i * n + i];
    let b = h[i * n + (i + 1)];
    let c = h[(i + 1) * n + i];
    let d = h[(i + 1) * n + (i + 1)];
    let trace = a + d;
    let det = a * d - b * c;
    trace * trace - 4.0 * det
}

/// Converged when every subdiagonal entry is negligible or belongs to an
/// irreducible 2x2 block with complex eigenvalues.
fn is_quasi_triangular(h: &[f64], n: usize) -> bool {
    let mut i = 0;
    while i < n - 1 {
        if subdiag_negligible(h, n, i) {
            i += 1;
            continue;
        }
        let pair_isolated = i + 1 == n - 1 || subdiag_negligible(h, n, i + 1);
        if pair_isolated && block_discriminant(h, n, i) < 0.0 {
            i += 2;
            continue;
        }
        return false;
    }
    true
}

/// Reduce to upper Hessenberg form with Householder reflections, in place.
fn hessenberg_reduction(h: &mut [f64], n: usize) {
    for k in 0..n.saturating_sub(2) {
        // Householder vector for column k, rows k+1..n.
        let mut v = vec![0.0; n - k - 1];
        let mut norm_sq = 0.0;
        for i in (k + 1)..n {
            let val = h[i * n + k];
            v[i - k - 1] = val;
            norm_sq += val * val;
        }
        if norm_sq < EPS {
            continue;
        }

        let norm = norm_sq.sqrt();
        let alpha = if v[0] >= 0.0 { -norm } else { norm };
        v[0] -= alpha;

        let mut v_norm_sq = 0.0;
        for vi in &v {
            v_norm_sq += vi * vi;
        }
        if v_norm_sq < EPS {
            continue;
        }
        let v_norm = v_norm_sq.sqrt();
        for vi in &mut v {
            *vi /= v_norm;
        }

        // Left application: rows k+1..n.
        for j in 0..n {
            let mut dot = 0.0;
            for i in 0..v.len() {
                dot += v[i] * h[(k + 1 + i) * n + j];
            }
            for i in 0..v.len() {
                h[(k + 1 + i) * n + j] -= 2.0 * v[i] * dot;
            }
        }

        // Right application: columns k+1..n.
        for i in 0..n {
            let mut dot = 0.0;
            for j in 0..v.len() {
                dot += h[i * n + (k + 1 + j)] * v[j];
            }
            for j in 0..v.len() {
                h[i * n + (k + 1 + j)] -= 2.0 * dot * v[j];
            }
        }
    }
}

/// One QR iteration step with an implicit Wilkinson shift, applied through
/// Givens rotations.
fn qr_iteration_step(h: &mut [f64], n: usize) {
    // Shift: the eigenvalue of the trailing 2x2 block closest to its
    // bottom-right entry; trace/2 when the block's eigenvalues are complex.
    let a = h[(n - 2) * n + (n - 2)];
    let b = h[(n - 2) * n + (n - 1)];
    let c = h[(n - 1) * n + (n - 2)];
    let d = h[(n - 1) * n + (n - 1)];

    let trace = a + d;
    let det = a * d - b * c;
    let disc = trace * trace - 4.0 * det;

    let shift = if disc >= 0.0 {
        let sqrt_disc = disc.sqrt();
        let lambda1 = (trace + sqrt_disc) / 2.0;
        let lambda2 = (trace - sqrt_disc) / 2.0;
        if (lambda1 - d).abs() < (lambda2 - d).abs() {
            lambda1
        } else {
            lambda2
        }
    } else {
        trace / 2.0
    };

    for i in 0..n {
        h[i * n + i] -= shift;
    }

    // QR factorization of the shifted matrix via Givens rotations, with the
    // R*Q recombination applied column-wise on the fly.
    for i in 0..(n - 1) {
        let x = h[i * n + i];
        let y = h[(i + 1) * n + i];
        if y.abs() < EPS {
            continue;
        }

        let r = x.hypot(y);
        let cos = x / r;
        let sin = -y / r;

        // Rotate rows i and i+1.
        for j in 0..n {
            let t1 = h[i * n + j];
            let t2 = h[(i + 1) * n + j];
            h[i * n + j] = cos * t1 - sin * t2;
            h[(i + 1) * n + j] = sin * t1 + cos * t2;
        }

        // Rotate columns i and i+1.
        for k in 0..n {
            let t1 = h[k * n + i];
            let t2 = h[k * n + (i + 1)];
            h[k * n + i] = cos * t1 - sin * t2;
            h[k * n + (i + 1)] = sin * t1 + cos * t2;
        }
    }

    for i in 0..n {
        h[i * n + i] += shift;
    }
}

/// Walk the quasi-triangular diagonal, emitting one value per 1x1 block and
/// a conjugate pair (positive imaginary part first) per 2x2 block.
fn extract_eigenvalues(h: &[f64], n: usize) -> Vec<Complex> {
    let mut values = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if i == n - 1 || h[(i + 1) * n + i] == 0.0 {
            values.push(Complex::real(h[i * n + i]));
            i += 1;
            continue;
        }

        let a = h[i * n + i];
        let d = h[(i + 1) * n + (i + 1)];
        let trace = a + d;
        let disc = block_discriminant(h, n, i);

        if disc < 0.0 {
            let re = trace / 2.0;
            let im = (-disc).sqrt() / 2.0;
            values.push(Complex::new(re, im));
            values.push(Complex::new(re, -im));
        } else {
            // A residual real pair that never decoupled; split it directly.
            let sqrt_disc = disc.sqrt();
            values.push(Complex::real((trace + sqrt_disc) / 2.0));
            values.push(Complex::real((trace - sqrt_disc) / 2.0));
        }
        i += 2;
    }
    values
}
