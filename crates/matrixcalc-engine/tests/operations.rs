//! Integration tests for the engine operations and the dispatcher.

use matrixcalc_engine::math::{Complex, Matrix};
use matrixcalc_engine::ops::{
    add, determinant, echelon_form, eigenvalues, evaluate, inverse, multiply, subtract, transpose,
    Operation, OperationResult,
};
use matrixcalc_engine::OperationError;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn mat(rows: Vec<Vec<f64>>) -> Matrix<f64> {
    Matrix::from_rows(rows).unwrap()
}

fn assert_matrix_close(actual: &Matrix<f64>, expected: &Matrix<f64>, tol: f64) {
    assert_eq!(actual.shape(), expected.shape());
    for (a, e) in actual.as_slice().iter().zip(expected.as_slice()) {
        assert!(
            (a - e).abs() < tol,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<f64> {
    let data = (0..rows * cols).map(|_| rng.gen_range(-10.0..10.0)).collect();
    Matrix::from_shape_vec((rows, cols), data).unwrap()
}

// ---------------------------------------------------------------------------
// add / subtract
// ---------------------------------------------------------------------------

#[test]
fn add_concrete() {
    let a = mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = mat(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
    let sum = add(&a, &b).unwrap();
    assert_matrix_close(&sum, &mat(vec![vec![6.0, 8.0], vec![10.0, 12.0]]), 1e-12);
}

#[test]
fn add_shape_mismatch() {
    let a = mat(vec![vec![1.0, 2.0]]);
    let b = mat(vec![vec![1.0], vec![2.0]]);
    assert!(matches!(
        add(&a, &b),
        Err(OperationError::DimensionMismatch { .. })
    ));
}

#[test]
fn add_then_subtract_round_trips() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let rows = rng.gen_range(1..6);
        let cols = rng.gen_range(1..6);
        let a = random_matrix(&mut rng, rows, cols);
        let b = random_matrix(&mut rng, rows, cols);
        let back = subtract(&add(&a, &b).unwrap(), &b).unwrap();
        assert_matrix_close(&back, &a, 1e-9);
    }
}

// ---------------------------------------------------------------------------
// multiply
// ---------------------------------------------------------------------------

#[test]
fn multiply_concrete() {
    let a = mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = mat(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
    let prod = multiply(&a, &b).unwrap();
    assert_matrix_close(&prod, &mat(vec![vec![19.0, 22.0], vec![43.0, 50.0]]), 1e-12);
}

#[test]
fn multiply_shapes() {
    let a = Matrix::<f64>::zeros(2, 3);
    let b = Matrix::<f64>::zeros(3, 4);
    assert_eq!(multiply(&a, &b).unwrap().shape(), (2, 4));
    assert!(matches!(
        multiply(&b, &a),
        Err(OperationError::DimensionMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// transpose
// ---------------------------------------------------------------------------

#[test]
fn transpose_involution() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let rows = rng.gen_range(1..6);
        let cols = rng.gen_range(1..6);
        let a = random_matrix(&mut rng, rows, cols);
        assert_eq!(transpose(&transpose(&a)), a);
    }
}

// ---------------------------------------------------------------------------
// determinant
// ---------------------------------------------------------------------------

#[test]
fn determinant_concrete() {
    let a = mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert!((determinant(&a).unwrap() - (-2.0)).abs() < 1e-12);
}

#[test]
fn determinant_of_identity_is_one() {
    for n in 1..=6 {
        let det = determinant(&Matrix::<f64>::identity(n)).unwrap();
        assert!((det - 1.0).abs() < 1e-12, "identity({}) det = {}", n, det);
    }
}

#[test]
fn determinant_not_square() {
    let a = Matrix::<f64>::zeros(2, 3);
    assert!(matches!(
        determinant(&a),
        Err(OperationError::NotSquare { rows: 2, cols: 3 })
    ));
}

// ---------------------------------------------------------------------------
// inverse
// ---------------------------------------------------------------------------

#[test]
fn inverse_times_original_is_identity() {
    let a = mat(vec![
        vec![4.0, 7.0, 2.0],
        vec![3.0, 6.0, 1.0],
        vec![2.0, 5.0, 3.0],
    ]);
    let inv = inverse(&a).unwrap();
    let product = multiply(&a, &inv).unwrap();
    assert_matrix_close(&product, &Matrix::identity(3), 1e-6);
}

#[test]
fn inverse_singular_matrix_fails() {
    let a = mat(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
    assert_eq!(inverse(&a), Err(OperationError::Singular));
}

#[test]
fn inverse_not_square() {
    let a = Matrix::<f64>::zeros(3, 2);
    assert!(matches!(
        inverse(&a),
        Err(OperationError::NotSquare { .. })
    ));
}

#[test]
fn inverse_of_well_conditioned_random_matrices() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..10 {
        let n = rng.gen_range(1..5);
        // Diagonal dominance keeps the sample comfortably invertible.
        let mut a = random_matrix(&mut rng, n, n);
        for i in 0..n {
            a[(i, i)] += 25.0;
        }
        let inv = inverse(&a).unwrap();
        let product = multiply(&a, &inv).unwrap();
        assert_matrix_close(&product, &Matrix::identity(n), 1e-6);
    }
}

// ---------------------------------------------------------------------------
// eigenvalues
// ---------------------------------------------------------------------------

fn sorted_by_re(mut values: Vec<Complex>) -> Vec<Complex> {
    values.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap());
    values
}

#[test]
fn eigenvalues_of_diagonal_matrix() {
    let a = mat(vec![vec![2.0, 0.0], vec![0.0, 3.0]]);
    let values = sorted_by_re(eigenvalues(&a).unwrap());
    assert_eq!(values.len(), 2);
    assert!((values[0].re - 2.0).abs() < 1e-9 && values[0].im.abs() < 1e-9);
    assert!((values[1].re - 3.0).abs() < 1e-9 && values[1].im.abs() < 1e-9);
}

#[test]
fn eigenvalues_of_rotation_are_conjugate_pair() {
    let a = mat(vec![vec![0.0, -1.0], vec![1.0, 0.0]]);
    let values = eigenvalues(&a).unwrap();
    assert_eq!(values.len(), 2);
    assert!(values[0].re.abs() < 1e-9);
    assert!((values[0].im - 1.0).abs() < 1e-9);
    assert_eq!(values[1], values[0].conj());
}

#[test]
fn eigenvalues_of_real_spectrum_matrix() {
    // [[4,1],[2,3]] has eigenvalues 5 and 2.
    let a = mat(vec![vec![4.0, 1.0], vec![2.0, 3.0]]);
    let values = sorted_by_re(eigenvalues(&a).unwrap());
    assert!((values[0].re - 2.0).abs() < 1e-8 && values[0].im.abs() < 1e-9);
    assert!((values[1].re - 5.0).abs() < 1e-8 && values[1].im.abs() < 1e-9);
}

#[test]
fn eigenvalues_of_triangular_matrix_are_its_diagonal() {
    let a = mat(vec![
        vec![1.0, 5.0, -3.0],
        vec![0.0, 4.0, 2.0],
        vec![0.0, 0.0, 6.0],
    ]);
    let values = sorted_by_re(eigenvalues(&a).unwrap());
    let expected = [1.0, 4.0, 6.0];
    for (value, want) in values.iter().zip(expected) {
        assert!((value.re - want).abs() < 1e-8);
        assert!(value.im.abs() < 1e-9);
    }
}

#[test]
fn eigenvalues_deterministic_for_identical_input() {
    let a = mat(vec![
        vec![2.0, 1.0, 0.0],
        vec![1.0, 3.0, 1.0],
        vec![0.0, 1.0, 4.0],
    ]);
    let first = eigenvalues(&a).unwrap();
    let second = eigenvalues(&a).unwrap();
    assert_eq!(first, second);
}

#[test]
fn eigenvalues_not_square() {
    let a = Matrix::<f64>::zeros(2, 3);
    assert!(matches!(
        eigenvalues(&a),
        Err(OperationError::NotSquare { .. })
    ));
}

// ---------------------------------------------------------------------------
// echelon form
// ---------------------------------------------------------------------------

fn assert_upper_triangular(m: &Matrix<f64>) {
    let (rows, cols) = m.shape();
    for i in 0..rows {
        for j in 0..cols.min(i) {
            assert_eq!(m[(i, j)], 0.0, "entry ({}, {}) below diagonal", i, j);
        }
    }
}

#[test]
fn echelon_form_of_swap_matrix() {
    let a = mat(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    let u = echelon_form(&a);
    assert_upper_triangular(&u);
    assert_matrix_close(&u, &Matrix::identity(2), 1e-12);
}

#[test]
fn echelon_form_is_upper_triangular() {
    let a = mat(vec![
        vec![2.0, 1.0, -1.0],
        vec![-3.0, -1.0, 2.0],
        vec![-2.0, 1.0, 2.0],
    ]);
    assert_upper_triangular(&echelon_form(&a));
}

#[test]
fn echelon_form_of_rank_deficient_matrix() {
    // Second row is twice the first; elimination leaves a zero row.
    let a = mat(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
    let u = echelon_form(&a);
    assert_upper_triangular(&u);
    assert!(u[(1, 1)].abs() < 1e-9);
}

#[test]
fn echelon_form_of_wide_matrix() {
    let a = mat(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    let u = echelon_form(&a);
    assert_eq!(u.shape(), (2, 3));
    assert_upper_triangular(&u);
}

// ---------------------------------------------------------------------------
// operation parsing and dispatch
// ---------------------------------------------------------------------------

#[test]
fn operation_parses_every_name() {
    for name in Operation::NAMES {
        let op: Operation = name.parse().unwrap();
        assert_eq!(op.name(), name);
    }
}

#[test]
fn operation_rejects_unknown_name() {
    let err = "cholesky".parse::<Operation>().unwrap_err();
    assert_eq!(err, OperationError::InvalidOperation("cholesky".to_string()));
}

#[test]
fn evaluate_binary_operation() {
    let a = mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = mat(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
    let result = evaluate(Operation::Add, &a, Some(&b)).unwrap();
    match result {
        OperationResult::Real(sum) => {
            assert_matrix_close(&sum, &mat(vec![vec![6.0, 8.0], vec![10.0, 12.0]]), 1e-12)
        }
        OperationResult::Complex(_) => panic!("add must produce a real matrix"),
    }
}

#[test]
fn evaluate_binary_without_second_operand_fails() {
    let a = mat(vec![vec![1.0]]);
    assert!(matches!(
        evaluate(Operation::Multiply, &a, None),
        Err(OperationError::InvalidOperation(_))
    ));
}

#[test]
fn evaluate_wraps_determinant_as_1x1() {
    let a = mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let result = evaluate(Operation::Determinant, &a, None).unwrap();
    let m = result.as_real().unwrap();
    assert_eq!(m.shape(), (1, 1));
    assert!((m[(0, 0)] - (-2.0)).abs() < 1e-12);
}

#[test]
fn evaluate_wraps_eigenvalues_as_column() {
    let a = mat(vec![vec![2.0, 0.0], vec![0.0, 3.0]]);
    let result = evaluate(Operation::Eigenvalues, &a, None).unwrap();
    let column = result.as_complex().unwrap();
    assert_eq!(column.shape(), (2, 1));
}

#[test]
fn evaluate_does_not_mutate_operands() {
    let a = mat(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    let before = a.clone();
    let _ = evaluate(Operation::EchelonForm, &a, None).unwrap();
    let _ = evaluate(Operation::Eigenvalues, &a, None).unwrap();
    assert_eq!(a, before);
}
