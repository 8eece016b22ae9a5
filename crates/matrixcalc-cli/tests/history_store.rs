//! Integration tests for the JSON-backed calculation history.

use matrixcalc_cli::draft::MatrixDraft;
use matrixcalc_cli::history::{CalculationRecord, HistoryStore, JsonHistory, StoredResult};
use matrixcalc_engine::math::Matrix;
use matrixcalc_engine::ops::OperationResult;

fn sample_record(id: &str) -> CalculationRecord {
    let matrix = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let result = OperationResult::Real(matrix.clone());
    let mut record = CalculationRecord::new(
        MatrixDraft::from_matrix(&matrix),
        Some(MatrixDraft::new(2, 2)),
        &result,
    );
    record.id = id.to_string();
    record
}

fn store_in(dir: &tempfile::TempDir) -> JsonHistory {
    JsonHistory::new(dir.path().join("history.json"))
}

// ---------------------------------------------------------------------------
// load / append
// ---------------------------------------------------------------------------

#[test]
fn missing_file_loads_as_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn append_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.append(sample_record("1")).unwrap();
    store.append(sample_record("2")).unwrap();

    let records = store.load_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "1");
    assert_eq!(records[1].id, "2");
    assert_eq!(
        records[0].result,
        StoredResult::Real(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
    );
}

#[test]
fn complex_results_persist_as_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let column = Matrix::from_shape_vec(
        (2, 1),
        vec![
            matrixcalc_engine::Complex::new(0.0, 1.0),
            matrixcalc_engine::Complex::new(0.0, -1.0),
        ],
    )
    .unwrap();
    let result = OperationResult::Complex(column);
    let record = CalculationRecord::new(MatrixDraft::new(2, 2), None, &result);
    store.append(record).unwrap();

    let records = store.load_all().unwrap();
    assert_eq!(
        records[0].result,
        StoredResult::Complex(vec![vec![(0.0, 1.0)], vec![(0.0, -1.0)]])
    );
    assert!(records[0].matrix_b.is_none());
}

#[test]
fn empty_draft_cells_persist_as_null() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let mut draft = MatrixDraft::new(1, 2);
    draft.set(0, 0, Some(5.0));
    let result = OperationResult::Real(Matrix::from_rows(vec![vec![5.0, 0.0]]).unwrap());
    store
        .append(CalculationRecord::new(draft.clone(), None, &result))
        .unwrap();

    let json = std::fs::read_to_string(store.path()).unwrap();
    assert!(json.contains("null"));

    let records = store.load_all().unwrap();
    assert_eq!(records[0].matrix_a, draft);
}

// ---------------------------------------------------------------------------
// delete / clear
// ---------------------------------------------------------------------------

#[test]
fn delete_by_id_removes_only_that_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.append(sample_record("1")).unwrap();
    store.append(sample_record("2")).unwrap();

    assert!(store.delete_by_id("1").unwrap());

    let records = store.load_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "2");
}

#[test]
fn delete_unknown_id_reports_false() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.append(sample_record("1")).unwrap();
    assert!(!store.delete_by_id("99").unwrap());
    assert_eq!(store.load_all().unwrap().len(), 1);
}

#[test]
fn clear_all_empties_the_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.append(sample_record("1")).unwrap();
    store.append(sample_record("2")).unwrap();

    store.clear_all().unwrap();
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn clear_all_on_missing_file_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(store.clear_all().is_ok());
}

#[test]
fn malformed_history_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "not json at all").unwrap();
    let store = JsonHistory::new(&path);
    assert!(store.load_all().is_err());
}
