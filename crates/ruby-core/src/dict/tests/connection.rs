use crate::dict::{ConnectionMatrix, DictError};

const MATRIX_DEF: &str = "3 2\n0 0 -100\n0 1 250\n1 0 30\n2 1 -7\n";

#[test]
fn test_from_text_costs() {
    let m = ConnectionMatrix::from_text(MATRIX_DEF).unwrap();
    assert_eq!(m.rows(), 3);
    assert_eq!(m.cols(), 2);
    assert_eq!(m.cost(0, 0), -100);
    assert_eq!(m.cost(0, 1), 250);
    assert_eq!(m.cost(1, 0), 30);
    assert_eq!(m.cost(1, 1), 0);
    assert_eq!(m.cost(2, 1), -7);
}

#[test]
fn test_out_of_range_is_zero() {
    let m = ConnectionMatrix::from_text(MATRIX_DEF).unwrap();
    assert_eq!(m.cost(3, 0), 0);
    assert_eq!(m.cost(0, 2), 0);
    assert_eq!(m.cost(u16::MAX, u16::MAX), 0);
}

#[test]
fn test_from_text_errors() {
    assert!(matches!(
        ConnectionMatrix::from_text(""),
        Err(DictError::Parse(_))
    ));
    assert!(matches!(
        ConnectionMatrix::from_text("2\n"),
        Err(DictError::Parse(_))
    ));
    assert!(matches!(
        ConnectionMatrix::from_text("2 2\n0 0\n"),
        Err(DictError::Parse(_))
    ));
    assert!(matches!(
        ConnectionMatrix::from_text("2 2\n2 0 5\n"),
        Err(DictError::Parse(_))
    ));
}

#[test]
fn test_bytes_roundtrip() {
    let m = ConnectionMatrix::from_text(MATRIX_DEF).unwrap();
    let loaded = ConnectionMatrix::from_bytes(&m.to_bytes()).unwrap();
    assert_eq!(loaded.cost(0, 1), 250);
    assert_eq!(loaded.cost(2, 1), -7);
}

#[test]
fn test_truncated_cost_data() {
    let m = ConnectionMatrix::from_text(MATRIX_DEF).unwrap();
    let mut bytes = m.to_bytes();
    bytes.pop();
    assert!(matches!(
        ConnectionMatrix::from_bytes(&bytes),
        Err(DictError::Parse(_))
    ));
}

#[test]
fn test_save_and_open_mapped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.conn");
    let m = ConnectionMatrix::from_text(MATRIX_DEF).unwrap();
    m.save(&path).unwrap();

    let mapped = ConnectionMatrix::open(&path).unwrap();
    assert!(mapped.is_mapped());
    assert_eq!(mapped.cost(0, 0), -100);
    assert_eq!(mapped.cost(2, 1), -7);
    assert_eq!(mapped.to_bytes(), m.to_bytes());
}
