use std::fs::File;

use csv_matrix::error::{MatrixError, MatrixViolation};
use csv_matrix::ingestion::{parse_csv, parse_csv_from_reader, CSV_CONTENT_TYPE};
use csv_matrix::processing::render;

fn open(name: &str) -> File {
    File::open(format!("tests/fixtures/{name}")).unwrap()
}

#[test]
fn parse_fixture_happy_path() {
    let grid = parse_csv_from_reader(open("matrix.csv"), Some(CSV_CONTENT_TYPE)).unwrap();

    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.col_count(), 3);
    assert_eq!(grid.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
}

#[test]
fn parse_fixture_with_crlf_line_endings() {
    let grid = parse_csv_from_reader(open("crlf.csv"), Some(CSV_CONTENT_TYPE)).unwrap();
    assert_eq!(grid.to_rows(), vec![vec![10, -20], vec![30, -40]]);
}

#[test]
fn jagged_fixture_names_row_two() {
    let err = parse_csv_from_reader(open("jagged.csv"), Some(CSV_CONTENT_TYPE)).unwrap_err();
    let msg = err.to_string();
    assert!(matches!(
        err,
        MatrixError::InvalidMatrix(MatrixViolation::ColumnMismatch { row: 2, .. })
    ));
    assert_eq!(msg, "Number of columns in row 2 does not match number of columns in first row");
}

#[test]
fn too_large_fixture_names_cell() {
    let err = parse_csv_from_reader(open("too_large.csv"), Some(CSV_CONTENT_TYPE)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Integer value at row 2, column 2 exceeds the maximum value of integer"
    );
}

#[test]
fn octet_stream_is_rejected_even_for_valid_text() {
    let err =
        parse_csv_from_reader(open("matrix.csv"), Some("application/octet-stream")).unwrap_err();
    assert!(matches!(err, MatrixError::InvalidFile { .. }));
    assert_eq!(err.to_string(), "File is not a CSV file");
}

#[test]
fn empty_stream_is_rejected() {
    let err = parse_csv_from_reader(std::io::empty(), Some(CSV_CONTENT_TYPE)).unwrap_err();
    assert_eq!(err.to_string(), "File is null or empty");
}

#[test]
fn read_failure_surfaces_as_io() {
    struct Broken;
    impl std::io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("connection reset"))
        }
    }

    let err = parse_csv_from_reader(Broken, Some(CSV_CONTENT_TYPE)).unwrap_err();
    assert!(matches!(err, MatrixError::Io(_)));
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn rendered_output_is_plain_csv() {
    let grid = parse_csv(Some(&b"1,-2,3\n4,5,-6"[..]), Some(CSV_CONTENT_TYPE)).unwrap();
    let text = render(&grid);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());
    let rows: Vec<Vec<i32>> = rdr
        .records()
        .map(|r| r.unwrap().iter().map(|c| c.parse().unwrap()).collect())
        .collect();

    assert_eq!(rows, grid.to_rows());
}
