//! Integration tests for rngtest-core.
//!
//! These exercise ingestion from real files: plain digit files, wrapped
//! files, and fixed-length FIPS samples.

use std::io::Write;

use rngtest_core::{Domain, FIPS_LENGTH, SequenceError, read_fips_sequence, read_sequence};

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn read_binary_file_with_line_wrapping() {
    let body = "1110001100\n0100010100\n1110111100\n1001001001\n";
    let file = write_temp(body);
    let seq = read_sequence(file.path(), Domain::Binary).unwrap();
    assert_eq!(seq.len(), 40);
    assert_eq!(seq.domain(), Domain::Binary);
    assert_eq!(&seq.symbols()[..5], &[1, 1, 1, 0, 0]);
}

#[test]
fn read_decimal_file() {
    let file = write_temp("0123456789\n9876543210\n");
    let seq = read_sequence(file.path(), Domain::Decimal).unwrap();
    assert_eq!(seq.len(), 20);
    assert_eq!(seq.count_of(5), 2);
}

#[test]
fn missing_file_is_io_error() {
    let err = read_sequence("/nonexistent/rngtest/sample.txt", Domain::Binary).unwrap_err();
    assert!(matches!(err, SequenceError::Io(_)));
    assert!(err.to_string().contains("failed to read sequence"));
}

#[test]
fn fips_sample_truncates_extra_input() {
    let body = "01".repeat(FIPS_LENGTH / 2 + 50);
    let file = write_temp(&body);
    let seq = read_fips_sequence(file.path()).unwrap();
    assert_eq!(seq.len(), FIPS_LENGTH);
    assert_eq!(seq.count_of(1), FIPS_LENGTH / 2);
}

#[test]
fn fips_sample_too_short() {
    let file = write_temp(&"1".repeat(1000));
    match read_fips_sequence(file.path()) {
        Err(SequenceError::TooShort { needed, got }) => {
            assert_eq!(needed, FIPS_LENGTH);
            assert_eq!(got, 1000);
        }
        other => panic!("expected TooShort, got {other:?}"),
    }
}
