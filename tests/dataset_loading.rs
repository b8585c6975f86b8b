//! Dataset Loading Tests
//!
//! CSV files on disk through the public loader:
//! - required columns are located by header name, extra columns ignored
//! - any malformed row fails the whole load
//! - blank cells follow the configured missing-value policy

use std::fs;
use std::path::PathBuf;

use reactorwatch::dataset::{DatasetError, DatasetLoader, MissingValuePolicy};
use reactorwatch::safety::{classify, SafetyTier};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_csv(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("plants.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn load(contents: &str, policy: MissingValuePolicy) -> Result<usize, DatasetError> {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, contents);
    DatasetLoader::new(policy).load_path(&path).map(|d| d.len())
}

// =============================================================================
// Well-formed Input
// =============================================================================

#[test]
fn test_extra_columns_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "Country,Name,Latitude,Longitude,Age,Capacity\n\
         India,Tarapur,19.83,72.66,54,1400\n\
         India,Rawatbhata,24.87,75.61,49,1180\n",
    );

    let dataset = DatasetLoader::default().load_path(&path).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records()[1].name, "Rawatbhata");
    assert_eq!(dataset.records()[1].latitude, 24.87);
    assert_eq!(dataset.records()[1].age, Some(49.0));
}

#[test]
fn test_whitespace_around_cells_is_trimmed() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "Name , Latitude , Longitude , Age\n  Kudankulam , 8.17 , 77.71 , 9 \n",
    );

    let dataset = DatasetLoader::default().load_path(&path).unwrap();
    let record = &dataset.records()[0];
    assert_eq!(record.name, "Kudankulam");
    assert_eq!(record.longitude, 77.71);
    assert_eq!(classify(record.age), SafetyTier::Safe);
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = DatasetLoader::default()
        .load_path(&dir.path().join("absent.csv"))
        .unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
    assert_eq!(err.code(), "REACTOR_DATASET_IO");
}

#[test]
fn test_missing_required_column() {
    for (csv, column) in [
        ("Latitude,Longitude,Age\n1,2,3\n", "Name"),
        ("Name,Longitude,Age\nA,2,3\n", "Latitude"),
        ("Name,Latitude,Age\nA,1,3\n", "Longitude"),
        ("Name,Latitude,Longitude\nA,1,2\n", "Age"),
    ] {
        match load(csv, MissingValuePolicy::FillZero) {
            Err(DatasetError::MissingColumn(missing)) => assert_eq!(missing, column),
            other => panic!("expected missing column {}, got {:?}", column, other),
        }
    }
}

#[test]
fn test_out_of_range_coordinates_rejected() {
    let err = load(
        "Name,Latitude,Longitude,Age\nA,10,20,5\nB,-90.5,20,5\n",
        MissingValuePolicy::FillZero,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DatasetError::OutOfRange {
            row: 2,
            column: "Latitude",
            ..
        }
    ));
}

#[test]
fn test_non_numeric_age_rejected() {
    let err = load(
        "Name,Latitude,Longitude,Age\nA,10,20,old\n",
        MissingValuePolicy::Preserve,
    )
    .unwrap_err();
    assert!(matches!(err, DatasetError::InvalidNumber { column: "Age", .. }));
    assert_eq!(err.code(), "REACTOR_DATASET_INVALID_NUMBER");
}

/// No partial dataset: a bad last row fails everything before it too.
#[test]
fn test_bad_row_fails_whole_load() {
    let result = load(
        "Name,Latitude,Longitude,Age\nA,10,20,5\nB,11,21,6\nC,x,22,7\n",
        MissingValuePolicy::FillZero,
    );
    assert!(result.is_err());
}

// =============================================================================
// Missing-value Policy
// =============================================================================

#[test]
fn test_fill_zero_turns_blank_age_safe() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "Name,Latitude,Longitude,Age\nA,10,,\n");

    let dataset = DatasetLoader::new(MissingValuePolicy::FillZero)
        .load_path(&path)
        .unwrap();
    let record = &dataset.records()[0];
    assert_eq!(record.longitude, 0.0);
    assert_eq!(record.age, Some(0.0));
    assert_eq!(classify(record.age), SafetyTier::Safe);
    assert_eq!(dataset.filled_cells(), 2);
}

#[test]
fn test_preserve_keeps_blank_age_unknown() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "Name,Latitude,Longitude,Age\nA,10,20,\n");

    let dataset = DatasetLoader::new(MissingValuePolicy::Preserve)
        .load_path(&path)
        .unwrap();
    assert_eq!(dataset.records()[0].age, None);
    assert_eq!(classify(dataset.records()[0].age), SafetyTier::Unknown);
    assert_eq!(dataset.filled_cells(), 0);
}

#[test]
fn test_preserve_rejects_blank_coordinates() {
    let err = load(
        "Name,Latitude,Longitude,Age\nA,10,,5\n",
        MissingValuePolicy::Preserve,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DatasetError::BlankValue {
            row: 1,
            column: "Longitude"
        }
    ));
}
