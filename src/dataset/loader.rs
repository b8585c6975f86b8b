//! CSV loader for reactor datasets
//!
//! - Header row required; `Name`, `Latitude`, `Longitude`, `Age` must be present
//! - Extra columns are ignored
//! - Any bad row fails the whole load

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::errors::{DatasetError, DatasetResult};
use super::types::{Dataset, MissingValuePolicy, ReactorRecord, LATITUDE_RANGE, LONGITUDE_RANGE};

pub const COLUMN_NAME: &str = "Name";
pub const COLUMN_LATITUDE: &str = "Latitude";
pub const COLUMN_LONGITUDE: &str = "Longitude";
pub const COLUMN_AGE: &str = "Age";

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    name: usize,
    latitude: usize,
    longitude: usize,
    age: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> DatasetResult<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(DatasetError::MissingColumn(column))
        };

        Ok(Self {
            name: find(COLUMN_NAME)?,
            latitude: find(COLUMN_LATITUDE)?,
            longitude: find(COLUMN_LONGITUDE)?,
            age: find(COLUMN_AGE)?,
        })
    }
}

/// Loads reactor datasets under a fixed missing-value policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetLoader {
    policy: MissingValuePolicy,
}

impl DatasetLoader {
    pub fn new(policy: MissingValuePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MissingValuePolicy {
        self.policy
    }

    /// Loads a dataset from a CSV file on disk.
    pub fn load_path(&self, path: &Path) -> DatasetResult<Dataset> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load(file)
    }

    /// Loads a dataset from in-memory CSV bytes (e.g. an HTTP upload).
    pub fn load_bytes(&self, bytes: &[u8]) -> DatasetResult<Dataset> {
        self.load(bytes)
    }

    /// Loads a dataset from any CSV reader.
    pub fn load<R: Read>(&self, reader: R) -> DatasetResult<Dataset> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

        let mut records = Vec::new();
        let mut filled_cells = 0;

        for (index, row) in csv_reader.records().enumerate() {
            let row = row?;
            let row_number = index + 1;

            let name = row.get(columns.name).unwrap_or("").to_string();
            if name.is_empty() {
                return Err(DatasetError::BlankValue {
                    row: row_number,
                    column: COLUMN_NAME,
                });
            }

            let latitude = self.coordinate(&row, columns.latitude, row_number, COLUMN_LATITUDE)?;
            let longitude =
                self.coordinate(&row, columns.longitude, row_number, COLUMN_LONGITUDE)?;
            check_range(latitude.0, LATITUDE_RANGE, row_number, COLUMN_LATITUDE)?;
            check_range(longitude.0, LONGITUDE_RANGE, row_number, COLUMN_LONGITUDE)?;

            let age = match parse_cell(&row, columns.age, row_number, COLUMN_AGE)? {
                Some(age) => Some(age),
                None => match self.policy {
                    MissingValuePolicy::FillZero => {
                        filled_cells += 1;
                        Some(0.0)
                    }
                    MissingValuePolicy::Preserve => None,
                },
            };

            filled_cells += usize::from(latitude.1) + usize::from(longitude.1);
            records.push(ReactorRecord::new(name, latitude.0, longitude.0, age));
        }

        Ok(Dataset::with_filled_cells(records, filled_cells))
    }

    /// Returns the coordinate value and whether it was filled by the policy.
    fn coordinate(
        &self,
        row: &csv::StringRecord,
        index: usize,
        row_number: usize,
        column: &'static str,
    ) -> DatasetResult<(f64, bool)> {
        match parse_cell(row, index, row_number, column)? {
            Some(value) => Ok((value, false)),
            None => match self.policy {
                MissingValuePolicy::FillZero => Ok((0.0, true)),
                MissingValuePolicy::Preserve => Err(DatasetError::BlankValue {
                    row: row_number,
                    column,
                }),
            },
        }
    }
}

/// Parses a numeric cell. Blank cells yield `None`.
fn parse_cell(
    row: &csv::StringRecord,
    index: usize,
    row_number: usize,
    column: &'static str,
) -> DatasetResult<Option<f64>> {
    let raw = row.get(index).unwrap_or("");
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| DatasetError::InvalidNumber {
            row: row_number,
            column,
            value: raw.to_string(),
        })
}

fn check_range(
    value: f64,
    (min, max): (f64, f64),
    row_number: usize,
    column: &'static str,
) -> DatasetResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DatasetError::OutOfRange {
            row: row_number,
            column,
            value,
            min,
            max,
        })
    }
}
