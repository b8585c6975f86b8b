//! Reactor dataset types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Valid latitude range in degrees
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Valid longitude range in degrees
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// One row of the dataset describing a single plant/reactor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Age in years; `None` when the cell was blank and preserved.
    pub age: Option<f64>,
}

impl ReactorRecord {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, age: Option<f64>) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            age,
        }
    }
}

/// How blank cells are treated during load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Blank numeric cells become 0. A blank age therefore classifies as Safe.
    /// A blank `Name` is rejected under either policy.
    #[default]
    FillZero,
    /// Blank ages stay missing (classified Unknown); blank coordinates and
    /// blank names are rejected.
    Preserve,
}

impl MissingValuePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingValuePolicy::FillZero => "fill_zero",
            MissingValuePolicy::Preserve => "preserve",
        }
    }
}

impl fmt::Display for MissingValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingValuePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fill_zero" => Ok(MissingValuePolicy::FillZero),
            "preserve" => Ok(MissingValuePolicy::Preserve),
            other => Err(format!(
                "unknown missing value policy '{}', expected fill_zero or preserve",
                other
            )),
        }
    }
}

/// A loaded dataset, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<ReactorRecord>,
    /// Number of cells replaced by the fill policy
    filled_cells: usize,
}

impl Dataset {
    pub(crate) fn with_filled_cells(records: Vec<ReactorRecord>, filled_cells: usize) -> Self {
        Self {
            records,
            filled_cells,
        }
    }

    pub fn records(&self) -> &[ReactorRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ReactorRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filled_cells(&self) -> usize {
        self.filled_cells
    }
}
