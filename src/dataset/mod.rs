//! Reactor dataset loading
//!
//! Parses a CSV of reactors into typed records. Loading is all-or-nothing:
//! a malformed file, a missing required column or an invalid cell fails the
//! whole load and nothing is retried.

mod errors;
mod loader;
mod types;

pub use errors::{DatasetError, DatasetResult};
pub use loader::{DatasetLoader, COLUMN_AGE, COLUMN_LATITUDE, COLUMN_LONGITUDE, COLUMN_NAME};
pub use types::{Dataset, MissingValuePolicy, ReactorRecord, LATITUDE_RANGE, LONGITUDE_RANGE};
