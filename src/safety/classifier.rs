//! Age-based safety classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ages below this are Safe
pub const SAFE_MAX_AGE: f64 = 15.0;
/// Lower bound (inclusive) of the Moderate band
pub const MODERATE_MIN_AGE: f64 = 20.0;
/// Upper bound (exclusive) of the Moderate band
pub const MODERATE_MAX_AGE: f64 = 40.0;

/// Classification bucket derived from reactor age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyTier {
    Safe,
    Moderate,
    Dangerous,
    Unknown,
}

impl SafetyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyTier::Safe => "Safe",
            SafetyTier::Moderate => "Moderate",
            SafetyTier::Dangerous => "Dangerous",
            SafetyTier::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SafetyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a reactor age to its safety tier.
///
/// Total over every input. Ages in `[15, 20)` fall through to `Dangerous`
/// together with everything at or above 40; a missing or NaN age is `Unknown`.
pub fn classify(age: Option<f64>) -> SafetyTier {
    let age = match age {
        Some(age) if !age.is_nan() => age,
        _ => return SafetyTier::Unknown,
    };

    if age < SAFE_MAX_AGE {
        SafetyTier::Safe
    } else if (MODERATE_MIN_AGE..MODERATE_MAX_AGE).contains(&age) {
        SafetyTier::Moderate
    } else {
        SafetyTier::Dangerous
    }
}
