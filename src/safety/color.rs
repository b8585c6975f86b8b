//! Render colors for safety tiers

use std::fmt;

use serde::{Deserialize, Serialize};

use super::classifier::SafetyTier;

/// Marker/circle color consumed by the map layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Purple,
    Blue,
}

impl Color {
    /// Fallback for tiers without an explicit color
    pub const FALLBACK: Color = Color::Blue;

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Purple => "purple",
            Color::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the render color for a tier.
pub fn color_for(tier: SafetyTier) -> Color {
    match tier {
        SafetyTier::Safe => Color::Green,
        SafetyTier::Moderate => Color::Red,
        SafetyTier::Dangerous => Color::Purple,
        _ => Color::FALLBACK,
    }
}
