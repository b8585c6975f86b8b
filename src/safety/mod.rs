//! Safety classification and tier colors
//!
//! | Age              | Tier      | Color  |
//! |------------------|-----------|--------|
//! | < 15             | Safe      | green  |
//! | [20, 40)         | Moderate  | red    |
//! | [15, 20), >= 40  | Dangerous | purple |
//! | missing          | Unknown   | blue   |

mod classifier;
mod color;

pub use classifier::{classify, SafetyTier, MODERATE_MAX_AGE, MODERATE_MIN_AGE, SAFE_MAX_AGE};
pub use color::{color_for, Color};
