//! Safety Classification Tests
//!
//! Age thresholds and map colors:
//! - age < 15 is Safe
//! - 20 <= age < 40 is Moderate
//! - everything else with a known age is Dangerous, including the 15..20 gap
//! - missing age is Unknown and renders with the fallback color

use reactorwatch::safety::{classify, color_for, Color, SafetyTier};

// =============================================================================
// Boundary Table
// =============================================================================

#[test]
fn test_boundary_table() {
    let table = [
        (0.0, SafetyTier::Safe),
        (14.999, SafetyTier::Safe),
        (15.0, SafetyTier::Dangerous),
        (19.999, SafetyTier::Dangerous),
        (20.0, SafetyTier::Moderate),
        (39.999, SafetyTier::Moderate),
        (40.0, SafetyTier::Dangerous),
        (65.0, SafetyTier::Dangerous),
    ];

    for (age, expected) in table {
        assert_eq!(classify(Some(age)), expected, "age {}", age);
    }
}

/// Negative ages are still "< 15".
#[test]
fn test_negative_age_is_safe() {
    assert_eq!(classify(Some(-3.0)), SafetyTier::Safe);
}

// =============================================================================
// Totality
// =============================================================================

#[test]
fn test_missing_age_is_unknown() {
    assert_eq!(classify(None), SafetyTier::Unknown);
    assert_eq!(classify(Some(f64::NAN)), SafetyTier::Unknown);
}

/// Same input, same tier, every time.
#[test]
fn test_classification_is_deterministic() {
    for tenth in 0..600 {
        let age = f64::from(tenth) / 10.0;
        let first = classify(Some(age));
        for _ in 0..3 {
            assert_eq!(classify(Some(age)), first);
        }
    }
}

// =============================================================================
// Colors
// =============================================================================

#[test]
fn test_tier_colors() {
    assert_eq!(color_for(SafetyTier::Safe), Color::Green);
    assert_eq!(color_for(SafetyTier::Moderate), Color::Red);
    assert_eq!(color_for(SafetyTier::Dangerous), Color::Purple);
}

#[test]
fn test_unknown_uses_fallback_color() {
    assert_eq!(color_for(SafetyTier::Unknown), Color::Blue);
    assert_eq!(color_for(SafetyTier::Unknown), Color::FALLBACK);
}

#[test]
fn test_colors_serialize_lowercase() {
    let json = serde_json::to_string(&color_for(SafetyTier::Moderate)).unwrap();
    assert_eq!(json, "\"red\"");
}
