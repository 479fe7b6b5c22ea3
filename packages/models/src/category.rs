//! AQI category taxonomy and classifier.
//!
//! Categories follow the Indian national AQI scale: six severity buckets
//! with inclusive upper bounds at 50, 100, 200, 300, and 400. Anything
//! above 400 is Severe. Classification is a total function of the AQI
//! value; there are no failure modes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity bucket for an AQI value, from Good to Severe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AqiCategory {
    /// AQI 0-50: minimal impact.
    Good,
    /// AQI 51-100: minor breathing discomfort to sensitive people.
    Satisfactory,
    /// AQI 101-200: breathing discomfort to people with lung disease.
    Moderate,
    /// AQI 201-300: breathing discomfort on prolonged exposure.
    Poor,
    /// AQI 301-400: respiratory illness on prolonged exposure.
    #[serde(rename = "Very Poor")]
    #[strum(serialize = "Very Poor")]
    VeryPoor,
    /// AQI above 400: affects healthy people, serious impact on the ill.
    Severe,
}

/// Ordered category thresholds. Each entry is the inclusive upper AQI
/// bound for its category; Severe is the catch-all for anything above
/// the last finite bound.
const THRESHOLDS: &[(f64, AqiCategory)] = &[
    (50.0, AqiCategory::Good),
    (100.0, AqiCategory::Satisfactory),
    (200.0, AqiCategory::Moderate),
    (300.0, AqiCategory::Poor),
    (400.0, AqiCategory::VeryPoor),
];

impl AqiCategory {
    /// Display color (hex) used by dashboards for this category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Good => "#10b981",
            Self::Satisfactory => "#84cc16",
            Self::Moderate => "#eab308",
            Self::Poor => "#f97316",
            Self::VeryPoor => "#ef4444",
            Self::Severe => "#7f1d1d",
        }
    }
}

/// Classifies an AQI value into its severity category.
///
/// Boundary values belong to the lower bucket: an AQI of exactly 100 is
/// Satisfactory, not Moderate. Values above every finite threshold fall
/// through to Severe.
#[must_use]
pub fn classify(aqi: f64) -> AqiCategory {
    for &(limit, category) in THRESHOLDS {
        if aqi <= limit {
            return category;
        }
    }
    AqiCategory::Severe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_lower_bucket() {
        assert_eq!(classify(50.0), AqiCategory::Good);
        assert_eq!(classify(100.0), AqiCategory::Satisfactory);
        assert_eq!(classify(200.0), AqiCategory::Moderate);
        assert_eq!(classify(300.0), AqiCategory::Poor);
        assert_eq!(classify(400.0), AqiCategory::VeryPoor);
        assert_eq!(classify(400.1), AqiCategory::Severe);
    }

    #[test]
    fn severity_is_monotonic_in_aqi() {
        let mut previous = classify(0.0);
        for aqi in 1..=600 {
            let current = classify(f64::from(aqi));
            assert!(
                current >= previous,
                "classify({aqi}) regressed from {previous} to {current}"
            );
            previous = current;
        }
    }

    #[test]
    fn extreme_values_are_severe() {
        assert_eq!(classify(500.0), AqiCategory::Severe);
        assert_eq!(classify(9999.0), AqiCategory::Severe);
    }

    #[test]
    fn classification_is_idempotent() {
        assert_eq!(classify(333.0), classify(333.0));
    }

    #[test]
    fn very_poor_displays_with_space() {
        assert_eq!(AqiCategory::VeryPoor.to_string(), "Very Poor");
        assert_eq!(AqiCategory::Good.to_string(), "Good");
    }

    #[test]
    fn each_category_has_a_distinct_color() {
        let colors = [
            AqiCategory::Good.color(),
            AqiCategory::Satisfactory.color(),
            AqiCategory::Moderate.color(),
            AqiCategory::Poor.color(),
            AqiCategory::VeryPoor.color(),
            AqiCategory::Severe.color(),
        ];
        let mut unique = colors.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), colors.len());
    }
}
