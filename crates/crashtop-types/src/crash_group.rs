use crate::histogram::Histogram;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Trend classification produced by comparing two windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegressionBadge {
    New,
    Rising,
    Stable,
    Falling,
}

impl RegressionBadge {
    /// Sort priority in comparison output: NEW first, FALLING last.
    pub fn priority(self) -> u8 {
        match self {
            RegressionBadge::New => 0,
            RegressionBadge::Rising => 1,
            RegressionBadge::Stable => 2,
            RegressionBadge::Falling => 3,
        }
    }

    /// Classify a change factor into RISING/STABLE/FALLING.
    ///
    /// Boundary values (exactly 2.0 or 0.5) are STABLE. An infinite factor
    /// exceeds the 2.0 threshold and is RISING. NEW is assigned by the
    /// window join, not here.
    pub fn classify(factor: ChangeFactor) -> Self {
        match factor {
            ChangeFactor::Infinite => RegressionBadge::Rising,
            ChangeFactor::Ratio(v) if v > 2.0 => RegressionBadge::Rising,
            ChangeFactor::Ratio(v) if v < 0.5 => RegressionBadge::Falling,
            ChangeFactor::Ratio(_) => RegressionBadge::Stable,
        }
    }
}

impl fmt::Display for RegressionBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionBadge::New => write!(f, "NEW"),
            RegressionBadge::Rising => write!(f, "RISING"),
            RegressionBadge::Stable => write!(f, "STABLE"),
            RegressionBadge::Falling => write!(f, "FALLING"),
        }
    }
}

/// Ratio of recent count to baseline count, with an explicit sentinel for
/// fingerprints that have no usable baseline (absent, or baseline count 0).
///
/// The raw ratio is kept unrounded for classification; serialization rounds
/// to one decimal. The sentinel serializes as the JSON string `"inf"` so
/// JSON/NDJSON consumers never see a bare `Infinity` token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChangeFactor {
    Ratio(f64),
    Infinite,
}

impl ChangeFactor {
    pub fn is_infinite(self) -> bool {
        matches!(self, ChangeFactor::Infinite)
    }

    /// Value rounded to one decimal, None for the infinite sentinel.
    pub fn rounded(self) -> Option<f64> {
        match self {
            ChangeFactor::Ratio(v) => Some((v * 10.0).round() / 10.0),
            ChangeFactor::Infinite => None,
        }
    }
}

impl fmt::Display for ChangeFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rounded() {
            Some(v) => write!(f, "{:.1}", v),
            None => write!(f, "inf"),
        }
    }
}

impl Serialize for ChangeFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.rounded() {
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_str("inf"),
        }
    }
}

impl<'de> Deserialize<'de> for ChangeFactor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(v) => Ok(ChangeFactor::Ratio(v)),
            Raw::Text(s) if s == "inf" => Ok(ChangeFactor::Infinite),
            Raw::Text(s) => Err(D::Error::custom(format!("invalid change factor: {}", s))),
        }
    }
}

/// Comparison-mode annotation attached to a crash group by the window join.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionInfo {
    #[serde(rename = "regression_badge")]
    pub badge: RegressionBadge,
    pub change_factor: ChangeFactor,
    pub baseline_count: u64,
}

/// One deduplicated crash signature within a query window.
///
/// Created once per decode pass; the regression analyzer may attach
/// `regression` in place; `rank` is assigned after sorting and the record
/// is treated as immutable from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashGroup {
    pub fingerprint: String,
    pub count: u64,
    pub crashes_per_day: f64,
    pub classifier: String,
    pub top_frame: String,
    pub signature: String,
    pub callstack: Vec<String>,
    pub platforms: Histogram,
    pub top_platform: Option<String>,
    pub platform_pct: f64,
    pub versions: Histogram,
    pub top_version: Option<String>,
    pub version_pct: f64,
    pub first_seen: String,
    pub first_seen_ts: Option<i64>,
    pub last_seen: String,
    pub last_seen_ts: Option<i64>,
    pub recency: String,
    pub is_new: bool,
    pub triage_url: String,
    pub suggested_title: String,
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    #[serde(flatten)]
    pub regression: Option<RegressionInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_boundaries_are_stable() {
        assert_eq!(
            RegressionBadge::classify(ChangeFactor::Ratio(2.0)),
            RegressionBadge::Stable
        );
        assert_eq!(
            RegressionBadge::classify(ChangeFactor::Ratio(0.5)),
            RegressionBadge::Stable
        );
    }

    #[test]
    fn test_badge_classification() {
        assert_eq!(
            RegressionBadge::classify(ChangeFactor::Ratio(2.5)),
            RegressionBadge::Rising
        );
        assert_eq!(
            RegressionBadge::classify(ChangeFactor::Ratio(0.2)),
            RegressionBadge::Falling
        );
        assert_eq!(
            RegressionBadge::classify(ChangeFactor::Ratio(1.0)),
            RegressionBadge::Stable
        );
        assert_eq!(
            RegressionBadge::classify(ChangeFactor::Infinite),
            RegressionBadge::Rising
        );
    }

    #[test]
    fn test_badge_priority_order() {
        assert!(RegressionBadge::New.priority() < RegressionBadge::Rising.priority());
        assert!(RegressionBadge::Rising.priority() < RegressionBadge::Stable.priority());
        assert!(RegressionBadge::Stable.priority() < RegressionBadge::Falling.priority());
    }

    #[test]
    fn test_change_factor_serialization() {
        assert_eq!(
            serde_json::to_string(&ChangeFactor::Ratio(2.456)).unwrap(),
            "2.5"
        );
        assert_eq!(
            serde_json::to_string(&ChangeFactor::Infinite).unwrap(),
            "\"inf\""
        );
    }

    #[test]
    fn test_change_factor_roundtrip() {
        let inf: ChangeFactor = serde_json::from_str("\"inf\"").unwrap();
        assert!(inf.is_infinite());
        let ratio: ChangeFactor = serde_json::from_str("1.5").unwrap();
        assert_eq!(ratio, ChangeFactor::Ratio(1.5));
    }

    #[test]
    fn test_classification_uses_unrounded_ratio() {
        // 2.04 rounds to 2.0 for display but still exceeds the threshold.
        assert_eq!(
            RegressionBadge::classify(ChangeFactor::Ratio(2.04)),
            RegressionBadge::Rising
        );
    }
}
