use crashtop_types::{CrashGroup, Histogram, RegressionInfo};
use serde::Serialize;

/// Flattened presentation view shared by the JSON and NDJSON renderers.
///
/// Renderers never recompute business values; this struct only selects
/// fields, so the two encodings cannot drift apart. The aggregate JSON
/// document includes the histograms; the line-delimited form omits them.
#[derive(Serialize)]
pub struct CrasherRecord<'a> {
    pub rank: usize,
    pub fingerprint: &'a str,
    pub count: u64,
    pub crashes_per_day: f64,
    pub classifier: &'a str,
    pub top_frame: &'a str,
    pub signature: &'a str,
    pub callstack: &'a [String],
    pub top_platform: Option<&'a str>,
    pub platform_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<&'a Histogram>,
    pub top_version: Option<&'a str>,
    pub version_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<&'a Histogram>,
    pub first_seen: &'a str,
    pub last_seen: &'a str,
    pub recency: &'a str,
    pub is_new: bool,
    pub triage_url: &'a str,
    pub suggested_title: &'a str,
    pub labels: &'a [String],
    #[serde(flatten)]
    pub regression: Option<&'a RegressionInfo>,
}

impl<'a> CrasherRecord<'a> {
    pub fn from_group(
        group: &'a CrashGroup,
        include_histograms: bool,
        compare_mode: bool,
    ) -> Self {
        CrasherRecord {
            rank: group.rank.unwrap_or(0),
            fingerprint: &group.fingerprint,
            count: group.count,
            crashes_per_day: group.crashes_per_day,
            classifier: &group.classifier,
            top_frame: &group.top_frame,
            signature: &group.signature,
            callstack: &group.callstack,
            top_platform: group.top_platform.as_deref(),
            platform_pct: group.platform_pct,
            platforms: include_histograms.then_some(&group.platforms),
            top_version: group.top_version.as_deref(),
            version_pct: group.version_pct,
            versions: include_histograms.then_some(&group.versions),
            first_seen: &group.first_seen,
            last_seen: &group.last_seen,
            recency: &group.recency,
            is_new: group.is_new,
            triage_url: &group.triage_url,
            suggested_title: &group.suggested_title,
            labels: &group.labels,
            regression: compare_mode
                .then_some(group.regression.as_ref())
                .flatten(),
        }
    }
}
