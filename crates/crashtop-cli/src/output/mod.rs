mod json;
mod markdown;
mod ndjson;
mod record;
mod table;

use crate::types::OutputFormat;
use anyhow::Result;
use chrono::{DateTime, Utc};
use crashtop_types::CrashGroup;

/// Presentation-only context shared by all renderers.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub lookback_days: i64,
    pub generated_utc: DateTime<Utc>,
    pub compare_mode: bool,
}

/// Render a ranked group sequence into the selected encoding.
///
/// Every renderer consumes the same slice and only re-encodes fields; no
/// business value is computed here.
pub fn render(
    crashers: &[CrashGroup],
    format: OutputFormat,
    ctx: &RenderContext,
) -> Result<String> {
    match format {
        OutputFormat::Markdown => markdown::render(crashers, ctx),
        OutputFormat::Json => json::render(crashers, ctx),
        OutputFormat::Ndjson => ndjson::render(crashers, ctx),
        OutputFormat::Csv => table::render(crashers, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crashtop_types::{
        ChangeFactor, CrashGroup, Histogram, RegressionBadge, RegressionInfo,
    };
    use serde_json::Value;

    fn sample_groups() -> Vec<CrashGroup> {
        let mut platforms = Histogram::new();
        platforms.insert("Windows".to_string(), 900);
        platforms.insert("Darwin".to_string(), 304);
        let mut versions = Histogram::new();
        versions.insert("1.62.100".to_string(), 1204);

        let first = CrashGroup {
            fingerprint: "fp-aaa".to_string(),
            count: 1204,
            crashes_per_day: 172.0,
            classifier: "SIGSEGV".to_string(),
            top_frame: "RenderFrameHostImpl::Detach".to_string(),
            signature: "RenderFrameHostImpl::Detach (SIGSEGV) on Windows 1.62.100".to_string(),
            callstack: vec![
                "RenderFrameHostImpl::Detach".to_string(),
                "RunLoop::Run".to_string(),
            ],
            platforms,
            top_platform: Some("Windows".to_string()),
            platform_pct: 74.8,
            versions,
            top_version: Some("1.62.100".to_string()),
            version_pct: 100.0,
            first_seen: "2026-01-01 00:00 UTC".to_string(),
            first_seen_ts: Some(1_767_225_600),
            last_seen: "2026-01-07 00:00 UTC".to_string(),
            last_seen_ts: Some(1_767_744_000),
            recency: "2h ago".to_string(),
            is_new: true,
            triage_url: "https://unit.test/p/browser/triage?fingerprints=fp-aaa".to_string(),
            suggested_title: "Crash: RenderFrameHostImpl::Detach (SIGSEGV) on Windows 1.62.100"
                .to_string(),
            labels: vec!["crash".to_string(), "windows".to_string()],
            rank: Some(1),
            regression: Some(RegressionInfo {
                badge: RegressionBadge::Rising,
                change_factor: ChangeFactor::Ratio(2.5),
                baseline_count: 480,
            }),
        };

        let mut second = first.clone();
        second.fingerprint = "fp-bbb".to_string();
        second.count = 88;
        second.rank = Some(2);
        second.regression = Some(RegressionInfo {
            badge: RegressionBadge::New,
            change_factor: ChangeFactor::Infinite,
            baseline_count: 0,
        });

        vec![first, second]
    }

    fn ctx(compare_mode: bool) -> RenderContext {
        RenderContext {
            lookback_days: 7,
            generated_utc: chrono::Utc.with_ymd_and_hms(2026, 1, 7, 12, 0, 0).unwrap(),
            compare_mode,
        }
    }

    #[test]
    fn test_formats_agree_on_rank_fingerprint_count() {
        let groups = sample_groups();
        let ctx = ctx(true);

        let json_doc: Value =
            serde_json::from_str(&render(&groups, OutputFormat::Json, &ctx).unwrap()).unwrap();
        let ndjson_out = render(&groups, OutputFormat::Ndjson, &ctx).unwrap();
        let csv_out = render(&groups, OutputFormat::Csv, &ctx).unwrap();
        let md_out = render(&groups, OutputFormat::Markdown, &ctx).unwrap();

        let ndjson_rows: Vec<Value> = ndjson_out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        let mut csv_reader = csv::Reader::from_reader(csv_out.as_bytes());
        let csv_rows: Vec<csv::StringRecord> =
            csv_reader.records().map(|r| r.unwrap()).collect();

        for (i, group) in groups.iter().enumerate() {
            let rank = group.rank.unwrap() as u64;
            let json_row = &json_doc["crashers"][i];
            assert_eq!(json_row["rank"].as_u64().unwrap(), rank);
            assert_eq!(json_row["fingerprint"], group.fingerprint.as_str());
            assert_eq!(json_row["count"].as_u64().unwrap(), group.count);

            assert_eq!(ndjson_rows[i]["rank"].as_u64().unwrap(), rank);
            assert_eq!(ndjson_rows[i]["fingerprint"], group.fingerprint.as_str());
            assert_eq!(ndjson_rows[i]["count"].as_u64().unwrap(), group.count);

            assert_eq!(csv_rows[i][0], rank.to_string());
            assert_eq!(&csv_rows[i][1], group.fingerprint.as_str());
            assert_eq!(csv_rows[i][2], group.count.to_string());

            assert!(md_out.contains(&format!("### #{} —", rank)));
            assert!(md_out.contains(&format!("`{}`", group.fingerprint)));
        }
    }

    #[test]
    fn test_json_includes_histograms_ndjson_omits_them() {
        let groups = sample_groups();
        let ctx = ctx(false);

        let json_doc: Value =
            serde_json::from_str(&render(&groups, OutputFormat::Json, &ctx).unwrap()).unwrap();
        assert_eq!(json_doc["crashers"][0]["platforms"]["Windows"], 900);

        let first_line = render(&groups, OutputFormat::Ndjson, &ctx)
            .unwrap()
            .lines()
            .next()
            .unwrap()
            .to_string();
        let row: Value = serde_json::from_str(&first_line).unwrap();
        assert!(row.get("platforms").is_none());
        assert!(row.get("versions").is_none());
    }

    #[test]
    fn test_compare_fields_only_in_compare_mode() {
        let groups = sample_groups();

        let single: Value = serde_json::from_str(
            &render(&groups, OutputFormat::Json, &ctx(false)).unwrap(),
        )
        .unwrap();
        assert!(single["crashers"][0].get("regression_badge").is_none());
        assert_eq!(single["compare_mode"], false);

        let compared: Value = serde_json::from_str(
            &render(&groups, OutputFormat::Json, &ctx(true)).unwrap(),
        )
        .unwrap();
        assert_eq!(compared["crashers"][0]["regression_badge"], "RISING");
        assert_eq!(compared["crashers"][0]["change_factor"], 2.5);
        assert_eq!(compared["crashers"][0]["baseline_count"], 480);
        assert_eq!(compared["crashers"][1]["change_factor"], "inf");
    }

    #[test]
    fn test_csv_compare_columns() {
        let groups = sample_groups();
        let csv_out = render(&groups, OutputFormat::Csv, &ctx(true)).unwrap();
        let mut reader = csv::Reader::from_reader(csv_out.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[headers.len() - 3], "regression_badge");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][headers.len() - 3], "RISING");
        assert_eq!(&rows[0][headers.len() - 2], "2.5");
        assert_eq!(&rows[1][headers.len() - 2], "inf");
    }

    #[test]
    fn test_markdown_sections() {
        let groups = sample_groups();
        let md = render(&groups, OutputFormat::Markdown, &ctx(true)).unwrap();
        assert!(md.starts_with("# Top Crashers Report"));
        assert!(md.contains("**Lookback:** 7 days"));
        assert!(md.contains("[RISING]"));
        assert!(md.contains("| Count | 1,204 (172.0/day) |"));
        assert!(md.contains("| Baseline count | 480 |"));
        assert!(md.contains("| Change factor | 2.5x |"));
        assert!(md.contains("**Callstack (top 2 frames):**"));
        assert!(md.contains("**Platforms:** Windows (75%), Darwin (25%)"));
        // Infinite factors omit the change-factor row.
        assert!(md.contains("[NEW]"));
        assert!(!md.contains("| Change factor | infx |"));
    }
}
