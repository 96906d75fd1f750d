use super::RenderContext;
use anyhow::Result;
use crashtop_types::CrashGroup;

const COLUMNS: [&str; 16] = [
    "rank",
    "fingerprint",
    "count",
    "crashes_per_day",
    "classifier",
    "top_frame",
    "top_platform",
    "platform_pct",
    "top_version",
    "version_pct",
    "first_seen",
    "last_seen",
    "recency",
    "is_new",
    "triage_url",
    "suggested_title",
];

const COMPARE_COLUMNS: [&str; 3] = ["regression_badge", "change_factor", "baseline_count"];

/// Tabular rows: a fixed flat column set, histograms excluded.
pub fn render(crashers: &[CrashGroup], ctx: &RenderContext) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = COLUMNS.to_vec();
    if ctx.compare_mode {
        header.extend(COMPARE_COLUMNS);
    }
    writer.write_record(&header)?;

    for crasher in crashers {
        let mut row = vec![
            crasher.rank.map(|r| r.to_string()).unwrap_or_default(),
            crasher.fingerprint.clone(),
            crasher.count.to_string(),
            format!("{:.1}", crasher.crashes_per_day),
            crasher.classifier.clone(),
            crasher.top_frame.clone(),
            crasher.top_platform.clone().unwrap_or_default(),
            format!("{:.1}", crasher.platform_pct),
            crasher.top_version.clone().unwrap_or_default(),
            format!("{:.1}", crasher.version_pct),
            crasher.first_seen.clone(),
            crasher.last_seen.clone(),
            crasher.recency.clone(),
            crasher.is_new.to_string(),
            crasher.triage_url.clone(),
            crasher.suggested_title.clone(),
        ];

        if ctx.compare_mode {
            match &crasher.regression {
                Some(info) => {
                    row.push(info.badge.to_string());
                    row.push(info.change_factor.to_string());
                    row.push(info.baseline_count.to_string());
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }

        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
