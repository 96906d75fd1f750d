use super::RenderContext;
use super::record::CrasherRecord;
use anyhow::Result;
use crashtop_types::CrashGroup;
use serde_json::json;

/// Aggregate document: generation metadata plus every group with its
/// histograms.
pub fn render(crashers: &[CrashGroup], ctx: &RenderContext) -> Result<String> {
    let records: Vec<CrasherRecord> = crashers
        .iter()
        .map(|c| CrasherRecord::from_group(c, true, ctx.compare_mode))
        .collect();

    let doc = json!({
        "generated_utc": ctx.generated_utc.to_rfc3339(),
        "lookback_days": ctx.lookback_days,
        "total_crashers": crashers.len(),
        "compare_mode": ctx.compare_mode,
        "crashers": records,
    });

    Ok(serde_json::to_string_pretty(&doc)?)
}
