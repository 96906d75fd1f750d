use super::RenderContext;
use super::record::CrasherRecord;
use anyhow::Result;
use crashtop_types::CrashGroup;

/// Line-delimited records: one flattened object per group, histograms
/// omitted.
pub fn render(crashers: &[CrashGroup], ctx: &RenderContext) -> Result<String> {
    let mut lines = Vec::with_capacity(crashers.len());
    for crasher in crashers {
        let record = CrasherRecord::from_group(crasher, false, ctx.compare_mode);
        lines.push(serde_json::to_string(&record)?);
    }
    Ok(lines.join("\n"))
}
