use super::RenderContext;
use anyhow::Result;
use crashtop_types::{CrashGroup, Histogram};
use std::fmt::Write;

const BREAKDOWN_BUCKETS: usize = 5;

/// Narrative report: copy/paste-ready markdown with one section per group.
pub fn render(crashers: &[CrashGroup], ctx: &RenderContext) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "# Top Crashers Report")?;
    writeln!(out)?;
    writeln!(
        out,
        "> PII-safe aggregate summary. For full crash details, use the triage URLs below."
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "**Lookback:** {} days | **Generated:** {} | **Crashers:** {}",
        ctx.lookback_days,
        ctx.generated_utc.format("%Y-%m-%d %H:%M UTC"),
        crashers.len()
    )?;
    writeln!(out)?;

    if crashers.is_empty() {
        writeln!(out, "No crashes found matching the criteria.")?;
        return Ok(out.trim_end().to_string());
    }

    for crasher in crashers {
        write_group(&mut out, crasher, ctx)?;
    }

    Ok(out.trim_end().to_string())
}

fn write_group(out: &mut String, crasher: &CrashGroup, ctx: &RenderContext) -> Result<()> {
    let badge = if ctx.compare_mode {
        match &crasher.regression {
            Some(info) => format!(" [{}]", info.badge),
            None => String::new(),
        }
    } else if crasher.is_new {
        " [NEW]".to_string()
    } else {
        String::new()
    };

    writeln!(
        out,
        "### #{} — {}{}",
        crasher.rank.unwrap_or(0),
        crasher.suggested_title,
        badge
    )?;
    writeln!(out)?;

    writeln!(out, "| Field | Value |")?;
    writeln!(out, "|-------|-------|")?;
    writeln!(out, "| Fingerprint | `{}` |", crasher.fingerprint)?;
    writeln!(
        out,
        "| Count | {} ({:.1}/day) |",
        with_commas(crasher.count),
        crasher.crashes_per_day
    )?;
    writeln!(out, "| Classifier | {} |", crasher.classifier)?;

    if let Some(platform) = &crasher.top_platform {
        writeln!(
            out,
            "| Top platform | {} ({:.1}%) |",
            platform, crasher.platform_pct
        )?;
    }
    if let Some(version) = &crasher.top_version {
        writeln!(
            out,
            "| Top version | {} ({:.1}%) |",
            version, crasher.version_pct
        )?;
    }
    writeln!(out, "| First seen | {} |", crasher.first_seen)?;
    writeln!(
        out,
        "| Last seen | {} ({}) |",
        crasher.last_seen, crasher.recency
    )?;

    if ctx.compare_mode
        && let Some(info) = &crasher.regression
    {
        writeln!(out, "| Baseline count | {} |", with_commas(info.baseline_count))?;
        if !info.change_factor.is_infinite() {
            writeln!(out, "| Change factor | {}x |", info.change_factor)?;
        }
    }
    writeln!(out, "| Triage | {} |", crasher.triage_url)?;
    writeln!(out)?;

    if !crasher.callstack.is_empty() {
        writeln!(
            out,
            "**Callstack (top {} frames):**",
            crasher.callstack.len()
        )?;
        writeln!(out, "```")?;
        for frame in &crasher.callstack {
            writeln!(out, "{}", frame)?;
        }
        writeln!(out, "```")?;
        writeln!(out)?;
    }

    if crasher.platforms.len() > 1 {
        writeln!(
            out,
            "**Platforms:** {}",
            breakdown(&crasher.platforms)
        )?;
        writeln!(out)?;
    }

    if crasher.versions.len() > 1 {
        writeln!(out, "**Versions:** {}", breakdown(&crasher.versions))?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "**Suggested issue title:** {}",
        crasher.suggested_title
    )?;
    writeln!(out, "**Labels:** {}", crasher.labels.join(", "))?;
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;
    Ok(())
}

/// Top buckets by count with integer-percent shares, e.g.
/// "Windows (75%), Darwin (25%)".
fn breakdown(histogram: &Histogram) -> String {
    let total: u64 = histogram.values().sum();
    if total == 0 {
        return String::new();
    }

    let mut buckets: Vec<(&String, &u64)> = histogram.iter().collect();
    buckets.sort_by(|a, b| b.1.cmp(a.1));

    buckets
        .iter()
        .take(BREAKDOWN_BUCKETS)
        .map(|&(bucket, &count)| {
            let pct = (count as f64 / total as f64 * 100.0).round();
            format!("{} ({}%)", bucket, pct)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
