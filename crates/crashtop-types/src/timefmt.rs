use chrono::DateTime;

/// Format a unix timestamp as an ISO date string, "unknown" when absent.
pub fn format_timestamp(ts: Option<i64>) -> String {
    match ts.and_then(|t| DateTime::from_timestamp(t, 0)) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "unknown".to_string(),
    }
}

/// Format a unix timestamp as a recency label relative to `now_ts`.
pub fn format_recency(ts: Option<i64>, now_ts: i64) -> String {
    let Some(ts) = ts else {
        return "unknown".to_string();
    };

    let delta = now_ts - ts;
    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        format!("{}m ago", delta / 60)
    } else if delta < 86400 {
        format!("{}h ago", delta / 3600)
    } else {
        format!("{}d ago", delta / 86400)
    }
}
