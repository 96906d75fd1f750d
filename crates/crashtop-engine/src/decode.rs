use crate::query::{
    FOLD_CALLSTACK, FOLD_CLASSIFIERS, FOLD_COUNT, FOLD_PLATFORM, FOLD_TIMESTAMP, FOLD_VERSION,
    FOLDS,
};
use crate::sanitize::{redact_paths, sanitize_frame};
use crashtop_types::histogram::{self, scalar_label};
use crashtop_types::{CrashGroup, Error, timefmt};
use serde_json::Value;

const PREVIEW_BYTES: usize = 500;

/// Caller context for one decode pass.
#[derive(Debug, Clone)]
pub struct DecodeOptions<'a> {
    /// Length of the lookback window, for the crashes-per-day rate.
    pub window_days: i64,
    /// Cap on the number of sanitized frames kept per group.
    pub max_frames: usize,
    /// Groups with fewer occurrences are dropped.
    pub min_count: u64,
    /// Window start; groups first seen at or after this are flagged new.
    pub window_start_ts: i64,
    /// Reference time for recency labels.
    pub now_ts: i64,
    /// Project name, for triage URLs.
    pub project: &'a str,
    /// Backend endpoint, for triage URLs.
    pub endpoint: &'a str,
}

/// Decode one backend response into an unranked sequence of crash groups.
///
/// The response carries an RLE-encoded results array under
/// `response.values`, each entry `[fingerprint, [fold_result, ...]]` with
/// fold results positioned per [`FOLDS`]. Individually malformed entries
/// are skipped; only a missing or ill-typed top-level container is an
/// error.
pub fn decode_response(response: &Value, opts: &DecodeOptions) -> Result<Vec<CrashGroup>, Error> {
    let Some(container) = response.get("response").and_then(Value::as_object) else {
        return Err(Error::MalformedResponse {
            preview: body_preview(response),
        });
    };

    let values = match container.get("values") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(values)) => values,
        Some(_) => {
            return Err(Error::MalformedResponse {
                preview: body_preview(response),
            });
        }
    };

    Ok(values
        .iter()
        .filter_map(|entry| decode_entry(entry, opts))
        .collect())
}

fn decode_entry(entry: &Value, opts: &DecodeOptions) -> Option<CrashGroup> {
    let entry = entry.as_array()?;
    if entry.len() < 2 {
        return None;
    }

    let fingerprint = scalar_label(&entry[0]);
    let folds = entry[1].as_array()?;
    if folds.len() < FOLDS.len() {
        return None;
    }

    let count = fold_count(&folds[FOLD_COUNT]);
    if count < opts.min_count {
        return None;
    }

    let frames: Vec<String> = callstack_frames(head_value(&folds[FOLD_CALLSTACK]))
        .iter()
        .filter(|f| !f.trim().is_empty())
        .map(|f| sanitize_frame(f))
        .take(opts.max_frames)
        .collect();

    let classifier = match &folds[FOLD_CLASSIFIERS] {
        Value::Array(arr) if !arr.is_empty() => scalar_label(&arr[0]),
        Value::String(s) => s.clone(),
        _ => "unknown".to_string(),
    };

    let (first_seen_ts, last_seen_ts) = match folds[FOLD_TIMESTAMP].as_array() {
        Some(range) if range.len() >= 2 => (ts_value(&range[0]), ts_value(&range[1])),
        Some(range) if range.len() == 1 => {
            let ts = ts_value(&range[0]);
            (ts, ts)
        }
        _ => (None, None),
    };

    let versions = histogram::canonicalize(&folds[FOLD_VERSION]);
    let platforms = histogram::canonicalize(&folds[FOLD_PLATFORM]);

    let crashes_per_day = round1(count as f64 / opts.window_days.max(1) as f64);
    let top_frame = frames
        .first()
        .cloned()
        .unwrap_or_else(|| "unknown".to_string());

    let (top_platform, platform_share) = match histogram::dominant(&platforms) {
        Some((bucket, share)) => (Some(bucket), share),
        None => (None, 0.0),
    };
    let (top_version, version_share) = match histogram::dominant(&versions) {
        Some((bucket, share)) => (Some(bucket), share),
        None => (None, 0.0),
    };

    let is_new = first_seen_ts.is_some_and(|ts| ts >= opts.window_start_ts);

    let signature = format!(
        "{} ({}) on {} {}",
        top_frame,
        classifier,
        top_platform.as_deref().unwrap_or("unknown"),
        top_version.as_deref().unwrap_or("unknown"),
    );
    let suggested_title = format!("Crash: {}", signature);

    let mut labels = vec!["crash".to_string()];
    if let Some(platform) = &top_platform {
        labels.push(platform.to_lowercase().replace(' ', "-"));
    }
    if is_new {
        labels.push("regression".to_string());
    }

    let triage_url = format!(
        "{}/p/{}/triage?fingerprints={}",
        opts.endpoint,
        urlencoding::encode(opts.project),
        urlencoding::encode(&fingerprint),
    );

    Some(CrashGroup {
        fingerprint,
        count,
        crashes_per_day,
        classifier,
        top_frame,
        signature,
        callstack: frames,
        platforms,
        top_platform,
        platform_pct: round1(platform_share * 100.0),
        versions,
        top_version,
        version_pct: round1(version_share * 100.0),
        first_seen: timefmt::format_timestamp(first_seen_ts),
        first_seen_ts,
        last_seen: timefmt::format_timestamp(last_seen_ts),
        last_seen_ts,
        recency: timefmt::format_recency(last_seen_ts, opts.now_ts),
        is_new,
        triage_url,
        suggested_title,
        labels,
        rank: None,
        regression: None,
    })
}

/// Unwrap the head pattern: a fold result wrapped in a one-element array.
fn head_value(value: &Value) -> &Value {
    match value {
        Value::Array(arr) if !arr.is_empty() => &arr[0],
        other => other,
    }
}

fn fold_count(value: &Value) -> u64 {
    let scalar = head_value(value);
    scalar
        .as_u64()
        .or_else(|| scalar.as_f64().map(|f| f.max(0.0) as u64))
        .unwrap_or(0)
}

fn ts_value(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

/// Parse a callstack fold result into raw frame strings.
///
/// The backend encodes callstacks three ways: a JSON object with a `frame`
/// array, a bare JSON array, or plain newline-delimited text. Non-string
/// scalars become a single frame.
fn callstack_frames(raw: &Value) -> Vec<String> {
    match raw {
        Value::Null => Vec::new(),
        Value::String(s) => parse_callstack_text(s),
        other => vec![scalar_label(other)],
    }
}

fn parse_callstack_text(raw: &str) -> Vec<String> {
    if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
        match parsed {
            Value::Object(map) => {
                if let Some(Value::Array(frames)) = map.get("frame") {
                    return frames.iter().map(scalar_label).collect();
                }
            }
            Value::Array(frames) => return frames.iter().map(scalar_label).collect(),
            _ => {}
        }
    }
    raw.split('\n').map(str::to_string).collect()
}

/// Length-bounded, path-redacted preview of an unparseable body.
pub fn body_preview(value: &Value) -> String {
    let rendered = value.to_string();
    let bounded: String = rendered.chars().take(PREVIEW_BYTES).collect();
    redact_paths(&bounded)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
