use serde_json::Value;
use std::collections::BTreeMap;

/// Bucket label -> occurrence count. A `BTreeMap` keeps iteration order
/// deterministic, which the dominant-bucket tie-break relies on.
pub type Histogram = BTreeMap<String, u64>;

/// Stringify a scalar JSON value as a bucket label without quoting strings.
pub fn scalar_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Canonicalize a histogram fold result into a `Histogram`.
///
/// The backend returns distributions in one of two shapes: a mapping of
/// `{bucket: count}` or (in the RLE encoding) a list of `[bucket, count]`
/// pairs. Anything else canonicalizes to an empty histogram.
pub fn canonicalize(value: &Value) -> Histogram {
    let mut result = Histogram::new();
    match value {
        Value::Object(map) => {
            for (bucket, count) in map {
                result.insert(bucket.clone(), count_of(count));
            }
        }
        Value::Array(pairs) => {
            for item in pairs {
                if let Some(pair) = item.as_array()
                    && pair.len() >= 2
                {
                    result.insert(scalar_label(&pair[0]), count_of(&pair[1]));
                }
            }
        }
        _ => {}
    }
    result
}

/// The bucket with the highest count and its share of the total (0..1).
///
/// Ties on equal counts resolve to the lexicographically smallest bucket
/// label. Returns None for an empty or all-zero histogram.
pub fn dominant(histogram: &Histogram) -> Option<(String, f64)> {
    let total: u64 = histogram.values().sum();
    if total == 0 {
        return None;
    }

    // Strict greater-than over sorted keys: the first of any tied maximum
    // (the lexicographically smallest label) wins.
    let mut top: Option<(&String, u64)> = None;
    for (bucket, &count) in histogram {
        if top.is_none_or(|(_, best)| count > best) {
            top = Some((bucket, count));
        }
    }

    top.map(|(bucket, count)| (bucket.clone(), count as f64 / total as f64))
}

fn count_of(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|f| f.max(0.0) as u64))
        .unwrap_or(0)
}
