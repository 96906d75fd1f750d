use serde_json::{Map, Value, json};

/// One server-side aggregate ("fold") attached to a grouped query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldSpec {
    pub attribute: &'static str,
    pub operator: &'static str,
}

/// The ordered fold schema shared by the query builder and the decoder.
///
/// The backend returns fold results positionally, in the order the folds
/// were requested. Both sides index through this one table; reordering it
/// reorders the request and the decode mapping together.
pub const FOLDS: [FoldSpec; 6] = [
    FoldSpec { attribute: "fingerprint", operator: "count" },
    FoldSpec { attribute: "callstack", operator: "head" },
    FoldSpec { attribute: "classifiers", operator: "head" },
    FoldSpec { attribute: "timestamp", operator: "range" },
    FoldSpec { attribute: "version", operator: "histogram" },
    FoldSpec { attribute: "uname.sysname", operator: "histogram" },
];

/// Positional indices into a decoded entry's fold-result list.
pub const FOLD_COUNT: usize = 0;
pub const FOLD_CALLSTACK: usize = 1;
pub const FOLD_CLASSIFIERS: usize = 2;
pub const FOLD_TIMESTAMP: usize = 3;
pub const FOLD_VERSION: usize = 4;
pub const FOLD_PLATFORM: usize = 5;

/// Inputs for one top-crashers query: an inclusive time window, a result
/// cap, and optional attribute filters.
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    pub start_ts: i64,
    pub end_ts: i64,
    pub limit: usize,
    pub platform: Option<String>,
    pub version_prefix: Option<String>,
    pub channel: Option<String>,
}

/// Build the coronerd query body for top crashers.
///
/// Pure and deterministic: the same spec always yields the same body.
/// Groups by fingerprint, requests the folds from [`FOLDS`] in order, and
/// sorts by count descending server-side.
pub fn build_query(spec: &QuerySpec) -> Value {
    let mut filters = Map::new();
    filters.insert(
        "timestamp".to_string(),
        json!([["at-least", spec.start_ts], ["at-most", spec.end_ts]]),
    );
    if let Some(platform) = &spec.platform {
        filters.insert("uname.sysname".to_string(), json!([["equal", platform]]));
    }
    if let Some(prefix) = &spec.version_prefix {
        let anchored = format!("^{}", regex::escape(prefix));
        filters.insert(
            "version".to_string(),
            json!([["regular-expression", anchored]]),
        );
    }
    if let Some(channel) = &spec.channel {
        filters.insert("channel".to_string(), json!([["equal", channel]]));
    }

    let mut folds = Map::new();
    for fold in FOLDS {
        folds.insert(fold.attribute.to_string(), json!([[fold.operator]]));
    }

    json!({
        "group": ["fingerprint"],
        "fold": folds,
        "filter": [filters],
        "order": [{"name": ";count", "ordering": "descending"}],
        "limit": spec.limit,
    })
}
