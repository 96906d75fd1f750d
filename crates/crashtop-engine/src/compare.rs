use crashtop_types::{ChangeFactor, CrashGroup, RegressionBadge, RegressionInfo};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Join a recent window against a baseline window to classify trends.
///
/// The join is recent-anchored: fingerprints present only in the baseline
/// are never emitted. Each recent group gets a badge, a change factor, and
/// the baseline count; the result is sorted by badge priority then count
/// descending, densely re-ranked 1..N, and truncated to `limit`.
pub fn compare_windows(
    recent: Vec<CrashGroup>,
    baseline: &[CrashGroup],
    limit: usize,
) -> Vec<CrashGroup> {
    let baseline_counts: HashMap<&str, u64> = baseline
        .iter()
        .map(|g| (g.fingerprint.as_str(), g.count))
        .collect();

    let mut annotated: Vec<CrashGroup> = recent
        .into_iter()
        .map(|mut group| {
            group.regression = Some(match baseline_counts.get(group.fingerprint.as_str()) {
                Some(&base_count) if base_count > 0 => {
                    let factor = ChangeFactor::Ratio(group.count as f64 / base_count as f64);
                    RegressionInfo {
                        badge: RegressionBadge::classify(factor),
                        change_factor: factor,
                        baseline_count: base_count,
                    }
                }
                Some(_) => RegressionInfo {
                    badge: RegressionBadge::classify(ChangeFactor::Infinite),
                    change_factor: ChangeFactor::Infinite,
                    baseline_count: 0,
                },
                None => RegressionInfo {
                    badge: RegressionBadge::New,
                    change_factor: ChangeFactor::Infinite,
                    baseline_count: 0,
                },
            });
            group
        })
        .collect();

    annotated.sort_by_key(|g| {
        let badge = g
            .regression
            .map(|r| r.badge.priority())
            .unwrap_or(u8::MAX);
        (badge, Reverse(g.count))
    });

    annotated.truncate(limit);
    for (i, group) in annotated.iter_mut().enumerate() {
        group.rank = Some(i + 1);
    }
    annotated
}
