use crashtop_types::CrashGroup;
use std::cmp::Reverse;

/// Sort key for single-window output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Total occurrences, descending.
    #[default]
    Count,
    /// Most recently seen first.
    LastSeen,
    /// Crashes per day, descending.
    Rate,
}

/// Sort a single-window result set and assign dense ranks 1..N.
///
/// With `new_only`, groups first seen before the window are dropped before
/// sorting. Ranks are contiguous regardless of the chosen order.
pub fn sort_and_rank(
    mut groups: Vec<CrashGroup>,
    order: SortOrder,
    new_only: bool,
) -> Vec<CrashGroup> {
    if new_only {
        groups.retain(|g| g.is_new);
    }

    match order {
        SortOrder::Count => groups.sort_by_key(|g| Reverse(g.count)),
        SortOrder::LastSeen => groups.sort_by_key(|g| Reverse(g.last_seen_ts.unwrap_or(0))),
        SortOrder::Rate => {
            groups.sort_by(|a, b| b.crashes_per_day.total_cmp(&a.crashes_per_day))
        }
    }

    for (i, group) in groups.iter_mut().enumerate() {
        group.rank = Some(i + 1);
    }
    groups
}
