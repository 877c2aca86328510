use super::Chance;

/// Stable descending sort by `key`. Entries with equal keys keep their
/// input order, so the output is deterministic.
///
/// Always sorts on the numeric chance, never on a formatted string.
pub fn rank_by<T>(entries: &mut [T], key: impl Fn(&T) -> Chance) {
    // sort_by is stable
    entries.sort_by(|a, b| key(b).rank_cmp(&key(a)));
}
