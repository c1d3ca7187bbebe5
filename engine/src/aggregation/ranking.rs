use super::group::AggregationResult;

/// (key, total) pairs, largest total first. Equal totals keep their encounter order.
pub fn sort_descending_by_value(totals: &AggregationResult) -> Vec<(String, f64)> {
    let mut sorted: Vec<(String, f64)> = totals.iter().map(|(k, v)| (k.to_string(), v)).collect();
    // sort_by is stable
    sorted.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    sorted
}

/// `part` as a percentage of `whole`, in [0, 100].
///
/// A zero, negative or non-finite `whole` gives 0 instead of NaN or a meaningless share.
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if !whole.is_finite() || whole <= 0.0 {
        return 0.0;
    }
    let pct = part / whole * 100.0;
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
