/// Fewest points worth sampling down to: first, one interior pick, last.
pub const MIN_SEGMENT_BUDGET: usize = 3;

/// How many points a line segment of `len` may keep, given `total` real
/// points across the visible series and a global `budget`.
///
/// Returns `None` when the segment should pass through unchanged: the whole
/// series already fits, the segment is too short to sample, or its share
/// of the budget is at least its own length.
pub fn segment_budget(len: usize, total: usize, budget: usize) -> Option<usize> {
    if total == 0 || total <= budget || len <= MIN_SEGMENT_BUDGET {
        return None;
    }
    let share = (len as f64 / total as f64 * budget as f64).round() as usize;
    let local = share.max(MIN_SEGMENT_BUDGET);
    if len <= local {
        None
    } else {
        Some(local)
    }
}
