//! Target-Year Selector
//! Picks the year a report is built for.

/// The preferred year when present, otherwise the most recent one.
pub fn select_target_year(years: &[i32], preferred: i32) -> Option<i32> {
    if years.contains(&preferred) {
        Some(preferred)
    } else {
        years.iter().copied().max()
    }
}
