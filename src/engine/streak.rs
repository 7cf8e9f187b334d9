//! Streak computation over a daily activity map
//!
//! Both functions are pure and total: empty or all-zero input yields 0,
//! nothing here can fail.

use crate::types::{DailyActivityMap, StreakStats};
use chrono::{Days, NaiveDate};

/// Count consecutive active days ending at `anchor`, walking backward one
/// calendar day at a time. The anchor itself must be active for the streak
/// to be non-zero; an absent date breaks the streak exactly like a level-0
/// entry.
pub fn current_streak(map: &DailyActivityMap, anchor: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = anchor;
    while map.level(day).is_active() {
        count += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }
    count
}

/// Longest run of consecutive active calendar days anywhere in the map.
///
/// Present dates are scanned in chronological order. A run extends only when
/// a date is calendar-adjacent to the previous active date; a gap in the
/// map's date domain breaks the run just like an explicit level-0 entry, so
/// sparse data never gets credited with a streak it did not earn.
pub fn longest_streak(map: &DailyActivityMap) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev_active: Option<NaiveDate> = None;

    for (date, level) in map.iter() {
        if level.is_active() {
            let adjacent = prev_active
                .and_then(|p| p.checked_add_days(Days::new(1)))
                .is_some_and(|next| next == date);
            run = if adjacent { run + 1 } else { 1 };
            longest = longest.max(run);
            prev_active = Some(date);
        } else {
            run = 0;
            prev_active = None;
        }
    }

    longest
}

/// Compute both statistics for the presentation layer in one call
pub fn streak_stats(map: &DailyActivityMap, anchor: NaiveDate) -> StreakStats {
    StreakStats {
        current: current_streak(map, anchor),
        longest: longest_streak(map),
    }
}
