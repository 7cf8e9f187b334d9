//! Calendar grid layout for the streak view
//!
//! A month is laid out as a fixed 7x7 matrix: weekday rows (Monday first)
//! by week-of-month columns. 49 slots always over-cover the 28-31 days of a
//! month plus its leading and trailing overflow days, so every month fits the
//! same matrix no matter which weekday it starts on. Overflow dates from
//! adjacent months are computed during the walk but suppressed as non-live
//! cells, which keeps month boundaries free of off-by-one cases.

use crate::types::{ActivityLevel, DailyActivityMap};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Weekday rows per month grid (Monday = 0 .. Sunday = 6)
pub const WEEKDAY_ROWS: usize = 7;
/// Week-of-month columns per month grid
pub const WEEK_COLS: usize = 7;

/// Short weekday labels, Monday first, matching the grid row order
pub const WEEKDAY_LABELS: [&str; WEEKDAY_ROWS] =
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Immutable visible range: `months` consecutive months ending at the anchor
/// month. Navigation returns a fresh value; nothing is mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRange {
    anchor: NaiveDate,
    months: u32,
}

impl ViewRange {
    /// Default number of visible months
    pub const DEFAULT_MONTHS: u32 = 6;

    /// Build a range ending at the month containing `anchor`. A zero month
    /// count is bumped to one so the range is never empty.
    pub fn ending_at(anchor: NaiveDate, months: u32) -> Self {
        Self {
            anchor: first_of_month(anchor),
            months: months.max(1),
        }
    }

    /// First day of the earliest visible month
    pub fn start(&self) -> NaiveDate {
        add_months(self.anchor, -(self.months as i32 - 1))
    }

    /// Last day of the anchor month
    pub fn end(&self) -> NaiveDate {
        last_of_month(self.anchor)
    }

    /// First day of the anchor (most recent) month
    pub fn anchor_month(&self) -> NaiveDate {
        self.anchor
    }

    pub fn month_count(&self) -> u32 {
        self.months
    }

    /// Month starts in chronological order
    pub fn month_starts(&self) -> Vec<NaiveDate> {
        (0..self.months)
            .map(|i| add_months(self.start(), i as i32))
            .collect()
    }

    /// Range shifted one month back
    pub fn prev(&self) -> Self {
        Self {
            anchor: add_months(self.anchor, -1),
            months: self.months,
        }
    }

    /// Range shifted one month forward
    pub fn next(&self) -> Self {
        Self {
            anchor: add_months(self.anchor, 1),
            months: self.months,
        }
    }
}

/// A live cell in a month grid: its date plus the level looked up from the
/// activity map at render time. Grids never store levels themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub level: ActivityLevel,
}

/// One month laid out on the 7x7 weekday-by-week matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month_start: NaiveDate,
    label: String,
    /// `cells[weekday][week]`; None for slots whose date falls outside the
    /// target month (leading/trailing overflow or past the final week)
    cells: [[Option<NaiveDate>; WEEK_COLS]; WEEKDAY_ROWS],
}

impl MonthGrid {
    /// Lay out the month containing `month_start`.
    pub fn build(month_start: NaiveDate) -> Self {
        let month_start = first_of_month(month_start);
        let calendar_start = week_start(month_start);

        let mut cells = [[None; WEEK_COLS]; WEEKDAY_ROWS];
        for week in 0..WEEK_COLS {
            for weekday in 0..WEEKDAY_ROWS {
                let offset = (week * 7 + weekday) as u64;
                let Some(date) = calendar_start.checked_add_days(Days::new(offset)) else {
                    continue;
                };
                // Live only when the slot's date belongs to the target month
                if date.year() == month_start.year() && date.month() == month_start.month() {
                    cells[weekday][week] = Some(date);
                }
            }
        }

        Self {
            label: month_start.format("%B %Y").to_string(),
            month_start,
            cells,
        }
    }

    /// First day of this grid's month
    pub fn month_start(&self) -> NaiveDate {
        self.month_start
    }

    /// Human-readable month header, e.g. "April 2025"
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Cell at `(weekday row, week column)` with its level resolved from the
    /// activity map; `None` for non-live slots and out-of-bounds positions.
    pub fn cell_at(
        &self,
        weekday: usize,
        week: usize,
        activity: &DailyActivityMap,
    ) -> Option<GridCell> {
        let date = *self.cells.get(weekday)?.get(week)?;
        date.map(|date| GridCell {
            date,
            level: activity.level(date),
        })
    }

    /// Number of live cells; always equals the day count of the month
    pub fn live_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Number of week columns that contain at least one live cell
    pub fn week_span(&self) -> usize {
        (0..WEEK_COLS)
            .filter(|&week| (0..WEEKDAY_ROWS).any(|wd| self.cells[wd][week].is_some()))
            .count()
    }

    /// Iterate live dates in no particular order
    pub fn live_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().flat_map(|row| row.iter()).flatten().copied()
    }
}

/// Build one grid per visible month, in chronological order
pub fn build_month_grids(range: &ViewRange) -> Vec<MonthGrid> {
    range.month_starts().into_iter().map(MonthGrid::build).collect()
}

/// First day of the month containing `date`
fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(date.day0() as u64))
        .unwrap_or(date)
}

/// Last day of the month containing `date`
fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    add_months(first, 1)
        .checked_sub_days(Days::new(1))
        .unwrap_or(first)
}

/// Monday of the week containing `date`
fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Shift a month start by `delta` months, clamping at the calendar limits
fn add_months(month_start: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        month_start.checked_add_months(Months::new(delta as u32))
    } else {
        month_start.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(month_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========== ViewRange tests ==========

    #[test]
    fn test_range_normalizes_anchor_to_month_start() {
        let range = ViewRange::ending_at(date(2025, 4, 17), 6);
        assert_eq!(range.anchor_month(), date(2025, 4, 1));
        assert_eq!(range.end(), date(2025, 4, 30));
    }

    #[test]
    fn test_range_start_spans_back_n_months() {
        let range = ViewRange::ending_at(date(2025, 4, 17), 6);
        assert_eq!(range.start(), date(2024, 11, 1));
        assert_eq!(range.month_starts().len(), 6);
        assert_eq!(range.month_starts()[0], date(2024, 11, 1));
        assert_eq!(range.month_starts()[5], date(2025, 4, 1));
    }

    #[test]
    fn test_range_zero_months_bumped_to_one() {
        let range = ViewRange::ending_at(date(2025, 4, 17), 0);
        assert_eq!(range.month_count(), 1);
        assert_eq!(range.start(), date(2025, 4, 1));
    }

    #[test]
    fn test_range_navigation_crosses_year_boundary() {
        let range = ViewRange::ending_at(date(2025, 1, 15), 3);
        assert_eq!(range.prev().anchor_month(), date(2024, 12, 1));
        assert_eq!(range.prev().next(), range);

        let dec = ViewRange::ending_at(date(2024, 12, 31), 3);
        assert_eq!(dec.next().anchor_month(), date(2025, 1, 1));
    }

    #[test]
    fn test_range_end_handles_leap_february() {
        let range = ViewRange::ending_at(date(2024, 2, 10), 1);
        assert_eq!(range.end(), date(2024, 2, 29));
        let range = ViewRange::ending_at(date(2023, 2, 10), 1);
        assert_eq!(range.end(), date(2023, 2, 28));
    }

    // ========== MonthGrid tests ==========

    #[test]
    fn test_grid_live_count_matches_month_length() {
        let cases = [
            (date(2025, 4, 1), 30),
            (date(2025, 1, 1), 31),
            (date(2024, 2, 1), 29), // leap year
            (date(2023, 2, 1), 28),
        ];
        for (month, days) in cases {
            let grid = MonthGrid::build(month);
            assert_eq!(grid.live_count(), days, "month {}", month);
        }
    }

    #[test]
    fn test_grid_leading_week_in_previous_month_suppressed() {
        // June 2025 starts on a Sunday, so Mon-Sat of the first week belong
        // to May and must render as empty slots.
        let grid = MonthGrid::build(date(2025, 6, 1));
        for weekday in 0..6 {
            assert_eq!(grid.cell_at(weekday, 0, &DailyActivityMap::new()), None);
        }
        let sunday = grid
            .cell_at(6, 0, &DailyActivityMap::new())
            .expect("June 1st lives in the Sunday row");
        assert_eq!(sunday.date, date(2025, 6, 1));
    }

    #[test]
    fn test_grid_monday_start_month_fills_first_column() {
        // September 2025 starts on a Monday
        let grid = MonthGrid::build(date(2025, 9, 1));
        let map = DailyActivityMap::new();
        for weekday in 0..WEEKDAY_ROWS {
            let cell = grid.cell_at(weekday, 0, &map).expect("full first week");
            assert_eq!(cell.date, date(2025, 9, 1 + weekday as u32));
        }
    }

    #[test]
    fn test_grid_cell_level_lookup_and_default() {
        let mut map = DailyActivityMap::new();
        map.insert(date(2025, 4, 7), ActivityLevel::Heavy);

        let grid = MonthGrid::build(date(2025, 4, 1));
        // April 2025 starts on a Tuesday; the 7th is the Monday of week 1
        let cell = grid.cell_at(0, 1, &map).unwrap();
        assert_eq!(cell.date, date(2025, 4, 7));
        assert_eq!(cell.level, ActivityLevel::Heavy);

        // Absent date resolves to level 0
        let cell = grid.cell_at(1, 1, &map).unwrap();
        assert_eq!(cell.date, date(2025, 4, 8));
        assert_eq!(cell.level, ActivityLevel::None);
    }

    #[test]
    fn test_grid_out_of_bounds_position_is_none() {
        let grid = MonthGrid::build(date(2025, 4, 1));
        let map = DailyActivityMap::new();
        assert_eq!(grid.cell_at(7, 0, &map), None);
        assert_eq!(grid.cell_at(0, 7, &map), None);
    }

    #[test]
    fn test_grid_week_span_covers_four_to_six_weeks() {
        // February 2021 starts on a Monday in a non-leap year: exactly 4 weeks
        assert_eq!(MonthGrid::build(date(2021, 2, 1)).week_span(), 4);
        // August 2021 starts on a Sunday with 31 days: spans 6 week columns
        assert_eq!(MonthGrid::build(date(2021, 8, 1)).week_span(), 6);
    }

    #[test]
    fn test_grid_label() {
        assert_eq!(MonthGrid::build(date(2025, 4, 10)).label(), "April 2025");
    }

    // ========== build_month_grids tests ==========

    #[test]
    fn test_multi_month_grids_cover_every_date_exactly_once() {
        let range = ViewRange::ending_at(date(2025, 4, 17), 6);
        let grids = build_month_grids(&range);
        assert_eq!(grids.len(), 6);

        let mut seen: HashSet<NaiveDate> = HashSet::new();
        for grid in &grids {
            for d in grid.live_dates() {
                assert!(seen.insert(d), "date {} appears in two grids", d);
            }
        }

        // Every date of the range is covered
        let mut day = range.start();
        while day <= range.end() {
            assert!(seen.contains(&day), "date {} missing from grids", day);
            day = day.succ_opt().unwrap();
        }
        assert_eq!(seen.len(), (range.end() - range.start()).num_days() as usize + 1);
    }

    #[test]
    fn test_grids_are_chronological() {
        let range = ViewRange::ending_at(date(2025, 2, 1), 4);
        let grids = build_month_grids(&range);
        let starts: Vec<NaiveDate> = grids.iter().map(|g| g.month_start()).collect();
        assert_eq!(
            starts,
            vec![
                date(2024, 11, 1),
                date(2024, 12, 1),
                date(2025, 1, 1),
                date(2025, 2, 1)
            ]
        );
    }
}
