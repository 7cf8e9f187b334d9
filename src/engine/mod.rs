//! Pure streak and calendar computations
//!
//! No I/O lives here: the engine takes an activity map snapshot and derives
//! statistics and grid layouts from it.

pub mod calendar;
pub mod streak;

pub use calendar::{
    build_month_grids, GridCell, MonthGrid, ViewRange, WEEKDAY_LABELS, WEEKDAY_ROWS, WEEK_COLS,
};
pub use streak::{current_streak, longest_streak, streak_stats};
