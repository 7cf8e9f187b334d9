//! TUI widgets

pub mod achievements;
pub mod calendar;
pub mod help;
pub mod leaderboard;
pub mod overview;
pub mod spinner;
pub mod tabs;
