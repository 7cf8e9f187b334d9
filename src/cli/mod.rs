//! Command line interface

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde_json::json;

use crate::engine::{build_month_grids, streak_stats, MonthGrid, ViewRange, WEEKDAY_LABELS, WEEKDAY_ROWS};
use crate::services::badges::badge_for_streak;
use crate::services::leaderboard::{
    rank_members, sample_roster, sort_entries, MemberRecord, SortKey,
};
use crate::services::{
    detect_platform, ActivityDataSource, Post, PostLogSource, PostStore, SampleDataSource,
};
use crate::types::{DailyActivityMap, StreakStats};

/// Seed for `--sample` data, shared with the TUI demo mode
const SAMPLE_SEED: u64 = 42;

/// Daily posting streak tracker
#[derive(Parser)]
#[command(name = "streakdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui {
        /// Use generated sample data instead of the post log
        #[arg(long)]
        sample: bool,
    },

    /// Show streak statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the activity calendar
    Calendar {
        /// Number of months to show
        #[arg(long, default_value_t = ViewRange::DEFAULT_MONTHS)]
        months: u32,

        /// Use generated sample data instead of the post log
        #[arg(long)]
        sample: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the cohort leaderboard
    Leaderboard {
        /// Column to sort by
        #[arg(long, value_enum, default_value_t = SortKey::Rank)]
        sort: SortKey,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log a post URL for today
    Submit {
        /// URL of the published post
        url: String,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let today = Local::now().date_naive();
        match self.command {
            None => crate::tui::run(false),
            Some(Commands::Tui { sample }) => crate::tui::run(sample),
            Some(Commands::Stats { json }) => run_stats(today, json),
            Some(Commands::Calendar {
                months,
                sample,
                json,
            }) => run_calendar(today, months, sample, json),
            Some(Commands::Leaderboard { sort, json }) => run_leaderboard(today, sort, json),
            Some(Commands::Submit { url }) => run_submit(today, &url),
        }
    }
}

/// Activity over the full post history, not clipped to a view range
fn full_history(store: &PostStore) -> anyhow::Result<DailyActivityMap> {
    let map = store
        .daily_counts()?
        .into_iter()
        .map(|(date, count)| (date, crate::types::ActivityLevel::from_post_count(count)))
        .collect();
    Ok(map)
}

fn run_stats(today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let store = PostStore::new()?;
    let activity = full_history(&store)?;
    let stats = streak_stats(&activity, today);
    let total_posts = store.total_posts()?;
    let badge = badge_for_streak(stats.current);

    if json {
        let report = json!({
            "current_streak": stats.current,
            "longest_streak": stats.longest,
            "total_posts": total_posts,
            "badge": badge,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Current streak: {} days", stats.current);
        println!("Longest streak: {} days", stats.longest);
        println!("Total posts:    {}", total_posts);
        match badge {
            Some(tier) => println!("Badge:          {}", tier.label()),
            None => println!("Badge:          none (5-day streak earns Silver)"),
        }
    }
    Ok(())
}

fn run_calendar(today: NaiveDate, months: u32, sample: bool, json: bool) -> anyhow::Result<()> {
    let range = ViewRange::ending_at(today, months);
    let activity = if sample {
        SampleDataSource::new(SAMPLE_SEED).fetch_activity(&range)?
    } else {
        PostLogSource::new(PostStore::new()?).fetch_activity(&range)?
    };
    let grids = build_month_grids(&range);

    if json {
        let report: Vec<_> = grids
            .iter()
            .map(|grid| {
                let mut days: Vec<_> = grid
                    .live_dates()
                    .map(|date| (date, activity.level(date)))
                    .collect();
                days.sort_by_key(|&(date, _)| date);
                json!({
                    "month": grid.label(),
                    "days": days
                        .iter()
                        .map(|(date, level)| json!({
                            "date": date.to_string(),
                            "level": level.tier(),
                        }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (i, grid) in grids.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{}", render_month(grid, &activity));
        }
    }
    Ok(())
}

/// Plain-text month block: header line plus one row per weekday
fn render_month(grid: &MonthGrid, activity: &DailyActivityMap) -> String {
    let mut out = String::new();
    out.push_str(grid.label());
    out.push('\n');

    let weeks = grid.week_span();
    for weekday in 0..WEEKDAY_ROWS {
        out.push_str(WEEKDAY_LABELS[weekday]);
        for week in 0..weeks {
            out.push(' ');
            match grid.cell_at(weekday, week, activity) {
                Some(cell) => out.push(cell.level.glyph()),
                None => out.push(' '),
            }
        }
        out.push('\n');
    }
    out
}

fn run_leaderboard(today: NaiveDate, sort: SortKey, json: bool) -> anyhow::Result<()> {
    let store = PostStore::new()?;
    let activity = full_history(&store)?;
    let stats = streak_stats(&activity, today);
    let total_posts = store.total_posts()?;

    let mut roster = sample_roster();
    roster.push(MemberRecord::new("You", stats.current, total_posts));
    let mut entries = rank_members(roster);
    sort_entries(&mut entries, sort);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!(
            "{:<5} {:<4} {:<18} {:>7} {:>6}  {}",
            "Rank", "", "Member", "Streak", "Posts", "Badge"
        );
        for entry in &entries {
            let badge = entry.badge.map(|b| b.label()).unwrap_or("-");
            println!(
                "#{:<4} {:<4} {:<18} {:>7} {:>6}  {}",
                entry.rank, entry.initials, entry.name, entry.current_streak,
                entry.total_posts, badge
            );
        }
    }
    Ok(())
}

fn run_submit(today: NaiveDate, url: &str) -> anyhow::Result<()> {
    let url = url.trim();
    if url.is_empty() {
        anyhow::bail!("post URL must not be empty");
    }

    let platform = detect_platform(url);
    let store = PostStore::new()?;
    store.add_post(Post {
        url: url.to_string(),
        platform,
        date: today,
    })?;

    let stats = streak_stats(&full_history(&store)?, today);
    print_submit_summary(platform.label(), today, stats);
    Ok(())
}

fn print_submit_summary(platform: &str, date: NaiveDate, stats: StreakStats) {
    println!("Logged {} post for {}", platform, date);
    println!("Current streak: {} days", stats.current);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityLevel;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========== parse tests ==========

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["streakdeck"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_stats_json() {
        let cli = Cli::try_parse_from(["streakdeck", "stats", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stats { json: true })));
    }

    #[test]
    fn test_cli_parse_calendar_defaults() {
        let cli = Cli::try_parse_from(["streakdeck", "calendar"]).unwrap();
        match cli.command {
            Some(Commands::Calendar {
                months,
                sample,
                json,
            }) => {
                assert_eq!(months, ViewRange::DEFAULT_MONTHS);
                assert!(!sample);
                assert!(!json);
            }
            _ => panic!("expected calendar command"),
        }
    }

    #[test]
    fn test_cli_parse_calendar_months() {
        let cli = Cli::try_parse_from(["streakdeck", "calendar", "--months", "3", "--sample"])
            .unwrap();
        match cli.command {
            Some(Commands::Calendar { months, sample, .. }) => {
                assert_eq!(months, 3);
                assert!(sample);
            }
            _ => panic!("expected calendar command"),
        }
    }

    #[test]
    fn test_cli_parse_leaderboard_sort() {
        let cli = Cli::try_parse_from(["streakdeck", "leaderboard", "--sort", "posts"]).unwrap();
        match cli.command {
            Some(Commands::Leaderboard { sort, .. }) => assert_eq!(sort, SortKey::Posts),
            _ => panic!("expected leaderboard command"),
        }
    }

    #[test]
    fn test_cli_parse_submit_requires_url() {
        assert!(Cli::try_parse_from(["streakdeck", "submit"]).is_err());
        let cli = Cli::try_parse_from(["streakdeck", "submit", "https://x.com/a/1"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Submit { .. })));
    }

    // ========== render tests ==========

    #[test]
    fn test_render_month_shape() {
        // April 2025 starts on a Tuesday and spans five week columns
        let grid = MonthGrid::build(date(2025, 4, 1));
        let mut activity = DailyActivityMap::new();
        activity.insert(date(2025, 4, 1), ActivityLevel::Heavy);

        let text = render_month(&grid, &activity);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + WEEKDAY_ROWS);
        assert_eq!(lines[0], "April 2025");

        // Monday row: the slot before April 1 is suppressed, not a level glyph
        assert!(lines[1].starts_with("Mon  "));
        // Tuesday row starts with the heavy glyph for April 1
        assert!(lines[2].starts_with("Tue █"));
        // Five week columns, three label chars plus two per column
        assert_eq!(lines[1].chars().count(), 3 + 2 * grid.week_span());
    }

    #[test]
    fn test_render_month_inactive_days_use_dot() {
        let grid = MonthGrid::build(date(2025, 4, 1));
        let text = render_month(&grid, &DailyActivityMap::new());
        assert_eq!(text.matches('·').count(), 30);
    }
}
