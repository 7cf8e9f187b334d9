//! Cohort leaderboard ranking and sorting

use crate::services::badges::{badge_for_streak, BadgeTier};
use serde::Serialize;

/// A cohort member's raw record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub name: String,
    pub current_streak: u32,
    pub total_posts: u32,
}

impl MemberRecord {
    pub fn new(name: impl Into<String>, current_streak: u32, total_posts: u32) -> Self {
        Self {
            name: name.into(),
            current_streak,
            total_posts,
        }
    }

    /// Two-letter initials for the avatar column
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// A ranked leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub initials: String,
    pub current_streak: u32,
    pub total_posts: u32,
    pub badge: Option<BadgeTier>,
}

/// Column the table is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Rank,
    Streak,
    Posts,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::Rank => "Rank",
            Self::Streak => "Streaks",
            Self::Posts => "Posts",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Rank => Self::Streak,
            Self::Streak => Self::Posts,
            Self::Posts => Self::Rank,
        }
    }
}

/// Rank members by current streak (ties broken by total posts, then name for
/// a stable order) and attach badges. Rank 1 is the longest streak.
pub fn rank_members(mut members: Vec<MemberRecord>) -> Vec<LeaderboardEntry> {
    members.sort_by(|a, b| {
        b.current_streak
            .cmp(&a.current_streak)
            .then(b.total_posts.cmp(&a.total_posts))
            .then(a.name.cmp(&b.name))
    });

    members
        .into_iter()
        .enumerate()
        .map(|(i, member)| LeaderboardEntry {
            rank: i as u32 + 1,
            initials: member.initials(),
            badge: badge_for_streak(member.current_streak),
            name: member.name,
            current_streak: member.current_streak,
            total_posts: member.total_posts,
        })
        .collect()
}

/// Re-sort ranked entries for display; rank values are preserved
pub fn sort_entries(entries: &mut [LeaderboardEntry], key: SortKey) {
    match key {
        SortKey::Rank => entries.sort_by_key(|e| e.rank),
        SortKey::Streak => entries.sort_by(|a, b| b.current_streak.cmp(&a.current_streak)),
        SortKey::Posts => entries.sort_by(|a, b| b.total_posts.cmp(&a.total_posts)),
    }
}

/// Rank of the named member, if present
pub fn rank_of(entries: &[LeaderboardEntry], name: &str) -> Option<u32> {
    entries.iter().find(|e| e.name == name).map(|e| e.rank)
}

/// Deterministic demo cohort. Streaks taper down the table so every badge
/// tier shows up at least once.
pub fn sample_roster() -> Vec<MemberRecord> {
    let names = [
        "Alex Morgan",
        "Jamie Smith",
        "Taylor Johnson",
        "Jordan Davis",
        "Casey Williams",
        "Riley Brown",
        "Quinn Miller",
        "Morgan Lee",
        "Avery Wilson",
        "Cameron Thomas",
    ];

    names
        .iter()
        .enumerate()
        .map(|(i, &name)| {
            let streak = 28u32.saturating_sub(i as u32 * 3).max(1);
            MemberRecord::new(name, streak, streak + 4)
        })
        .collect()
}
