//! Badge tiers and achievement evaluation

use serde::Serialize;

/// Leaderboard badge tier, assigned from the current streak length
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl BadgeTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
            Self::Diamond => "Diamond",
        }
    }
}

/// Badge for a streak length; streaks under 5 days earn none
pub fn badge_for_streak(streak: u32) -> Option<BadgeTier> {
    match streak {
        0..=4 => None,
        5..=9 => Some(BadgeTier::Silver),
        10..=14 => Some(BadgeTier::Gold),
        15..=19 => Some(BadgeTier::Platinum),
        _ => Some(BadgeTier::Diamond),
    }
}

/// What an achievement is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementGoal {
    /// Total posts ever submitted
    TotalPosts(u32),
    /// Longest streak reached, in days
    StreakDays(u32),
}

/// A fixed catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub name: &'static str,
    pub description: &'static str,
    pub goal: AchievementGoal,
}

/// The cohort's achievement catalog
pub const ACHIEVEMENTS: [Achievement; 5] = [
    Achievement {
        name: "First Post",
        description: "Submit your first post to begin your journey.",
        goal: AchievementGoal::TotalPosts(1),
    },
    Achievement {
        name: "Streak Starter",
        description: "Maintain a 3-day posting streak.",
        goal: AchievementGoal::StreakDays(3),
    },
    Achievement {
        name: "Week Warrior",
        description: "Maintain a 7-day posting streak.",
        goal: AchievementGoal::StreakDays(7),
    },
    Achievement {
        name: "Consistent Creator",
        description: "Maintain a 14-day posting streak.",
        goal: AchievementGoal::StreakDays(14),
    },
    Achievement {
        name: "Content Master",
        description: "Maintain a 30-day posting streak.",
        goal: AchievementGoal::StreakDays(30),
    },
];

/// An achievement with its evaluated state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementStatus {
    pub achievement: Achievement,
    pub unlocked: bool,
    /// Percent toward the goal, 0-100
    pub progress: u8,
}

/// Evaluate the full catalog against a user's record
pub fn evaluate_achievements(longest_streak: u32, total_posts: u32) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|&achievement| {
            let (value, target) = match achievement.goal {
                AchievementGoal::TotalPosts(target) => (total_posts, target),
                AchievementGoal::StreakDays(target) => (longest_streak, target),
            };
            let progress = ((value as u64 * 100) / target.max(1) as u64).min(100) as u8;
            AchievementStatus {
                achievement,
                unlocked: value >= target,
                progress,
            }
        })
        .collect()
}
