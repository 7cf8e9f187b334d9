//! Activity types for streak tracking

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordinal posting-intensity tier for a single day.
///
/// This is a tier, not a raw count: the mapping from post count to tier is
/// monotonic but deliberately coarse, so the calendar stays readable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// No recorded activity
    #[default]
    None,
    /// One post
    Light,
    /// Two posts
    Moderate,
    /// Three or more posts
    Heavy,
}

impl ActivityLevel {
    /// Clamp an arbitrary integer tier to a valid level.
    /// Negative values clamp to None, values above 3 clamp to Heavy.
    pub fn from_tier(tier: i64) -> Self {
        match tier {
            i64::MIN..=0 => Self::None,
            1 => Self::Light,
            2 => Self::Moderate,
            _ => Self::Heavy,
        }
    }

    /// Map a raw per-day post count to a tier (monotonic)
    pub fn from_post_count(count: u32) -> Self {
        Self::from_tier(count as i64)
    }

    /// Numeric tier (0-3)
    pub fn tier(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Light => 1,
            Self::Moderate => 2,
            Self::Heavy => 3,
        }
    }

    /// Whether this level counts toward a streak
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// Single-character glyph for plain-text calendar output
    pub fn glyph(self) -> char {
        match self {
            Self::None => '·',
            Self::Light => '░',
            Self::Moderate => '▒',
            Self::Heavy => '█',
        }
    }
}

/// Mapping from calendar date to activity level for one visible range.
///
/// Backed by a BTreeMap so iteration is always chronological regardless of
/// insertion order. Absent dates read as `ActivityLevel::None`. A fresh map
/// is built per requested range and replaced wholesale on navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyActivityMap {
    levels: BTreeMap<NaiveDate, ActivityLevel>,
}

impl DailyActivityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw integer tiers, clamping out-of-band values
    pub fn from_tiers<I>(tiers: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, i64)>,
    {
        let levels = tiers
            .into_iter()
            .map(|(date, tier)| (date, ActivityLevel::from_tier(tier)))
            .collect();
        Self { levels }
    }

    pub fn insert(&mut self, date: NaiveDate, level: ActivityLevel) {
        self.levels.insert(date, level);
    }

    /// Level for a date; absent dates are level 0 (absence is not activity)
    pub fn level(&self, date: NaiveDate) -> ActivityLevel {
        self.levels.get(&date).copied().unwrap_or_default()
    }

    /// Drop any keys outside `[start, end]`. Misbehaving sources can return
    /// dates beyond the requested window; those are ignored, not fatal.
    pub fn retain_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.levels.retain(|date, _| *date >= start && *date <= end);
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Earliest date present in the map
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.levels.keys().next().copied()
    }

    /// Latest date present in the map
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.levels.keys().next_back().copied()
    }

    /// Iterate entries in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, ActivityLevel)> + '_ {
        self.levels.iter().map(|(&date, &level)| (date, level))
    }
}

impl FromIterator<(NaiveDate, ActivityLevel)> for DailyActivityMap {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, ActivityLevel)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}

/// Derived streak statistics, recomputed from the current map on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StreakStats {
    /// Consecutive active days ending at the anchor date
    pub current: u32,
    /// Longest run of consecutive active days anywhere in the map
    pub longest: u32,
}
