//! Activity data sources
//!
//! The engine only ever sees a `DailyActivityMap`; where the levels come
//! from is behind this trait so the TUI, the CLI, and the tests can swap
//! implementations freely.

use crate::engine::ViewRange;
use crate::services::store::PostStore;
use crate::types::{ActivityLevel, DailyActivityMap, Result};
use chrono::{Days, NaiveDate};

/// Supplies activity levels for a visible range. Implementations cover the
/// inclusive `[range.start(), range.end()]` window and may omit dates, which
/// read as level 0 downstream.
pub trait ActivityDataSource {
    fn fetch_activity(&self, range: &ViewRange) -> Result<DailyActivityMap>;
}

/// Production source: levels derived from per-day post counts in the local
/// post log.
pub struct PostLogSource {
    store: PostStore,
}

impl PostLogSource {
    pub fn new(store: PostStore) -> Self {
        Self { store }
    }
}

impl ActivityDataSource for PostLogSource {
    fn fetch_activity(&self, range: &ViewRange) -> Result<DailyActivityMap> {
        let counts = self.store.daily_counts()?;
        let mut map: DailyActivityMap = counts
            .into_iter()
            .map(|(date, count)| (date, ActivityLevel::from_post_count(count)))
            .collect();
        map.retain_range(range.start(), range.end());
        Ok(map)
    }
}

/// Deterministic demo source. Generates streak-shaped bands rather than
/// uniform noise: once a streak has started there is an 80% chance it
/// continues, with the level drifting upward and capping at the top tier.
pub struct SampleDataSource {
    seed: u64,
}

impl SampleDataSource {
    pub fn new(seed: u64) -> Self {
        // xorshift needs a non-zero state
        Self {
            seed: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }
}

impl ActivityDataSource for SampleDataSource {
    fn fetch_activity(&self, range: &ViewRange) -> Result<DailyActivityMap> {
        let mut rng = XorShift64::new(self.seed);
        let mut map = DailyActivityMap::new();
        let mut prev = ActivityLevel::None;

        let mut day = range.start();
        while day <= range.end() {
            let r = rng.next_f64();
            let level = if prev.is_active() && r > 0.2 {
                let bump = if r > 0.5 { 1 } else { 0 };
                ActivityLevel::from_tier(prev.tier() as i64 + bump)
            } else if r > 0.6 {
                ActivityLevel::from_tier((r * 4.0) as i64)
            } else {
                ActivityLevel::None
            };

            map.insert(day, level);
            prev = level;
            match day.checked_add_days(Days::new(1)) {
                Some(next) => day = next,
                None => break,
            }
        }

        Ok(map)
    }
}

/// Minimal xorshift64 PRNG; deterministic across platforms, good enough for
/// demo data.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        // 53 high bits mapped onto [0, 1)
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Fixed in-memory source for tests and fixtures
pub struct FixtureSource {
    map: DailyActivityMap,
}

impl FixtureSource {
    pub fn new(map: DailyActivityMap) -> Self {
        Self { map }
    }
}

impl ActivityDataSource for FixtureSource {
    fn fetch_activity(&self, range: &ViewRange) -> Result<DailyActivityMap> {
        let mut map = self.map.clone();
        map.retain_range(range.start(), range.end());
        Ok(map)
    }
}
