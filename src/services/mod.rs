//! Services for data sourcing, persistence, and cohort features

pub mod badges;
pub mod leaderboard;
pub mod platform;
pub mod source;
pub mod store;

pub use platform::{detect_platform, Platform};
pub use source::{ActivityDataSource, FixtureSource, PostLogSource, SampleDataSource};
pub use store::{Post, PostStore};
