//! Type definitions for streakdeck

mod activity;
mod error;

pub use activity::*;
pub use error::*;
