//! Terminal theme detection and color definitions

use crate::types::ActivityLevel;
use ratatui::style::Color;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected tabs, keybinding keys)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, inactive tabs, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Date and month-header color
    pub fn date(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange (ANSI 256)
        }
    }

    /// Streak highlight color (stat card values, unlocked achievements)
    pub fn streak(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(208), // orange (ANSI 256)
            Self::Light => Color::Indexed(166),
        }
    }

    /// Error/negative indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Calendar cell color for an activity level (green gradient)
    pub fn level_color(self, level: ActivityLevel) -> Color {
        match self {
            Self::Dark => match level {
                ActivityLevel::None => Color::Indexed(236),
                ActivityLevel::Light => Color::Indexed(22),
                ActivityLevel::Moderate => Color::Indexed(28),
                ActivityLevel::Heavy => Color::Indexed(40),
            },
            Self::Light => match level {
                ActivityLevel::None => Color::Indexed(254),
                ActivityLevel::Light => Color::Indexed(194),
                ActivityLevel::Moderate => Color::Indexed(157),
                ActivityLevel::Heavy => Color::Indexed(28),
            },
        }
    }
}
