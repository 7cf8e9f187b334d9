//! Leaderboard table view

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::Widget,
};

use super::tabs::{Tab, TabBar};
use crate::services::leaderboard::{LeaderboardEntry, SortKey};
use crate::tui::theme::Theme;

/// Maximum content width (consistent across views)
const MAX_CONTENT_WIDTH: u16 = 90;

/// Column x-offsets within the table
const COL_RANK: u16 = 0;
const COL_USER: u16 = 8;
const COL_STREAK: u16 = 40;
const COL_POSTS: u16 = 58;
const COL_BADGE: u16 = 72;

/// Leaderboard view widget
pub struct LeaderboardView<'a> {
    entries: &'a [LeaderboardEntry],
    sort_key: SortKey,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> LeaderboardView<'a> {
    pub fn new(entries: &'a [LeaderboardEntry], sort_key: SortKey, theme: Theme) -> Self {
        Self {
            entries,
            sort_key,
            selected_tab: Tab::Leaderboard,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let line = "─".repeat(area.width as usize);
        buf.set_string(area.x, area.y, &line, Style::default().fg(self.theme.muted()));
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.muted());
        let sorted = Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD);

        buf.set_string(
            area.x + COL_RANK,
            area.y,
            "Rank",
            if self.sort_key == SortKey::Rank { sorted } else { style },
        );
        buf.set_string(area.x + COL_USER, area.y, "User", style);
        buf.set_string(
            area.x + COL_STREAK,
            area.y,
            "Current Streak",
            if self.sort_key == SortKey::Streak { sorted } else { style },
        );
        buf.set_string(
            area.x + COL_POSTS,
            area.y,
            "Total Posts",
            if self.sort_key == SortKey::Posts { sorted } else { style },
        );
        buf.set_string(area.x + COL_BADGE, area.y, "Badge", style);
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let text = Style::default().fg(self.theme.text());
        let muted = Style::default().fg(self.theme.muted());
        let top3 = Style::default()
            .fg(self.theme.streak())
            .add_modifier(Modifier::BOLD);

        for (i, entry) in self.entries.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }

            let rank_style = if entry.rank <= 3 { top3 } else { text };
            buf.set_string(area.x + COL_RANK, y, format!("{}", entry.rank), rank_style);
            buf.set_string(
                area.x + COL_USER,
                y,
                format!("{}  {}", entry.initials, entry.name),
                text,
            );
            buf.set_string(
                area.x + COL_STREAK,
                y,
                format!("{} days", entry.current_streak),
                text,
            );
            buf.set_string(area.x + COL_POSTS, y, format!("{}", entry.total_posts), text);
            match entry.badge {
                Some(badge) => buf.set_string(area.x + COL_BADGE, y, badge.label(), text),
                None => buf.set_string(area.x + COL_BADGE, y, "—", muted),
            }
        }
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let hint = format!("s sort (now: {})  Tab switch view  q quit", self.sort_key.label());
        let x = area.x + area.width.saturating_sub(hint.len() as u16) / 2;
        buf.set_string(x, area.y, &hint, Style::default().fg(self.theme.muted()));
    }
}

impl Widget for LeaderboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let rows = self.entries.len() as u16;
        let chunks = Layout::vertical([
            Constraint::Length(1),    // Top padding
            Constraint::Length(1),    // Tabs
            Constraint::Length(1),    // Separator
            Constraint::Length(1),    // Table header
            Constraint::Length(1),    // Header rule
            Constraint::Length(rows), // Rows
            Constraint::Length(1),    // Separator
            Constraint::Length(1),    // Keybindings
            Constraint::Min(0),
        ])
        .split(centered);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_header(chunks[3], buf);
        self.render_separator(chunks[4], buf);
        self.render_rows(chunks[5], buf);
        self.render_separator(chunks[6], buf);
        self.render_keybindings(chunks[7], buf);
    }
}
