//! Overview view: stat cards plus the current month's calendar

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::calendar::StreakCalendar;
use super::tabs::{Tab, TabBar};
use crate::engine::MonthGrid;
use crate::tui::theme::Theme;
use crate::types::{DailyActivityMap, StreakStats};

/// Maximum content width (consistent across views)
const MAX_CONTENT_WIDTH: u16 = 120;

/// Card dimensions
const CARD_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 5;

/// Data backing the overview
pub struct OverviewData<'a> {
    pub stats: StreakStats,
    pub total_posts: u32,
    pub rank: Option<u32>,
    /// Grid for the anchor month only
    pub month: &'a MonthGrid,
    pub activity: &'a DailyActivityMap,
}

/// Overview view widget
pub struct Overview<'a> {
    data: OverviewData<'a>,
    today: NaiveDate,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> Overview<'a> {
    pub fn new(data: OverviewData<'a>, today: NaiveDate, theme: Theme) -> Self {
        Self {
            data,
            today,
            selected_tab: Tab::Overview,
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

    fn render_cards(&self, area: Rect, buf: &mut Buffer) {
        let rank = self
            .data
            .rank
            .map(|r| format!("#{}", r))
            .unwrap_or_else(|| "—".to_string());
        let cards = [
            ("Current Streak", format!("{} days", self.data.stats.current)),
            ("Longest Streak", format!("{} days", self.data.stats.longest)),
            ("Total Posts", self.data.total_posts.to_string()),
            ("Current Rank", rank),
        ];

        let total_width = cards.len() as u16 * (CARD_WIDTH + 2) - 2;
        let x_offset = area.width.saturating_sub(total_width) / 2;
        let mut x = area.x + x_offset;

        for (title, value) in cards {
            if x + CARD_WIDTH > area.x + area.width {
                break;
            }
            let card_area = Rect::new(x, area.y, CARD_WIDTH, CARD_HEIGHT.min(area.height));
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.muted()))
                .title(Span::styled(title, Style::default().fg(self.theme.muted())));
            let value_line = Line::from(Span::styled(
                value,
                Style::default()
                    .fg(self.theme.streak())
                    .add_modifier(Modifier::BOLD),
            ));
            Paragraph::new(vec![Line::default(), value_line])
                .alignment(Alignment::Center)
                .block(block)
                .render(card_area, buf);
            x += CARD_WIDTH + 2;
        }
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let hint = "Tab switch view  1-4 jump  ? help  q quit";
        let x = area.x + area.width.saturating_sub(hint.len() as u16) / 2;
        buf.set_string(x, area.y, hint, Style::default().fg(self.theme.muted()));
    }
}

impl Widget for Overview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1),                        // Top padding
            Constraint::Length(1),                        // Tabs
            Constraint::Length(1),                        // Separator
            Constraint::Length(CARD_HEIGHT),              // Stat cards
            Constraint::Length(1),                        // Blank
            Constraint::Length(StreakCalendar::height()), // This month's calendar
            Constraint::Length(1),                        // Separator
            Constraint::Length(1),                        // Keybindings
            Constraint::Min(0),
        ])
        .split(centered);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_cards(chunks[3], buf);

        let grids = std::slice::from_ref(self.data.month);
        StreakCalendar::new(grids, self.data.activity, self.today, self.theme)
            .render(chunks[5], buf);

        self.render_separator(chunks[6], buf);
        self.render_keybindings(chunks[7], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MonthGrid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn buffer_text(buf: &Buffer, area: Rect) -> String {
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_overview_renders_cards_and_month() {
        let month = MonthGrid::build(date(2025, 4, 1));
        let activity = DailyActivityMap::new();
        let data = OverviewData {
            stats: StreakStats {
                current: 7,
                longest: 14,
            },
            total_posts: 21,
            rank: Some(8),
            month: &month,
            activity: &activity,
        };

        let area = Rect::new(0, 0, 120, 24);
        let mut buf = Buffer::empty(area);
        Overview::new(data, date(2025, 4, 17), Theme::Dark).render(area, &mut buf);

        let text = buffer_text(&buf, area);
        assert!(text.contains("Current Streak"));
        assert!(text.contains("7 days"));
        assert!(text.contains("14 days"));
        assert!(text.contains("21"));
        assert!(text.contains("#8"));
        assert!(text.contains("April 2025"));
    }

    #[test]
    fn test_overview_unranked_shows_dash() {
        let month = MonthGrid::build(date(2025, 4, 1));
        let activity = DailyActivityMap::new();
        let data = OverviewData {
            stats: StreakStats::default(),
            total_posts: 0,
            rank: None,
            month: &month,
            activity: &activity,
        };

        let area = Rect::new(0, 0, 120, 24);
        let mut buf = Buffer::empty(area);
        Overview::new(data, date(2025, 4, 17), Theme::Dark).render(area, &mut buf);
        assert!(buffer_text(&buf, area).contains("—"));
    }
}
