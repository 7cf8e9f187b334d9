//! Achievements grid view

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::tabs::{Tab, TabBar};
use crate::services::badges::AchievementStatus;
use crate::tui::theme::Theme;

/// Maximum content width (consistent across views)
const MAX_CONTENT_WIDTH: u16 = 120;

/// Card dimensions
const CARD_WIDTH: u16 = 36;
const CARD_HEIGHT: u16 = 6;

/// Width of the progress bar inside a locked card
const BAR_WIDTH: usize = 20;

/// Cards per row based on available width
fn cards_per_row(width: u16) -> usize {
    let usable = width.saturating_sub(4);
    ((usable / (CARD_WIDTH + 2)) as usize).clamp(1, 3)
}

/// Achievements view widget
pub struct AchievementsView<'a> {
    statuses: &'a [AchievementStatus],
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> AchievementsView<'a> {
    pub fn new(statuses: &'a [AchievementStatus], theme: Theme) -> Self {
        Self {
            statuses,
            selected_tab: Tab::Achievements,
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

    fn render_card(&self, status: &AchievementStatus, area: Rect, buf: &mut Buffer) {
        let unlocked = status.unlocked;
        let border_color = if unlocked {
            self.theme.streak()
        } else {
            self.theme.muted()
        };
        let title_style = if unlocked {
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(status.achievement.name, title_style));

        let state_line = if unlocked {
            Line::from(Span::styled(
                "✓ Unlocked",
                Style::default().fg(self.theme.streak()),
            ))
        } else {
            let filled = (status.progress as usize * BAR_WIDTH) / 100;
            let bar = format!(
                "{}{} {}%",
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled),
                status.progress
            );
            Line::from(Span::styled(bar, Style::default().fg(self.theme.muted())))
        };

        Paragraph::new(vec![
            Line::from(Span::styled(
                status.achievement.description,
                Style::default().fg(self.theme.muted()),
            )),
            Line::default(),
            state_line,
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
    }

    fn render_grid(&self, area: Rect, buf: &mut Buffer, cols: usize) {
        for (i, status) in self.statuses.iter().enumerate() {
            let row = i / cols;
            let col = i % cols;
            let x = area.x + col as u16 * (CARD_WIDTH + 2);
            let y = area.y + row as u16 * (CARD_HEIGHT + 1);
            if y + CARD_HEIGHT > area.y + area.height || x + CARD_WIDTH > area.x + area.width {
                continue;
            }
            self.render_card(status, Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT), buf);
        }
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let hint = "Tab switch view  1-4 jump  q quit";
        let x = area.x + area.width.saturating_sub(hint.len() as u16) / 2;
        buf.set_string(x, area.y, hint, Style::default().fg(self.theme.muted()));
    }
}

impl Widget for AchievementsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let cols = cards_per_row(centered.width);
        let rows = self.statuses.len().div_ceil(cols);
        let grid_height = rows as u16 * (CARD_HEIGHT + 1);

        let chunks = Layout::vertical([
            Constraint::Length(1),           // Top padding
            Constraint::Length(1),           // Tabs
            Constraint::Length(1),           // Separator
            Constraint::Length(1),           // Blank
            Constraint::Length(grid_height), // Card grid
            Constraint::Length(1),           // Separator
            Constraint::Length(1),           // Keybindings
            Constraint::Min(0),
        ])
        .split(centered);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_grid(chunks[4], buf, cols);
        self.render_separator(chunks[5], buf);
        self.render_keybindings(chunks[6], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::badges::evaluate_achievements;

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
    fn test_cards_per_row_clamps() {
        assert_eq!(cards_per_row(30), 1);
        assert_eq!(cards_per_row(80), 2);
        assert_eq!(cards_per_row(200), 3);
    }

    #[test]
    fn test_achievements_render_unlocked_and_progress() {
        let statuses = evaluate_achievements(9, 9);
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        AchievementsView::new(&statuses, Theme::Dark).render(area, &mut buf);

        let text = buffer_text(&buf, area);
        assert!(text.contains("First Post"));
        assert!(text.contains("✓ Unlocked"));
        assert!(text.contains("Content Master"));
        assert!(text.contains("30%"));
        assert!(text.contains("[Achievements]"));
    }
}
