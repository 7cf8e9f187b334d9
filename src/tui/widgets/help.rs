//! Help popup overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 14;

/// Keybinding help popup
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Centered popup area within `area`
    pub fn centered_area(area: Rect) -> Rect {
        let width = POPUP_WIDTH.min(area.width);
        let height = POPUP_HEIGHT.min(area.height);
        Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        )
    }

    fn key_line(&self, key: &'static str, action: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("  {:<10}", key),
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(action, Style::default().fg(self.theme.text())),
        ])
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let lines = vec![
            Line::default(),
            self.key_line("Tab", "next view"),
            self.key_line("Shift+Tab", "previous view"),
            self.key_line("1-4", "jump to view"),
            self.key_line("←/→ h/l", "shift calendar range"),
            self.key_line("s", "cycle leaderboard sort"),
            self.key_line("?", "toggle this help"),
            self.key_line("q / Esc", "quit"),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()))
            .title(Span::styled(
                " Help ",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            ));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_area_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = HelpPopup::centered_area(area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
        assert_eq!(popup.x, (100 - popup.width) / 2);
    }

    #[test]
    fn test_centered_area_clamps_to_small_terminal() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = HelpPopup::centered_area(area);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 8);
    }

    #[test]
    fn test_render_lists_keys() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        HelpPopup::new(Theme::Dark).render(HelpPopup::centered_area(area), &mut buf);

        let mut text = String::new();
        for y in 0..20 {
            for x in 0..60 {
                text.push_str(buf.cell((x, y)).unwrap().symbol());
            }
        }
        assert!(text.contains("Help"));
        assert!(text.contains("quit"));
        assert!(text.contains("shift calendar range"));
    }
}
