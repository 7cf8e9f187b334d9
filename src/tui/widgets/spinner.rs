//! Loading spinner widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::tui::theme::Theme;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Centered spinner shown while the post log is being read
pub struct Spinner {
    frame: usize,
    theme: Theme,
}

impl Spinner {
    pub fn new(frame: usize, theme: Theme) -> Self {
        Self { frame, theme }
    }

    /// Advance to the next animation frame
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % FRAMES.len()
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = format!("{} Loading posts...", FRAMES[self.frame % FRAMES.len()]);
        let visual_len = text.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(visual_len) / 2;
        let y = area.y + area.height / 2;
        if y < area.y + area.height {
            buf.set_string(x, y, &text, Style::default().fg(self.theme.accent()));
        }
    }
}
