//! Streak calendar widget
//!
//! Renders the visible range as one block per month: a month header over a
//! 7-row (weekday) by 7-column (week-of-month) cell matrix. Weekday labels
//! are drawn once on the left. Non-live slots (overflow days from adjacent
//! months) render blank; live days render a block colored by activity level.

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::engine::calendar::{MonthGrid, WEEKDAY_LABELS, WEEKDAY_ROWS, WEEK_COLS};
use crate::tui::theme::Theme;
use crate::types::{ActivityLevel, DailyActivityMap};

/// Cell width: 2 block chars + 1 gap
const CELL_WIDTH: u16 = 3;
/// Weekday label column: "Mon "
const LABEL_WIDTH: u16 = 4;
/// Gap between month blocks
const MONTH_GAP: u16 = 2;
/// Width of one month block
const MONTH_WIDTH: u16 = WEEK_COLS as u16 * CELL_WIDTH;

/// Multi-month streak calendar
pub struct StreakCalendar<'a> {
    grids: &'a [MonthGrid],
    activity: &'a DailyActivityMap,
    today: NaiveDate,
    theme: Theme,
}

impl<'a> StreakCalendar<'a> {
    pub fn new(
        grids: &'a [MonthGrid],
        activity: &'a DailyActivityMap,
        today: NaiveDate,
        theme: Theme,
    ) -> Self {
        Self {
            grids,
            activity,
            today,
            theme,
        }
    }

    /// Rows the calendar needs: header + 7 weekday rows + blank + legend
    pub fn height() -> u16 {
        1 + WEEKDAY_ROWS as u16 + 2
    }

    /// How many month blocks fit in `width` columns
    pub fn months_for_width(width: u16) -> usize {
        let available = width.saturating_sub(LABEL_WIDTH);
        ((available + MONTH_GAP) / (MONTH_WIDTH + MONTH_GAP)) as usize
    }

    fn render_weekday_labels(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.muted());
        for (row, label) in WEEKDAY_LABELS.iter().enumerate() {
            let y = area.y + 1 + row as u16;
            if y >= area.y + area.height {
                break;
            }
            buf.set_string(area.x, y, label, style);
        }
    }

    fn render_month(&self, grid: &MonthGrid, x: u16, area: Rect, buf: &mut Buffer) {
        // Month header
        buf.set_string(
            x,
            area.y,
            grid.label(),
            Style::default().fg(self.theme.date()),
        );

        for weekday in 0..WEEKDAY_ROWS {
            let y = area.y + 1 + weekday as u16;
            if y >= area.y + area.height {
                break;
            }
            for week in 0..WEEK_COLS {
                let cell_x = x + week as u16 * CELL_WIDTH;
                if cell_x + 2 > area.x + area.width {
                    break;
                }
                let Some(cell) = grid.cell_at(weekday, week, self.activity) else {
                    continue;
                };
                let mut style = Style::default().fg(self.theme.level_color(cell.level));
                if cell.date == self.today {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                buf.set_string(cell_x, y, "██", style);
            }
        }
    }

    fn render_legend(&self, area: Rect, buf: &mut Buffer) {
        let y = area.y + 1 + WEEKDAY_ROWS as u16 + 1;
        if y >= area.y + area.height {
            return;
        }
        let muted = Style::default().fg(self.theme.muted());
        let mut x = area.x + LABEL_WIDTH;
        buf.set_string(x, y, "less ", muted);
        x += 5;
        for level in [
            ActivityLevel::None,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Heavy,
        ] {
            buf.set_string(x, y, "██", Style::default().fg(self.theme.level_color(level)));
            x += CELL_WIDTH;
        }
        buf.set_string(x, y, "more", muted);
    }
}

impl Widget for StreakCalendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= LABEL_WIDTH || area.height < 2 || self.grids.is_empty() {
            return;
        }

        self.render_weekday_labels(area, buf);

        // Render the most recent months that fit, anchor month always visible
        let fit = Self::months_for_width(area.width).max(1);
        let skip = self.grids.len().saturating_sub(fit);

        let mut x = area.x + LABEL_WIDTH;
        for grid in &self.grids[skip..] {
            if x + MONTH_WIDTH > area.x + area.width + MONTH_GAP {
                break;
            }
            self.render_month(grid, x, area, buf);
            x += MONTH_WIDTH + MONTH_GAP;
        }

        self.render_legend(area, buf);
    }
}

/// Full Calendar tab view: chrome around the multi-month grid
pub struct CalendarView<'a> {
    grids: &'a [MonthGrid],
    activity: &'a DailyActivityMap,
    today: NaiveDate,
    selected_tab: super::tabs::Tab,
    theme: Theme,
}

impl<'a> CalendarView<'a> {
    pub fn new(
        grids: &'a [MonthGrid],
        activity: &'a DailyActivityMap,
        today: NaiveDate,
        theme: Theme,
    ) -> Self {
        Self {
            grids,
            activity,
            today,
            selected_tab: super::tabs::Tab::Calendar,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: super::tabs::Tab) -> Self {
        self.selected_tab = tab;
        self
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let line = "─".repeat(area.width as usize);
        buf.set_string(area.x, area.y, &line, Style::default().fg(self.theme.muted()));
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let hint = "←/→ shift range  Tab switch view  ? help  q quit";
        let visual_len = hint.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(visual_len) / 2;
        buf.set_string(x, area.y, hint, Style::default().fg(self.theme.muted()));
    }
}

impl Widget for CalendarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        use ratatui::layout::{Constraint, Layout};

        let chunks = Layout::vertical([
            Constraint::Length(1),                        // Top padding
            Constraint::Length(1),                        // Tabs
            Constraint::Length(1),                        // Separator
            Constraint::Length(1),                        // Blank
            Constraint::Length(StreakCalendar::height()), // Grid
            Constraint::Length(1),                        // Separator
            Constraint::Length(1),                        // Keybindings
            Constraint::Min(0),
        ])
        .split(area);

        super::tabs::TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        StreakCalendar::new(self.grids, self.activity, self.today, self.theme)
            .render(chunks[4], buf);
        self.render_separator(chunks[5], buf);
        self.render_keybindings(chunks[6], buf);
    }
}
