//! Application state and event loop

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::engine::{build_month_grids, streak_stats, MonthGrid, ViewRange};
use crate::services::badges::{evaluate_achievements, AchievementStatus};
use crate::services::leaderboard::{
    rank_members, rank_of, sample_roster, sort_entries, LeaderboardEntry, MemberRecord, SortKey,
};
use crate::services::{ActivityDataSource, PostLogSource, PostStore, SampleDataSource};
use crate::types::{DailyActivityMap, StreakStats};

use super::theme::Theme;
use super::widgets::{
    achievements::AchievementsView,
    calendar::CalendarView,
    help::HelpPopup,
    leaderboard::LeaderboardView,
    overview::{Overview, OverviewData},
    spinner::Spinner,
    tabs::Tab,
};

/// Name under which the local user appears on the leaderboard
const SELF_NAME: &str = "You";

/// Seed for the demo data source
const SAMPLE_SEED: u64 = 42;

/// Application state
pub enum AppState {
    /// Loading the post log with spinner animation
    Loading { spinner_frame: usize },
    /// Ready with loaded data
    Ready { data: Box<AppData> },
    /// Error state
    Error { message: String },
}

/// Loaded application data
pub struct AppData {
    pub range: ViewRange,
    pub activity: DailyActivityMap,
    pub grids: Vec<MonthGrid>,
    pub stats: StreakStats,
    pub total_posts: u32,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub rank: Option<u32>,
    pub achievements: Vec<AchievementStatus>,
    source: Box<dyn ActivityDataSource + Send>,
}

impl AppData {
    /// Shift the visible range and refetch the activity map wholesale.
    /// Returns an error message when the data source fails.
    pub fn shift_range(&mut self, forward: bool, today: NaiveDate) -> Result<(), String> {
        let range = if forward {
            self.range.next()
        } else {
            self.range.prev()
        };
        let activity = self
            .source
            .fetch_activity(&range)
            .map_err(|e| e.to_string())?;
        self.grids = build_month_grids(&range);
        self.stats = streak_stats(&activity, today);
        self.range = range;
        self.activity = activity;
        Ok(())
    }

    /// Grid for the anchor (most recent) month
    pub fn anchor_grid(&self) -> Option<&MonthGrid> {
        self.grids.last()
    }
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    current_tab: Tab,
    sort_key: SortKey,
    show_help: bool,
    theme: Theme,
    today: NaiveDate,
}

impl App {
    /// Create a new app in loading state
    pub fn new(theme: Theme) -> Self {
        Self {
            state: AppState::Loading { spinner_frame: 0 },
            should_quit: false,
            current_tab: Tab::default(),
            sort_key: SortKey::default(),
            show_help: false,
            theme,
            today: Local::now().date_naive(),
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        if self.show_help {
                            self.show_help = false;
                        } else {
                            self.should_quit = true;
                        }
                    }
                    KeyCode::Tab => {
                        self.current_tab = self.current_tab.next();
                    }
                    KeyCode::BackTab => {
                        self.current_tab = self.current_tab.prev();
                    }
                    KeyCode::Char(c @ '1'..='4') => {
                        if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                            self.current_tab = tab;
                        }
                    }
                    KeyCode::Char('?') => {
                        self.show_help = !self.show_help;
                    }
                    KeyCode::Left | KeyCode::Char('h') if self.current_tab == Tab::Calendar => {
                        self.shift_range(false);
                    }
                    KeyCode::Right | KeyCode::Char('l') if self.current_tab == Tab::Calendar => {
                        self.shift_range(true);
                    }
                    KeyCode::Char('s') if self.current_tab == Tab::Leaderboard => {
                        self.sort_key = self.sort_key.next();
                        if let AppState::Ready { data } = &mut self.state {
                            sort_entries(&mut data.leaderboard, self.sort_key);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn shift_range(&mut self, forward: bool) {
        let today = self.today;
        if let AppState::Ready { data } = &mut self.state {
            if let Err(message) = data.shift_range(forward, today) {
                self.state = AppState::Error { message };
            }
        }
    }

    /// Apply data loading result to app state
    fn apply_data_result(&mut self, result: Result<Box<AppData>, String>) {
        match result {
            Ok(data) => self.state = AppState::Ready { data },
            Err(message) => self.state = AppState::Error { message },
        }
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading { spinner_frame } = &self.state {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(*spinner_frame),
            };
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading { spinner_frame } => {
                Spinner::new(*spinner_frame, self.theme).render(area, buf);
            }
            AppState::Ready { data } => {
                match self.current_tab {
                    Tab::Overview => {
                        if let Some(month) = data.anchor_grid() {
                            let overview_data = OverviewData {
                                stats: data.stats,
                                total_posts: data.total_posts,
                                rank: data.rank,
                                month,
                                activity: &data.activity,
                            };
                            Overview::new(overview_data, self.today, self.theme)
                                .with_tab(self.current_tab)
                                .render(area, buf);
                        }
                    }
                    Tab::Calendar => {
                        CalendarView::new(&data.grids, &data.activity, self.today, self.theme)
                            .with_tab(self.current_tab)
                            .render(area, buf);
                    }
                    Tab::Leaderboard => {
                        LeaderboardView::new(&data.leaderboard, self.sort_key, self.theme)
                            .with_tab(self.current_tab)
                            .render(area, buf);
                    }
                    Tab::Achievements => {
                        AchievementsView::new(&data.achievements, self.theme)
                            .with_tab(self.current_tab)
                            .render(area, buf);
                    }
                }

                // Render help popup overlay if active
                if self.show_help {
                    let popup_area = HelpPopup::centered_area(area);
                    HelpPopup::new(self.theme).render(popup_area, buf);
                }
            }
            AppState::Error { message } => {
                let y = area.y + area.height / 2;
                let text = format!("Error: {}", message);
                let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
                buf.set_string(x, y, &text, Style::default().fg(self.theme.error()));
            }
        }
    }
}

/// Run the TUI application
pub fn run(sample: bool) -> anyhow::Result<()> {
    // Theme detection reads the terminal and must happen before raw mode
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, theme, sample);
    ratatui::restore();
    result
}

/// Load data synchronously (extracted for background thread)
pub fn load_data_sync(sample: bool, today: NaiveDate) -> Result<Box<AppData>, String> {
    let range = ViewRange::ending_at(today, ViewRange::DEFAULT_MONTHS);

    let (source, log_total): (Box<dyn ActivityDataSource + Send>, Option<u32>) = if sample {
        (Box::new(SampleDataSource::new(SAMPLE_SEED)), None)
    } else {
        let store = PostStore::new().map_err(|e| e.to_string())?;
        let total = store.total_posts().map_err(|e| e.to_string())?;
        (Box::new(PostLogSource::new(store)), Some(total))
    };

    let activity = source.fetch_activity(&range).map_err(|e| e.to_string())?;

    // Demo mode has no log; count one notional post per activity tier instead
    let total_posts = log_total
        .unwrap_or_else(|| activity.iter().map(|(_, level)| level.tier() as u32).sum());
    let grids = build_month_grids(&range);
    let stats = streak_stats(&activity, today);

    let mut roster = sample_roster();
    roster.push(MemberRecord::new(SELF_NAME, stats.current, total_posts));
    let leaderboard = rank_members(roster);
    let rank = rank_of(&leaderboard, SELF_NAME);

    let achievements = evaluate_achievements(stats.longest, total_posts);

    Ok(Box::new(AppData {
        range,
        activity,
        grids,
        stats,
        total_posts,
        leaderboard,
        rank,
        achievements,
        source,
    }))
}

fn run_app(terminal: &mut DefaultTerminal, theme: Theme, sample: bool) -> anyhow::Result<()> {
    let mut app = App::new(theme);
    let today = app.today;

    // Spawn background thread for data loading
    let (data_tx, data_rx) = mpsc::channel();
    thread::spawn(move || {
        let result = load_data_sync(sample, today);
        let _ = data_tx.send(result);
    });

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Check for data loading completion (non-blocking)
        if matches!(app.state, AppState::Loading { .. }) {
            if let Ok(result) = data_rx.try_recv() {
                app.apply_data_result(result);
            }
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}
