//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. The loop is
//! single-threaded and cooperative: each tick draws the frame, polls input
//! for 16 ms, dispatches any lookup that became due, and drains completed
//! lookups from the outcome channel back into the session. Geocoding
//! requests themselves run on tokio background tasks.

use crate::{
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        help::HelpPopup,
        result_list::{ResultList, ResultListState},
        search_bar::{SearchBar, SearchBarState},
        weather_pane::WeatherPane,
    },
};
use breeze_core::{
    config::Config,
    search::{LookupOutcome, LookupRequest, SearchSession},
    Location,
};
use breeze_geo::GeoClient;
use chrono::{DateTime, Local};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub session: SearchSession,
    pub search_bar: SearchBarState,
    pub results: ResultListState,
    /// The location shown in the weather pane, with its selection time.
    pub selected: Option<(Location, DateTime<Local>)>,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    client: GeoClient,
    outcome_tx: mpsc::UnboundedSender<LookupOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<LookupOutcome>,
}

impl App {
    pub fn new(config: Config, theme: Theme, client: GeoClient) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let state = AppState {
            session: SearchSession::new(config.search.debounce_delay()),
            search_bar: SearchBarState::default(),
            results: ResultListState::default(),
            selected: None,
            theme,
            config,
            show_help: false,
            quit: false,
        };
        App { state, client, outcome_tx, outcome_rx }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on
    /// exit. Raw mode bounds the lifetime of the global key listener: outside
    /// this call no key handling of any kind is active.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Nothing may fire after the loop is gone.
        self.state.session.cancel_pending();

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let app_event = match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping while the search panel is open
                        if self.is_insert_mode() {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        }
                    }
                    other => event::to_app_event(other),
                };
                if let Some(ev) = app_event {
                    tracing::debug!(open = self.state.session.is_open, event = ?ev, "key event");
                    self.handle(ev);
                }
            }

            self.dispatch_due_lookup();
            self.drain_outcomes();
        }
        Ok(())
    }

    fn is_insert_mode(&self) -> bool {
        self.state.session.is_open && !self.state.show_help
    }

    pub(crate) fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            // Toggle help (never reached while typing — '?' maps to Char and
            // the insert branch below claims it first when the panel is open)
            AppEvent::Char('?') if !s.session.is_open => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::OpenSearch => {
                tracing::debug!("search panel opened");
                s.session.open();
            }

            // Escape closes the panel when open; strict no-op otherwise.
            AppEvent::Escape => {
                s.session.on_escape();
            }

            // Panel interaction while open
            AppEvent::Enter if s.session.is_open => {
                if let Some(location) = s.session.select(s.results.cursor) {
                    s.selected = Some((location, Local::now()));
                }
            }
            AppEvent::Nav(Direction::Up | Direction::Down) if s.session.is_open => {
                s.results.handle(&event, s.session.results.len());
            }
            AppEvent::Char(_) | AppEvent::Backspace | AppEvent::Nav(_)
                if s.session.is_open =>
            {
                if s.search_bar.handle(&event) {
                    s.results.cursor = 0;
                    s.session.set_query(s.search_bar.input.clone());
                }
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            _ => {}
        }
    }

    /// Hand a due lookup to a background task. The task rejoins the UI
    /// thread through the outcome channel.
    fn dispatch_due_lookup(&mut self) {
        if let Some(LookupRequest { seq, query }) = self.state.session.poll_due() {
            let client = self.client.clone();
            let tx = self.outcome_tx.clone();
            tokio::spawn(async move {
                let result = client.lookup(&query).await.map_err(|e| e.to_string());
                // The receiver only disappears on shutdown; a dropped outcome
                // is fine then.
                let _ = tx.send(LookupOutcome { seq, query, result });
            });
        }
    }

    /// Pull completed lookups into the session. Stale outcomes are discarded
    /// inside [`SearchSession::apply`].
    pub(crate) fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.state.session.apply(outcome);
            self.state.results.clamp(self.state.session.results.len());
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn outcome_sender(&self) -> mpsc::UnboundedSender<LookupOutcome> {
        self.outcome_tx.clone()
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    frame.render_widget(
        WeatherPane::new(
            state.selected.as_ref(),
            state.config.ui.show_coordinates,
            &state.theme,
        ),
        area,
    );

    if state.session.is_open {
        let (bar_area, list_area) = panel_areas(area, state.session.results.len());

        let bar = SearchBar::new(&state.search_bar, state.session.status, &state.theme);
        let (cx, cy) = bar.cursor_position(bar_area);
        frame.render_widget(ratatui::widgets::Clear, bar_area);
        frame.render_widget(bar, bar_area);

        frame.render_widget(ratatui::widgets::Clear, list_area);
        frame.render_widget(
            ResultList::new(
                &state.session.results,
                state.session.status,
                &state.results,
                &state.theme,
            ),
            list_area,
        );

        frame.set_cursor_position((cx, cy));
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }
}

/// Search panel geometry: a column near the top of the screen, search bar on
/// top of the result list. The list grows with the results, up to 8 rows.
fn panel_areas(area: Rect, result_count: usize) -> (Rect, Rect) {
    let width = area.width.saturating_sub(4).min(60);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let list_rows = result_count.clamp(1, 8) as u16 + 2;
    let panel = Rect {
        x,
        y: area.y + 1,
        width,
        height: (3 + list_rows).min(area.height.saturating_sub(1)),
    };

    let chunks = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(panel);
    (chunks[0], chunks[1])
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use breeze_core::LookupStatus;

    fn test_app() -> App {
        let config = Config::defaults();
        let theme = Theme::load_default();
        let client = GeoClient::from_config(&config.geocoding, "test-key")
            .expect("default endpoint is valid");
        App::new(config, theme, client)
    }

    fn london() -> Location {
        Location {
            name: "London".to_string(),
            state: None,
            country: "GB".to_string(),
            lat: 51.5,
            lon: -0.12,
        }
    }

    #[tokio::test]
    async fn slash_opens_panel_and_escape_closes_it() {
        let mut app = test_app();
        app.handle(AppEvent::OpenSearch);
        assert!(app.state().session.is_open);

        app.handle(AppEvent::Escape);
        assert!(!app.state().session.is_open);

        // Escape while closed is a no-op.
        app.handle(AppEvent::Escape);
        assert!(!app.state().session.is_open);
        assert!(!app.state().quit);
    }

    #[tokio::test]
    async fn typing_echoes_into_session_query() {
        let mut app = test_app();
        app.handle(AppEvent::OpenSearch);
        for c in "Rome".chars() {
            app.handle(AppEvent::Char(c));
        }
        assert_eq!(app.state().session.query, "Rome");
        assert!(app.state().session.lookup_scheduled());
    }

    #[tokio::test]
    async fn enter_selects_highlighted_result() {
        let mut app = test_app();
        app.handle(AppEvent::OpenSearch);
        app.state.session.results = vec![london()];
        app.state.session.query = "London".to_string();

        app.handle(AppEvent::Enter);
        assert!(!app.state().session.is_open);
        let (picked, _) = app.state().selected.as_ref().expect("selection made");
        assert_eq!(picked.name, "London");
        // Query and results survive the selection.
        assert_eq!(app.state().session.query, "London");
        assert_eq!(app.state().session.results.len(), 1);
    }

    #[tokio::test]
    async fn outcomes_flow_from_channel_into_session() {
        let mut app = test_app();
        app.handle(AppEvent::OpenSearch);
        app.state.session.query = "London".to_string();

        // Simulate a lookup the session never dispatched: stale, discarded.
        app.outcome_sender()
            .send(LookupOutcome {
                seq: 99,
                query: "London".to_string(),
                result: Ok(vec![london()]),
            })
            .expect("receiver alive");
        app.drain_outcomes();
        assert!(app.state().session.results.is_empty());
        assert_eq!(app.state().session.status, LookupStatus::Idle);
    }

    #[tokio::test]
    async fn help_popup_intercepts_events() {
        let mut app = test_app();
        app.handle(AppEvent::Char('?'));
        assert!(app.state().show_help);

        // Ordinary keys pass through without effect.
        app.handle(AppEvent::Char('x'));
        assert!(app.state().show_help);
        assert_eq!(app.state().session.query, "");

        app.handle(AppEvent::Escape);
        assert!(!app.state().show_help);
    }

    #[tokio::test]
    async fn nav_moves_result_cursor_within_bounds() {
        let mut app = test_app();
        app.handle(AppEvent::OpenSearch);
        app.state.session.results = vec![london(), london(), london()];

        app.handle(AppEvent::Nav(Direction::Down));
        app.handle(AppEvent::Nav(Direction::Down));
        app.handle(AppEvent::Nav(Direction::Down));
        assert_eq!(app.state().results.cursor, 2);

        app.handle(AppEvent::Nav(Direction::Up));
        assert_eq!(app.state().results.cursor, 1);
    }
}
