//! Result list widget — geocoding candidates below the search bar.
//!
//! # Navigation (while the panel is open)
//!
//! - `↑` / `↓` move the highlight.
//! - `Enter` selects the highlighted row (handled by the app shell via
//!   [`SearchSession::select`](breeze_core::search::SearchSession::select)).
//!
//! Lookup failures render nothing special here: the prior rows stay visible,
//! per the degrade-silently error policy.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use breeze_core::{Location, LookupStatus};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultListState {
    /// Index of the highlighted row.
    pub cursor: usize,
}

impl ResultListState {
    /// Handle a navigation event. `len` is the current number of rows.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "results: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "results: cursor down");
            }
            _ => {}
        }
        self.clamp(len);
    }

    /// Keep the cursor inside the row range after the list shrinks.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultList<'a> {
    results: &'a [Location],
    status: LookupStatus,
    state: &'a ResultListState,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    pub fn new(
        results: &'a [Location],
        status: LookupStatus,
        state: &'a ResultListState,
        theme: &'a Theme,
    ) -> Self {
        Self { results, status, state, theme }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Results ")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.results.is_empty() {
            let placeholder = match self.status {
                LookupStatus::Pending => "searching…",
                LookupStatus::Success => "no matches",
                _ => "",
            };
            Paragraph::new(Line::from(Span::styled(placeholder, self.theme.hint)))
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .results
            .iter()
            .map(|loc| {
                ListItem::new(Line::from(vec![
                    Span::styled(loc.name.clone(), self.theme.title),
                    Span::raw("  "),
                    Span::styled(loc.region(), self.theme.hint),
                ]))
            })
            .collect();

        let list = List::new(items).highlight_style(self.theme.list_highlight);

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
