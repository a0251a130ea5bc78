//! Search bar widget — the text input at the top of the search panel.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor on char boundaries.
//!
//! The widget owns only the input text and cursor; after every text change
//! the app shell pushes the new text into the
//! [`SearchSession`](breeze_core::search::SearchSession).

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use breeze_core::LookupStatus;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// The city name typed by the user.
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
}

impl SearchBarState {
    /// Handle a key event from the app shell.
    ///
    /// Returns `true` when the input text changed (so the caller must push
    /// the new text into the search session); cursor-only movement returns
    /// `false`.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(input = %self.input, cursor = self.cursor, "search bar: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    // Walk back one char boundary
                    let prev = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.input.remove(prev);
                    self.cursor = prev;
                    tracing::debug!(input = %self.input, cursor = self.cursor, "search bar: backspace");
                    true
                } else {
                    false
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.input.len() {
                    let next = self.input[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.input.len());
                    self.cursor = next;
                }
                false
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    status: LookupStatus,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(state: &'a SearchBarState, status: LookupStatus, theme: &'a Theme) -> Self {
        Self { state, status, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.input[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.status {
            LookupStatus::Pending => Line::from(vec![
                Span::raw(" Search city "),
                Span::styled("● searching ", self.theme.status_pending),
            ]),
            LookupStatus::Error => Line::from(vec![
                Span::raw(" Search city "),
                Span::styled("○ offline ", self.theme.status_error),
            ]),
            _ => Line::from(" Search city "),
        };

        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border_focused);

        let inner = block.inner(area);
        block.render(area, buf);

        let input_line = if self.state.input.is_empty() {
            Line::from(Span::styled("type a city name…", self.theme.hint))
        } else {
            Line::from(self.state.input.as_str())
        };
        Paragraph::new(input_line).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
