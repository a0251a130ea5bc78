//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types.
//!
//! # Keybindings
//!
//! | Key(s)          | Event               |
//! |-----------------|---------------------|
//! | `q`, `Ctrl+c`   | `Quit`              |
//! | `/`             | `OpenSearch`        |
//! | `↑` / `k`       | `Nav(Up)`           |
//! | `↓` / `j`       | `Nav(Down)`         |
//! | `←` / `h`       | `Nav(Left)`         |
//! | `→` / `l`       | `Nav(Right)`        |
//! | printable char  | `Char(c)`           |
//! | `Backspace`     | `Backspace`         |
//! | `Enter`         | `Enter`             |
//! | `Escape`        | `Escape`            |
//! | terminal resize | `Resize(w, h)`      |
//!
//! ## Insert mode
//!
//! While the search panel is open the event loop calls
//! [`to_app_event_insert`] instead. In insert mode:
//! - `q`, `/`, and hjkl produce `Char` events so the user can type freely
//! - Arrow keys still produce `Nav` for cursor movement and list navigation
//! - Only `Ctrl+c`, `Escape`, `Enter`, and `Backspace` keep their special
//!   bindings

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for result-list navigation and text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
///
/// Widgets receive `AppEvent` values — they never inspect crossterm types
/// directly. The App shell routes events based on whether the search panel
/// is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Open the search panel.
    OpenSearch,
    /// Navigate the result list (Up/Down) or move the text cursor (Left/Right).
    Nav(Direction),
    /// A printable character forwarded to the search input.
    Char(char),
    /// Delete the character before the cursor in the search input.
    Backspace,
    /// Select the highlighted result.
    Enter,
    /// Dismiss the search panel (or the help popup).
    Escape,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal mode).
///
/// Returns `None` for events that carry no semantic meaning for the
/// application (mouse events, key-release events on terminals that emit
/// them, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input ("insert")
/// mode — used while the search panel is open.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Quit — q (normal mode) or Ctrl+c anywhere
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        // Search panel
        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::OpenSearch),

        // List navigation
        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        // Remaining printable characters (the help toggle `?` arrives here)
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

/// Key mapping for text-input / insert mode.
///
/// All printable characters (with or without Shift) forward as `Char`.
/// Arrow keys produce `Nav` so `←`/`→` move the text cursor and `↑`/`↓`
/// walk the result list. Navigation shortcut letters (hjkl, q) yield their
/// literal characters.
fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        // Every printable character — including letters that are shortcuts
        // in normal mode — is forwarded verbatim
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(to_app_event(press(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }

    #[test]
    fn open_search() {
        assert_eq!(
            to_app_event(press(KeyCode::Char('/'))),
            Some(AppEvent::OpenSearch)
        );
    }

    #[test]
    fn nav_arrows() {
        assert_eq!(
            to_app_event(press(KeyCode::Up)),
            Some(AppEvent::Nav(Direction::Up))
        );
        assert_eq!(
            to_app_event(press(KeyCode::Down)),
            Some(AppEvent::Nav(Direction::Down))
        );
        assert_eq!(
            to_app_event(press(KeyCode::Left)),
            Some(AppEvent::Nav(Direction::Left))
        );
        assert_eq!(
            to_app_event(press(KeyCode::Right)),
            Some(AppEvent::Nav(Direction::Right))
        );
    }

    #[test]
    fn nav_hjkl() {
        assert_eq!(
            to_app_event(press(KeyCode::Char('k'))),
            Some(AppEvent::Nav(Direction::Up))
        );
        assert_eq!(
            to_app_event(press(KeyCode::Char('j'))),
            Some(AppEvent::Nav(Direction::Down))
        );
    }

    #[test]
    fn char_forwarding() {
        assert_eq!(
            to_app_event(press(KeyCode::Char('?'))),
            Some(AppEvent::Char('?'))
        );
        // Uppercase (SHIFT held)
        assert_eq!(
            to_app_event(key(KeyCode::Char('L'), KeyModifiers::SHIFT)),
            Some(AppEvent::Char('L'))
        );
    }

    #[test]
    fn backspace_enter_escape() {
        assert_eq!(
            to_app_event(press(KeyCode::Backspace)),
            Some(AppEvent::Backspace)
        );
        assert_eq!(to_app_event(press(KeyCode::Enter)), Some(AppEvent::Enter));
        assert_eq!(to_app_event(press(KeyCode::Esc)), Some(AppEvent::Escape));
    }

    #[test]
    fn resize_event() {
        assert_eq!(
            to_app_event(Event::Resize(120, 40)),
            Some(AppEvent::Resize(120, 40))
        );
    }

    #[test]
    fn unbound_key_returns_none() {
        assert_eq!(to_app_event(press(KeyCode::F(5))), None);
    }

    // ── Insert mode ────────────────────────────────────────────────────────

    #[test]
    fn insert_mode_shortcut_letters_are_chars() {
        // hjkl, q, and / must type their literal characters in insert mode
        for ch in ['h', 'j', 'k', 'l', 'q', '/'] {
            let ev = press(KeyCode::Char(ch));
            assert_eq!(
                to_app_event_insert(ev),
                Some(AppEvent::Char(ch)),
                "insert mode: '{ch}' should produce Char, not a shortcut event"
            );
        }
    }

    #[test]
    fn insert_mode_arrow_keys_are_nav() {
        assert_eq!(
            to_app_event_insert(press(KeyCode::Left)),
            Some(AppEvent::Nav(Direction::Left))
        );
        assert_eq!(
            to_app_event_insert(press(KeyCode::Up)),
            Some(AppEvent::Nav(Direction::Up))
        );
    }

    #[test]
    fn insert_mode_ctrl_c_still_quits() {
        assert_eq!(
            to_app_event_insert(ctrl(KeyCode::Char('c'))),
            Some(AppEvent::Quit)
        );
    }
}
