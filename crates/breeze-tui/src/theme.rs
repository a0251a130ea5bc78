//! Colour theme for the breeze TUI.
//!
//! Themes are defined as TOML files. The built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::load`] with the `[ui] theme` config value at startup
//! and pass the result through the application as a shared reference.

use breeze_core::LookupStatus;
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(ref s) = self.fg {
            if let Some(c) = parse_color(s) {
                style = style.fg(c);
            }
        }
        if let Some(ref s) = self.bg {
            if let Some(c) = parse_color(s) {
                style = style.bg(c);
            }
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    pending: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawList {
    highlight: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawText {
    title: RawStyle,
    hint: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    status: RawStatus,
    list: RawList,
    text: RawText,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// Load once at startup and pass as a shared reference throughout the TUI.
/// All styles are pre-resolved ratatui [`Style`] values — no allocation at
/// render time.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,

    /// Marker style while a lookup is in flight.
    pub status_pending: Style,
    /// Marker style after a failed lookup.
    pub status_error: Style,

    /// Highlight applied to the selected result row.
    pub list_highlight: Style,

    /// Pane titles and the selected location name.
    pub title: Style,
    /// Dim helper text (placeholders, key hints, subtitles).
    pub hint: Style,
}

impl Theme {
    /// Load the embedded theme named in the config. Unknown names fall back
    /// to the default theme.
    pub fn load(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            _ => Self::load_default(),
        }
    }

    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which cannot happen for a
    /// released binary.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored so user themes can be forward-compatible
    /// with future theme additions.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            status_pending: raw.status.pending.into_style(),
            status_error: raw.status.error.into_style(),
            list_highlight: raw.list.highlight.into_style(),
            title: raw.text.title.into_style(),
            hint: raw.text.hint.into_style(),
        })
    }

    /// Style for the status marker rendered next to the search input, or the
    /// default style when the status needs no marker.
    pub fn status_style(&self, status: LookupStatus) -> Style {
        match status {
            LookupStatus::Pending => self.status_pending,
            LookupStatus::Error => self.status_error,
            LookupStatus::Idle | LookupStatus::Success => Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        // Spot-check a few resolved styles.
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.status_pending, Style::default());
        assert_ne!(theme.list_highlight, Style::default());
    }

    #[test]
    fn gruvbox_dark_theme_loads() {
        let theme = Theme::load_gruvbox_dark();
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.status_error, Style::default());
    }

    #[test]
    fn load_by_name_falls_back_to_default() {
        // No panic on unknown names.
        let _ = Theme::load("no-such-theme");
        let _ = Theme::load("gruvbox");
    }

    #[test]
    fn status_style_only_marks_pending_and_error() {
        let theme = Theme::load_default();
        assert_eq!(theme.status_style(LookupStatus::Idle), Style::default());
        assert_eq!(theme.status_style(LookupStatus::Success), Style::default());
        assert_ne!(theme.status_style(LookupStatus::Pending), Style::default());
        assert_ne!(theme.status_style(LookupStatus::Error), Style::default());
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
