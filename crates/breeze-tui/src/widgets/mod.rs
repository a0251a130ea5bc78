//! Ratatui widgets for the breeze TUI.

pub mod help;
pub mod result_list;
pub mod search_bar;
pub mod weather_pane;
