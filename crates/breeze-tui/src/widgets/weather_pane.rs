//! Weather pane — the main view behind the search panel.
//!
//! Shows the selected location, its coordinates, and the route target the
//! external weather view consumes. Before any selection it shows a key hint.

use crate::theme::Theme;
use breeze_core::Location;
use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct WeatherPane<'a> {
    selected: Option<&'a (Location, DateTime<Local>)>,
    show_coordinates: bool,
    theme: &'a Theme,
}

impl<'a> WeatherPane<'a> {
    pub fn new(
        selected: Option<&'a (Location, DateTime<Local>)>,
        show_coordinates: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { selected, show_coordinates, theme }
    }
}

impl Widget for WeatherPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Weather ")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = match self.selected {
            None => vec![
                Line::default(),
                Line::from(Span::styled(
                    "  press / to search for a city",
                    self.theme.hint,
                )),
            ],
            Some((location, selected_at)) => {
                let mut lines = vec![
                    Line::default(),
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(location.name.clone(), self.theme.title),
                        Span::raw("  "),
                        Span::styled(location.region(), self.theme.hint),
                    ]),
                ];
                if self.show_coordinates {
                    lines.push(Line::from(Span::raw(format!(
                        "  {:.2}°, {:.2}°",
                        location.lat, location.lon
                    ))));
                }
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    Span::styled("  view: ", self.theme.hint),
                    Span::raw(location.weather_route()),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("  selected {}", selected_at.format("%H:%M:%S")),
                    self.theme.hint,
                )));
                lines
            }
        };

        Paragraph::new(lines).render(inner, buf);
    }
}
