use crate::theme::Theme;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Title bar: owner name, home path and the traffic-light dots
pub struct Header<'a> {
    name: &'a str,
    home: &'a str,
}

impl<'a> Header<'a> {
    pub fn new(name: &'a str, home: &'a str) -> Self {
        Self { name, home }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let dots = Line::from(vec![
            Span::styled("● ", Theme::error()),
            Span::styled("● ", Theme::warning()),
            Span::styled("●", Theme::success()),
        ]);
        frame.render_widget(Paragraph::new(dots).style(Theme::panel()), area);

        let title = Line::from(vec![
            Span::styled(self.name, Theme::heading().bg(Theme::PANEL_BG)),
            Span::styled(" — ", Theme::muted().bg(Theme::PANEL_BG)),
            Span::styled(self.home_display(area.width), Theme::muted().bg(Theme::PANEL_BG)),
        ]);
        frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
    }

    /// Drop the home path on very narrow terminals
    fn home_display(&self, width: u16) -> &str {
        if (width as usize) < self.name.chars().count() + self.home.chars().count() + 14 { "" } else { self.home }
    }
}
