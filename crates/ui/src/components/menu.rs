use crate::theme::Theme;

use ratatui::{
    Frame,
    layout::Rect,
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use termfolio_core::{MENU_COMMANDS, MENU_TIP};

/// Side panel listing the clickable commands
pub struct CommandMenu {
    selected: Option<usize>,
}

impl CommandMenu {
    /// `selected` is highlighted only while the menu has focus
    pub fn new(selected: Option<usize>) -> Self {
        Self { selected }
    }

    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(MENU_COMMANDS.len() * 2 + 4);
        for (i, (command, description)) in MENU_COMMANDS.iter().enumerate() {
            let style = if self.selected == Some(i) { Theme::trigger_selected() } else { Theme::trigger() };
            lines.push(Line::from(Span::styled(*command, style)));
            lines.push(Line::from(Span::styled(format!("  {}", description), Theme::muted().bg(Theme::PANEL_BG))));
        }

        lines.push(Line::default());
        for row in textwrap::wrap(MENU_TIP, width.max(10)) {
            lines.push(Line::from(Span::styled(row.into_owned(), Theme::muted().bg(Theme::PANEL_BG).italic())));
        }
        lines
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(Span::styled("Commands", Theme::heading().bg(Theme::PANEL_BG)))
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .style(Theme::panel());
        let inner = block.inner(area);
        let paragraph = Paragraph::new(self.lines(inner.width as usize)).block(block);
        frame.render_widget(paragraph, area);
    }
}
