use crate::chat::{ChatPanel, ChatRole};
use crate::theme::Theme;

use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Renders the chat companion panel
pub struct ChatView<'a> {
    panel: &'a ChatPanel,
    focused: bool,
}

impl<'a> ChatView<'a> {
    pub fn new(panel: &'a ChatPanel, focused: bool) -> Self {
        Self { panel, focused }
    }

    /// Message history wrapped to `width`, newest last
    pub fn message_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for message in self.panel.messages() {
            let (label, style) = match message.role {
                ChatRole::Visitor => ("You", Theme::muted().bg(Theme::PANEL_BG)),
                ChatRole::Companion => ("chai", Theme::primary().bg(Theme::PANEL_BG)),
            };
            lines.push(Line::from(Span::styled(format!("{}:", label), style)));
            for row in textwrap::wrap(&message.text, width.max(8)) {
                lines.push(Line::from(Span::styled(row.into_owned(), Theme::panel())));
            }
            lines.push(Line::default());
        }
        lines
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let border = if self.focused { Theme::primary() } else { Theme::border() };
        let block = Block::default()
            .title(Span::styled("chai chat", Theme::heading().bg(Theme::PANEL_BG)))
            .borders(Borders::ALL)
            .border_style(border)
            .style(Theme::panel());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 || inner.width == 0 {
            return;
        }

        let history = Rect { height: inner.height - 1, ..inner };
        let input_row = Rect { y: inner.y + inner.height - 1, height: 1, ..inner };

        let lines = self.message_lines(inner.width as usize);
        let skip = lines.len().saturating_sub(history.height as usize);
        frame.render_widget(Paragraph::new(lines[skip..].to_vec()), history);

        let input = &self.panel.input;
        let prompt = Line::from(vec![
            Span::styled("> ", Theme::primary().bg(Theme::PANEL_BG)),
            Span::styled(input.buffer.as_str(), Theme::panel()),
        ]);
        frame.render_widget(Paragraph::new(prompt), input_row);

        if self.focused {
            let before: String = input.buffer.chars().take(input.cursor).collect();
            let x = input_row.x.saturating_add(2 + before.width() as u16).min(input_row.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, input_row.y));
        }
    }
}
