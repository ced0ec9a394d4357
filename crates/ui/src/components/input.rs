use crate::theme::Theme;

use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use termfolio_core::InputState;
use unicode_width::UnicodeWidthStr;

/// The `visitor@host ~ %` line the visitor types into
pub struct PromptLine<'a> {
    prompt: &'a str,
    input: &'a InputState,
    focused: bool,
    /// `n/total` while recalling history
    history: Option<String>,
}

impl<'a> PromptLine<'a> {
    pub fn new(prompt: &'a str, input: &'a InputState, focused: bool) -> Self {
        Self { prompt, input, focused, history: None }
    }

    pub fn with_history(mut self, position: Option<String>) -> Self {
        self.history = position;
        self
    }

    /// Columns from the left edge to the cursor
    pub fn cursor_offset(&self) -> u16 {
        let before: String = self.input.buffer.chars().take(self.input.cursor).collect();
        (self.prompt.width() + 1 + before.width()) as u16
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled(self.prompt, Theme::prompt()),
            Span::styled(" ", Theme::base()),
            Span::styled(self.input.buffer.as_str(), Theme::base()),
        ];
        if let Some(position) = &self.history {
            spans.push(Span::styled(format!("  [{}]", position), Theme::muted()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(Theme::base()), area);

        if self.focused {
            let x = area.x.saturating_add(self.cursor_offset()).min(area.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_cursor_offset_counts_display_width() {
        let mut input = InputState::new();
        input.insert_str("ab☕");
        let line = PromptLine::new("visitor ~ %", &input, true);
        assert_eq!(line.cursor_offset(), 12 + 4);

        input.move_home();
        let line = PromptLine::new("visitor ~ %", &input, true);
        assert_eq!(line.cursor_offset(), 12);
    }

    #[test]
    fn test_render_shows_prompt_and_history() {
        let mut input = InputState::new();
        input.set("help");
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| {
                PromptLine::new("visitor@n33lsterminal ~ %", &input, true)
                    .with_history(Some("2/3".to_string()))
                    .render(f, f.area())
            })
            .unwrap();

        let row: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(row.starts_with("visitor@n33lsterminal ~ % help"));
        assert!(row.contains("[2/3]"));
    }
}
