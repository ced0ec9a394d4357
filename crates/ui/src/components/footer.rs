use crate::{state::Focus, theme::Theme};

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key hints for the focused region, plus the latest notice on the right
pub struct Footer<'a> {
    focus: Focus,
    notice: Option<&'a str>,
}

impl<'a> Footer<'a> {
    pub fn new(focus: Focus, notice: Option<&'a str>) -> Self {
        Self { focus, notice }
    }

    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.focus {
            Focus::Input => &[
                ("[Enter]", " run  "),
                ("[↑↓]", " history  "),
                ("[Tab]", " menu  "),
                ("[PgUp/PgDn]", " scroll  "),
                ("[Ctrl+C]", " quit"),
            ],
            Focus::Menu => &[("[↑↓]", " select  "), ("[Enter]", " run  "), ("[Tab]", " next  "), ("[Esc]", " back")],
            Focus::Links => &[("[←→]", " select  "), ("[Enter]", " open  "), ("[Tab]", " next  "), ("[Esc]", " back")],
            Focus::Chat => &[("[Enter]", " send  "), ("[Tab]", " next  "), ("[Esc]", " close chat")],
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let spans: Vec<Span<'_>> = self
            .hints()
            .iter()
            .flat_map(|(key, label)| [Span::styled(*key, Theme::primary()), Span::styled(*label, Theme::muted())])
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)).style(Theme::base()), area);

        if let Some(notice) = self.notice {
            let notice = Paragraph::new(Line::from(Span::styled(notice, Theme::success()))).alignment(Alignment::Right);
            frame.render_widget(notice, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_focus() {
        assert_eq!(Footer::new(Focus::Input, None).hints()[0].0, "[Enter]");
        assert!(Footer::new(Focus::Chat, None).hints().iter().any(|(_, l)| l.contains("close chat")));
        assert!(Footer::new(Focus::Links, None).hints().iter().any(|(_, l)| l.contains("open")));
    }
}
