use crate::theme::Theme;

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block as Panel, Paragraph},
};
use termfolio_core::{Block, Inline, Terminal, TerminalHooks, VisibleOutput};
use unicode_width::UnicodeWidthChar;

/// Transcript lines for one frame plus the triggers they contain
#[derive(Debug, Default)]
pub struct RenderedTranscript {
    pub lines: Vec<Line<'static>>,
    /// Command strings of embedded triggers, in reading order
    pub links: Vec<String>,
}

impl RenderedTranscript {
    /// Build the styled transcript; `selected_link` highlights one trigger
    pub fn build<H: TerminalHooks>(terminal: &Terminal<H>, selected_link: Option<usize>) -> Self {
        let mut out = Self::default();

        for entry in terminal.entries() {
            if !entry.is_system() {
                out.lines.push(Line::from(vec![
                    Span::styled(terminal.prompt().to_string(), Theme::prompt()),
                    Span::styled(" ", Theme::base()),
                    Span::styled(entry.command_text.clone(), Theme::base()),
                ]));
            }

            match terminal.visible(entry) {
                VisibleOutput::Text(text) => {
                    out.lines.extend(text.lines().map(|l| Line::from(Span::styled(l.to_string(), Theme::base()))));
                }
                VisibleOutput::Blocks(blocks) => {
                    for block in &blocks {
                        out.push_block(block, selected_link);
                    }
                }
                VisibleOutput::Download { lines, interrupted } => {
                    out.lines.extend(lines.into_iter().map(download_line));
                    if interrupted {
                        out.lines.push(Line::from(Span::styled("^C", Theme::muted())));
                    }
                }
            }
            out.lines.push(Line::default());
        }
        out
    }

    fn push_block(&mut self, block: &Block, selected_link: Option<usize>) {
        match block {
            Block::Line { inlines } => {
                let spans = inlines.iter().map(|inline| self.inline_span(inline, selected_link)).collect::<Vec<_>>();
                self.lines.push(Line::from(spans));
            }
            Block::Heading { text } => self.lines.push(Line::from(Span::styled(text.clone(), Theme::heading()))),
            Block::Tags { tags } => {
                let mut spans = Vec::with_capacity(tags.len() * 2);
                for tag in tags {
                    if !spans.is_empty() {
                        spans.push(Span::styled(" ", Theme::base()));
                    }
                    spans.push(Span::styled(format!(" {} ", tag), Theme::tag()));
                }
                self.lines.push(Line::from(spans));
            }
            Block::Image { alt, .. } => {
                self.lines.push(Line::from(Span::styled(format!("[image: {}]", alt), Theme::muted())));
            }
            Block::Blank => self.lines.push(Line::default()),
            Block::Group { children } => {
                for child in children {
                    self.push_block(child, selected_link);
                }
            }
        }
    }

    fn inline_span(&mut self, inline: &Inline, selected_link: Option<usize>) -> Span<'static> {
        match inline {
            Inline::Text { text, tone } => Span::styled(text.clone(), Theme::tone(*tone)),
            Inline::Link { label, .. } => Span::styled(label.clone(), Theme::link()),
            Inline::Command { label, command } => {
                let style =
                    if selected_link == Some(self.links.len()) { Theme::trigger_selected() } else { Theme::trigger() };
                self.links.push(command.clone());
                Span::styled(label.clone(), style)
            }
        }
    }
}

fn download_line(line: String) -> Line<'static> {
    let style = if line.contains("%[") {
        Theme::primary()
    } else if line.ends_with("' saved") || line.contains("downloaded successfully") {
        Theme::success()
    } else {
        Theme::base()
    };
    Line::from(Span::styled(line, style))
}

/// Hard-wrap `line` to `width` display columns, keeping span styles
pub fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line];
    }

    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in line.spans {
        let style = span.style;
        let mut chunk = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !chunk.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                rows.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            chunk.push(c);
            used += w;
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, style));
        }
    }
    rows.push(Line::from(current));
    rows
}

pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    lines.into_iter().flat_map(|line| wrap_line(line, width)).collect()
}

/// Scrolling transcript pane
pub struct TranscriptPane<'a> {
    lines: &'a [Line<'static>],
    scroll_top: usize,
}

impl<'a> TranscriptPane<'a> {
    /// `lines` must already be wrapped to the pane width
    pub fn new(lines: &'a [Line<'static>], scroll_top: usize) -> Self {
        Self { lines, scroll_top }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let start = self.scroll_top.min(self.lines.len());
        let end = (start + area.height as usize).min(self.lines.len());
        let paragraph = Paragraph::new(self.lines[start..end].to_vec()).block(Panel::default().style(Theme::base()));
        frame.render_widget(paragraph, area);
    }
}
