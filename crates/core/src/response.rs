//! Typed response descriptors.
//!
//! A command produces a [`ResponseDescriptor`]: structured data only. How a
//! tone maps to a color, or how an image placeholder looks, is the
//! presentation layer's business.

use serde::Serialize;
use std::time::Duration;

/// Semantic styling for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Normal,
    /// Headings and titles
    Primary,
    /// Secondary text (dates, locations, hints)
    Muted,
    /// Directory names, command names
    Accent,
    /// Paths, positive outcomes
    Success,
    /// Redirects and notices
    Warning,
    /// Highlighted figures inside prose
    Emphasis,
}

/// Inline content of a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String, tone: Tone },
    Link { label: String, href: String },
    /// Activating the label re-invokes the interpreter with `command`
    Command { label: String, command: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into(), tone: Tone::Normal }
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Inline::Text { text: text.into(), tone }
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Inline::Link { label: label.into(), href: href.into() }
    }

    pub fn command(label: impl Into<String>, command: impl Into<String>) -> Self {
        Inline::Command { label: label.into(), command: command.into() }
    }

    /// Visible characters of this inline
    pub fn label(&self) -> &str {
        match self {
            Inline::Text { text, .. } => text,
            Inline::Link { label, .. } | Inline::Command { label, .. } => label,
        }
    }
}

/// Block-level structured content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Line { inlines: Vec<Inline> },
    Heading { text: String },
    /// Skill chips
    Tags { tags: Vec<String> },
    /// Picture placeholder (terminals show the alt text)
    Image { alt: String, source: String },
    Blank,
    Group { children: Vec<Block> },
}

impl Block {
    pub fn line(inlines: Vec<Inline>) -> Self {
        Block::Line { inlines }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Block::Line { inlines: vec![Inline::text(text)] }
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Block::Line { inlines: vec![Inline::styled(text, tone)] }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading { text: text.into() }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::Tags { tags: tags.into_iter().map(Into::into).collect() }
    }

    pub fn image(alt: impl Into<String>, source: impl Into<String>) -> Self {
        Block::Image { alt: alt.into(), source: source.into() }
    }

    pub fn group(children: Vec<Block>) -> Self {
        Block::Group { children }
    }

    /// Whether a typewriter can step through this block character by character
    pub fn is_text_only(&self) -> bool {
        match self {
            Block::Line { inlines } => inlines.iter().all(|i| matches!(i, Inline::Text { .. })),
            Block::Heading { .. } | Block::Blank => true,
            Block::Tags { .. } | Block::Image { .. } => false,
            Block::Group { children } => children.iter().all(Block::is_text_only),
        }
    }

    /// Flattened text, one line per leaf block
    pub fn plain_text(&self) -> String {
        self.plain_lines().join("\n")
    }

    pub fn plain_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.collect_lines(&mut lines);
        lines
    }

    fn collect_lines(&self, out: &mut Vec<String>) {
        match self {
            Block::Line { inlines } => out.push(inlines.iter().map(Inline::label).collect()),
            Block::Heading { text } => out.push(text.clone()),
            Block::Tags { tags } => {
                out.push(tags.iter().map(|t| format!("[{}]", t)).collect::<Vec<_>>().join(" "));
            }
            Block::Image { alt, .. } => out.push(format!("[image: {}]", alt)),
            Block::Blank => out.push(String::new()),
            Block::Group { children } => children.iter().for_each(|c| c.collect_lines(out)),
        }
    }

    /// Number of characters a typewriter has to reveal (line breaks excluded)
    pub fn char_count(&self) -> usize {
        self.plain_lines().iter().map(|l| l.chars().count()).sum()
    }

    /// Embedded command triggers, in reading order
    pub fn commands(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_commands(&mut out);
        out
    }

    fn collect_commands<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Block::Line { inlines } => {
                for inline in inlines {
                    if let Inline::Command { command, .. } = inline {
                        out.push(command);
                    }
                }
            }
            Block::Group { children } => children.iter().for_each(|c| c.collect_commands(out)),
            _ => {}
        }
    }
}

/// How a single step of a staged reveal comes into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RevealMode {
    /// Shown in full as soon as the step is revealed
    Instant,
    /// Typed out one character every `per_char_ms`
    Typewriter { per_char_ms: u64 },
    /// Placeholder until `delay_ms` has elapsed
    Delayed { delay_ms: u64 },
}

impl RevealMode {
    pub fn typewriter(per_char_ms: u64) -> Self {
        RevealMode::Typewriter { per_char_ms }
    }

    pub fn delayed(delay_ms: u64) -> Self {
        RevealMode::Delayed { delay_ms }
    }
}

/// One block of a staged reveal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealStep {
    pub block: Block,
    pub mode: RevealMode,
    /// Whether reveal progress asks the pane to follow the bottom
    pub follow: bool,
}

impl RevealStep {
    pub fn instant(block: Block) -> Self {
        Self { block, mode: RevealMode::Instant, follow: false }
    }

    pub fn typed(block: Block, per_char_ms: u64) -> Self {
        Self { block, mode: RevealMode::typewriter(per_char_ms), follow: true }
    }

    pub fn delayed(block: Block, delay_ms: u64) -> Self {
        Self { block, mode: RevealMode::delayed(delay_ms), follow: true }
    }

    /// Disable follow-scroll requests for this step
    pub fn quiet(mut self) -> Self {
        self.follow = false;
        self
    }

    pub fn per_char(&self) -> Option<Duration> {
        match self.mode {
            RevealMode::Typewriter { per_char_ms } => Some(Duration::from_millis(per_char_ms)),
            _ => None,
        }
    }
}

/// Ordered sub-blocks revealed one after another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedReveal {
    pub steps: Vec<RevealStep>,
}

impl StagedReveal {
    pub fn new(steps: Vec<RevealStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Bespoke multi-stage animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    ResumeDownload,
}

/// What a command's output contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ResponseDescriptor {
    PlainText(String),
    Structured(Block),
    StagedReveal(StagedReveal),
    AnimatedTransfer(TransferKind),
}

impl ResponseDescriptor {
    /// Full textual content, ignoring any animation
    pub fn plain_text(&self) -> String {
        match self {
            ResponseDescriptor::PlainText(text) => text.clone(),
            ResponseDescriptor::Structured(block) => block.plain_text(),
            ResponseDescriptor::StagedReveal(staged) => {
                staged.steps.iter().map(|s| s.block.plain_text()).collect::<Vec<_>>().join("\n")
            }
            ResponseDescriptor::AnimatedTransfer(TransferKind::ResumeDownload) => "resume download".to_string(),
        }
    }

    /// Embedded command triggers anywhere in the response
    pub fn commands(&self) -> Vec<&str> {
        match self {
            ResponseDescriptor::Structured(block) => block.commands(),
            ResponseDescriptor::StagedReveal(staged) => staged.steps.iter().flat_map(|s| s.block.commands()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, ResponseDescriptor::StagedReveal(_) | ResponseDescriptor::AnimatedTransfer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> Block {
        Block::group(vec![
            Block::heading("Projects"),
            Block::line(vec![
                Inline::text("Check out my "),
                Inline::command("archived projects", "cat archives/old_projects.txt"),
                Inline::text("."),
            ]),
            Block::tags(["Rust", "Go"]),
            Block::image("logo", "/logo.png"),
        ])
    }

    #[test]
    fn test_plain_text_flattens_tree() {
        let text = sample_block().plain_text();
        assert_eq!(
            text,
            "Projects\nCheck out my archived projects.\n[Rust] [Go]\n[image: logo]"
        );
    }

    #[test]
    fn test_commands_in_reading_order() {
        assert_eq!(sample_block().commands(), vec!["cat archives/old_projects.txt"]);
    }

    #[test]
    fn test_is_text_only() {
        assert!(Block::text("hello").is_text_only());
        assert!(Block::group(vec![Block::heading("a"), Block::Blank]).is_text_only());
        assert!(!Block::line(vec![Inline::link("x", "https://x")]).is_text_only());
        assert!(!Block::tags(["a"]).is_text_only());
        assert!(!sample_block().is_text_only());
    }

    #[test]
    fn test_char_count_ignores_line_breaks() {
        let block = Block::group(vec![Block::text("abc"), Block::text("de")]);
        assert_eq!(block.char_count(), 5);
        assert_eq!(Block::text("héllo").char_count(), 5);
    }

    #[test]
    fn test_descriptor_plain_text() {
        let staged = ResponseDescriptor::StagedReveal(StagedReveal::new(vec![
            RevealStep::typed(Block::text("one"), 20),
            RevealStep::instant(Block::text("two")),
        ]));
        assert_eq!(staged.plain_text(), "one\ntwo");
        assert!(staged.is_animated());

        let plain = ResponseDescriptor::PlainText("hi".to_string());
        assert_eq!(plain.plain_text(), "hi");
        assert!(!plain.is_animated());
    }

    #[test]
    fn test_reveal_step_modes() {
        let typed = RevealStep::typed(Block::text("x"), 25);
        assert_eq!(typed.per_char(), Some(Duration::from_millis(25)));
        assert!(typed.follow);
        assert!(!typed.clone().quiet().follow);
        assert_eq!(RevealStep::instant(Block::Blank).per_char(), None);
    }

    #[test]
    fn test_descriptor_serializes_tagged() {
        let json = serde_json::to_value(ResponseDescriptor::PlainText("x".into())).unwrap();
        assert_eq!(json["type"], "plain_text");
        assert_eq!(json["content"], "x");

        let json = serde_json::to_value(ResponseDescriptor::AnimatedTransfer(TransferKind::ResumeDownload)).unwrap();
        assert_eq!(json["content"], "resume_download");
    }
}
