//! Staged-disclosure primitives.
//!
//! [`CharReveal`] types content out one character per tick; [`BlockReveal`]
//! shows one more block per tick. Neither owns a timer: the terminal feeds
//! them ticks from its scheduler and acts on the returned outcome. Both only
//! track how much is shown; the content itself lives in the transcript.

use crate::response::{Block, Inline};
use crate::scroll::ScrollRequest;

/// What a character reveal steps through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealSource {
    /// Text stepped character by character (line breaks not counted)
    Text(String),
    /// Anything that cannot be typed; shown whole after a single tick
    Opaque,
}

impl RevealSource {
    pub fn for_block(block: &Block) -> Self {
        if block.is_text_only() { RevealSource::Text(block.plain_lines().concat()) } else { RevealSource::Opaque }
    }

    fn len(&self) -> usize {
        match self {
            RevealSource::Text(text) => text.chars().count(),
            RevealSource::Opaque => 0,
        }
    }
}

/// Result of feeding one tick to a reveal primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealTick {
    /// More content became visible
    pub advanced: bool,
    /// The reveal finished on this tick
    pub completed: bool,
    pub scroll: Option<ScrollRequest>,
}

impl RevealTick {
    /// Nothing left to do; the driving timer can be dropped
    pub fn is_idle(&self) -> bool {
        !self.advanced && !self.completed
    }
}

/// Character-by-character reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharReveal {
    source: RevealSource,
    total: usize,
    shown: usize,
    complete: bool,
    follow: bool,
}

impl CharReveal {
    /// `follow` makes every increment ask for a plain scroll-to-bottom
    pub fn new(source: RevealSource, follow: bool) -> Self {
        let total = source.len();
        Self { source, total, shown: 0, complete: false, follow }
    }

    /// Already fully shown; used for instant steps
    pub fn finished(source: RevealSource) -> Self {
        let total = source.len();
        Self { source, total, shown: total, complete: true, follow: false }
    }

    pub fn tick(&mut self) -> RevealTick {
        if self.complete {
            return RevealTick::default();
        }
        let scroll = self.follow.then_some(ScrollRequest::Follow);

        match self.source {
            RevealSource::Text(_) if self.shown < self.total => {
                self.shown += 1;
                RevealTick { advanced: true, completed: false, scroll }
            }
            RevealSource::Text(_) => {
                self.complete = true;
                RevealTick { advanced: false, completed: true, scroll }
            }
            RevealSource::Opaque => {
                self.complete = true;
                RevealTick { advanced: true, completed: true, scroll }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether anything at all should be drawn yet
    pub fn is_visible(&self) -> bool {
        match self.source {
            RevealSource::Text(_) => self.shown > 0 || self.complete,
            RevealSource::Opaque => self.complete,
        }
    }

    /// The part of `block` revealed so far
    pub fn visible(&self, block: &Block) -> Option<Block> {
        if !self.is_visible() {
            return None;
        }
        match self.source {
            RevealSource::Text(_) if !self.complete => Some(block_prefix(block, self.shown)),
            _ => Some(block.clone()),
        }
    }
}

/// Truncate `block` to its first `chars` typed characters, keeping line structure
pub fn block_prefix(block: &Block, chars: usize) -> Block {
    let mut budget = chars;
    prefix_inner(block, &mut budget).unwrap_or(Block::Blank)
}

fn take_chars(text: &str, budget: &mut usize) -> String {
    let taken: String = text.chars().take(*budget).collect();
    *budget -= taken.chars().count();
    taken
}

fn prefix_inner(block: &Block, budget: &mut usize) -> Option<Block> {
    match block {
        Block::Group { children } => {
            let mut kept = Vec::new();
            for child in children {
                if *budget == 0 && !kept.is_empty() {
                    break;
                }
                if let Some(child) = prefix_inner(child, budget) {
                    kept.push(child);
                }
            }
            Some(Block::Group { children: kept })
        }
        Block::Line { inlines } => {
            let mut kept = Vec::new();
            for inline in inlines {
                if *budget == 0 {
                    break;
                }
                if let Inline::Text { text, tone } = inline {
                    kept.push(Inline::Text { text: take_chars(text, budget), tone: *tone });
                }
            }
            Some(Block::Line { inlines: kept })
        }
        Block::Heading { text } => Some(Block::Heading { text: take_chars(text, budget) }),
        Block::Blank => Some(Block::Blank),
        Block::Tags { .. } | Block::Image { .. } => None,
    }
}

/// Sequential block-by-block reveal
#[derive(Debug, Clone, PartialEq, Eq)]
///
/// A new block list means a new instance; there is no way to rewind one.
pub struct BlockReveal {
    total: usize,
    shown: usize,
    follow: bool,
}

impl BlockReveal {
    /// `follow` makes every increment ask for a plain scroll-to-bottom
    pub fn new(total: usize, follow: bool) -> Self {
        Self { total, shown: 0, follow }
    }

    /// Reveal one more block; completion fires on the final increment
    pub fn tick(&mut self) -> RevealTick {
        if self.shown >= self.total {
            return RevealTick::default();
        }
        self.shown += 1;
        let scroll = self.follow.then_some(ScrollRequest::Follow);
        RevealTick { advanced: true, completed: self.shown == self.total, scroll }
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.shown >= self.total
    }

    /// Index of the block revealed by the latest tick
    pub fn last_revealed(&self) -> Option<usize> {
        self.shown.checked_sub(1)
    }
}
