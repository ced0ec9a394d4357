//! The command interpreter and animated output engine.
//!
//! [`Terminal`] owns the transcript, the prompt line, the scroll coordinator
//! and a virtual-time [`Scheduler`]. Matching and appending happen
//! synchronously inside [`Terminal::execute`]; everything that unfolds over
//! time (typewriter ticks, block reveals, download stages, the chat redirect)
//! is a timer owned either by the terminal or by the entry it animates.
//! Hosts move time forward with [`Terminal::advance`].

use chrono::Local;
use std::collections::HashMap;
use std::time::Duration;

use crate::commands::{self, Resolution};
use crate::config::{Config, TerminalConfig, TimingConfig};
use crate::content::{Profile, ResumeSpec};
use crate::download::{DownloadAnimation, ProgressTick};
use crate::input::InputState;
use crate::response::{Block, ResponseDescriptor, RevealMode, RevealStep, Tone};
use crate::reveal::{BlockReveal, CharReveal, RevealSource};
use crate::scheduler::{Fired, Owner, Scheduler, TimerId};
use crate::scroll::{ScrollCoordinator, ScrollRequest};
use crate::transcript::{EntryId, Transcript, TranscriptEntry};

/// Placeholder drawn while a delayed step (an image) is still loading
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Outward calls made by the terminal
pub trait TerminalHooks {
    /// The chat companion should open
    fn open_chat(&mut self);
    /// A download animation finished; save the real file
    fn save_resume(&mut self, resume: &ResumeSpec);
}

/// Hooks that ignore every call
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl TerminalHooks for NoopHooks {
    fn open_chat(&mut self) {}
    fn save_resume(&mut self, _: &ResumeSpec) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    SettleScroll,
    OpenChat,
    RevealBlock(EntryId),
    RevealChars { entry: EntryId, step: usize },
    DownloadStage(EntryId),
    DownloadProgress(EntryId),
    DownloadComplete(EntryId),
}

/// Per-entry animation state
#[derive(Debug, Clone)]
enum EntryView {
    Staged { blocks: BlockReveal, steps: Vec<CharReveal> },
    Download(DownloadAnimation),
}

impl EntryView {
    fn active_reveals(&self) -> usize {
        match self {
            EntryView::Staged { steps, .. } => steps.iter().filter(|r| !r.is_complete()).count(),
            EntryView::Download(_) => 0,
        }
    }
}

enum StepTimer {
    Every(Duration),
    Once(Duration),
}

fn start_step(step: &RevealStep, timing: &TimingConfig) -> (CharReveal, Option<StepTimer>) {
    match step.mode {
        RevealMode::Instant => (CharReveal::finished(RevealSource::for_block(&step.block)), None),
        RevealMode::Typewriter { per_char_ms } => match RevealSource::for_block(&step.block) {
            RevealSource::Opaque => {
                (CharReveal::new(RevealSource::Opaque, step.follow), Some(StepTimer::Once(timing.opaque_reveal())))
            }
            text => (CharReveal::new(text, step.follow), Some(StepTimer::Every(Duration::from_millis(per_char_ms)))),
        },
        RevealMode::Delayed { delay_ms } => (
            CharReveal::new(RevealSource::Opaque, step.follow),
            Some(StepTimer::Once(Duration::from_millis(delay_ms))),
        ),
    }
}

/// What an entry currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibleOutput {
    Text(String),
    Blocks(Vec<Block>),
    Download { lines: Vec<String>, interrupted: bool },
}

impl VisibleOutput {
    pub fn plain_lines(&self) -> Vec<String> {
        match self {
            VisibleOutput::Text(text) => text.lines().map(str::to_string).collect(),
            VisibleOutput::Blocks(blocks) => blocks.iter().flat_map(Block::plain_lines).collect(),
            VisibleOutput::Download { lines, .. } => lines.clone(),
        }
    }

    pub fn plain_text(&self) -> String {
        self.plain_lines().join("\n")
    }
}

pub struct Terminal<H: TerminalHooks> {
    terminal: TerminalConfig,
    timing: TimingConfig,
    profile: Profile,
    transcript: Transcript,
    views: HashMap<EntryId, EntryView>,
    input: InputState,
    scroll: ScrollCoordinator,
    scheduler: Scheduler<TimerEvent>,
    active_download: Option<EntryId>,
    hooks: H,
}

impl<H: TerminalHooks> Terminal<H> {
    pub fn new(config: &Config, profile: Profile, hooks: H) -> Self {
        let transcript = Transcript::new(commands::welcome(&config.terminal), Local::now());
        Self {
            terminal: config.terminal.clone(),
            timing: config.timing.clone(),
            profile,
            transcript,
            views: HashMap::new(),
            input: InputState::new(),
            scroll: ScrollCoordinator::new(config.scroll.near_bottom_rows),
            scheduler: Scheduler::new(),
            active_download: None,
            hooks,
        }
    }

    /// Run one command line
    ///
    /// Blank input does nothing. `clear` swaps the transcript for the welcome
    /// entry. Anything else appends exactly one entry whose command text is
    /// `raw` as given.
    pub fn execute(&mut self, raw: &str) {
        let response = match commands::resolve(raw) {
            Resolution::Empty => return,
            Resolution::Clear => {
                self.clear();
                return;
            }
            Resolution::Greeting => {
                tracing::debug!(input = raw.trim(), "greeting redirected to chat");
                self.scheduler.schedule_once(Owner::ROOT, self.timing.chat_redirect(), TimerEvent::OpenChat);
                commands::redirect()
            }
            Resolution::OpenChat => {
                tracing::info!("chat opened");
                self.hooks.open_chat();
                commands::chat_opened()
            }
            Resolution::Table(spec) => {
                tracing::debug!(command = spec.key, "command matched");
                (spec.build)(&self.profile)
            }
            Resolution::Chat(message) => commands::chat_exchange(&message),
            Resolution::NotFound => {
                tracing::debug!(input = raw, "command not found");
                commands::not_found(raw)
            }
        };

        self.scroll.on_submit();
        let id = self.transcript.append(raw, response, Local::now());
        self.start_view(id);
        tracing::debug!(entry = id.raw(), len = self.transcript.len(), "entry appended");

        self.input.clear();
        self.input.reset_history_navigation();
        self.scheduler.schedule_once(Owner::ROOT, self.timing.settle_scroll(), TimerEvent::SettleScroll);
    }

    /// Execute the prompt line (Enter)
    pub fn submit(&mut self) {
        let raw = self.input.buffer.clone();
        self.execute(&raw);
    }

    /// Run a command supplied by another component (the side menu)
    pub fn trigger(&mut self, command: &str) {
        self.execute(command);
    }

    /// Run the command behind an embedded trigger inside a response
    pub fn activate(&mut self, command: &str) {
        tracing::debug!(command, "embedded trigger activated");
        self.execute(command);
    }

    pub fn recall_previous(&mut self) -> bool {
        let commands = self.transcript.commands();
        self.input.recall_previous(&commands)
    }

    pub fn recall_next(&mut self) -> bool {
        let commands = self.transcript.commands();
        self.input.recall_next(&commands)
    }

    fn clear(&mut self) {
        let removed = self.transcript.reset(commands::welcome(&self.terminal), Local::now());
        let mut cancelled_timers = 0;
        let mut cancelled_reveals = 0;
        for id in removed {
            cancelled_timers += self.scheduler.cancel_owner(id.owner());
            if let Some(view) = self.views.remove(&id) {
                cancelled_reveals += view.active_reveals();
            }
        }
        self.scroll.on_animations_cancelled(cancelled_reveals);
        self.active_download = None;
        self.input.clear();
        self.input.reset_history_navigation();
        tracing::debug!(cancelled_timers, "transcript cleared");
    }

    fn start_view(&mut self, id: EntryId) {
        let Some(entry) = self.transcript.get(id) else {
            return;
        };

        match &entry.response {
            ResponseDescriptor::StagedReveal(staged) => {
                if !staged.is_empty() {
                    let interval = self.timing.block_interval();
                    self.scheduler.schedule_every(id.owner(), interval, TimerEvent::RevealBlock(id));
                }
                let blocks = BlockReveal::new(staged.len(), true);
                self.views.insert(id, EntryView::Staged { blocks, steps: Vec::with_capacity(staged.len()) });
            }
            ResponseDescriptor::AnimatedTransfer(_) => {
                let animation = DownloadAnimation::new(self.profile.resume.clone(), entry.created_at);
                if let Some(previous) = self.active_download.replace(id) {
                    self.scheduler.cancel_owner(previous.owner());
                    if let Some(EntryView::Download(old)) = self.views.get_mut(&previous)
                        && old.is_running()
                    {
                        old.interrupt();
                        tracing::debug!(entry = previous.raw(), "download superseded");
                    }
                }
                if let Some(delay) = self.timing.download_stage(0) {
                    self.scheduler.schedule_once(id.owner(), delay, TimerEvent::DownloadStage(id));
                }
                self.views.insert(id, EntryView::Download(animation));
            }
            ResponseDescriptor::PlainText(_) | ResponseDescriptor::Structured(_) => {}
        }
    }

    /// Move virtual time forward by `dt`, firing every timer that comes due
    ///
    /// Returns how many timers fired.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let until = self.scheduler.now() + dt;
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(until) {
            self.dispatch(timer);
            fired += 1;
        }
        self.scheduler.settle(until);
        fired
    }

    /// Fast-forward until no timer is pending or `limit` has elapsed
    ///
    /// Returns whether the terminal went idle.
    pub fn run_until_idle(&mut self, limit: Duration) -> bool {
        let deadline = self.scheduler.now() + limit;
        while let Some(wait) = self.scheduler.next_due_in() {
            if self.scheduler.now() + wait > deadline {
                self.scheduler.settle(deadline);
                return false;
            }
            self.advance(wait);
        }
        true
    }

    fn dispatch(&mut self, fired: Fired<TimerEvent>) {
        match fired.event {
            TimerEvent::SettleScroll => {
                self.scroll.request(ScrollRequest::Force);
            }
            TimerEvent::OpenChat => {
                tracing::info!("chat opened after greeting redirect");
                self.hooks.open_chat();
            }
            TimerEvent::RevealBlock(entry) => self.on_reveal_block(fired.id, entry),
            TimerEvent::RevealChars { entry, step } => self.on_reveal_chars(fired.id, entry, step),
            TimerEvent::DownloadStage(entry) => self.on_download_stage(entry),
            TimerEvent::DownloadProgress(entry) => self.on_download_progress(fired.id, entry),
            TimerEvent::DownloadComplete(entry) => self.on_download_complete(entry),
        }
    }

    fn on_reveal_block(&mut self, timer: TimerId, entry: EntryId) {
        let Some(EntryView::Staged { blocks, steps }) = self.views.get_mut(&entry) else {
            self.scheduler.cancel(timer);
            return;
        };

        let tick = blocks.tick();
        if tick.completed || tick.is_idle() {
            self.scheduler.cancel(timer);
        }
        if let Some(request) = tick.scroll {
            self.scroll.request(request);
        }
        if !tick.advanced {
            return;
        }
        let Some(index) = blocks.last_revealed() else {
            return;
        };
        let Some(ResponseDescriptor::StagedReveal(staged)) = self.transcript.get(entry).map(|e| &e.response) else {
            return;
        };
        let Some(step) = staged.steps.get(index) else {
            return;
        };

        let (reveal, step_timer) = start_step(step, &self.timing);
        let event = TimerEvent::RevealChars { entry, step: index };
        match step_timer {
            Some(StepTimer::Every(period)) => {
                self.scheduler.schedule_every(entry.owner(), period, event);
                self.scroll.on_animation_start();
            }
            Some(StepTimer::Once(delay)) => {
                self.scheduler.schedule_once(entry.owner(), delay, event);
                self.scroll.on_animation_start();
            }
            None => {}
        }
        steps.push(reveal);
    }

    fn on_reveal_chars(&mut self, timer: TimerId, entry: EntryId, step: usize) {
        let Some(reveal) = self.views.get_mut(&entry).and_then(|view| match view {
            EntryView::Staged { steps, .. } => steps.get_mut(step),
            EntryView::Download(_) => None,
        }) else {
            self.scheduler.cancel(timer);
            return;
        };

        let tick = reveal.tick();
        if let Some(request) = tick.scroll {
            self.scroll.request(request);
        }
        if tick.completed {
            self.scroll.on_animation_complete();
        }
        if tick.completed || tick.is_idle() {
            self.scheduler.cancel(timer);
        }
    }

    fn on_download_stage(&mut self, entry: EntryId) {
        let Some(EntryView::Download(animation)) = self.views.get_mut(&entry) else {
            return;
        };
        let stage = animation.advance_stage();
        tracing::debug!(entry = entry.raw(), stage, "download stage");
        self.scroll.request(ScrollRequest::Force);

        match self.timing.download_stage(stage) {
            Some(delay) => {
                self.scheduler.schedule_once(entry.owner(), delay, TimerEvent::DownloadStage(entry));
            }
            None => {
                let tick = self.timing.progress_tick();
                self.scheduler.schedule_every(entry.owner(), tick, TimerEvent::DownloadProgress(entry));
            }
        }
    }

    fn on_download_progress(&mut self, timer: TimerId, entry: EntryId) {
        let step = self.timing.progress_step;
        let Some(EntryView::Download(animation)) = self.views.get_mut(&entry) else {
            self.scheduler.cancel(timer);
            return;
        };

        match animation.tick_progress(step) {
            ProgressTick::Advanced(_) => {
                self.scroll.request(ScrollRequest::Force);
            }
            ProgressTick::ArmCompletion => {
                self.scheduler.cancel(timer);
                self.scheduler.schedule_once(
                    entry.owner(),
                    self.timing.download_complete(),
                    TimerEvent::DownloadComplete(entry),
                );
            }
            ProgressTick::Stopped => {
                self.scheduler.cancel(timer);
            }
        }
    }

    fn on_download_complete(&mut self, entry: EntryId) {
        let Some(EntryView::Download(animation)) = self.views.get_mut(&entry) else {
            return;
        };
        if !animation.complete() {
            return;
        }
        let resume = animation.resume().clone();
        tracing::info!(entry = entry.raw(), file = %resume.file_name, "download animation complete");

        self.hooks.save_resume(&resume);
        self.scroll.request(ScrollRequest::Force);
        if self.active_download == Some(entry) {
            self.active_download = None;
        }
    }

    /// What `entry` shows at the current point of its animation
    pub fn visible(&self, entry: &TranscriptEntry) -> VisibleOutput {
        match (&entry.response, self.views.get(&entry.id)) {
            (ResponseDescriptor::PlainText(text), _) => VisibleOutput::Text(text.clone()),
            (ResponseDescriptor::Structured(block), _) => VisibleOutput::Blocks(vec![block.clone()]),
            (ResponseDescriptor::StagedReveal(staged), Some(EntryView::Staged { steps, .. })) => {
                let blocks = staged
                    .steps
                    .iter()
                    .zip(steps)
                    .filter_map(|(step, reveal)| match reveal.visible(&step.block) {
                        Some(block) => Some(block),
                        None if matches!(step.mode, RevealMode::Delayed { .. }) => {
                            Some(Block::styled(LOADING_PLACEHOLDER, Tone::Muted))
                        }
                        None => None,
                    })
                    .collect();
                VisibleOutput::Blocks(blocks)
            }
            (ResponseDescriptor::StagedReveal(staged), _) => {
                VisibleOutput::Blocks(staged.steps.iter().map(|s| s.block.clone()).collect())
            }
            (ResponseDescriptor::AnimatedTransfer(_), Some(EntryView::Download(animation))) => {
                VisibleOutput::Download { lines: animation.lines(), interrupted: animation.is_interrupted() }
            }
            (ResponseDescriptor::AnimatedTransfer(_), _) => {
                VisibleOutput::Download { lines: Vec::new(), interrupted: false }
            }
        }
    }

    /// Download state of an entry, if it is a `wget resume`
    pub fn download(&self, id: EntryId) -> Option<&DownloadAnimation> {
        match self.views.get(&id) {
            Some(EntryView::Download(animation)) => Some(animation),
            _ => None,
        }
    }

    /// `(shown, total)` blocks of a staged entry
    pub fn staged_progress(&self, id: EntryId) -> Option<(usize, usize)> {
        match self.views.get(&id) {
            Some(EntryView::Staged { blocks, .. }) => Some((blocks.shown(), blocks.total())),
            _ => None,
        }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        self.transcript.entries()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn prompt(&self) -> &str {
        &self.terminal.prompt
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn scroll(&self) -> &ScrollCoordinator {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollCoordinator {
        &mut self.scroll
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// No timer is pending
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }
}
