//! The simulated `wget resume` transcript.
//!
//! A [`DownloadAnimation`] is a small state machine: five staged transitions
//! reveal the wget preamble, then a progress counter climbs to 100 and a
//! completion step (guarded to run once) shows the saved message. The
//! terminal owns the timers; this type only records where the animation is.

use chrono::{DateTime, Local};

use crate::config::DOWNLOAD_STAGES;
use crate::content::ResumeSpec;

/// Width of the progress bar between the brackets
pub const BAR_WIDTH: usize = 40;

/// Render `NN%[====>     ]`; the arrow is dropped at 100%
pub fn progress_bar(progress: u8) -> String {
    let progress = progress.min(100) as usize;
    let filled = progress * BAR_WIDTH / 100;
    let arrow = if progress < 100 { ">" } else { "" };
    let empty = BAR_WIDTH - filled - arrow.len();
    format!("{}%[{}{}{}]", progress, "=".repeat(filled), arrow, " ".repeat(empty))
}

/// What a progress tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTick {
    /// The counter moved to the contained value
    Advanced(u8),
    /// The counter sits at 100: stop ticking and schedule completion
    ArmCompletion,
    /// Completion was already armed; stop ticking
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadAnimation {
    resume: ResumeSpec,
    started_at: DateTime<Local>,
    stage: usize,
    progress: u8,
    completion_armed: bool,
    finished: bool,
    interrupted: bool,
}

impl DownloadAnimation {
    pub fn new(resume: ResumeSpec, started_at: DateTime<Local>) -> Self {
        Self {
            resume,
            started_at,
            stage: 0,
            progress: 0,
            completion_armed: false,
            finished: false,
            interrupted: false,
        }
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Neither finished nor superseded
    pub fn is_running(&self) -> bool {
        !self.finished && !self.interrupted
    }

    pub fn resume(&self) -> &ResumeSpec {
        &self.resume
    }

    /// Whether the progress bar is ticking (all stages shown)
    pub fn in_progress_stage(&self) -> bool {
        self.stage >= DOWNLOAD_STAGES
    }

    /// Enter the next stage; returns the new stage index
    pub fn advance_stage(&mut self) -> usize {
        if self.is_running() && self.stage < DOWNLOAD_STAGES {
            self.stage += 1;
        }
        self.stage
    }

    pub fn tick_progress(&mut self, step: u8) -> ProgressTick {
        if !self.is_running() || !self.in_progress_stage() {
            return ProgressTick::Stopped;
        }
        if self.progress >= 100 {
            if self.completion_armed {
                return ProgressTick::Stopped;
            }
            self.completion_armed = true;
            return ProgressTick::ArmCompletion;
        }
        self.progress = self.progress.saturating_add(step).min(100);
        ProgressTick::Advanced(self.progress)
    }

    /// Show the completion message; true only the first time
    pub fn complete(&mut self) -> bool {
        if self.finished || self.interrupted || !self.completion_armed {
            return false;
        }
        self.finished = true;
        true
    }

    /// Freeze a superseded instance where it stands
    pub fn interrupt(&mut self) {
        if !self.finished {
            self.interrupted = true;
        }
    }

    /// Transcript lines visible at the current stage
    pub fn lines(&self) -> Vec<String> {
        let resume = &self.resume;
        let mut lines = Vec::new();

        if self.stage >= 1 {
            lines.push(format!("--{}--  {}", self.started_at.format("%Y-%m-%d %H:%M:%S"), resume.url));
            lines.push(format!("Resolving {}... {}", resume.host, resume.addresses.join(", ")));
        }
        if self.stage >= 2 {
            lines.push(format!("Connecting to {}|{}|:443... connected.", resume.host, resume.primary_address()));
        }
        if self.stage >= 3 {
            lines.push("HTTP request sent, awaiting response... 200 OK".to_string());
            lines.push(format!("Length: {} [application/pdf]", resume.size_label));
        }
        if self.stage >= 4 {
            lines.push(format!("Saving to: '{}'", resume.file_name));
            lines.push(String::new());
        }
        if self.stage >= 5 {
            lines.push(format!("{} {}  --.--KB/s    in 0.1s", progress_bar(self.progress), resume.size_label));
        }
        if self.finished {
            lines.push(String::new());
            lines.push(format!("'{}' saved", resume.file_name));
            lines.push(String::new());
            lines.push(" Resume downloaded successfully!".to_string());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn animation() -> DownloadAnimation {
        let resume = ResumeSpec {
            url: "https://example.test/resume.pdf".to_string(),
            host: "example.test".to_string(),
            addresses: vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()],
            file_name: "resume.pdf".to_string(),
            size_label: "892KB".to_string(),
        };
        let started = Local.with_ymd_and_hms(2025, 10, 8, 12, 34, 56).unwrap();
        DownloadAnimation::new(resume, started)
    }

    fn run_stages(anim: &mut DownloadAnimation) {
        for _ in 0..DOWNLOAD_STAGES {
            anim.advance_stage();
        }
    }

    #[test]
    fn test_progress_bar_rendering() {
        assert_eq!(progress_bar(0), format!("0%[>{}]", " ".repeat(39)));
        assert_eq!(progress_bar(50), format!("50%[{}>{}]", "=".repeat(20), " ".repeat(19)));
        assert_eq!(progress_bar(100), format!("100%[{}]", "=".repeat(40)));
        assert_eq!(progress_bar(99).len(), "99%[]".len() + BAR_WIDTH);
    }

    #[test]
    fn test_stage_lines() {
        let mut anim = animation();
        assert!(anim.lines().is_empty());

        anim.advance_stage();
        assert_eq!(
            anim.lines(),
            vec![
                "--2025-10-08 12:34:56--  https://example.test/resume.pdf".to_string(),
                "Resolving example.test... 10.0.0.1, 10.0.0.2".to_string(),
            ]
        );

        anim.advance_stage();
        assert_eq!(anim.lines()[2], "Connecting to example.test|10.0.0.1|:443... connected.");

        anim.advance_stage();
        anim.advance_stage();
        assert_eq!(anim.lines()[5], "Saving to: 'resume.pdf'");
        assert!(!anim.in_progress_stage());

        anim.advance_stage();
        assert!(anim.in_progress_stage());
        assert!(anim.lines()[6].is_empty());
        assert!(anim.lines()[7].starts_with("0%[>"));
        assert!(anim.lines()[7].ends_with(" 892KB  --.--KB/s    in 0.1s"));
    }

    #[test]
    fn test_stage_does_not_pass_progress() {
        let mut anim = animation();
        for _ in 0..10 {
            anim.advance_stage();
        }
        assert_eq!(anim.stage(), DOWNLOAD_STAGES);
    }

    #[test]
    fn test_progress_waits_for_stages() {
        let mut anim = animation();
        assert_eq!(anim.tick_progress(2), ProgressTick::Stopped);
        assert_eq!(anim.progress(), 0);
    }

    #[test]
    fn test_progress_arms_completion_once() {
        let mut anim = animation();
        run_stages(&mut anim);

        let mut advanced = 0;
        loop {
            match anim.tick_progress(2) {
                ProgressTick::Advanced(_) => advanced += 1,
                ProgressTick::ArmCompletion => break,
                ProgressTick::Stopped => panic!("stopped before arming"),
            }
        }
        assert_eq!(advanced, 50);
        assert_eq!(anim.progress(), 100);
        assert_eq!(anim.tick_progress(2), ProgressTick::Stopped);

        assert!(anim.complete());
        assert!(!anim.complete());
        assert!(anim.is_finished());

        let lines = anim.lines();
        assert_eq!(lines[lines.len() - 3], "'resume.pdf' saved");
        assert_eq!(lines[lines.len() - 1], " Resume downloaded successfully!");
    }

    #[test]
    fn test_uneven_step_caps_at_100() {
        let mut anim = animation();
        run_stages(&mut anim);
        for _ in 0..4 {
            anim.tick_progress(30);
        }
        assert_eq!(anim.progress(), 100);
    }

    #[test]
    fn test_complete_requires_armed() {
        let mut anim = animation();
        assert!(!anim.complete());
    }

    #[test]
    fn test_interrupted_instance_freezes() {
        let mut anim = animation();
        run_stages(&mut anim);
        anim.tick_progress(2);
        anim.interrupt();

        assert!(anim.is_interrupted());
        assert!(!anim.is_running());
        assert_eq!(anim.tick_progress(2), ProgressTick::Stopped);
        assert_eq!(anim.progress(), 2);
        assert!(!anim.complete());
    }

    #[test]
    fn test_interrupt_after_finish_is_noop() {
        let mut anim = animation();
        run_stages(&mut anim);
        while anim.tick_progress(50) != ProgressTick::ArmCompletion {}
        anim.complete();
        anim.interrupt();
        assert!(!anim.is_interrupted());
    }
}
