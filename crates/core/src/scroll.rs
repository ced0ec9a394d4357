//! Auto-follow for the output pane.
//!
//! The coordinator keeps a row-based viewport model (`scroll_top`,
//! `content_height`, `viewport_height`) plus the "user scrolled away" flag.
//! Plain follow requests only move the viewport while the flag is clear;
//! forced requests always do.

/// A request to bring the bottom of the transcript into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollRequest {
    /// Honored only while the user has not scrolled away
    Follow,
    /// Always honored
    Force,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollCoordinator {
    user_scrolled_away: bool,
    animations_in_flight: usize,
    scroll_top: usize,
    content_height: usize,
    viewport_height: usize,
    near_bottom_rows: usize,
    /// Snap to the bottom again once the next layout reports its extent
    snap_pending: bool,
}

impl ScrollCoordinator {
    pub fn new(near_bottom_rows: usize) -> Self {
        Self {
            user_scrolled_away: false,
            animations_in_flight: 0,
            scroll_top: 0,
            content_height: 0,
            viewport_height: 0,
            near_bottom_rows,
            snap_pending: false,
        }
    }

    pub fn user_scrolled_away(&self) -> bool {
        self.user_scrolled_away
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn animations_in_flight(&self) -> usize {
        self.animations_in_flight
    }

    fn max_top(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Rows between the viewport bottom and the content bottom
    pub fn distance_from_bottom(&self) -> usize {
        self.max_top().saturating_sub(self.scroll_top)
    }

    pub fn is_near_bottom(&self) -> bool {
        self.distance_from_bottom() <= self.near_bottom_rows
    }

    /// Apply a request; returns whether the viewport was moved to the bottom
    pub fn request(&mut self, request: ScrollRequest) -> bool {
        if request == ScrollRequest::Follow && self.user_scrolled_away {
            return false;
        }
        self.scroll_top = self.max_top();
        self.snap_pending = true;
        true
    }

    /// Report the laid-out size of the transcript and the visible pane
    pub fn update_extent(&mut self, content_height: usize, viewport_height: usize) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        if self.snap_pending {
            self.scroll_top = self.max_top();
            self.snap_pending = false;
        } else {
            self.scroll_top = self.scroll_top.min(self.max_top());
        }
    }

    /// A user-initiated scroll by `delta` rows (negative is up)
    pub fn on_user_scroll(&mut self, delta: isize) {
        let target = if delta < 0 {
            self.scroll_top.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_top.saturating_add(delta.unsigned_abs())
        };
        self.scroll_to(target);
    }

    /// A user-initiated jump to an absolute row
    pub fn scroll_to(&mut self, top: usize) {
        self.scroll_top = top.min(self.max_top());
        self.snap_pending = false;
        if self.animations_in_flight == 0 {
            self.user_scrolled_away = !self.is_near_bottom();
        }
    }

    pub fn on_animation_start(&mut self) {
        self.animations_in_flight += 1;
    }

    /// Re-arm auto-follow when the viewport sits near the bottom
    pub fn on_animation_complete(&mut self) {
        self.animations_in_flight = self.animations_in_flight.saturating_sub(1);
        if self.is_near_bottom() {
            self.user_scrolled_away = false;
        }
    }

    /// Forget animations that were torn down without completing
    pub fn on_animations_cancelled(&mut self, count: usize) {
        self.animations_in_flight = self.animations_in_flight.saturating_sub(count);
    }

    /// A command was submitted: new output must be visible
    pub fn on_submit(&mut self) {
        self.user_scrolled_away = false;
    }
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new(3)
    }
}
