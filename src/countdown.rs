/// Longest preview that can be configured.
pub const MAX_PREVIEW_SECS: u32 = 3600;

pub const DEFAULT_PREVIEW_SECS: u32 = 30;

/// Whole-second countdown used during the preview phase.
///
/// The countdown knows nothing about phases; the quiz decides when ticks
/// count and what happens at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
    started: bool,
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        let duration = duration.clamp(1, MAX_PREVIEW_SECS);
        Self {
            duration,
            remaining: duration,
            running: false,
            started: false,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once the countdown has been started at least once.
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = false;
        self.started = false;
    }

    /// Returns true if this call changed the running state.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining == 0 {
            return false;
        }
        self.running = true;
        self.started = true;
        true
    }

    /// Returns true if this call changed the running state.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Change the configured duration and reset the remaining count to it.
    /// Refused once the countdown has started. Values are clamped to
    /// `1..=MAX_PREVIEW_SECS`.
    pub fn set_duration(&mut self, secs: u32) -> bool {
        if self.started {
            return false;
        }
        self.duration = secs.clamp(1, MAX_PREVIEW_SECS);
        self.remaining = self.duration;
        true
    }

    /// Decrement once if running. Returns true when this tick reached zero.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return true;
        }
        false
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_SECS)
    }
}
