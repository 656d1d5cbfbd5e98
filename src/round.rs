use crate::clock::{format_mm_ss, RoundClock};
use crate::diff::{classify, Diff};
use crate::metrics::{self, MetricsSnapshot};
use std::time::SystemTime;

/// Why a round stopped running.
#[derive(Clone, Copy, Debug, PartialEq, strum_macros::Display)]
pub enum EndReason {
    Completed,
    #[strum(serialize = "Time Up")]
    TimeUp,
    Stopped,
    Waiting,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundPhase {
    Idle,
    Running,
    Ended(EndReason),
}

/// Token tying periodic tick deliveries to one Running span of one round.
///
/// Every transition out of Running invalidates the outstanding handle, so a
/// driver that keeps firing against a stale handle mutates nothing. At most
/// one handle is current at any time, and none while the round is not
/// Running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickHandle {
    generation: u64,
}

/// Everything a rendering collaborator needs to paint one frame. Raw
/// characters are passed through unescaped; making them safe for a given
/// output medium is the renderer's job.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplaySnapshot {
    pub remaining_time: String,
    pub correct: usize,
    pub mistakes: usize,
    pub accuracy: String,
    pub gross_wpm: u32,
    pub status: String,
    pub diff: Diff,
}

/// One timed attempt against one passage: owns the typed buffer, the clock,
/// and the last computed metrics, and gates all of them on the round phase.
#[derive(Debug)]
pub struct Round {
    target: String,
    typed: String,
    clock: RoundClock,
    phase: RoundPhase,
    metrics: MetricsSnapshot,
    tick_generation: u64,
    remaining_at_end: Option<u64>,
}

impl Round {
    pub fn new(target: String, duration_secs: u64) -> Self {
        Self {
            target,
            typed: String::new(),
            clock: RoundClock::new(duration_secs),
            phase: RoundPhase::Idle,
            metrics: MetricsSnapshot::default(),
            tick_generation: 0,
            remaining_at_end: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics
    }

    pub fn duration_secs(&self) -> u64 {
        self.clock.duration_secs()
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn status_label(&self) -> String {
        match self.phase {
            RoundPhase::Idle => EndReason::Waiting.to_string(),
            RoundPhase::Running => "Running".to_string(),
            RoundPhase::Ended(reason) => reason.to_string(),
        }
    }

    /// Enters Running and hands out the tick registration for this span.
    /// No-op unless the round is Idle: a Running round keeps running, and an
    /// Ended round keeps its frozen measurements until an explicit reset.
    pub fn request_start(&mut self, now: SystemTime) -> Option<TickHandle> {
        if self.phase != RoundPhase::Idle {
            return None;
        }

        self.clock.start(now);
        self.phase = RoundPhase::Running;
        self.remaining_at_end = None;
        self.tick_generation += 1;
        let handle = TickHandle {
            generation: self.tick_generation,
        };

        self.recompute_metrics(now);
        self.check_completion(now);

        Some(handle)
    }

    /// Replaces the typed buffer with the full current input text.
    ///
    /// A non-empty first input on a fresh round starts it implicitly and
    /// returns the new tick registration. Input arriving while the round is
    /// neither Running nor fresh is ignored for measurement purposes.
    pub fn submit_typed_text(&mut self, text: &str, now: SystemTime) -> Option<TickHandle> {
        if self.is_running() {
            self.typed = text.to_string();
            self.recompute_metrics(now);
            self.check_completion(now);
            return None;
        }

        let fresh = self.typed.is_empty() && !self.clock.has_started();
        if fresh && !text.is_empty() {
            let handle = self.request_start(now);
            self.typed = text.to_string();
            self.recompute_metrics(now);
            self.check_completion(now);
            return handle;
        }

        None
    }

    /// Periodic driver call. Ignored unless `handle` is the current
    /// registration and the round is Running. Completion is evaluated before
    /// time-up on the same tick. Returns true when the phase changed.
    pub fn tick(&mut self, handle: TickHandle, now: SystemTime) -> bool {
        if handle.generation != self.tick_generation || !self.is_running() {
            return false;
        }

        if self.check_completion(now) {
            return true;
        }

        if self.clock.remaining_secs(now) == 0 {
            self.end(EndReason::TimeUp, now);
            return true;
        }

        false
    }

    /// Manual stop. Internal transition; the TUI has no dedicated control
    /// for it, but tests and embedders do.
    pub fn stop(&mut self, now: SystemTime) {
        if self.is_running() {
            self.end(EndReason::Stopped, now);
        }
    }

    /// Returns the round to its fresh state: buffer and start timestamp
    /// cleared, metrics back to defaults, tick registration cancelled.
    /// Idempotent; the configured duration and target are kept.
    pub fn request_reset(&mut self) {
        self.phase = RoundPhase::Idle;
        self.typed.clear();
        self.clock.reset();
        self.metrics = MetricsSnapshot::default();
        self.remaining_at_end = None;
        self.tick_generation += 1;
    }

    /// Swaps the reference text. Changing configuration mid-round is not
    /// allowed, so this resets as part of the change.
    pub fn set_target(&mut self, target: String) {
        self.target = target;
        self.request_reset();
    }

    /// Reconfigures the round duration, resetting as part of the change.
    pub fn set_duration(&mut self, duration_secs: u64) {
        self.clock = RoundClock::new(duration_secs);
        self.request_reset();
    }

    pub fn remaining_secs(&self, now: SystemTime) -> u64 {
        match self.remaining_at_end {
            Some(frozen) => frozen,
            None => self.clock.remaining_secs(now),
        }
    }

    pub fn snapshot(&self, now: SystemTime) -> DisplaySnapshot {
        let metrics = self.metrics;
        DisplaySnapshot {
            remaining_time: format_mm_ss(self.remaining_secs(now)),
            correct: metrics.correct,
            mistakes: metrics.mistakes,
            accuracy: format!("{}%", metrics.accuracy_percent),
            gross_wpm: metrics.gross_wpm,
            status: self.status_label(),
            diff: self.classification(),
        }
    }

    /// Positional classification of the buffer, derived fresh on demand.
    pub fn classification(&self) -> Diff {
        classify(&self.target, &self.typed)
    }

    fn recompute_metrics(&mut self, now: SystemTime) {
        if self.is_running() {
            self.metrics = metrics::compute(&self.classification(), self.clock.elapsed_secs(now));
        }
    }

    fn check_completion(&mut self, now: SystemTime) -> bool {
        if self.is_running() && self.typed.chars().count() >= self.target.chars().count() {
            self.end(EndReason::Completed, now);
            return true;
        }
        false
    }

    fn end(&mut self, reason: EndReason, now: SystemTime) {
        self.remaining_at_end = Some(self.clock.remaining_secs(now));
        self.phase = RoundPhase::Ended(reason);
        // metrics keep their last computed values from here on
        self.tick_generation += 1;
    }
}
