use std::time::SystemTime;

/// Tracks one round's elapsed and remaining time against a configured
/// duration. The clock never schedules anything itself; a collaborator calls
/// in with `now` at whatever cadence it ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundClock {
    duration_secs: u64,
    started_at: Option<SystemTime>,
}

impl RoundClock {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            duration_secs,
            started_at: None,
        }
    }

    /// Records the start timestamp. A second call before `reset` is ignored.
    pub fn start(&mut self, now: SystemTime) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Whole seconds since start, floored. 0 before start, and 0 if the
    /// wall clock runs backwards.
    pub fn elapsed_secs(&self, now: SystemTime) -> u64 {
        match self.started_at {
            Some(started_at) => now
                .duration_since(started_at)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            None => 0,
        }
    }

    pub fn remaining_secs(&self, now: SystemTime) -> u64 {
        self.duration_secs.saturating_sub(self.elapsed_secs(now))
    }
}

/// Renders a second count as `MM:SS`, both fields zero-padded. Minutes are
/// not capped, so durations of an hour or more widen the minutes field.
pub fn format_mm_ss(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
