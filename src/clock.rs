//! Elapsed-time accumulator for the hunt clock.
//!
//! The clock thread drives this once per second; the accumulator itself is
//! pure state over `Instant`s so the pause/resume arithmetic is testable
//! without spawning threads.

use std::time::{Duration, Instant};

/// Tracks time spent hunting across stop/restart cycles without drift.
///
/// While active, each observation accrues the wall-clock delta since the
/// previous mark. Going inactive accrues the final delta up to that instant
/// and clears the mark, so idle time never accumulates; going active again
/// restarts the mark at the resume instant.
#[derive(Debug, Clone)]
pub struct HuntClock {
    accrued: Duration,
    last_mark: Option<Instant>,
}

impl HuntClock {
    pub fn new() -> Self {
        Self {
            accrued: Duration::ZERO,
            last_mark: None,
        }
    }

    /// Advances the accumulator and returns the total time spent hunting.
    pub fn observe(&mut self, now: Instant, active: bool) -> Duration {
        match (self.last_mark, active) {
            (Some(mark), true) => {
                self.accrued += now.saturating_duration_since(mark);
                self.last_mark = Some(now);
            }
            (Some(mark), false) => {
                self.accrued += now.saturating_duration_since(mark);
                self.last_mark = None;
            }
            (None, true) => {
                self.last_mark = Some(now);
            }
            (None, false) => {}
        }
        self.accrued
    }

    pub fn total(&self) -> Duration {
        self.accrued
    }
}

impl Default for HuntClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a duration as `MM:SS` for the stats panel.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accrues_while_active() {
        let start = Instant::now();
        let mut clock = HuntClock::new();

        clock.observe(start, true);
        let total = clock.observe(start + Duration::from_secs(3), true);
        assert_eq!(total, Duration::from_secs(3));
    }

    #[test]
    fn test_idle_time_does_not_accrue() {
        let start = Instant::now();
        let mut clock = HuntClock::new();

        clock.observe(start, true);
        clock.observe(start + Duration::from_secs(5), false);

        // Ten idle seconds pass, then the hunt resumes.
        clock.observe(start + Duration::from_secs(15), true);
        let total = clock.observe(start + Duration::from_secs(17), true);

        assert_eq!(total, Duration::from_secs(7));
    }

    #[test]
    fn test_stop_records_delta_up_to_stop_instant() {
        let start = Instant::now();
        let mut clock = HuntClock::new();

        clock.observe(start, true);
        let total = clock.observe(start + Duration::from_millis(2500), false);
        assert_eq!(total, Duration::from_millis(2500));
        // Further inactive observations change nothing.
        let total = clock.observe(start + Duration::from_secs(60), false);
        assert_eq!(total, Duration::from_millis(2500));
    }

    #[test]
    fn test_zero_idle_restart_is_drift_free() {
        let start = Instant::now();
        let mut clock = HuntClock::new();

        clock.observe(start, true);
        let mid = start + Duration::from_secs(4);
        clock.observe(mid, false);
        clock.observe(mid, true);
        let total = clock.observe(mid + Duration::from_secs(4), true);

        assert_eq!(total, Duration::from_secs(8));
    }

    #[test]
    fn test_total_never_decreases() {
        let start = Instant::now();
        let mut clock = HuntClock::new();
        let mut previous = Duration::ZERO;

        for (i, active) in [true, true, false, false, true, false, true]
            .iter()
            .enumerate()
        {
            let total = clock.observe(start + Duration::from_secs(i as u64), *active);
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "01:05");
        assert_eq!(format_elapsed(Duration::from_secs(3599)), "59:59");
    }
}
