use std::time::{Duration, Instant};

/// A named periodic task owned by the controller.
///
/// Deadlines are explicit state rather than spawned callbacks: the host
/// calls `fire_if_due` from its base tick, and `cancel` deterministically
/// stops the task. Nothing keeps running after its owner lets go.
#[derive(Debug, Clone, Copy)]
pub struct RepeatingTask {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTask {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Count the intervals that have elapsed up to `now` and reschedule.
    ///
    /// Returning a count (rather than a bool) keeps the 1 Hz countdown
    /// honest when the base tick stalls: a late poll still yields one fire
    /// per elapsed interval.
    pub fn fire_if_due(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let late_by = now - due;
        let fires = 1 + (late_by.as_nanos() / self.interval.as_nanos()) as u32;
        self.next_due = Some(due + self.interval * fires);
        fires
    }
}
