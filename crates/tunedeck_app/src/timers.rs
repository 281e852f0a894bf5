use std::time::{Duration, Instant};

use tunedeck_core::Msg;

/// Frame-polled one-shot timer scheduler.
///
/// Entries are never cancelled here; a superseded timer still fires and its
/// stale epoch is ignored by the core. Taking `now` as a parameter keeps the
/// scheduler testable without sleeping.
#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<(Instant, Msg)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, now: Instant, delay: Duration, msg: Msg) {
        self.pending.push((now + delay, msg));
    }

    /// Removes and returns every elapsed timer, earliest deadline first.
    pub fn due(&mut self, now: Instant) -> Vec<Msg> {
        let mut fired: Vec<(Instant, Msg)> = Vec::new();
        self.pending.retain(|(deadline, msg)| {
            if *deadline <= now {
                fired.push((*deadline, msg.clone()));
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|(deadline, _)| *deadline);
        fired.into_iter().map(|(_, msg)| msg).collect()
    }

    /// Earliest pending deadline, for scheduling the next UI wakeup.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }
}
