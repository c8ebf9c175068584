//! One-shot steps on the logical clock.
//!
//! Every transition opens a new generation. Steps scheduled under an older
//! generation are dropped when they come due instead of being applied, so
//! a hide that interrupts a show can never be undone by the show's
//! leftover steps.

use std::time::Duration;

/// Deferred work of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Set the fade-in targets once the panels are in the render tree.
    ApplyShown,
    /// Fade-in finished.
    SettleShown,
    /// Take the content panel out of the render tree.
    RemoveContent,
    /// Take the background panel out of the render tree; hide finished.
    RemoveBackground,
    /// Give the camera back to the user.
    RestoreControls,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: Duration,
    generation: u64,
    step: Step,
}

/// Pending steps tagged with the generation that scheduled them.
#[derive(Debug, Default)]
pub struct Timeline {
    pending: Vec<Scheduled>,
    generation: u64,
}

impl Timeline {
    /// An empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new transition. Everything scheduled so far goes stale.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// The current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run `step` at `due` under the current generation.
    pub fn schedule(&mut self, due: Duration, step: Step) {
        self.pending.push(Scheduled {
            due,
            generation: self.generation,
            step,
        });
    }

    /// Take the earliest step due at or before `now`.
    ///
    /// Stale steps are discarded on the way. Ties run in scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, Step)> {
        loop {
            let index = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, s)| s.due <= now)
                .min_by_key(|(_, s)| s.due)
                .map(|(i, _)| i)?;
            let scheduled = self.pending.remove(index);
            if scheduled.generation == self.generation {
                return Some((scheduled.due, scheduled.step));
            }
            log::trace!(
                "dropping stale {:?} from generation {} (now {})",
                scheduled.step,
                scheduled.generation,
                self.generation
            );
        }
    }

    /// Steps still waiting, stale ones included.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// When the next step comes due, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.due).min()
    }
}
