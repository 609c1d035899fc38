//! Deferred one-shot tasks stamped with the session epoch
//!
//! Spawn delays, the level-end delay and the shot-resolution delay
//! are all scheduled here against the game clock. The clock only
//! advances while the session is playing, so pausing freezes pending
//! delays; an epoch bump (pause, restart, abort) makes them stale and
//! they are discarded instead of fired.

use serde::{Deserialize, Serialize};

/// Work a delayed callback performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Inter-spawn delay elapsed: spawn the next target.
    SpawnNext,
    /// Post-final-target delay elapsed: finish the level.
    EndLevel,
    /// Audio-sequencing delay elapsed: resolve a shot against the
    /// entity that was under the aim point when it was fired.
    ResolveShot { aimed: Option<u32> },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Scheduled {
    fire_at: f64,
    epoch: u64,
    task: Task,
}

/// One-shot task queue against the game clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    queue: Vec<Scheduled>,
}

impl Scheduler {
    pub fn schedule(&mut self, now: f64, delay: f64, epoch: u64, task: Task) {
        self.queue.push(Scheduled {
            fire_at: now + delay,
            epoch,
            task,
        });
    }

    /// Remove and return the tasks due at `now` whose epoch matches
    /// `live_epoch`, in firing order. Stale due tasks are dropped
    /// silently.
    pub fn drain_due(&mut self, now: f64, live_epoch: u64) -> Vec<Task> {
        self.queue.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        let mut due = Vec::new();
        self.queue.retain(|s| {
            if s.fire_at > now {
                return true;
            }
            if s.epoch == live_epoch {
                due.push(s.task);
            } else {
                log::debug!("dropping stale task {:?} (epoch {})", s.task, s.epoch);
            }
            false
        });
        due
    }

    /// True while any task of the live epoch is still pending.
    pub fn has_pending(&self, live_epoch: u64) -> bool {
        self.queue.iter().any(|s| s.epoch == live_epoch)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
