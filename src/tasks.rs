//! Delayed, cancelable work owned by the engine.
//!
//! Tasks are due at a point on the engine's own millisecond time base, which
//! advances with every tick. Nothing runs on its own: the engine drains due
//! tasks while handling a tick, so they are ordered with every other event.

use crate::engine::ScoreIndicator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Put a mole back on the board after a hit.
    Reactivate,
    /// Retire a scoring indicator.
    ClearIndicator(ScoreIndicator),
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    due_ms: u64,
    task: Task,
}

#[derive(Clone, Debug, Default)]
pub struct TaskQueue {
    pending: Vec<Scheduled>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, task: Task) {
        self.pending.push(Scheduled { due_ms, task });
    }

    /// Remove every pending task matching `pred` and return them.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&Task) -> bool) -> Vec<Task> {
        let mut canceled = Vec::new();
        self.pending.retain(|s| {
            if pred(&s.task) {
                canceled.push(s.task);
                false
            } else {
                true
            }
        });
        canceled
    }

    /// Remove and return the tasks due at or before `now_ms`, earliest first.
    /// Tasks with the same due time keep their scheduling order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<Task> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.due_ms <= now_ms {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|s| s.due_ms);
        due.into_iter().map(|s| s.task).collect()
    }

    pub fn contains(&self, pred: impl Fn(&Task) -> bool) -> bool {
        self.pending.iter().any(|s| pred(&s.task))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
