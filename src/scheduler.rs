//! Periodic task bookkeeping on a virtual clock.
//!
//! The scheduler never runs anything itself. The session asks it which task is
//! due next and runs that task to completion before asking again, so ticks
//! never interleave. Every arm/cancel bumps a generation counter; a firing
//! carries the generation it was issued under and is discarded by the session
//! if a reset happened in between.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display)]
pub enum TaskKind {
    /// advances elapsed seconds (and with it the wave)
    Clock,
    Spawn,
    Motion,
}

impl TaskKind {
    pub fn period(&self) -> Duration {
        match self {
            TaskKind::Clock | TaskKind::Spawn => Duration::from_millis(1000),
            TaskKind::Motion => Duration::from_millis(50),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub kind: TaskKind,
    pub at: Duration,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    kind: TaskKind,
    next_due: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    generation: u64,
    tasks: Vec<Armed>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_armed(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Start a fresh set of tasks, each first due one period from now
    pub fn arm(&mut self, kinds: &[TaskKind]) {
        self.generation += 1;
        self.tasks = kinds
            .iter()
            .map(|&kind| Armed {
                kind,
                next_due: self.now + kind.period(),
            })
            .collect();
    }

    pub fn cancel(&mut self, kind: TaskKind) {
        self.tasks.retain(|t| t.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.generation += 1;
        self.tasks.clear();
    }

    /// Earliest firing due at or before `until`, ties broken by task order
    pub fn poll(&mut self, until: Duration) -> Option<Fired> {
        let task = self
            .tasks
            .iter_mut()
            .filter(|t| t.next_due <= until)
            .min_by_key(|t| (t.next_due, t.kind))?;

        let fired = Fired {
            kind: task.kind,
            at: task.next_due,
            generation: self.generation,
        };
        task.next_due += task.kind.period();
        self.now = self.now.max(fired.at);
        Some(fired)
    }

    /// Move the clock to `until` once everything due has been polled
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Time left before the next firing, if any task is armed
    pub fn until_next(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .map(|t| t.next_due.saturating_sub(self.now))
            .min()
    }
}
