//! One-shot deferred tasks for a single-threaded, host-driven event loop.
//!
//! Nothing here spawns threads or timers. A task records a deadline; the
//! host either polls it every frame ([`DeferredTask::fire_if_due`]) or arms
//! its own wake-up from [`DeferredTask::deadline`] and fires the task with
//! the token it got back from [`DeferredTask::schedule`]. Rescheduling or
//! cancelling bumps the generation, so a stale token never fires.

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Identifies one scheduling of a [`DeferredTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskToken(u64);

/// A cancellable one-shot task.
#[derive(Debug, Clone, Default)]
pub struct DeferredTask {
    deadline: Option<Instant>,
    generation: u64,
}

impl DeferredTask {
    /// Create an idle task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the task for `at`, replacing any pending schedule.
    pub fn schedule(&mut self, at: Instant) -> TaskToken {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(at);
        TaskToken(self.generation)
    }

    /// Cancel the pending schedule, if any. Calling it again is a no-op.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    /// Check if the task is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending task is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Token of the pending schedule.
    pub fn token(&self) -> Option<TaskToken> {
        self.deadline.map(|_| TaskToken(self.generation))
    }

    /// Check if `token` refers to the pending schedule.
    pub fn is_current(&self, token: TaskToken) -> bool {
        self.deadline.is_some() && token.0 == self.generation
    }

    /// Consume the pending schedule if its deadline has passed.
    /// Returns true if the task fired.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Consume the pending schedule if `token` is still current, regardless of time.
    /// Returns true if the task fired.
    pub fn fire(&mut self, token: TaskToken) -> bool {
        if self.is_current(token) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}
