//! Pointer tracking and the press cooldown.

use std::time::{Duration, Instant};

/// A cancellable delayed reset.
///
/// Arming it again before it fires pushes the deadline out instead of
/// scheduling a second reset.
#[derive(Debug, Clone)]
pub struct Cooldown {
    duration: Duration,
    deadline: Option<Instant>,
}

impl Cooldown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadline: None,
        }
    }

    /// Start (or restart) the countdown from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Last known pointer position and the repulsion flag.
#[derive(Debug, Clone)]
pub struct PointerState {
    /// `None` while the pointer is outside the surface or untracked.
    position: Option<(f64, f64)>,
    repelling: bool,
    cooldown: Cooldown,
}

impl PointerState {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            position: None,
            repelling: false,
            cooldown: Cooldown::new(cooldown),
        }
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }

    /// Record a pointer position. Non-finite coordinates count as untracked.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.position = (x.is_finite() && y.is_finite()).then_some((x, y));
    }

    pub fn leave(&mut self) {
        self.position = None;
    }

    pub fn is_repelling(&self) -> bool {
        self.repelling
    }

    /// Raise the repelling flag until the cooldown elapses.
    pub fn start_repelling(&mut self, now: Instant) {
        self.repelling = true;
        self.cooldown.arm(now);
    }

    /// Clear the repelling flag once its cooldown has run out.
    pub fn tick(&mut self, now: Instant) {
        if self.cooldown.poll(now) {
            self.repelling = false;
        }
    }

    /// Drop position and any pending repulsion.
    pub fn reset(&mut self) {
        self.position = None;
        self.repelling = false;
        self.cooldown.cancel();
    }
}
