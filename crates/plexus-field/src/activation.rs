//! Process-wide guard against running two fields at once.

use std::sync::atomic::{AtomicBool, Ordering};

/// Set while an [`ActivationGuard`] is alive.
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Proof that this process owns the particle effect.
///
/// Acquire it once at startup. Dropping it clears the flag, so a later
/// startup in the same process can acquire it again.
#[derive(Debug)]
pub struct ActivationGuard {
    _private: (),
}

impl ActivationGuard {
    /// Returns `None` if the effect is already active.
    pub fn acquire() -> Option<Self> {
        ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { _private: () })
    }
}

impl Drop for ActivationGuard {
    fn drop(&mut self) {
        ACTIVE.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_activation_is_refused() {
        let guard = ActivationGuard::acquire();
        assert!(guard.is_some());
        assert!(ActivationGuard::acquire().is_none());
        drop(guard);
        let again = ActivationGuard::acquire();
        assert!(again.is_some());
    }
}
