//! Provides [`FilterMode`], the one piece of state shared between the polling loop and the blink timer.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::configuration::{ControlChangeFilter, CycleConfig};

/// Holds the current [`ControlChangeFilter`] setting.
///
/// Backed by a single atomic flag so it can sit in a `static` and be read from timer context without a lock.
/// Only the [mode toggle](crate::mode_toggle::ModeToggle) writes to it; a stale read elsewhere costs at most one
/// blink cycle or one message.
#[derive(Debug)]
pub struct FilterMode {
    blocking: AtomicBool,
}

impl FilterMode {
    /// Construct a new `FilterMode` holding `initial`.
    pub const fn new(initial: ControlChangeFilter) -> Self {
        Self {
            blocking: AtomicBool::new(matches!(initial, ControlChangeFilter::Block)),
        }
    }

    /// Returns the current setting.
    pub fn get(&self) -> ControlChangeFilter {
        if self.is_blocking() {
            ControlChangeFilter::Block
        } else {
            ControlChangeFilter::Forward
        }
    }

    /// Determine whether Control Change messages are currently blocked.
    pub fn is_blocking(&self) -> bool {
        self.blocking.load(Ordering::Relaxed)
    }

    /// Advances to the next setting and returns it.
    pub fn cycle(&self) -> ControlChangeFilter {
        let next = self.get().cycle();
        self.blocking.store(next.is_blocking(), Ordering::Relaxed);
        next
    }
}

impl Default for FilterMode {
    fn default() -> Self {
        Self::new(ControlChangeFilter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_forwarding() {
        let filter = FilterMode::default();
        assert_eq!(
            ControlChangeFilter::Forward,
            filter.get(),
            "Expected left but got right"
        );
        assert!(!filter.is_blocking());
    }

    #[test]
    fn cycle_toggles() {
        let filter = FilterMode::new(ControlChangeFilter::Forward);
        assert_eq!(
            ControlChangeFilter::Block,
            filter.cycle(),
            "Expected left but got right"
        );
        assert!(filter.is_blocking(), "Should be blocking after one cycle");
        assert_eq!(
            ControlChangeFilter::Forward,
            filter.cycle(),
            "Expected left but got right"
        );
        assert!(!filter.is_blocking(), "Should forward after two cycles");
    }
}
