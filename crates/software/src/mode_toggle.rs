//! Turns presses of the mode button into changes of [`FilterMode`].

use crate::{configuration::ControlChangeFilter, filter_mode::FilterMode, indicator::Indicator};

/// Edge detector for the mode button.
///
/// The button is sampled once per pass of the main loop. Debouncing is left to the hardware; a noisy read can
/// register as a second press.
#[derive(Debug, Default)]
pub struct ModeToggle {
    was_pressed: bool,
}

impl ModeToggle {
    /// Construct a new `ModeToggle`, treating the button as released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the latest button reading. On a press (released → pressed) the filter is cycled and the indicator
    /// updated; the new setting is returned. Holding or releasing the button only updates the edge state.
    pub fn poll<I: Indicator>(
        &mut self,
        pressed: bool,
        filter: &FilterMode,
        indicator: &mut I,
    ) -> Option<ControlChangeFilter> {
        if !pressed {
            self.was_pressed = false;
            return None;
        }
        if self.was_pressed {
            return None;
        }
        self.was_pressed = true;

        let mode = filter.cycle();
        match mode {
            ControlChangeFilter::Block => {
                indicator.drive(false);
                if !indicator.is_rearm_pending() {
                    indicator.toggle_and_maybe_rearm(filter);
                }
            }
            ControlChangeFilter::Forward => {
                indicator.drive(true);
            }
        }
        Some(mode)
    }
}
