//! Status LED which blinks while Control Change messages are blocked and stays lit otherwise.
//!
//! The blink is a chain of one-shot alarms: each toggle asks for the next one as long as the filter is active. There
//! is no way to cancel an alarm, so the chain ends when an alarm fires and finds the filter inactive. The
//! `rearm_pending` flag guarantees a single chain; starting a second would make the LED blink erratically.

use core::convert::Infallible;
use embassy_time::Duration;
use embedded_hal::digital::{OutputPin, PinState};

use crate::filter_mode::FilterMode;

/// Time between blink toggles.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Schedules the indicator's next toggle.
///
/// Implementors must eventually call [`BlinkIndicator::toggle_and_maybe_rearm`] once per request, from a context that
/// never calls into the framer or link transmitter.
pub trait OneShotTimer {
    /// Request a single callback after `delay`.
    fn schedule_once(&mut self, delay: Duration);
}

/// The mode toggle's view of the indicator.
pub trait Indicator {
    /// Drives the LED directly, leaving the blink phase untouched.
    fn drive(&mut self, lit: bool);
    /// Determine whether an alarm is outstanding.
    fn is_rearm_pending(&self) -> bool;
    /// Flips the LED, then either requests the next alarm (filter active) or settles on steady light.
    fn toggle_and_maybe_rearm(&mut self, filter: &FilterMode);
}

/// LED indicator for [`FilterMode`].
pub struct BlinkIndicator<P, T> {
    led: P,
    timer: T,
    lit: bool,
    rearm_pending: bool,
}

impl<P, T> BlinkIndicator<P, T>
where
    P: OutputPin<Error = Infallible>,
    T: OneShotTimer,
{
    /// Construct a new `BlinkIndicator` and light the LED.
    pub fn new(mut led: P, timer: T) -> Self {
        let Ok(()) = led.set_high();
        Self {
            led,
            timer,
            lit: true,
            rearm_pending: false,
        }
    }

    /// Returns the blink phase (not necessarily the pin level, see [`Indicator::drive`]).
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Starts blinking unless a chain is already running, in which case that chain carries on by itself.
    pub fn start(&mut self, filter: &FilterMode) {
        if !self.rearm_pending {
            self.toggle_and_maybe_rearm(filter);
        }
    }

    fn show(&mut self) {
        let Ok(()) = self.led.set_state(PinState::from(self.lit));
    }
}

impl<P, T> Indicator for BlinkIndicator<P, T>
where
    P: OutputPin<Error = Infallible>,
    T: OneShotTimer,
{
    fn drive(&mut self, lit: bool) {
        let Ok(()) = self.led.set_state(PinState::from(lit));
    }

    fn is_rearm_pending(&self) -> bool {
        self.rearm_pending
    }

    fn toggle_and_maybe_rearm(&mut self, filter: &FilterMode) {
        self.lit = !self.lit;
        self.show();

        if filter.is_blocking() {
            self.timer.schedule_once(BLINK_INTERVAL);
            self.rearm_pending = true;
        } else {
            self.lit = true;
            self.show();
            self.rearm_pending = false;
        }
    }
}
