//! Busy-wait delay with microsecond resolution.
//!
//! Embassy's timer ticks too coarsely (and too late, once interrupts are masked) for the link port's 1µs phases, so
//! the transmitter spins on the core clock instead.

use embedded_hal::delay::DelayNs;

/// Counts core cycles via [`cortex_m::asm::delay`].
pub struct CycleDelay {
    cycles_per_us: u32,
}

impl CycleDelay {
    /// Construct a new `CycleDelay` for a core running at `sysclk_hz`.
    pub const fn new(sysclk_hz: u32) -> Self {
        Self {
            cycles_per_us: sysclk_hz / 1_000_000,
        }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (u64::from(ns) * u64::from(self.cycles_per_us)).div_ceil(1_000);
        cortex_m::asm::delay(u32::try_from(cycles).unwrap_or(u32::MAX));
    }

    fn delay_us(&mut self, us: u32) {
        cortex_m::asm::delay(us.saturating_mul(self.cycles_per_us));
    }
}
