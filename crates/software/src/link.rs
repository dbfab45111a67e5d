//! Bit-banged transmitter for the Game Boy link port.
//!
//! With the Game Boy's serial control register set to external clock, the console shifts in one bit on each rising
//! edge of the clock line, most significant bit first. There is no start or stop framing on this side of the bridge;
//! the cartridge program simply reads SB once eight edges have arrived.

use core::convert::Infallible;
use embedded_hal::{
    delay::DelayNs,
    digital::{OutputPin, PinState},
};

use crate::{configuration::LinkTiming, framer::LinkPort};

/// Drives the clock and data lines of the link port.
pub struct LinkTransmitter<C, D, T> {
    clock: C,
    data: D,
    delay: T,
    timing: LinkTiming,
}

impl<C, D, T> LinkTransmitter<C, D, T>
where
    C: OutputPin<Error = Infallible>,
    D: OutputPin<Error = Infallible>,
    T: DelayNs,
{
    /// Construct a new `LinkTransmitter`, putting the lines in their idle state (clock high, data low).
    pub fn new(mut clock: C, mut data: D, delay: T, timing: LinkTiming) -> Self {
        let Ok(()) = clock.set_high();
        let Ok(()) = data.set_low();
        Self {
            clock,
            data,
            delay,
            timing,
        }
    }

    /// Shifts `byte` out on the link, MSB first, then holds the lines for the configured byte gap.
    ///
    /// The eight bit frames run inside a critical section; an interrupt stretching a clock pulse would corrupt the
    /// byte on the receiving end. The gap afterwards only needs the lines to stay put, so interrupts (UART reception
    /// in particular) are serviced during it.
    pub fn transmit(&mut self, byte: u8) {
        let phase = self.timing.bit_phase_us();
        critical_section::with(|_| {
            for bit in (0..8).rev() {
                let Ok(()) = self.clock.set_low();
                self.delay.delay_us(phase);

                let Ok(()) = self.data.set_state(PinState::from(byte & (1 << bit) != 0));
                self.delay.delay_us(phase);

                let Ok(()) = self.clock.set_high();
                self.delay.delay_us(phase);
            }
        });
        self.delay.delay_us(self.timing.byte_gap_us());
    }
}

impl<C, D, T> LinkPort for LinkTransmitter<C, D, T>
where
    C: OutputPin<Error = Infallible>,
    D: OutputPin<Error = Infallible>,
    T: DelayNs,
{
    fn transmit(&mut self, byte: u8) {
        LinkTransmitter::transmit(self, byte);
    }
}
