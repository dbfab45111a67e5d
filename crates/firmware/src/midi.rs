//! MIDI IN and MIDI THRU over the buffered UART.

use core::task::Poll;
use defmt::{Debug2Format, warn};
use embassy_futures::poll_once;
use embassy_stm32::usart::{BufferedUartRx, BufferedUartTx};
use embedded_io::{Read, ReadReady};
use embedded_io_async::Write;
use mgb_link_lib::framer::{ByteSink, ByteSource};

/// Receiving half of the MIDI UART.
pub struct MidiIn {
    rx: BufferedUartRx<'static>,
}

impl MidiIn {
    /// Construct a new `MidiIn` reading from `rx`.
    pub fn new(rx: BufferedUartRx<'static>) -> Self {
        Self { rx }
    }
}

impl ByteSource for MidiIn {
    fn pop(&mut self) -> Option<u8> {
        match self.rx.read_ready() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                warn!("MIDI IN error: {}", Debug2Format(&e));
                return None;
            }
        }

        // data is ready, so this read returns immediately
        let mut byte = [0_u8; 1];
        match self.rx.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(e) => {
                warn!("MIDI IN error: {}", Debug2Format(&e));
                None
            }
        }
    }
}

/// Transmitting half of the MIDI UART, echoing MIDI IN.
///
/// Bytes go into the UART's TX ring, which the USART interrupt drains regardless of what the main loop is doing.
pub struct MidiThru {
    tx: BufferedUartTx<'static>,
}

impl MidiThru {
    /// Construct a new `MidiThru` writing to `tx`.
    pub fn new(tx: BufferedUartTx<'static>) -> Self {
        Self { tx }
    }
}

impl ByteSink for MidiThru {
    fn try_write(&mut self, byte: u8) {
        // a single poll completes only if the ring has room; a full ring means THRU is falling behind and the byte
        // is not retried
        match poll_once(Write::write(&mut self.tx, &[byte])) {
            Poll::Ready(Ok(_)) | Poll::Pending => {}
            Poll::Ready(Err(e)) => warn!("MIDI THRU error: {}", Debug2Format(&e)),
        }
    }
}
