//! Frames the incoming MIDI byte stream and decides which bytes continue on to the Game Boy.
//!
//! The framer does not parse MIDI in any real sense. It tracks only how far into the current message it is, which is
//! enough to tell whether the next byte should be a status byte or a data byte. Bytes which don't fit that
//! expectation are dropped from the link (though still passed through), and so are Control Change status bytes while
//! the [filter](crate::configuration::ControlChangeFilter) is active.
//!
//! Running status is not supported: every message must carry its own status byte. A stream relying on running
//! status has its data bytes dropped until the framer is back at the start of a message and a status byte arrives.

use tinyvec::ArrayVec;
use wmidi::MidiMessage;

use crate::{configuration::ControlChangeFilter, filter_mode::FilterMode};

/// Status nibble of a Control Change message.
const CONTROL_CHANGE: u8 = 0xB;
/// Status nibble of a Program Change message, the only two-byte message the framer accounts for.
const PROGRAM_CHANGE: u8 = 0xC;
/// Position of the last byte of a three-byte message.
const LAST_POSITION: u8 = 2;

/// A source of received bytes, such as the FIFO of a UART.
pub trait ByteSource {
    /// Pops the next received byte, or returns `None` if nothing is pending. Must not block.
    fn pop(&mut self) -> Option<u8>;
}

/// Best-effort destination for the unmodified input stream (MIDI THRU).
pub trait ByteSink {
    /// Writes `byte` if the output can take it right now; otherwise the byte is discarded.
    fn try_write(&mut self, byte: u8);
}

/// The outgoing side of the bridge.
pub trait LinkPort {
    /// Sends one byte to the Game Boy.
    fn transmit(&mut self, byte: u8);
}

/// Number of bytes already forwarded for the message in progress.
///
/// Zero means a status byte is expected; anything else means a data byte is expected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramerPosition(u8);

impl FramerPosition {
    /// Determine whether the framer is waiting on a status byte.
    pub fn expects_status(&self) -> bool {
        self.0 == 0
    }

    /// Returns the raw count.
    pub fn value(&self) -> u8 {
        self.0
    }
}

/// What becomes of a received byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// The byte is sent to the Game Boy.
    Forward,
    /// The byte's kind (status or data) does not match the framer position; it is dropped.
    Desync,
    /// The byte is a Control Change status byte and the filter is active; it is dropped.
    Filtered,
}

/// The bytes of a message which made it to the Game Boy in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardedMessage {
    bytes: ArrayVec<[u8; 3]>,
}

impl ForwardedMessage {
    /// Returns the forwarded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Interprets the bytes as a MIDI message, if they form a valid one.
    pub fn decode(&self) -> Option<MidiMessage<'_>> {
        MidiMessage::from_bytes(&self.bytes).ok()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ForwardedMessage {
    fn format(&self, fmt: defmt::Formatter) {
        match self.decode() {
            Some(MidiMessage::NoteOn(channel, note, velocity)) => defmt::write!(
                fmt,
                "NoteOn: channel {}, note {}, velocity {}",
                channel.number(),
                note.to_str(),
                u8::from(velocity)
            ),
            Some(MidiMessage::NoteOff(channel, note, velocity)) => defmt::write!(
                fmt,
                "NoteOff: channel {}, note {}, velocity {}",
                channel.number(),
                note.to_str(),
                u8::from(velocity)
            ),
            Some(MidiMessage::ProgramChange(channel, program)) => defmt::write!(
                fmt,
                "ProgramChange: channel {}, program {}",
                channel.number(),
                u8::from(program)
            ),
            Some(MidiMessage::ControlChange(channel, function, value)) => defmt::write!(
                fmt,
                "ControlChange: channel {}, function {}, value {}",
                channel.number(),
                u8::from(function),
                u8::from(value)
            ),
            _ => defmt::write!(fmt, "{=[u8]:#x}", self.bytes()),
        }
    }
}

/// Tracks message boundaries in the MIDI stream and routes each byte.
#[derive(Debug, Default)]
pub struct MidiFramer {
    position: FramerPosition,
    /// Bytes forwarded so far for the message in progress.
    message: ArrayVec<[u8; 3]>,
}

impl MidiFramer {
    /// Construct a new `MidiFramer`, expecting a status byte.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current position within the message in progress.
    pub fn position(&self) -> FramerPosition {
        self.position
    }

    /// Decide what to do with `byte` given the current position and filter setting. Does not change any state.
    pub fn verdict(&self, byte: u8, filter: ControlChangeFilter) -> Verdict {
        let nibble = byte >> 4;
        let is_status = nibble & 0x8 != 0;

        if is_status != self.position.expects_status() {
            Verdict::Desync
        } else if filter.is_blocking() && nibble == CONTROL_CHANGE {
            Verdict::Filtered
        } else {
            Verdict::Forward
        }
    }

    /// Moves past a forwarded `byte`. Returns the full message once its last byte has been forwarded.
    ///
    /// Three-byte messages walk the position 0 → 1 → 2 → 0. A Program Change status byte advances by two, so its single
    /// data byte lands on the last position and completes the message.
    pub fn advance(&mut self, byte: u8) -> Option<ForwardedMessage> {
        // capacity is never exceeded since the position wraps after at most three bytes
        let _ = self.message.try_push(byte);

        if self.position.0 == LAST_POSITION {
            self.position = FramerPosition(0);
            let bytes = core::mem::take(&mut self.message);
            Some(ForwardedMessage { bytes })
        } else {
            let program_change = u8::from(byte >> 4 == PROGRAM_CHANGE);
            self.position = FramerPosition(self.position.0 + 1 + program_change);
            None
        }
    }

    /// Pops every pending input byte, passing each one through unmodified and forwarding those that fit the framing
    /// to `link`. Returns the number of bytes forwarded.
    ///
    /// The filter setting is read anew for each byte.
    pub fn drain_and_forward<S, O, L>(
        &mut self,
        input: &mut S,
        thru: &mut O,
        link: &mut L,
        filter: &FilterMode,
    ) -> usize
    where
        S: ByteSource,
        O: ByteSink,
        L: LinkPort,
    {
        let mut forwarded = 0;
        while let Some(byte) = input.pop() {
            thru.try_write(byte);

            match self.verdict(byte, filter.get()) {
                Verdict::Forward => {
                    link.transmit(byte);
                    forwarded += 1;
                    if let Some(_message) = self.advance(byte) {
                        #[cfg(feature = "defmt")]
                        defmt::debug!("Forwarded {}", _message);
                    }
                }
                Verdict::Desync => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!(
                        "Dropped {=u8:#x}; out of step at position {}",
                        byte,
                        self.position.value()
                    );
                }
                Verdict::Filtered => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("Filtered Control Change status {=u8:#x}", byte);
                }
            }
        }
        forwarded
    }
}
