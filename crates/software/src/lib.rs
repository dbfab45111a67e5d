//! This crate contains architecture-agnostic logic for bridging a [MIDI](https://midi.org/midi-1-0) input stream to
//! the Game Boy link port, for use with MIDI-aware cartridge programs such as mGB.
//!
//! The bridge is made up of four parts:
//! - a [`framer`] which decides, byte by byte, what is forwarded to the Game Boy;
//! - a [`link`] transmitter which bit-bangs each forwarded byte onto the link cable;
//! - a blinking [`indicator`] signalling whether Control Change messages are blocked;
//! - a [`mode_toggle`] which flips that setting when the mode button is pressed.
//!
//! The hardware behind them (UART, GPIO, delays, and timers) is reached through `embedded-hal` and the small traits
//! defined alongside each part.

#![deny(missing_docs)]
#![no_std]

pub mod configuration;
pub mod filter_mode;
pub mod framer;
pub mod indicator;
pub mod link;
pub mod mode_toggle;

#[cfg(test)]
mod mock;
