//! Recording test doubles for the hardware seams. Every double appends to a shared [`Log`] so tests can assert on
//! the exact interleaving of pin writes, delays, and timer requests.

extern crate std;

use core::{cell::RefCell, convert::Infallible};
use embassy_time::Duration;
use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};
use std::{collections::VecDeque, rc::Rc, vec::Vec};

use crate::{
    framer::{ByteSink, ByteSource, LinkPort},
    indicator::OneShotTimer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Clock,
    Data,
    Led,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Set(Line, bool),
    DelayUs(u32),
    Scheduled(Duration),
}

#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn pin(&self, line: Line) -> Pin {
        Pin {
            line,
            log: self.clone(),
        }
    }

    pub fn delay(&self) -> Delay {
        Delay(self.clone())
    }

    pub fn timer(&self) -> Timer {
        Timer(self.clone())
    }
}

pub struct Pin {
    line: Line,
    log: Log,
}

impl ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Set(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Set(self.line, true));
        Ok(())
    }
}

pub struct Delay(Log);

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayUs(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.push(Event::DelayUs(us));
    }
}

pub struct Timer(Log);

impl OneShotTimer for Timer {
    fn schedule_once(&mut self, delay: Duration) {
        self.0.push(Event::Scheduled(delay));
    }
}

/// Bytes waiting in the receive FIFO.
#[derive(Default)]
pub struct Input(VecDeque<u8>);

impl Input {
    pub fn new(bytes: &[u8]) -> Self {
        Self(bytes.iter().copied().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ByteSource for Input {
    fn pop(&mut self) -> Option<u8> {
        self.0.pop_front()
    }
}

/// Passthrough output; refuses bytes while `busy` is set.
#[derive(Default)]
pub struct Thru {
    pub written: Vec<u8>,
    pub busy: bool,
}

impl ByteSink for Thru {
    fn try_write(&mut self, byte: u8) {
        if !self.busy {
            self.written.push(byte);
        }
    }
}

/// Link port which records the bytes handed to it.
#[derive(Default)]
pub struct Link {
    pub sent: Vec<u8>,
}

impl LinkPort for Link {
    fn transmit(&mut self, byte: u8) {
        self.sent.push(byte);
    }
}
