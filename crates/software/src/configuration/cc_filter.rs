use num_derive::{FromPrimitive, ToPrimitive};

/// Determines whether MIDI Control Change messages are sent on to the Game Boy.
///
/// Sequencers and DAWs tend to emit a steady stream of Control Change messages that the cartridge program either
/// ignores or, in the case of some mGB builds, chokes on. Blocking them keeps the link free for note data. The
/// setting is toggled with the mode button and is not retained across power cycles.
#[derive(Debug, Default, Clone, Copy, ToPrimitive, FromPrimitive, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlChangeFilter {
    /// Control Change messages are forwarded like any other message.
    #[default]
    Forward,
    /// Control Change status bytes are withheld from the link.
    Block,
}

impl ControlChangeFilter {
    /// Returns true for [`ControlChangeFilter::Block`].
    pub fn is_blocking(&self) -> bool {
        *self == Self::Block
    }
}

impl super::CycleConfig for ControlChangeFilter {}
