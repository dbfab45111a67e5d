use embassy_time::Duration;

/// Timing of the bit-banged link port transfer.
///
/// Each bit is framed as clock low, data set, clock high, with every phase lasting [`bit_phase`][Self::bit_phase].
/// After the eighth bit the lines are held for [`byte_gap`][Self::byte_gap] so the cartridge program, which polls
/// for serial interrupts, can pick up the byte before the next one arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkTiming {
    /// Duration of each of the three phases of a bit.
    pub bit_phase: Duration,
    /// Idle time following a complete byte.
    ///
    /// Values down to a microsecond work on a DMG-01, but notes are occasionally skipped; 500µs has proven reliable.
    pub byte_gap: Duration,
}

impl LinkTiming {
    /// Phase duration in whole microseconds, as expected by `DelayNs::delay_us`.
    pub fn bit_phase_us(&self) -> u32 {
        saturating_micros(self.bit_phase)
    }

    /// Byte gap in whole microseconds, as expected by `DelayNs::delay_us`.
    pub fn byte_gap_us(&self) -> u32 {
        saturating_micros(self.byte_gap)
    }
}

impl Default for LinkTiming {
    fn default() -> Self {
        Self {
            bit_phase: Duration::from_micros(1),
            byte_gap: Duration::from_micros(500),
        }
    }
}

fn saturating_micros(duration: Duration) -> u32 {
    u32::try_from(duration.as_micros()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let timing = LinkTiming::default();
        assert_eq!(1, timing.bit_phase_us(), "Expected left but got right");
        assert_eq!(500, timing.byte_gap_us(), "Expected left but got right");
    }

    #[test]
    fn oversized_durations_saturate() {
        let timing = LinkTiming {
            bit_phase: Duration::from_secs(10_000),
            byte_gap: Duration::from_micros(0),
        };
        assert_eq!(u32::MAX, timing.bit_phase_us(), "Expected left but got right");
        assert_eq!(0, timing.byte_gap_us(), "Expected left but got right");
    }
}
