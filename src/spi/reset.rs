//! Latch/reset sequencing for the SPI transport.
//!
//! After the last frame the data line must stay low long enough for every
//! chip in the chain to latch what it shifted in and reset its bit counter.
//! Roughly 6 µs is enough in practice; the sequencer clocks out that many zero
//! frames at the configured bus speed, plus one spare frame.

use embassy_time::Duration;
use embedded_hal::spi::SpiBus;

use crate::Error;

/// Longest reset the sequencer can emit, in frames.
pub const MAX_RESET_FRAMES: usize = 64;

static RESET_BLOCK: [u8; MAX_RESET_FRAMES] = [0; MAX_RESET_FRAMES];

/// Zero frames needed to hold the line low for the latch at `frequency` Hz
///
/// `ceil(3 * frequency / 4_000_000) + 1`: never less than 1 and never
/// decreasing as the bus gets faster.
#[allow(clippy::cast_possible_truncation)]
pub const fn reset_frames(frequency: u32) -> usize {
    (3 * frequency as u64).div_ceil(4_000_000) as usize + 1
}

/// Low time produced by [`reset_frames`], rounded up to whole microseconds
pub const fn reset_duration(frequency: u32) -> Duration {
    if frequency == 0 {
        return Duration::from_micros(0);
    }
    let bits = reset_frames(frequency) as u64 * 8;
    Duration::from_micros((bits * 1_000_000).div_ceil(frequency as u64))
}

/// Emits the all-zero reset write for one bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSequencer {
    frames: usize,
}

impl ResetSequencer {
    /// Size the reset for a bus running at `frequency` Hz
    ///
    /// Fails with [`Error::InvalidConfig`] when the reset would not fit
    /// [`MAX_RESET_FRAMES`].
    pub const fn new(frequency: u32) -> Result<Self, Error> {
        let frames = reset_frames(frequency);
        if frames > MAX_RESET_FRAMES {
            return Err(Error::InvalidConfig);
        }
        Ok(Self { frames })
    }

    pub const fn frames(self) -> usize {
        self.frames
    }

    /// Latch shifted data and reset the chain
    pub fn latch<SPI: SpiBus<u8>>(self, spi: &mut SPI) -> Result<(), Error> {
        let block = &RESET_BLOCK[..self.frames];
        spi.write(block).map_err(|err| Error::bus(&err))?;
        spi.flush().map_err(|err| Error::bus(&err))
    }
}
