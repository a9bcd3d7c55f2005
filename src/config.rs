//! Instance configuration for both transports.
//!
//! Configs are plain `Copy` values with `const` builders so a board can keep
//! its strip description in a `const` item. They are consumed once when the
//! driver is constructed and never change afterwards.

use crate::{
    Error,
    gpio::BitTiming,
    layout::ChannelOrder,
    spi::{FramePattern, MAX_RESET_FRAMES, reset_frames},
};

/// Default SPI clock, matching [`FramePattern::DEFAULT`]
pub const DEFAULT_SPI_FREQUENCY: u32 = 4_000_000;

/// Bit-bang transport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioConfig {
    pub order: ChannelOrder,
    pub timing: BitTiming,
}

impl GpioConfig {
    pub const fn new() -> Self {
        Self {
            order: ChannelOrder::GRB,
            timing: BitTiming::NRF51_16MHZ,
        }
    }

    pub const fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    pub const fn with_timing(mut self, timing: BitTiming) -> Self {
        self.timing = timing;
        self
    }

    pub const fn validate(&self) -> Result<(), Error> {
        if !self.timing.is_valid() {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// SPI-framed transport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiConfig {
    pub order: ChannelOrder,
    /// Bus clock in Hz; the bus handle must already run at this rate
    pub frequency: u32,
    pub pattern: FramePattern,
    /// Maximum pixels per `update_rgb`
    pub chain_length: usize,
}

impl SpiConfig {
    pub const fn new(chain_length: usize) -> Self {
        Self {
            order: ChannelOrder::GRB,
            frequency: DEFAULT_SPI_FREQUENCY,
            pattern: FramePattern::DEFAULT,
            chain_length,
        }
    }

    pub const fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    pub const fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    pub const fn with_pattern(mut self, pattern: FramePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub const fn with_chain_length(mut self, chain_length: usize) -> Self {
        self.chain_length = chain_length;
        self
    }

    /// Staging bytes one pixel occupies
    pub const fn bytes_per_pixel(&self) -> usize {
        spi_bytes_per_pixel(self.order.has_white())
    }

    /// Staging bytes the whole chain occupies
    pub const fn buffer_size(&self) -> usize {
        self.chain_length * self.bytes_per_pixel()
    }

    pub const fn validate(&self) -> Result<(), Error> {
        if self.frequency == 0 || self.pattern.one == self.pattern.zero {
            return Err(Error::InvalidConfig);
        }
        if reset_frames(self.frequency) > MAX_RESET_FRAMES {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}

const fn spi_bytes_per_pixel(has_white: bool) -> usize {
    if has_white { 32 } else { 24 }
}

/// Staging buffer size for `chain_length` pixels, for sizing `Ws2812Spi`
///
/// ```ignore
/// const CHAIN: usize = 60;
/// type Strip<SPI> = Ws2812Spi<SPI, { spi_buffer_size(CHAIN, false) }>;
/// ```
pub const fn spi_buffer_size(chain_length: usize, has_white: bool) -> usize {
    chain_length * spi_bytes_per_pixel(has_white)
}
