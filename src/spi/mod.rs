//! SPI-framed transport.
//!
//! The SPI bus is repurposed as a waveform generator: every WS2812 bit is sent
//! as one byte-frame whose bit pattern, clocked out MSB first, reproduces the
//! high/low ratio of that bit. A color byte thus costs 8 bus bytes and a pixel
//! `8 * stride`. The encoded strip is staged in a buffer owned by the driver
//! and sized at construction, so updates never allocate.
//!
//! Bus parameters: mode 0, MSB first, single data line, 8-bit words, clock at
//! [`SpiConfig::frequency`](crate::config::SpiConfig::frequency).

mod frame;
mod reset;

#[cfg(feature = "log")]
use esp_println::println;

use embedded_hal::spi::SpiBus;
use smart_leds::SmartLedsWrite;

pub use frame::{FRAMES_PER_BYTE, FramePattern, serialize_color};
pub use reset::{MAX_RESET_FRAMES, ResetSequencer, reset_duration, reset_frames};

use crate::{
    Error, Handle, LedStrip,
    color::Rgb,
    config::SpiConfig,
    layout::ChannelOrder,
};
use frame::serialize_color_into;

/// SPI mode the bus handle must be configured with
pub const SPI_MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_0;

/// WS2812 driver over an SPI bus.
///
/// `BUF` is the staging buffer in bytes, at least
/// [`spi_buffer_size`](crate::config::spi_buffer_size) of the configured chain.
pub struct Ws2812Spi<SPI, const BUF: usize> {
    spi: SPI,
    order: ChannelOrder,
    pattern: FramePattern,
    chain_length: usize,
    reset: ResetSequencer,
    buffer: [u8; BUF],
}

impl<SPI, const BUF: usize> Ws2812Spi<SPI, BUF>
where
    SPI: SpiBus<u8>,
{
    /// Create a driver from a resolved, pre-configured bus
    pub fn new(spi: SPI, config: &SpiConfig) -> Result<Self, Error> {
        config.validate()?;
        if config.buffer_size() > BUF {
            #[cfg(feature = "log")]
            println!(
                "[Ws2812Spi.new] staging buffer of {} bytes cannot hold {} pixels",
                BUF, config.chain_length
            );
            return Err(Error::InvalidConfig);
        }
        let reset = ResetSequencer::new(config.frequency)?;
        Ok(Self {
            spi,
            order: config.order,
            pattern: config.pattern,
            chain_length: config.chain_length,
            reset,
            buffer: [0; BUF],
        })
    }

    /// Create a driver from a bus looked up by the host framework
    pub fn bind(spi: Option<SPI>, config: &SpiConfig) -> Result<Self, Error> {
        let Some(spi) = spi else {
            #[cfg(feature = "log")]
            println!("[Ws2812Spi.bind] SPI bus not found");
            return Err(Error::DeviceNotFound(Handle::Bus));
        };
        Self::new(spi, config)
    }

    /// Maximum pixels per update
    pub const fn capacity(&self) -> usize {
        self.chain_length
    }

    pub const fn order(&self) -> ChannelOrder {
        self.order
    }

    /// Zero frames written by every latch
    pub const fn reset_frames(&self) -> usize {
        self.reset.frames()
    }

    const fn bytes_per_pixel(&self) -> usize {
        FRAMES_PER_BYTE * self.order.stride()
    }

    /// Encode one pixel into its slot of the staging buffer
    fn stage_pixel(&mut self, index: usize, pixel: Rgb) {
        let size = self.bytes_per_pixel();
        let start = index * size;
        let record = self.order.wire_pixel(pixel);
        let slots = self.buffer[start..start + size].chunks_exact_mut(FRAMES_PER_BYTE);
        for (slot, color) in slots.zip(record.as_slice()) {
            serialize_color_into(slot, *color, self.pattern);
        }
    }

    fn capacity_exceeded(&self, requested: usize) -> Error {
        #[cfg(feature = "log")]
        println!(
            "[Ws2812Spi] {} pixels requested, capacity is {}",
            requested, self.chain_length
        );
        Error::CapacityExceeded {
            requested,
            capacity: self.chain_length,
        }
    }

    /// Stage pixels, send them in one write and latch
    fn transmit<I>(&mut self, pixels: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Rgb>,
    {
        let mut count = 0;
        for pixel in pixels {
            if count == self.chain_length {
                return Err(self.capacity_exceeded(count + 1));
            }
            self.stage_pixel(count, pixel);
            count += 1;
        }
        self.send_staged(count * self.bytes_per_pixel())
    }

    /// Write the first `len` staged bytes, then latch on every path
    ///
    /// A failed write wins over a failed latch.
    fn send_staged(&mut self, len: usize) -> Result<(), Error> {
        let written = write_frames(&mut self.spi, &self.buffer[..len]);
        let latched = self.reset.latch(&mut self.spi);
        match written {
            Ok(()) => {
                if let Err(_err) = latched {
                    #[cfg(feature = "log")]
                    println!("[Ws2812Spi] strip reset failed: {}", _err);
                }
                latched
            }
            Err(err) => {
                #[cfg(feature = "log")]
                println!("[Ws2812Spi] strip write failed: {}", err);
                Err(err)
            }
        }
    }
}

/// One logical bus write: shift out and wait until the bus is idle
fn write_frames<SPI: SpiBus<u8>>(spi: &mut SPI, frames: &[u8]) -> Result<(), Error> {
    spi.write(frames).map_err(|err| Error::bus(&err))?;
    spi.flush().map_err(|err| Error::bus(&err))
}

impl<SPI, const BUF: usize> LedStrip for Ws2812Spi<SPI, BUF>
where
    SPI: SpiBus<u8>,
{
    fn update_rgb(&mut self, pixels: &[Rgb]) -> Result<(), Error> {
        if pixels.len() > self.chain_length {
            return Err(self.capacity_exceeded(pixels.len()));
        }
        self.transmit(pixels.iter().copied())
    }

    /// Send each byte as its own 8-frame write, latching once at the end
    ///
    /// On a failed write the chain is latched right away, which leaves the
    /// channels sent so far lit and points at the failing one, and the
    /// remaining channels are dropped.
    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
    fn update_channels(&mut self, channels: &[u8]) -> Result<(), Error> {
        for (index, channel) in channels.iter().enumerate() {
            let frames = serialize_color(*channel, self.pattern);
            if let Err(err) = write_frames(&mut self.spi, &frames) {
                let _ = self.reset.latch(&mut self.spi);
                #[cfg(feature = "log")]
                println!("[Ws2812Spi.update_channels] can't set channel {}: {}", index, err);
                return Err(err);
            }
        }
        self.reset.latch(&mut self.spi)
    }
}

impl<SPI, const BUF: usize> SmartLedsWrite for Ws2812Spi<SPI, BUF>
where
    SPI: SpiBus<u8>,
{
    type Error = Error;
    type Color = Rgb;

    /// Stage the iterator and send it in one write
    ///
    /// Yielding more pixels than the capacity fails before anything is sent.
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.transmit(iterator.into_iter().map(Into::into))
    }
}
