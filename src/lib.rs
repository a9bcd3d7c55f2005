//! WS2812 LED strip encoder with a GPIO bit-bang and an SPI-framed transport.
//!
//! # Features
//!
//! - `cortex-m`: `gpio::AsmDelay`, a calibrated spin loop for the bit-bang
//!   transport.
//! - `log`: diagnostics through `esp-println`. The chip is not selected here;
//!   enable the matching `esp-println` chip feature (`esp32c3`, `esp32s3`, ...)
//!   in the application, or use `esp32-log` on a plain ESP32.
#![no_std]

pub mod color;
pub mod config;
pub mod error;
pub mod gpio;
pub mod layout;
pub mod spi;

pub use config::{GpioConfig, SpiConfig, spi_buffer_size};
pub use error::{Error, Handle};
pub use gpio::{AlwaysOn, BitTiming, ClockGate, CycleDelay, Ws2812Gpio};
pub use layout::{Channel, ChannelOrder, encode_layout};
pub use spi::{FramePattern, SPI_MODE, Ws2812Spi};

pub use color::Rgb;
pub use embassy_time::Duration;

/// Capability set shared by every strip transport
///
/// The transport is picked once, when the driver is constructed; callers
/// then only talk to this trait. An instance handles one update at a time
/// and takes `&mut self`, so concurrent updates on one strip cannot compile.
pub trait LedStrip {
    /// Send `pixels` to the strip, in strip order
    fn update_rgb(&mut self, pixels: &[Rgb]) -> Result<(), Error>;

    /// Send raw per-channel levels with no pixel grouping
    fn update_channels(&mut self, channels: &[u8]) -> Result<(), Error>;
}
