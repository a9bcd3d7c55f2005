//! Bit-bang transport: one GPIO pin driven with cycle-counted pulses.
//!
//! The whole `update_rgb` burst runs inside one critical section. This is the
//! only way to hold the ±150 ns tolerance, and it means the core is
//! unavailable to anything else for [`Ws2812Gpio::max_blocking`]. There is no
//! staging buffer: each pixel is reordered into a small stack record right
//! before its bits go out.

mod clock;
mod delay;
mod timing;

#[cfg(feature = "log")]
use esp_println::println;

use embassy_time::Duration;
use embedded_hal::digital::OutputPin;
use smart_leds::SmartLedsWrite;

pub use clock::{AlwaysOn, ClockGate};
#[cfg(feature = "cortex-m")]
pub use delay::AsmDelay;
pub use delay::{
    CORTEX_M0_CYCLES_PER_PASS, CORTEX_M3_CYCLES_PER_PASS, CycleDelay, asm_delay_arg, loop_passes,
};
pub use timing::{
    BIT_PERIOD_NS, BitTiming, Pulse, T0H_NS, T1H_NS, byte_pulses, critical_section_bound,
};

use crate::{Error, Handle, LedStrip, color::Rgb, config::GpioConfig, layout::ChannelOrder};

/// WS2812 driver bit-banging a single pin.
pub struct Ws2812Gpio<P, C, D> {
    pin: P,
    clock: C,
    delay: D,
    order: ChannelOrder,
    timing: BitTiming,
}

impl<P, C, D> Ws2812Gpio<P, C, D>
where
    P: OutputPin,
    C: ClockGate,
    D: CycleDelay,
{
    /// Create a driver from resolved handles
    ///
    /// The pin is driven low, the strip's idle level. A pin that refuses is
    /// reported as [`Error::DeviceNotFound`].
    pub fn new(mut pin: P, clock: C, delay: D, config: &GpioConfig) -> Result<Self, Error> {
        config.validate()?;
        pin.set_low()
            .map_err(|_| Error::DeviceNotFound(Handle::Pin))?;
        Ok(Self {
            pin,
            clock,
            delay,
            order: config.order,
            timing: config.timing,
        })
    }

    /// Create a driver from handles looked up by the host framework
    pub fn bind(
        pin: Option<P>,
        clock: Option<C>,
        delay: D,
        config: &GpioConfig,
    ) -> Result<Self, Error> {
        let Some(pin) = pin else {
            #[cfg(feature = "log")]
            println!("[Ws2812Gpio.bind] unable to find data pin");
            return Err(Error::DeviceNotFound(Handle::Pin));
        };
        let Some(clock) = clock else {
            #[cfg(feature = "log")]
            println!("[Ws2812Gpio.bind] unable to find timing clock");
            return Err(Error::DeviceNotFound(Handle::Clock));
        };
        Self::new(pin, clock, delay, config)
    }

    pub const fn order(&self) -> ChannelOrder {
        self.order
    }

    pub const fn timing(&self) -> BitTiming {
        self.timing
    }

    /// Longest interrupts-masked stretch an update of `pixels` pixels causes
    pub const fn max_blocking(&self, pixels: usize) -> Duration {
        critical_section_bound(pixels * self.order.stride())
    }

    /// Clock on, one masked burst, clock off
    fn transmit<I>(&mut self, pixels: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Rgb>,
    {
        self.clock.enable().map_err(|_| Error::ClockControlFailure)?;

        critical_section::with(|_cs| {
            for pixel in pixels {
                let record = self.order.wire_pixel(pixel);
                for byte in record.as_slice() {
                    self.send_byte(*byte);
                }
            }
        });

        self.clock.disable().map_err(|_| Error::ClockControlFailure)
    }

    #[inline(always)]
    fn send_byte(&mut self, byte: u8) {
        let overhead = self.timing.pin_overhead;
        for pulse in byte_pulses(byte, self.timing) {
            let _ = self.pin.set_high();
            self.delay.delay_cycles(pulse.high.saturating_sub(overhead));
            let _ = self.pin.set_low();
            self.delay.delay_cycles(pulse.low.saturating_sub(overhead));
        }
    }
}

impl<P, C, D> LedStrip for Ws2812Gpio<P, C, D>
where
    P: OutputPin,
    C: ClockGate,
    D: CycleDelay,
{
    fn update_rgb(&mut self, pixels: &[Rgb]) -> Result<(), Error> {
        self.transmit(pixels.iter().copied())
    }

    /// Raw channel streaming has no pixel grouping to time against; never sent
    fn update_channels(&mut self, _channels: &[u8]) -> Result<(), Error> {
        #[cfg(feature = "log")]
        println!("[Ws2812Gpio.update_channels] not supported by bit-bang transport");
        Err(Error::Unsupported)
    }
}

impl<P, C, D> SmartLedsWrite for Ws2812Gpio<P, C, D>
where
    P: OutputPin,
    C: ClockGate,
    D: CycleDelay,
{
    type Error = Error;
    type Color = Rgb;

    /// Stream pixels straight to the pin
    ///
    /// The iterator is advanced inside the masked burst, so producing each
    /// item must be cheap and constant-time.
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.transmit(iterator.into_iter().map(Into::into))
    }
}
