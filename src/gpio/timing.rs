//! Bit timing for the bit-bang transport, expressed in CPU cycles.
//!
//! A WS2812 bit is one fixed-length period that starts high. A "1" stays high
//! for ~0.85 µs, a "0" for ~0.4 µs; the rest of the 1.25 µs period is low.
//! Target chips reject edges off by more than about 150 ns, so everything here
//! is resolved to whole cycles before any pin is touched.

use embassy_time::Duration;

/// High time of a "1" bit
pub const T1H_NS: u32 = 850;
/// High time of a "0" bit
pub const T0H_NS: u32 = 400;
/// Full bit period
pub const BIT_PERIOD_NS: u32 = 1250;

#[allow(clippy::cast_possible_truncation)]
const fn ns_to_cycles(ns: u32, cpu_hz: u32) -> u32 {
    ((ns as u64 * cpu_hz as u64 + 500_000_000) / 1_000_000_000) as u32
}

/// Cycle counts of the two pulse classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTiming {
    /// High cycles of a "1" bit
    pub one_high: u32,
    /// High cycles of a "0" bit
    pub zero_high: u32,
    /// Cycles of a whole bit period
    pub period: u32,
    /// Cycles spent by one pin write, taken off every delay
    pub pin_overhead: u32,
}

impl BitTiming {
    /// nRF51 core running from the 16 MHz crystal
    ///
    /// Each pin change is one 2-cycle store to `OUTSET`/`OUTCLR`, taken off
    /// every delay. Pairs with `AsmDelay::CORTEX_M0`.
    pub const NRF51_16MHZ: Self = Self::from_cpu_hz(16_000_000).with_pin_overhead(2);

    /// Derive cycle counts for a core clocked at `cpu_hz`
    pub const fn from_cpu_hz(cpu_hz: u32) -> Self {
        Self {
            one_high: ns_to_cycles(T1H_NS, cpu_hz),
            zero_high: ns_to_cycles(T0H_NS, cpu_hz),
            period: ns_to_cycles(BIT_PERIOD_NS, cpu_hz),
            pin_overhead: 0,
        }
    }

    pub const fn with_pin_overhead(mut self, cycles: u32) -> Self {
        self.pin_overhead = cycles;
        self
    }

    /// Both classes must be distinguishable and fit inside the period
    pub const fn is_valid(self) -> bool {
        self.zero_high > 0 && self.zero_high < self.one_high && self.one_high < self.period
    }
}

impl Default for BitTiming {
    fn default() -> Self {
        Self::NRF51_16MHZ
    }
}

/// One bit on the wire: high cycles followed by low cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pulse {
    pub high: u32,
    pub low: u32,
}

/// Expand a byte into its 8 pulses, most significant bit first
///
/// The high time is picked arithmetically so both bit values take the same
/// instruction path; `high + low` is always `timing.period`.
#[inline(always)]
pub fn byte_pulses(byte: u8, timing: BitTiming) -> [Pulse; 8] {
    debug_assert!(timing.is_valid());
    let extra = timing.one_high.saturating_sub(timing.zero_high);
    let mut pulses = [Pulse::default(); 8];
    let mut bits = byte;
    for pulse in &mut pulses {
        let bit = u32::from(bits >> 7);
        let high = timing.zero_high + bit * extra;
        *pulse = Pulse {
            high,
            low: timing.period.saturating_sub(high),
        };
        bits <<= 1;
    }
    pulses
}

/// Upper bound of one interrupts-masked burst sending `bytes` wire bytes
///
/// Every byte is 8 bit periods of 1.25 µs; the result is rounded up to whole
/// microseconds. Other work on the same core is delayed by this much.
pub const fn critical_section_bound(bytes: usize) -> Duration {
    let nanos = bytes as u64 * 8 * BIT_PERIOD_NS as u64;
    Duration::from_micros(nanos.div_ceil(1000))
}
