/// Busy-wait measured in CPU cycles.
///
/// Implementations must not yield or depend on interrupts: they run inside
/// the masked burst and their duration must not vary between calls.
pub trait CycleDelay {
    fn delay_cycles(&mut self, cycles: u32);
}

/// Cycles of one `cortex_m::asm::delay` loop pass (`subs` + taken `bne`) on
/// Cortex-M0/M0+, e.g. nRF51 or RP2040
pub const CORTEX_M0_CYCLES_PER_PASS: u32 = 4;
/// Cycles of one `cortex_m::asm::delay` loop pass on Cortex-M3/M4
pub const CORTEX_M3_CYCLES_PER_PASS: u32 = 3;

/// Loop passes closest to `cycles`, rounding to nearest
///
/// The error is at most half a pass. With 4-cycle passes at 16 MHz that is
/// 125 ns, inside the ±150 ns the strip accepts.
pub const fn loop_passes(cycles: u32, cycles_per_pass: u32) -> u32 {
    if cycles_per_pass == 0 {
        return cycles;
    }
    cycles.saturating_add(cycles_per_pass / 2) / cycles_per_pass
}

/// Argument for `cortex_m::asm::delay` spinning as close to `cycles` as the
/// loop allows, `None` when no pass fits
///
/// `asm::delay(n)` runs `1 + n / 2` passes, so `n = 2 * (passes - 1)`.
pub const fn asm_delay_arg(cycles: u32, cycles_per_pass: u32) -> Option<u32> {
    match loop_passes(cycles, cycles_per_pass) {
        0 => None,
        passes => Some(2 * (passes - 1)),
    }
}

/// Cortex-M spin loop on `cortex_m::asm::delay`, converting cycles to passes.
///
/// Valid pairings:
/// - [`AsmDelay::CORTEX_M0`] with [`BitTiming::NRF51_16MHZ`](super::BitTiming::NRF51_16MHZ),
///   whose pin overhead covers one `OUTSET`/`OUTCLR` store.
/// - [`AsmDelay::CORTEX_M3`] with [`BitTiming::from_cpu_hz`](super::BitTiming::from_cpu_hz)
///   for any core clock, plus `with_pin_overhead` for the HAL's pin write.
///
/// Without cortex-m's `inline-asm` feature every call also pays a branch into
/// `__delay`; fold that into `pin_overhead` as well.
#[cfg(feature = "cortex-m")]
#[derive(Debug, Clone, Copy)]
pub struct AsmDelay {
    cycles_per_pass: u32,
}

#[cfg(feature = "cortex-m")]
impl AsmDelay {
    pub const CORTEX_M0: Self = Self::new(CORTEX_M0_CYCLES_PER_PASS);
    pub const CORTEX_M3: Self = Self::new(CORTEX_M3_CYCLES_PER_PASS);

    /// Spin loop for a core whose loop pass takes `cycles_per_pass` cycles
    pub const fn new(cycles_per_pass: u32) -> Self {
        Self {
            cycles_per_pass: if cycles_per_pass == 0 { 1 } else { cycles_per_pass },
        }
    }
}

#[cfg(feature = "cortex-m")]
impl Default for AsmDelay {
    fn default() -> Self {
        Self::CORTEX_M0
    }
}

#[cfg(feature = "cortex-m")]
impl CycleDelay for AsmDelay {
    #[inline(always)]
    fn delay_cycles(&mut self, cycles: u32) {
        if let Some(arg) = asm_delay_arg(cycles, self.cycles_per_pass) {
            cortex_m::asm::delay(arg);
        }
    }
}
