//! Signal bit to SPI frame expansion.
//!
//! Each WS2812 bit becomes one 8-bit SPI frame shifted out MSB first. The
//! frame's leading ones form the high pulse, so the bus clock alone shapes
//! the waveform.

/// Frame bytes standing for a "1" and a "0" signal bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePattern {
    pub one: u8,
    pub zero: u8,
}

impl FramePattern {
    /// 3 of 8 bits high for a "1", 1 of 8 for a "0", sized for a 4 MHz bus
    pub const DEFAULT: Self = Self {
        one: 0x70,
        zero: 0x40,
    };

    pub const fn new(one: u8, zero: u8) -> Self {
        Self { one, zero }
    }
}

impl Default for FramePattern {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// SPI frames produced per color byte
pub const FRAMES_PER_BYTE: usize = 8;

/// Encode one channel byte into 8 frames, most significant bit first
pub fn serialize_color(color: u8, pattern: FramePattern) -> [u8; FRAMES_PER_BYTE] {
    let mut frames = [pattern.zero; FRAMES_PER_BYTE];
    for (i, frame) in frames.iter_mut().enumerate() {
        if color & (0x80 >> i) != 0 {
            *frame = pattern.one;
        }
    }
    frames
}

/// Encode one channel byte into an 8-frame slot of the staging buffer
pub(crate) fn serialize_color_into(slot: &mut [u8], color: u8, pattern: FramePattern) {
    slot.copy_from_slice(&serialize_color(color, pattern));
}
