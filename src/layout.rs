//! Pixel model: logical channels and their position in a wire-format record.
//!
//! A strip variant expects its color bytes in a fixed order (WS2812B is
//! green-red-blue, some RGBW parts append a white byte). [`ChannelOrder`]
//! captures that permutation once at driver construction; the encoders only
//! ever ask it where a logical channel lands inside a record.

use crate::{Error, color::Rgb};

/// Largest wire record, an RGBW pixel.
pub const MAX_STRIDE: usize = 4;

/// Logical color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    White,
}

/// Mapping from logical channel to byte position inside a wire record.
///
/// Always a bijection over `0..stride`, where stride is 3 without a white
/// channel and 4 with one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOrder {
    red: u8,
    green: u8,
    blue: u8,
    white: Option<u8>,
}

impl ChannelOrder {
    pub const RGB: Self = Self::unchecked(0, 1, 2, None);
    pub const GRB: Self = Self::unchecked(1, 0, 2, None);
    pub const BGR: Self = Self::unchecked(2, 1, 0, None);
    pub const RGBW: Self = Self::unchecked(0, 1, 2, Some(3));
    pub const GRBW: Self = Self::unchecked(1, 0, 2, Some(3));

    const fn unchecked(red: u8, green: u8, blue: u8, white: Option<u8>) -> Self {
        Self {
            red,
            green,
            blue,
            white,
        }
    }

    /// Create a channel order from per-channel wire positions
    ///
    /// Fails with [`Error::InvalidChannelOrder`] unless the positions are a
    /// permutation of `0..stride`.
    pub const fn new(red: u8, green: u8, blue: u8, white: Option<u8>) -> Result<Self, Error> {
        let (stride, white_pos) = match white {
            Some(pos) => (4, pos),
            None => (3, 0),
        };
        let positions = [red, green, blue, white_pos];
        let mut seen: u8 = 0;
        let mut i = 0;
        while i < stride {
            let pos = positions[i];
            if pos as usize >= stride || seen & (1 << pos) != 0 {
                return Err(Error::InvalidChannelOrder);
            }
            seen |= 1 << pos;
            i += 1;
        }
        Ok(Self::unchecked(red, green, blue, white))
    }

    /// Create a channel order from the channel sent at each wire position
    ///
    /// `[Green, Red, Blue]` is the WS2812B layout.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_mapping(mapping: &[Channel]) -> Result<Self, Error> {
        if mapping.len() != 3 && mapping.len() != MAX_STRIDE {
            return Err(Error::InvalidChannelOrder);
        }
        let mut positions: [Option<u8>; MAX_STRIDE] = [None; MAX_STRIDE];
        for (pos, channel) in mapping.iter().enumerate() {
            let slot = &mut positions[*channel as usize];
            if slot.is_some() {
                return Err(Error::InvalidChannelOrder);
            }
            *slot = Some(pos as u8);
        }
        match positions {
            [Some(red), Some(green), Some(blue), white] => Self::new(red, green, blue, white),
            _ => Err(Error::InvalidChannelOrder),
        }
    }

    /// Bytes per wire record
    pub const fn stride(self) -> usize {
        if self.white.is_some() { 4 } else { 3 }
    }

    pub const fn has_white(self) -> bool {
        self.white.is_some()
    }

    /// Wire position of a logical channel, `None` for an absent white channel
    pub const fn position(self, channel: Channel) -> Option<usize> {
        match channel {
            Channel::Red => Some(self.red as usize),
            Channel::Green => Some(self.green as usize),
            Channel::Blue => Some(self.blue as usize),
            Channel::White => match self.white {
                Some(pos) => Some(pos as usize),
                None => None,
            },
        }
    }

    /// Write one pixel into a record of exactly `stride` bytes
    ///
    /// The white slot is always written as 0.
    pub(crate) fn write_pixel(self, pixel: Rgb, record: &mut [u8]) {
        debug_assert_eq!(record.len(), self.stride());
        record[self.red as usize] = pixel.r;
        record[self.green as usize] = pixel.g;
        record[self.blue as usize] = pixel.b;
        if let Some(white) = self.white {
            record[white as usize] = 0;
        }
    }

    /// Reorder one pixel into a stack-held wire record
    pub fn wire_pixel(self, pixel: Rgb) -> WirePixel {
        let mut record = WirePixel {
            bytes: [0; MAX_STRIDE],
            len: self.stride(),
        };
        self.write_pixel(pixel, &mut record.bytes[..record.len]);
        record
    }
}

impl Default for ChannelOrder {
    fn default() -> Self {
        Self::GRB
    }
}

/// One pixel in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WirePixel {
    bytes: [u8; MAX_STRIDE],
    len: usize,
}

impl WirePixel {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Lay out pixels in wire order into `out`
///
/// Returns the number of bytes written (`stride * pixels.len()`). Caller
/// pixels are only read. An `out` shorter than needed is rejected with
/// [`Error::CapacityExceeded`], nothing is truncated.
pub fn encode_layout(pixels: &[Rgb], order: ChannelOrder, out: &mut [u8]) -> Result<usize, Error> {
    let stride = order.stride();
    let needed = pixels.len() * stride;
    if out.len() < needed {
        return Err(Error::CapacityExceeded {
            requested: pixels.len(),
            capacity: out.len() / stride,
        });
    }
    for (pixel, record) in pixels.iter().zip(out.chunks_exact_mut(stride)) {
        order.write_pixel(*pixel, record);
    }
    Ok(needed)
}
