use smart_leds::RGB8;

pub use smart_leds::colors;

/// Logical pixel color as supplied by the caller.
pub type Rgb = RGB8;

/// Unpack a `0xRRGGBB` value into a pixel
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
