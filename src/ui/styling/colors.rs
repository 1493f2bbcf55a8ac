//! Palette colours and HSV conversion
//!
//! The toolkit draws with exactly five colours. They are configured as HSV
//! triples ([`crate::config::PaletteConfig`]) and resolved once into RGB565
//! when the [`Palette`] is built.
//!
//! # Conversion
//! Hue is rescaled from degrees to 0-255 and saturation/value from percent
//! to 0-255, then converted with the six-sector integer algorithm. The 8-bit
//! result is narrowed to RGB565 by `embedded-graphics`.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};

use crate::config::{Hsv, PaletteConfig};

// ============================================================================
// Colour identifiers
// ============================================================================

/// The five palette entries widgets draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    /// Screen and widget body background
    Background,
    /// Widget frames and unselected text
    Interface,
    /// Highlight behind the current menu row
    Selection,
    /// Text of disabled entries
    Disabled,
    /// Highlight behind a current row that is disabled
    SelectedDisabled,
}

impl Colour {
    pub const COUNT: usize = 5;

    /// Every colour, in palette order.
    pub const ALL: [Colour; Colour::COUNT] = [
        Colour::Background,
        Colour::Interface,
        Colour::Selection,
        Colour::Disabled,
        Colour::SelectedDisabled,
    ];

    pub const fn index(self) -> usize {
        match self {
            Colour::Background => 0,
            Colour::Interface => 1,
            Colour::Selection => 2,
            Colour::Disabled => 3,
            Colour::SelectedDisabled => 4,
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Resolved RGB565 palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    colours: [Rgb565; Colour::COUNT],
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Self {
        let hsv = [
            config.background,
            config.interface,
            config.selection,
            config.disabled,
            config.selected_disabled,
        ];
        Self {
            colours: hsv.map(|c| Rgb565::from(hsv_to_rgb(c))),
        }
    }

    pub fn get(&self, colour: Colour) -> Rgb565 {
        self.colours[colour.index()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&PaletteConfig::default())
    }
}

/// Scale `val` (clamped to `max`) onto 0-255 with rounding.
fn rescale_255(val: u32, max: u32) -> u32 {
    (val.min(max) * 255 + max / 2) / max
}

/// Convert an HSV colour to 8-bit-per-channel RGB.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb888 {
    let h = rescale_255(u32::from(hsv.hue), 360);
    let s = rescale_255(u32::from(hsv.saturation), 100);
    let v = rescale_255(u32::from(hsv.value), 100);

    if s == 0 {
        return Rgb888::new(v as u8, v as u8, v as u8);
    }

    let sector = h / 43;
    let remainder = (h - sector * 43) * 6;

    let p = ((v * (255 - s)) >> 8) as u8;
    let q = ((v * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;
    let v = v as u8;

    match sector {
        0 => Rgb888::new(v, t, p),
        1 => Rgb888::new(q, v, p),
        2 => Rgb888::new(p, v, t),
        3 => Rgb888::new(p, q, v),
        4 => Rgb888::new(t, p, v),
        _ => Rgb888::new(v, p, q),
    }
}
