// src/config.rs
//! Toolkit configuration
//!
//! Everything the text/colour service needs to build its fonts and palette,
//! plus the caret blink interval used by text inputs. The configuration is
//! `serde`-serializable and persisted in `postcard` format so a host can keep
//! it next to its own settings.

use alloc::vec::Vec;
use embedded_graphics::mono_font::{MonoFont, ascii};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mono font selection for a text size class.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontChoice {
    Font6x10,
    Font8x13,
    Font9x18,
    Font10x20,
}

impl FontChoice {
    /// The `embedded-graphics` font backing this choice.
    pub fn font(self) -> &'static MonoFont<'static> {
        match self {
            FontChoice::Font6x10 => &ascii::FONT_6X10,
            FontChoice::Font8x13 => &ascii::FONT_8X13,
            FontChoice::Font9x18 => &ascii::FONT_9X18,
            FontChoice::Font10x20 => &ascii::FONT_10X20,
        }
    }
}

/// A colour in HSV form: hue in degrees (0-360), saturation and value in
/// percent (0-100).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub hue: u16,
    pub saturation: u8,
    pub value: u8,
}

impl Hsv {
    pub const fn new(hue: u16, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}

/// The five palette entries, in HSV.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteConfig {
    pub background: Hsv,
    pub interface: Hsv,
    pub selection: Hsv,
    pub disabled: Hsv,
    pub selected_disabled: Hsv,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: Hsv::new(0, 0, 0),
            interface: Hsv::new(225, 70, 100),
            selection: Hsv::new(30, 65, 100),
            disabled: Hsv::new(225, 70, 50),
            selected_disabled: Hsv::new(30, 65, 50),
        }
    }
}

/// Configuration consumed by [`crate::ui::WidgetTree::new`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ToolkitConfig {
    /// Font for [`crate::ui::TextSize::Normal`] text (menu rows, titles).
    pub normal_font: FontChoice,
    /// Font for [`crate::ui::TextSize::Large`] text.
    pub large_font: FontChoice,
    /// Half-period of the text input caret blink, in milliseconds.
    pub caret_blink_ms: u32,
    pub palette: PaletteConfig,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            normal_font: FontChoice::Font9x18,
            large_font: FontChoice::Font10x20,
            caret_blink_ms: 1000,
            palette: PaletteConfig::default(),
        }
    }
}

impl ToolkitConfig {
    /// Decode a configuration previously written with [`ToolkitConfig::to_vec`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        postcard::from_bytes(bytes).map_err(Error::Config)
    }

    /// Encode the configuration in `postcard` format.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(Error::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config = ToolkitConfig {
            caret_blink_ms: 250,
            ..ToolkitConfig::default()
        };
        let bytes = config.to_vec().unwrap();
        assert_eq!(ToolkitConfig::from_bytes(&bytes).unwrap(), config);
    }

    #[test]
    fn test_truncated_config_is_rejected() {
        let bytes = ToolkitConfig::default().to_vec().unwrap();
        let result = ToolkitConfig::from_bytes(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_font_choice_sizes() {
        assert_eq!(FontChoice::Font9x18.font().character_size.height, 18);
        assert_eq!(FontChoice::Font10x20.font().character_size.width, 10);
    }
}
