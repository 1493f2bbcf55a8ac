// src/ui/text.rs
//! Text drawables and the text/colour service
//!
//! A [`Text`] is an immutable, pre-measured string in one palette colour and
//! one size class. Widgets create their own drawables through the
//! [`TextService`] and share them with the tree as `Rc<Text>`; the handful of
//! strings every widget needs (the submenu arrow, "On") are built once by the
//! service for every colour and size and handed out as shared handles.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text as EgText};

use crate::config::ToolkitConfig;
use crate::error::{Error, Result};
use crate::ui::styling::{Colour, Palette};

/// Text size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Menu rows, titles and values
    Normal,
    /// Headline text for host overlays
    Large,
}

impl TextSize {
    pub const COUNT: usize = 2;
    pub const ALL: [TextSize; TextSize::COUNT] = [TextSize::Normal, TextSize::Large];

    const fn index(self) -> usize {
        match self {
            TextSize::Normal => 0,
            TextSize::Large => 1,
        }
    }
}

/// Strings shared by all widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonText {
    /// Submenu marker
    ArrowRight,
    /// Enabled toggle
    On,
    /// Disabled toggle. Has no drawable.
    Off,
}

impl CommonText {
    fn label(self) -> Option<&'static str> {
        match self {
            CommonText::ArrowRight => Some(">"),
            CommonText::On => Some("On"),
            CommonText::Off => None,
        }
    }

    fn slot(self) -> Option<usize> {
        match self {
            CommonText::ArrowRight => Some(0),
            CommonText::On => Some(1),
            CommonText::Off => None,
        }
    }
}

const COMMON_SLOTS: usize = 2;

// ============================================================================
// Text
// ============================================================================

/// An immutable, measured string ready to draw.
pub struct Text {
    content: String,
    colour: Rgb565,
    font: &'static MonoFont<'static>,
    size: Size,
}

impl Text {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Draw with the top-left corner of the text box at `top_left`.
    pub fn draw<D>(&self, target: &mut D, top_left: Point) -> core::result::Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = MonoTextStyle::new(self.font, self.colour);
        EgText::with_baseline(&self.content, top_left, style, Baseline::Top).draw(target)?;
        Ok(())
    }
}

impl core::fmt::Debug for Text {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Text")
            .field("content", &self.content)
            .field("colour", &self.colour)
            .field("size", &self.size)
            .finish()
    }
}

/// Width and height of `content` set in a mono font.
fn measure(content: &str, font: &MonoFont<'_>) -> Size {
    let advance = font.character_size.width + font.character_spacing;
    let count = content.chars().count() as u32;
    let width = (count * advance).saturating_sub(font.character_spacing);
    Size::new(width, font.character_size.height)
}

/// Reject characters outside the printable ASCII range the fonts cover.
fn check_glyphs(content: &str) -> Result<()> {
    match content.chars().find(|c| !(*c == ' ' || c.is_ascii_graphic())) {
        Some(ch) => Err(Error::UnsupportedGlyph { ch }),
        None => Ok(()),
    }
}

// ============================================================================
// Service
// ============================================================================

/// Builds [`Text`] drawables and owns the common ones.
pub struct TextService {
    palette: Palette,
    fonts: [&'static MonoFont<'static>; TextSize::COUNT],
    common: Vec<Rc<Text>>,
}

impl TextService {
    pub fn new(config: &ToolkitConfig) -> Self {
        let mut service = Self {
            palette: Palette::from_config(&config.palette),
            fonts: [config.normal_font.font(), config.large_font.font()],
            common: Vec::with_capacity(Colour::COUNT * TextSize::COUNT * COMMON_SLOTS),
        };

        for colour in Colour::ALL {
            for size in TextSize::ALL {
                for label in [">", "On"] {
                    let text = service.build(label, colour, size);
                    service.common.push(Rc::new(text));
                }
            }
        }

        service
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn font(&self, size: TextSize) -> &'static MonoFont<'static> {
        self.fonts[size.index()]
    }

    /// Measure and prepare `content` for drawing.
    ///
    /// Fails with [`Error::UnsupportedGlyph`] if any character is outside
    /// printable ASCII.
    pub fn render(&self, content: &str, colour: Colour, size: TextSize) -> Result<Rc<Text>> {
        check_glyphs(content)?;
        Ok(Rc::new(self.build(content, colour, size)))
    }

    /// Shared drawable for a common string, or `None` for [`CommonText::Off`].
    pub fn common(&self, colour: Colour, size: TextSize, which: CommonText) -> Option<Rc<Text>> {
        debug_assert_eq!(which.label().is_some(), which.slot().is_some());
        let slot = which.slot()?;
        let index = (colour.index() * TextSize::COUNT + size.index()) * COMMON_SLOTS + slot;
        self.common.get(index).cloned()
    }

    fn build(&self, content: &str, colour: Colour, size: TextSize) -> Text {
        let font = self.font(size);
        Text {
            content: content.to_string(),
            colour: self.palette.get(colour),
            font,
            size: measure(content, font),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn service() -> TextService {
        TextService::new(&ToolkitConfig::default())
    }

    #[test]
    fn test_measure_uses_font_cell() {
        let text = service().render("Stop", Colour::Interface, TextSize::Normal).unwrap();
        assert_eq!(text.size(), Size::new(36, 18));

        let large = service().render("Stop", Colour::Interface, TextSize::Large).unwrap();
        assert_eq!(large.size(), Size::new(40, 20));
    }

    #[test]
    fn test_empty_string_has_zero_width() {
        let text = service().render("", Colour::Interface, TextSize::Normal).unwrap();
        assert_eq!(text.width(), 0);
        assert_eq!(text.height(), 18);
    }

    #[test]
    fn test_non_ascii_is_rejected() {
        let result = service().render("22\u{b0}C", Colour::Interface, TextSize::Normal);
        assert!(matches!(result, Err(Error::UnsupportedGlyph { ch: '\u{b0}' })));

        let result = service().render("a\tb", Colour::Interface, TextSize::Normal);
        assert!(matches!(result, Err(Error::UnsupportedGlyph { ch: '\t' })));
    }

    #[test]
    fn test_common_texts_are_shared() {
        let service = service();
        let a = service.common(Colour::Selection, TextSize::Normal, CommonText::On).unwrap();
        let b = service.common(Colour::Selection, TextSize::Normal, CommonText::On).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.content(), "On");

        let arrow = service
            .common(Colour::Disabled, TextSize::Large, CommonText::ArrowRight)
            .unwrap();
        assert_eq!(arrow.content(), ">");
        assert_eq!(arrow.height(), 20);

        assert!(service.common(Colour::Interface, TextSize::Normal, CommonText::Off).is_none());
    }

    #[test]
    fn test_draw_touches_only_text_colour() {
        let service = TextService::new(&ToolkitConfig {
            normal_font: crate::config::FontChoice::Font6x10,
            ..ToolkitConfig::default()
        });
        let text = service.render(">", Colour::Interface, TextSize::Normal).unwrap();

        let mut display = MockDisplay::<Rgb565>::new();
        text.draw(&mut display, Point::new(2, 2)).unwrap();

        let colour = service.palette().get(Colour::Interface);
        let area = display.affected_area();
        assert!(area.size.width > 0 && area.size.width <= 6);
        assert!(area.top_left.x >= 2 && area.top_left.y >= 2);
        for point in area.points() {
            if let Some(c) = display.get_pixel(point) {
                assert_eq!(c, colour);
            }
        }
    }
}
