//! Palette and spacing for the widget tree
//!
//! - [`colors`] - the five palette colours and HSV conversion
//! - [`layout`] - border/gutter/padding constants and widget placement

pub mod colors;
pub mod layout;

pub use colors::{Colour, Palette, hsv_to_rgb};
pub use layout::{BORDER_WIDTH, EDGE_WIDTH, GUTTER_WIDTH, PADDING_WIDTH, shift_into, widget_rect};
