//! Layout constants and placement helpers
//!
//! Every widget box is built from the same three spacings: a border around
//! the body, a gutter between the body edge and its rows, and padding inside
//! a row. Their sum is the edge width used around titles.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

// ============================================================================
// Spacing constants
// ============================================================================

/// Frame drawn around a widget body
pub const BORDER_WIDTH: u32 = 2;

/// Space between the body background and the rows inside it
pub const GUTTER_WIDTH: u32 = 2;

/// Space between a row highlight and its text
pub const PADDING_WIDTH: u32 = 2;

/// Space around the title and between title and detail columns
pub const EDGE_WIDTH: u32 = BORDER_WIDTH + GUTTER_WIDTH + PADDING_WIDTH;

// ============================================================================
// Placement
// ============================================================================

/// Box of `size` centred on `at`, shifted to lie inside `viewport`.
///
/// This is the rectangle a widget draws into and hit-tests against.
pub fn widget_rect(size: Size, at: Point, viewport: &Rectangle) -> Rectangle {
    let top_left = at - Point::new((size.width / 2) as i32, (size.height / 2) as i32);
    shift_into(Rectangle::new(top_left, size), viewport)
}

/// Shift (never clip) `rect` so that it lies inside `bound`.
///
/// Overflow past the right/bottom edge is corrected first, then the left/top
/// edge, so a rectangle larger than the bound keeps its top-left corner
/// inside it.
pub fn shift_into(rect: Rectangle, bound: &Rectangle) -> Rectangle {
    let mut top_left = rect.top_left;
    let width = rect.size.width as i32;
    let height = rect.size.height as i32;
    let bound_right = bound.top_left.x + bound.size.width as i32;
    let bound_bottom = bound.top_left.y + bound.size.height as i32;

    if top_left.x + width > bound_right {
        top_left.x = bound_right - width;
    }
    if top_left.y + height > bound_bottom {
        top_left.y = bound_bottom - height;
    }
    if top_left.x < bound.top_left.x {
        top_left.x = bound.top_left.x;
    }
    if top_left.y < bound.top_left.y {
        top_left.y = bound.top_left.y;
    }

    Rectangle::new(top_left, rect.size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(320, 240))
    }

    #[test]
    fn test_edge_is_sum_of_spacings() {
        assert_eq!(EDGE_WIDTH, 6);
    }

    #[test]
    fn test_widget_rect_is_centred() {
        let r = widget_rect(Size::new(100, 50), Point::new(160, 120), &screen());
        assert_eq!(r, Rectangle::new(Point::new(110, 95), Size::new(100, 50)));
    }

    #[test]
    fn test_shift_moves_overflowing_rect_back_inside() {
        let r = shift_into(
            Rectangle::new(Point::new(300, 230), Size::new(40, 20)),
            &screen(),
        );
        assert_eq!(r.top_left, Point::new(280, 220));

        let r = shift_into(
            Rectangle::new(Point::new(-10, -5), Size::new(40, 20)),
            &screen(),
        );
        assert_eq!(r.top_left, Point::zero());
    }

    #[test]
    fn test_oversized_rect_keeps_top_left_inside() {
        let r = shift_into(
            Rectangle::new(Point::new(50, 50), Size::new(400, 300)),
            &screen(),
        );
        assert_eq!(r.top_left, Point::zero());
        assert_eq!(r.size, Size::new(400, 300));
    }
}
