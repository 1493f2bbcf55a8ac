// src/ui/widgets/select.rs
//! Select: pick one of a fixed list of options
//!
//! Activating a select from its menu opens the option list. Up/Down move the
//! choice with wraparound and every move is reported immediately; Left,
//! Right, Space or Enter close the list again. The menu row shows the chosen
//! option as its detail.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use log::trace;

use crate::error::{Error, Result};
use crate::ui::core::{InputEvent, Key, MouseAction, MouseButton};
use crate::ui::styling::{BORDER_WIDTH, Colour, EDGE_WIDTH, GUTTER_WIDTH, PADDING_WIDTH};
use crate::ui::text::{Text, TextService, TextSize};
use crate::ui::tree::{Cx, WidgetTree};
use crate::ui::widgets::{Frame, Widget, WidgetId, WidgetKind, fill_rect};

/// Called with the chosen option index.
pub type SelectCallback = Box<dyn FnMut(usize)>;

/// One option pre-rendered in every palette colour.
type OptionTexts = [Rc<Text>; Colour::COUNT];

pub struct Select {
    title: Rc<Text>,
    options: Vec<OptionTexts>,
    current: usize,
    callback: Option<SelectCallback>,
}

impl Select {
    /// Create a select over `options`, choosing `initial`.
    ///
    /// The callback is invoked with `initial` before this returns. An
    /// out-of-range `initial` leaves the first option chosen and is not
    /// reported.
    pub fn create(
        tree: &mut WidgetTree,
        parent: Option<WidgetId>,
        title: &str,
        options: &[&str],
        initial: usize,
        callback: Option<SelectCallback>,
    ) -> Result<WidgetId> {
        if options.is_empty() {
            return Err(Error::NoOptions);
        }

        let text = tree.text();
        let title_text = text.render(title, Colour::Background, TextSize::Normal)?;
        let options = options
            .iter()
            .map(|option| render_option(text, option))
            .collect::<Result<Vec<_>>>()?;

        let select = Select {
            title: title_text,
            options,
            current: 0,
            callback,
        };
        let id = tree.insert(title, parent, WidgetKind::Select(Box::new(select)))?;

        tree.with_widget::<Select, _>(id, "Select::create", |select, cx| {
            select.choose(cx, initial);
        })?;
        tree.layout(id);
        Ok(id)
    }

    /// Choose option `value`.
    ///
    /// Out-of-range values are ignored and return `Ok(false)`. Any valid
    /// value, including the one already chosen, is reported to the callback
    /// and relays out the parent.
    pub fn set_value(tree: &mut WidgetTree, id: WidgetId, value: usize) -> Result<bool> {
        tree.with_widget::<Select, _>(id, "Select::set_value", |select, cx| {
            select.choose(cx, value)
        })
    }

    /// Index of the chosen option.
    pub fn value(tree: &WidgetTree, id: WidgetId) -> Result<usize> {
        tree.widget::<Select>(id, "Select::value")
            .map(|select| select.current)
    }

    pub fn option_count(tree: &WidgetTree, id: WidgetId) -> Result<usize> {
        tree.widget::<Select>(id, "Select::option_count")
            .map(|select| select.options.len())
    }

    fn choose(&mut self, cx: &mut Cx<'_>, value: usize) -> bool {
        if value >= self.options.len() {
            return false;
        }

        self.current = value;
        trace!("select {:?} = {}", cx.id(), value);
        if let Some(callback) = self.callback.as_mut() {
            callback(value);
        }
        cx.relayout_parent();
        true
    }

    fn option_height(option: &OptionTexts) -> u32 {
        option[Colour::Interface.index()].height()
    }

    fn key(&mut self, cx: &mut Cx<'_>, key: Key) -> bool {
        let count = self.options.len();
        match key {
            Key::Up => {
                let value = (self.current + count - 1) % count;
                self.choose(cx, value);
            }
            Key::Down => {
                let value = (self.current + 1) % count;
                self.choose(cx, value);
            }
            Key::Left | Key::Right | Key::Space | Key::Enter => cx.pop_focus(),
            Key::Backspace | Key::Char(_) => return false,
        }
        true
    }

    fn mouse(&mut self, cx: &mut Cx<'_>, action: MouseAction, position: Point, frame: Frame) -> bool {
        let size = cx.base().size();
        let rect = frame.rect(size);
        if !rect.contains(position) {
            return false;
        }

        match action {
            MouseAction::Up(MouseButton::Right) => cx.pop_focus(),
            MouseAction::Up(MouseButton::Left) => {
                let y = (position.y - rect.top_left.y) as u32;
                let first_row = EDGE_WIDTH * 2 + self.title.height() + GUTTER_WIDTH;
                if let Some(index) = y.checked_sub(first_row).and_then(|offset| self.row_at(offset)) {
                    self.choose(cx, index);
                }
            }
            _ => {}
        }
        true
    }

    fn row_at(&self, mut offset: u32) -> Option<usize> {
        for (index, option) in self.options.iter().enumerate() {
            let height = Self::option_height(option);
            if offset < height {
                return Some(index);
            }
            offset -= height;
        }
        None
    }
}

fn render_option(text: &TextService, option: &str) -> Result<OptionTexts> {
    let [background, interface, selection, disabled, selected_disabled] =
        Colour::ALL.map(|colour| text.render(option, colour, TextSize::Normal));
    Ok([
        background?,
        interface?,
        selection?,
        disabled?,
        selected_disabled?,
    ])
}

impl Widget for Select {
    fn render<D>(&mut self, cx: &mut Cx<'_>, target: &mut D, frame: Frame) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let size = cx.base().size();
        let rect = frame.rect(size);
        let palette = *cx.palette();
        let origin = rect.top_left;
        let edge = EDGE_WIDTH as i32;

        fill_rect(target, rect, palette.get(Colour::Interface))?;
        self.title.draw(target, origin + Point::new(edge, edge))?;

        let body_top = origin.y + edge * 2 + self.title.height() as i32;
        let body = Rectangle::new(
            Point::new(origin.x + BORDER_WIDTH as i32, body_top),
            Size::new(
                size.width.saturating_sub(BORDER_WIDTH * 2),
                size.height
                    .saturating_sub(EDGE_WIDTH * 2 + self.title.height() + BORDER_WIDTH),
            ),
        );
        fill_rect(target, body, palette.get(Colour::Background))?;

        let row_x = origin.x + (BORDER_WIDTH + GUTTER_WIDTH) as i32;
        let row_width = size.width.saturating_sub((BORDER_WIDTH + GUTTER_WIDTH) * 2);
        let mut y = body_top + GUTTER_WIDTH as i32;
        for (index, option) in self.options.iter().enumerate() {
            let height = Self::option_height(option);
            let colour = if index == self.current {
                let row = Rectangle::new(Point::new(row_x, y), Size::new(row_width, height));
                fill_rect(target, row, palette.get(Colour::Selection))?;
                Colour::Background
            } else {
                Colour::Interface
            };

            option[colour.index()].draw(target, Point::new(row_x + PADDING_WIDTH as i32, y))?;
            y += height as i32;
        }

        Ok(())
    }

    fn activate(&mut self, cx: &mut Cx<'_>) {
        cx.take_focus();
    }

    fn layout(&mut self, cx: &mut Cx<'_>) {
        let mut max_width = self.title.width();
        let mut height = self.title.height();
        for option in &self.options {
            max_width = max_width.max(option[Colour::Interface.index()].width());
            height += Self::option_height(option);
        }

        cx.base_mut().set_size(Size::new(
            EDGE_WIDTH * 2 + max_width,
            EDGE_WIDTH * 2 + height + BORDER_WIDTH + GUTTER_WIDTH * 2,
        ));
    }

    fn input(&mut self, cx: &mut Cx<'_>, event: &InputEvent, frame: Frame) -> bool {
        match *event {
            InputEvent::Key(key) => self.key(cx, key),
            InputEvent::Mouse { action, position } => self.mouse(cx, action, position, frame),
        }
    }

    fn detail(&self, _text: &TextService, _size: TextSize, colour: Colour) -> Option<Rc<Text>> {
        self.options
            .get(self.current)
            .map(|option| option[colour.index()].clone())
    }
}
