// src/ui/widgets/input.rs
//! Input: single-line text entry
//!
//! Once activated from its menu, printable characters (space through `z`)
//! are appended and Backspace drops the last character. Each edit builds a
//! candidate value that the acceptance callback may reject; only accepted
//! candidates are committed. Enter returns focus to the menu, which shows the
//! value as the entry's detail.
//!
//! The caret sits after the last character and blinks. Its visibility is
//! worked out from the tree's clock whenever the widget is rendered, counting
//! from the last edit or activation.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::time::Duration;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use log::{trace, warn};

use crate::error::{Error, Result};
use crate::ui::core::{InputEvent, Key, MouseAction, MouseButton};
use crate::ui::styling::{BORDER_WIDTH, Colour, EDGE_WIDTH};
use crate::ui::text::{Text, TextService, TextSize};
use crate::ui::tree::{Cx, WidgetTree};
use crate::ui::widgets::{Frame, Widget, WidgetId, WidgetKind, fill_rect};

/// Decides whether a candidate value may be committed.
pub type InputCallback = Box<dyn FnMut(&str) -> bool>;

const CARET_WIDTH: u32 = 2;

type Details = [Option<Rc<Text>>; Colour::COUNT];

pub struct Input {
    title: Rc<Text>,
    value: String,
    /// Value in every palette colour; all `None` while the value is empty.
    details: Details,
    callback: Option<InputCallback>,
    caret_offset: u32,
    caret_visible: bool,
    blink_epoch: Duration,
}

impl Input {
    /// Create an input holding `initial`.
    ///
    /// The initial value goes through the callback like any edit; if it is
    /// refused no widget is created and [`Error::Rejected`] is returned.
    pub fn create(
        tree: &mut WidgetTree,
        parent: Option<WidgetId>,
        title: &str,
        initial: &str,
        mut callback: Option<InputCallback>,
    ) -> Result<WidgetId> {
        let text = tree.text();
        let title_text = text.render(title, Colour::Background, TextSize::Normal)?;
        let details = render_details(text, initial)?;

        if let Some(accept) = callback.as_mut() {
            if !accept(initial) {
                warn!("input \"{}\" rejected initial value {:?}", title, initial);
                return Err(Error::Rejected);
            }
        }

        let input = Input {
            title: title_text,
            value: initial.to_string(),
            caret_offset: details_width(&details),
            details,
            callback,
            caret_visible: true,
            blink_epoch: tree.now(),
        };
        let id = tree.insert(title, parent, WidgetKind::Input(Box::new(input)))?;
        tree.layout(id);
        Ok(id)
    }

    /// Offer `value` as the new content.
    ///
    /// Returns whether it was accepted. Values with characters the fonts
    /// cannot draw fail with [`Error::UnsupportedGlyph`](crate::Error::UnsupportedGlyph).
    pub fn set_value(tree: &mut WidgetTree, id: WidgetId, value: &str) -> Result<bool> {
        tree.with_widget::<Input, _>(id, "Input::set_value", |input, cx| {
            input.propose(cx, value.to_string())
        })?
    }

    /// Offer the current value with `ch` appended.
    pub fn append_char(tree: &mut WidgetTree, id: WidgetId, ch: char) -> Result<bool> {
        tree.with_widget::<Input, _>(id, "Input::append_char", |input, cx| {
            input.append(cx, ch)
        })?
    }

    /// Offer the current value without its last character.
    ///
    /// An empty value stays empty and returns `Ok(false)`.
    pub fn backspace(tree: &mut WidgetTree, id: WidgetId) -> Result<bool> {
        tree.with_widget::<Input, _>(id, "Input::backspace", |input, cx| {
            input.remove_last(cx)
        })?
    }

    pub fn value(tree: &WidgetTree, id: WidgetId) -> Result<&str> {
        tree.widget::<Input>(id, "Input::value")
            .map(|input| input.value.as_str())
    }

    /// Pixel offset of the caret from the start of the value.
    pub fn caret_offset(tree: &WidgetTree, id: WidgetId) -> Result<u32> {
        tree.widget::<Input>(id, "Input::caret_offset")
            .map(|input| input.caret_offset)
    }

    /// Whether the caret was drawn by the most recent render.
    pub fn caret_visible(tree: &WidgetTree, id: WidgetId) -> Result<bool> {
        tree.widget::<Input>(id, "Input::caret_visible")
            .map(|input| input.caret_visible)
    }

    fn append(&mut self, cx: &mut Cx<'_>, ch: char) -> Result<bool> {
        let mut candidate = self.value.clone();
        candidate.push(ch);
        self.propose(cx, candidate)
    }

    fn remove_last(&mut self, cx: &mut Cx<'_>) -> Result<bool> {
        let mut candidate = self.value.clone();
        if candidate.pop().is_none() {
            return Ok(false);
        }
        self.propose(cx, candidate)
    }

    /// Commit `candidate` if it can be drawn and the callback accepts it.
    fn propose(&mut self, cx: &mut Cx<'_>, candidate: String) -> Result<bool> {
        let details = render_details(cx.text(), &candidate)?;

        if let Some(callback) = self.callback.as_mut() {
            if !callback(&candidate) {
                trace!("input {:?} rejected {:?}", cx.id(), candidate);
                return Ok(false);
            }
        }

        trace!("input {:?} = {:?}", cx.id(), candidate);
        self.value = candidate;
        self.caret_offset = details_width(&details);
        self.details = details;
        self.restart_blink(cx);

        self.layout(cx);
        cx.relayout_parent();
        Ok(true)
    }

    fn restart_blink(&mut self, cx: &Cx<'_>) {
        self.blink_epoch = cx.now();
        self.caret_visible = true;
    }

    /// Edit from a key press, logging instead of failing.
    fn edit(&mut self, cx: &mut Cx<'_>, edit: impl FnOnce(&mut Self, &mut Cx<'_>) -> Result<bool>) {
        if let Err(err) = edit(self, cx) {
            warn!("input {:?}: {}", cx.id(), err);
        }
    }

    fn key(&mut self, cx: &mut Cx<'_>, key: Key) -> bool {
        match key {
            Key::Char(ch) if (' '..='z').contains(&ch) => {
                self.edit(cx, |input, cx| input.append(cx, ch));
            }
            Key::Space => self.edit(cx, |input, cx| input.append(cx, ' ')),
            Key::Backspace => self.edit(cx, Self::remove_last),
            Key::Enter => cx.pop_focus(),
            Key::Char(_) | Key::Up | Key::Down | Key::Left | Key::Right => return false,
        }
        true
    }

    fn mouse(&mut self, cx: &mut Cx<'_>, action: MouseAction, position: Point, frame: Frame) -> bool {
        if !frame.rect(cx.base().size()).contains(position) {
            return false;
        }

        if action == MouseAction::Up(MouseButton::Right) {
            cx.pop_focus();
        }
        true
    }
}

fn render_details(text: &TextService, value: &str) -> Result<Details> {
    let mut details = Details::default();
    if value.is_empty() {
        return Ok(details);
    }

    for colour in Colour::ALL {
        details[colour.index()] = Some(text.render(value, colour, TextSize::Normal)?);
    }
    Ok(details)
}

fn details_width(details: &Details) -> u32 {
    details[Colour::Interface.index()]
        .as_ref()
        .map_or(0, |detail| detail.width())
}

/// Whether a caret restarted at `epoch` is showing at `now`.
fn blink_phase(now: Duration, epoch: Duration, interval: Duration) -> bool {
    if interval.is_zero() {
        return true;
    }
    let elapsed = now.saturating_sub(epoch);
    (elapsed.as_nanos() / interval.as_nanos()) % 2 == 0
}

impl Widget for Input {
    fn render<D>(&mut self, cx: &mut Cx<'_>, target: &mut D, frame: Frame) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.caret_visible = blink_phase(cx.now(), self.blink_epoch, cx.caret_interval());

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

        let value_at = Point::new(origin.x + edge, body_top + edge);
        if let Some(detail) = &self.details[Colour::Interface.index()] {
            detail.draw(target, value_at)?;
        }

        if self.caret_visible {
            let caret = Rectangle::new(
                value_at + Point::new(self.caret_offset as i32, 0),
                Size::new(CARET_WIDTH, self.title.height()),
            );
            fill_rect(target, caret, palette.get(Colour::Interface))?;
        }

        Ok(())
    }

    fn activate(&mut self, cx: &mut Cx<'_>) {
        cx.take_focus();
        self.restart_blink(cx);
    }

    fn layout(&mut self, cx: &mut Cx<'_>) {
        let title = &self.title;
        let (width, body) = match &self.details[Colour::Interface.index()] {
            Some(detail) => (
                title.width().max(detail.width()),
                title.height().max(detail.height()),
            ),
            None => (title.width(), title.height()),
        };

        cx.base_mut().set_size(Size::new(
            EDGE_WIDTH * 2 + width,
            EDGE_WIDTH * 4 + title.height() + body,
        ));
    }

    fn input(&mut self, cx: &mut Cx<'_>, event: &InputEvent, frame: Frame) -> bool {
        match *event {
            InputEvent::Key(key) => self.key(cx, key),
            InputEvent::Mouse { action, position } => self.mouse(cx, action, position, frame),
        }
    }

    fn detail(&self, _text: &TextService, _size: TextSize, colour: Colour) -> Option<Rc<Text>> {
        self.details[colour.index()].clone()
    }
}
