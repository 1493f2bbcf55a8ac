// src/ui/widgets/mod.rs
//! Widget kinds and the enum that dispatches over them.
//!
//! Every widget in a [`WidgetTree`](crate::ui::WidgetTree) is one of five
//! kinds. Their behaviour lives behind the [`Widget`] trait, whose methods
//! all default to doing nothing, so a kind only implements what it supports.
//! [`WidgetKind`] stores the concrete state and forwards each call with a
//! `match`, keeping the tree free of trait objects.
//!
//! # Kinds
//!
//! | Kind     | Focusable | Detail shown by its menu   |
//! |----------|-----------|----------------------------|
//! | Action   | no        | none                       |
//! | Toggle   | no        | "On" when set              |
//! | Select   | yes       | current option             |
//! | Input    | yes       | current value              |
//! | Menu     | yes       | submenu arrow              |

pub mod action;
pub mod input;
pub mod menu;
pub mod select;
pub mod toggle;

pub use action::{Action, ActionCallback};
pub use input::{Input, InputCallback};
pub use menu::{Menu, Position};
pub use select::{Select, SelectCallback};
pub use toggle::{Toggle, ToggleCallback};

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::ui::core::InputEvent;
use crate::ui::styling::{Colour, widget_rect};
use crate::ui::text::{Text, TextService, TextSize};
use crate::ui::tree::Cx;

slotmap::new_key_type! {
    /// Handle to a widget in a [`WidgetTree`](crate::ui::WidgetTree).
    ///
    /// Handles are generational: once a widget is destroyed its handle never
    /// refers to another widget.
    pub struct WidgetId;
}

// ---------------------------------------------------------------------------
// Kind tag
// ---------------------------------------------------------------------------

/// Identifies a widget's kind without borrowing its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Action,
    Toggle,
    Select,
    Input,
    Menu,
}

impl KindTag {
    /// Whether widgets of this kind can own input focus.
    pub fn is_focusable(self) -> bool {
        matches!(self, KindTag::Select | KindTag::Input | KindTag::Menu)
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KindTag::Action => "action",
            KindTag::Toggle => "toggle",
            KindTag::Select => "select",
            KindTag::Input => "input",
            KindTag::Menu => "menu",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Where a widget is being drawn or hit-tested this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    /// Area the widget must stay inside
    pub viewport: Rectangle,
    /// Point the widget is centred on
    pub at: Point,
}

impl Frame {
    /// The widget's box for its current size.
    pub fn rect(&self, size: Size) -> Rectangle {
        widget_rect(size, self.at, &self.viewport)
    }
}

pub(crate) fn fill_rect<D>(target: &mut D, rect: Rectangle, colour: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    rect.into_styled(PrimitiveStyle::with_fill(colour)).draw(target)
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Kind-specific behaviour.
///
/// The tree only calls these while honouring the base rules (no render in
/// [`FocusState::None`](crate::ui::FocusState::None), no activate while
/// disabled, focus delegation handled before `input`/`render` reach the
/// kind), so implementations never re-check them.
pub(crate) trait Widget {
    /// Draw the widget body. Only called while the widget is the focus target.
    fn render<D>(&mut self, _cx: &mut Cx<'_>, _target: &mut D, _frame: Frame) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Ok(())
    }

    /// The widget was pressed.
    fn activate(&mut self, _cx: &mut Cx<'_>) {}

    /// Recompute the widget's size from its content.
    fn layout(&mut self, _cx: &mut Cx<'_>) {}

    /// Handle an event while the widget is the focus target.
    fn input(&mut self, _cx: &mut Cx<'_>, _event: &InputEvent, _frame: Frame) -> bool {
        false
    }

    /// Short value text a parent menu shows on the widget's row.
    fn detail(&self, _text: &TextService, _size: TextSize, _colour: Colour) -> Option<Rc<Text>> {
        None
    }

    /// A child of this widget is being destroyed.
    fn forget_child(&mut self, _child: WidgetId) {}
}

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// Concrete widget state, one variant per kind.
pub(crate) enum WidgetKind {
    Action(Action),
    Toggle(Toggle),
    Select(Box<Select>),
    Input(Box<Input>),
    Menu(Box<Menu>),
}

impl WidgetKind {
    pub fn tag(&self) -> KindTag {
        match self {
            WidgetKind::Action(_) => KindTag::Action,
            WidgetKind::Toggle(_) => KindTag::Toggle,
            WidgetKind::Select(_) => KindTag::Select,
            WidgetKind::Input(_) => KindTag::Input,
            WidgetKind::Menu(_) => KindTag::Menu,
        }
    }
}

impl Widget for WidgetKind {
    fn render<D>(&mut self, cx: &mut Cx<'_>, target: &mut D, frame: Frame) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self {
            WidgetKind::Action(w) => w.render(cx, target, frame),
            WidgetKind::Toggle(w) => w.render(cx, target, frame),
            WidgetKind::Select(w) => w.render(cx, target, frame),
            WidgetKind::Input(w) => w.render(cx, target, frame),
            WidgetKind::Menu(w) => w.render(cx, target, frame),
        }
    }

    fn activate(&mut self, cx: &mut Cx<'_>) {
        match self {
            WidgetKind::Action(w) => w.activate(cx),
            WidgetKind::Toggle(w) => w.activate(cx),
            WidgetKind::Select(w) => w.activate(cx),
            WidgetKind::Input(w) => w.activate(cx),
            WidgetKind::Menu(w) => w.activate(cx),
        }
    }

    fn layout(&mut self, cx: &mut Cx<'_>) {
        match self {
            WidgetKind::Action(w) => w.layout(cx),
            WidgetKind::Toggle(w) => w.layout(cx),
            WidgetKind::Select(w) => w.layout(cx),
            WidgetKind::Input(w) => w.layout(cx),
            WidgetKind::Menu(w) => w.layout(cx),
        }
    }

    fn input(&mut self, cx: &mut Cx<'_>, event: &InputEvent, frame: Frame) -> bool {
        match self {
            WidgetKind::Action(w) => w.input(cx, event, frame),
            WidgetKind::Toggle(w) => w.input(cx, event, frame),
            WidgetKind::Select(w) => w.input(cx, event, frame),
            WidgetKind::Input(w) => w.input(cx, event, frame),
            WidgetKind::Menu(w) => w.input(cx, event, frame),
        }
    }

    fn detail(&self, text: &TextService, size: TextSize, colour: Colour) -> Option<Rc<Text>> {
        match self {
            WidgetKind::Action(w) => w.detail(text, size, colour),
            WidgetKind::Toggle(w) => w.detail(text, size, colour),
            WidgetKind::Select(w) => w.detail(text, size, colour),
            WidgetKind::Input(w) => w.detail(text, size, colour),
            WidgetKind::Menu(w) => w.detail(text, size, colour),
        }
    }

    fn forget_child(&mut self, child: WidgetId) {
        if let WidgetKind::Menu(menu) = self {
            menu.forget_child(child);
        }
    }
}

// ---------------------------------------------------------------------------
// Typed access
// ---------------------------------------------------------------------------

/// Borrow a concrete kind out of a [`WidgetKind`].
pub(crate) trait KindAccess: Sized {
    const TAG: KindTag;

    fn from_kind(kind: &WidgetKind) -> Option<&Self>;

    fn from_kind_mut(kind: &mut WidgetKind) -> Option<&mut Self>;
}

macro_rules! kind_access {
    ($ty:ident) => {
        impl KindAccess for $ty {
            const TAG: KindTag = KindTag::$ty;

            fn from_kind(kind: &WidgetKind) -> Option<&Self> {
                match kind {
                    WidgetKind::$ty(w) => {
                        let w: &Self = w;
                        Some(w)
                    }
                    _ => None,
                }
            }

            fn from_kind_mut(kind: &mut WidgetKind) -> Option<&mut Self> {
                match kind {
                    WidgetKind::$ty(w) => {
                        let w: &mut Self = w;
                        Some(w)
                    }
                    _ => None,
                }
            }
        }
    };
}

kind_access!(Action);
kind_access!(Toggle);
kind_access!(Select);
kind_access!(Input);
kind_access!(Menu);
