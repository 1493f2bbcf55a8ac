// src/ui/core.rs
//! Core input and focus types for the widget tree

use alloc::boxed::Box;
use core::time::Duration;
use embedded_graphics::prelude::*;

use super::widgets::WidgetId;

/// Keys the toolkit reacts to.
///
/// Hosts translate their platform key codes into these; anything without a
/// meaning to the toolkit should simply not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Backspace,
    /// A printable character typed by the user.
    Char(char),
}

/// Mouse buttons distinguished by the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// What the mouse did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Motion,
    Down(MouseButton),
    Up(MouseButton),
}

/// One host-reported input event.
///
/// Mouse events carry the pointer position sampled by the host when it
/// dispatches the event, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Mouse { action: MouseAction, position: Point },
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::Key(key)
    }

    pub fn mouse(action: MouseAction, position: Point) -> Self {
        InputEvent::Mouse { action, position }
    }
}

/// Per-widget focus state.
///
/// Along any path from the root there is at most one [`FocusState::Target`];
/// every ancestor on that path is in [`FocusState::Child`] naming the next
/// widget down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// Inactive: neither rendered nor routed to.
    #[default]
    None,
    /// Visible, with input delegated to the named child.
    Child(WidgetId),
    /// This widget owns input.
    Target,
}

/// Wall-clock source sampled on every render (caret blinking).
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed epoch.
    fn now(&self) -> Duration;
}

impl<F> Clock for F
where
    F: Fn() -> Duration,
{
    fn now(&self) -> Duration {
        self()
    }
}

/// A clock that never advances. Carets stay permanently visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> Duration {
        Duration::ZERO
    }
}

pub(crate) type BoxedClock = Box<dyn Clock>;
