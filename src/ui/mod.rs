// src/ui/mod.rs
//! Retained-mode widget toolkit for small framebuffer displays
//!
//! This module provides:
//! - A widget tree owning every widget, addressed by generational handles
//! - Focus routing along a single chain from the root to one target widget
//! - Menus, actions, toggles, selects and text inputs
//! - A text service that measures and caches drawables per colour and size
//! - Layout helpers that keep pop-up boxes inside the viewport
//!
//! The host owns the loop: each frame it calls [`WidgetTree::render`] on its
//! root, and it passes every key or mouse event to [`WidgetTree::input`].

pub mod core;
pub mod styling;
pub mod text;
pub mod tree;
pub mod widgets;

// Re-export commonly used items
pub use self::core::{Clock, FocusState, FrozenClock, InputEvent, Key, MouseAction, MouseButton};
pub use styling::{Colour, Palette};
pub use text::{CommonText, Text, TextService, TextSize};
pub use tree::{WidgetBase, WidgetTree};
pub use widgets::{
    Action, ActionCallback, Input, InputCallback, KindTag, Menu, Position, Select, SelectCallback,
    Toggle, ToggleCallback, WidgetId,
};
