//! Retained-mode widget toolkit for instrument control panels
//!
//! `panel-tk` keeps a tree of controls (menus, actions, toggles, option
//! selectors and single-line text inputs) and provides layout, rendering and
//! keyboard/mouse routing along a hierarchical focus chain. Drawing goes
//! through `embedded-graphics`, so the same tree renders into an SDL
//! simulator window on the desktop or straight into a display driver.
//!
//! It is `#![no_std]` with `extern crate alloc`; tests run on the host.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod ui;

pub use config::ToolkitConfig;
pub use error::{Error, Result};
