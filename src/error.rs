// src/error.rs
//! Error types for widget construction and mutation

use thiserror_no_std::Error;

use crate::ui::widgets::KindTag;

/// Errors reported by the widget tree and the kind-specific APIs.
///
/// Focus-state precondition violations are not represented here: they are
/// broken invariants and panic instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The handle does not name a live widget (never created, or destroyed).
    #[error("widget handle does not refer to a live widget")]
    UnknownWidget,

    /// The widget is in the middle of handling an event and cannot be
    /// re-entered.
    #[error("widget is busy dispatching an event")]
    Busy,

    /// A kind-specific operation was called on a widget of another kind.
    #[error("{operation} expects a {expected} widget, found {found}")]
    WrongKind {
        operation: &'static str,
        expected: KindTag,
        found: KindTag,
    },

    /// The text service cannot render this character with its mono fonts.
    #[error("character {ch:?} has no glyph in the toolkit fonts")]
    UnsupportedGlyph { ch: char },

    /// A select widget needs at least one option.
    #[error("select widget requires at least one option")]
    NoOptions,

    /// An input's acceptance callback refused its initial value.
    #[error("initial value rejected by the acceptance callback")]
    Rejected,

    /// The widget is already an entry of the menu it is added to.
    #[error("widget is already an entry of this menu")]
    DuplicateEntry,

    /// The widget added to a menu was not created with that menu as parent.
    #[error("entry widget is not a child of the menu it is added to")]
    ParentMismatch,

    /// Persisted configuration could not be decoded or encoded.
    #[error("configuration encoding failed: {0}")]
    Config(postcard::Error),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
