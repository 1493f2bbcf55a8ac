// src/ui/widgets/action.rs
//! Action: a stateless button

use alloc::boxed::Box;

use crate::error::Result;
use crate::ui::core::InputEvent;
use crate::ui::tree::{Cx, WidgetTree};
use crate::ui::widgets::{Frame, Widget, WidgetId, WidgetKind};

/// Called when an action is pressed.
pub type ActionCallback = Box<dyn FnMut()>;

/// A menu entry that runs a callback when pressed.
///
/// Actions never take focus and are never drawn themselves; their parent
/// menu shows the title.
pub struct Action {
    callback: Option<ActionCallback>,
}

impl Action {
    pub fn create(
        tree: &mut WidgetTree,
        parent: Option<WidgetId>,
        title: &str,
        callback: Option<ActionCallback>,
    ) -> Result<WidgetId> {
        tree.insert(title, parent, WidgetKind::Action(Action { callback }))
    }
}

impl Widget for Action {
    fn activate(&mut self, _cx: &mut Cx<'_>) {
        if let Some(callback) = self.callback.as_mut() {
            callback();
        }
    }

    fn input(&mut self, _cx: &mut Cx<'_>, _event: &InputEvent, _frame: Frame) -> bool {
        true
    }
}
