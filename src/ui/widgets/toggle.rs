// src/ui/widgets/toggle.rs
//! Toggle: a boolean switch shown as "On" or blank in its menu row

use alloc::boxed::Box;
use alloc::rc::Rc;
use log::trace;

use crate::error::Result;
use crate::ui::core::InputEvent;
use crate::ui::styling::Colour;
use crate::ui::text::{CommonText, Text, TextService, TextSize};
use crate::ui::tree::{Cx, WidgetTree};
use crate::ui::widgets::{Frame, Widget, WidgetId, WidgetKind};

/// Called with the new value whenever a toggle changes.
pub type ToggleCallback = Box<dyn FnMut(bool)>;

/// A boolean menu entry. Pressing it flips the value.
pub struct Toggle {
    value: bool,
    callback: Option<ToggleCallback>,
}

impl Toggle {
    /// Create a toggle. Once the widget exists the callback is invoked with
    /// `initial`.
    pub fn create(
        tree: &mut WidgetTree,
        parent: Option<WidgetId>,
        title: &str,
        initial: bool,
        callback: Option<ToggleCallback>,
    ) -> Result<WidgetId> {
        let id = tree.insert(
            title,
            parent,
            WidgetKind::Toggle(Toggle {
                value: initial,
                callback,
            }),
        )?;
        tree.with_widget::<Toggle, _>(id, "Toggle::create", |toggle, _| {
            if let Some(callback) = toggle.callback.as_mut() {
                callback(initial);
            }
        })?;
        Ok(id)
    }

    /// Set the value programmatically.
    ///
    /// Returns whether the value changed; the callback and parent layout only
    /// run on a change.
    pub fn set_value(tree: &mut WidgetTree, id: WidgetId, value: bool) -> Result<bool> {
        tree.with_widget::<Toggle, _>(id, "Toggle::set_value", |toggle, cx| {
            if toggle.value == value {
                return false;
            }
            toggle.apply(cx, value);
            true
        })
    }

    pub fn value(tree: &WidgetTree, id: WidgetId) -> Result<bool> {
        tree.widget::<Toggle>(id, "Toggle::value")
            .map(|toggle| toggle.value)
    }

    fn apply(&mut self, cx: &mut Cx<'_>, value: bool) {
        self.value = value;
        trace!("toggle {:?} = {}", cx.id(), value);
        if let Some(callback) = self.callback.as_mut() {
            callback(value);
        }
        cx.relayout_parent();
    }
}

impl Widget for Toggle {
    fn activate(&mut self, cx: &mut Cx<'_>) {
        let value = !self.value;
        self.apply(cx, value);
    }

    fn input(&mut self, _cx: &mut Cx<'_>, _event: &InputEvent, _frame: Frame) -> bool {
        true
    }

    fn detail(&self, text: &TextService, size: TextSize, colour: Colour) -> Option<Rc<Text>> {
        let which = if self.value {
            CommonText::On
        } else {
            CommonText::Off
        };
        text.common(colour, size, which)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tree::testing::tree;
    use crate::ui::widgets::{Menu, Position};
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recorded() -> (Rc<RefCell<Vec<bool>>>, ToggleCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        (log, Box::new(move |value| sink.borrow_mut().push(value)))
    }

    #[test]
    fn test_create_reports_initial_value() {
        let mut tree = tree();
        let (log, callback) = recorded();
        let toggle = Toggle::create(&mut tree, None, "LED", true, Some(callback)).unwrap();

        assert_eq!(*log.borrow(), [true]);
        assert!(Toggle::value(&tree, toggle).unwrap());
    }

    #[test]
    fn test_stale_parent_creates_nothing_and_stays_silent() {
        let mut tree = tree();
        let menu = Menu::create(&mut tree, None, "LEDs").unwrap();
        tree.destroy(menu);

        let (log, callback) = recorded();
        let result = Toggle::create(&mut tree, Some(menu), "LED", true, Some(callback));
        assert!(matches!(result, Err(crate::Error::UnknownWidget)));
        assert!(log.borrow().is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_activate_flips_and_reports() {
        let mut tree = tree();
        let (log, callback) = recorded();
        let toggle = Toggle::create(&mut tree, None, "LED", false, Some(callback)).unwrap();

        tree.activate(toggle);
        tree.activate(toggle);
        assert_eq!(*log.borrow(), [false, true, false]);
    }

    #[test]
    fn test_set_value_only_fires_on_change() {
        let mut tree = tree();
        let (log, callback) = recorded();
        let toggle = Toggle::create(&mut tree, None, "LED", false, Some(callback)).unwrap();

        assert!(!Toggle::set_value(&mut tree, toggle, false).unwrap());
        assert!(Toggle::set_value(&mut tree, toggle, true).unwrap());
        assert_eq!(*log.borrow(), [false, true]);
    }

    #[test]
    fn test_detail_follows_value() {
        let mut tree = tree();
        let toggle = Toggle::create(&mut tree, None, "LED", false, None).unwrap();
        assert!(tree.detail(toggle, TextSize::Normal, Colour::Interface).is_none());

        Toggle::set_value(&mut tree, toggle, true).unwrap();
        let on = tree.detail(toggle, TextSize::Normal, Colour::Interface).unwrap();
        assert_eq!(on.content(), "On");
    }

    #[test]
    fn test_flip_widens_parent_menu() {
        let mut tree = tree();
        let menu = Menu::create(&mut tree, None, "Config").unwrap();
        let toggle = Toggle::create(&mut tree, Some(menu), "LED", false, None).unwrap();
        Menu::add_entry(&mut tree, menu, toggle, Position::End).unwrap();
        let before = tree.size(menu).unwrap();

        tree.activate(toggle);
        let after = tree.size(menu).unwrap();
        // "On" adds a detail column: two 6 px glyphs
        assert_eq!(after.width, before.width + 12);
        assert_eq!(after.height, before.height);
    }
}
