// src/ui/widgets/menu.rs
//! Menu: an ordered list of entries with one highlighted row
//!
//! A menu owns its entry widgets. Each entry keeps its title pre-rendered in
//! the three row colours, and the entry widget's detail text (toggle state,
//! select option, input value, submenu arrow) is fetched again on every
//! layout so the row always reflects the entry's current value.
//!
//! # Keys
//!
//! | Key                  | Effect                                        |
//! |----------------------|-----------------------------------------------|
//! | Up / Down            | Move the highlight, wrapping, skipping disabled entries |
//! | Right / Space / Enter| Activate the highlighted entry                |
//! | Left                 | Return focus to the parent menu               |
//!
//! With the mouse, hovering a row highlights it, releasing a button on it
//! activates it and releasing the right button anywhere inside goes back to
//! the parent.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use log::warn;

use crate::error::{Error, Result};
use crate::ui::core::{InputEvent, Key, MouseAction, MouseButton};
use crate::ui::styling::{BORDER_WIDTH, Colour, EDGE_WIDTH, GUTTER_WIDTH, PADDING_WIDTH};
use crate::ui::text::{CommonText, Text, TextService, TextSize};
use crate::ui::tree::{Cx, WidgetTree};
use crate::ui::widgets::{Frame, KindTag, Widget, WidgetId, WidgetKind, fill_rect};

/// Where [`Menu::add_entry`] puts the new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Before the entry currently at this index (clamped to the end)
    At(usize),
    /// After the last entry
    End,
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryState {
    Normal,
    Selected,
    Disabled,
}

impl EntryState {
    const COUNT: usize = 3;
    const ALL: [EntryState; EntryState::COUNT] =
        [EntryState::Normal, EntryState::Selected, EntryState::Disabled];

    fn of(selected: bool, enabled: bool) -> Self {
        if selected {
            EntryState::Selected
        } else if !enabled {
            EntryState::Disabled
        } else {
            EntryState::Normal
        }
    }

    const fn index(self) -> usize {
        match self {
            EntryState::Normal => 0,
            EntryState::Selected => 1,
            EntryState::Disabled => 2,
        }
    }

    /// Text colour for rows in this state.
    fn colour(self) -> Colour {
        match self {
            EntryState::Normal => Colour::Interface,
            EntryState::Selected => Colour::Background,
            EntryState::Disabled => Colour::Disabled,
        }
    }
}

struct Entry {
    widget: WidgetId,
    titles: [Rc<Text>; EntryState::COUNT],
    details: [Option<Rc<Text>>; EntryState::COUNT],
}

impl Entry {
    fn new(text: &TextService, widget: WidgetId, title: &str) -> Result<Self> {
        let [normal, selected, disabled] =
            EntryState::ALL.map(|state| text.render(title, state.colour(), TextSize::Normal));

        Ok(Self {
            widget,
            titles: [normal?, selected?, disabled?],
            details: [None, None, None],
        })
    }

    fn height(&self) -> u32 {
        let title = self.titles[EntryState::Normal.index()].height();
        match &self.details[EntryState::Normal.index()] {
            Some(detail) => title.max(detail.height()),
            None => title,
        }
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// A titled list of entry widgets, possibly nested.
pub struct Menu {
    title: Rc<Text>,
    entries: Vec<Entry>,
    current: usize,
}

impl Menu {
    /// Create an empty menu. Entries are added with [`Menu::add_entry`].
    pub fn create(tree: &mut WidgetTree, parent: Option<WidgetId>, title: &str) -> Result<WidgetId> {
        let title_text = tree
            .text()
            .render(title, Colour::Background, TextSize::Normal)?;
        let menu = Menu {
            title: title_text,
            entries: Vec::new(),
            current: 0,
        };

        let id = tree.insert(title, parent, WidgetKind::Menu(Box::new(menu)))?;
        tree.layout(id);
        Ok(id)
    }

    /// Create a menu with `count` entries built up front.
    ///
    /// `factory` is called with the new menu and each entry index in order
    /// and must return a widget created with the menu as its parent. If any
    /// entry fails, the whole menu is destroyed and the error returned.
    pub fn create_with<F>(
        tree: &mut WidgetTree,
        parent: Option<WidgetId>,
        title: &str,
        count: usize,
        mut factory: F,
    ) -> Result<WidgetId>
    where
        F: FnMut(&mut WidgetTree, WidgetId, usize) -> Result<WidgetId>,
    {
        let menu = Self::create(tree, parent, title)?;

        for index in 0..count {
            let added = factory(tree, menu, index)
                .and_then(|entry| Self::add_entry(tree, menu, entry, Position::End));
            if let Err(err) = added {
                warn!("menu \"{}\" entry {} failed: {}", title, index, err);
                tree.destroy(menu);
                return Err(err);
            }
        }

        Ok(menu)
    }

    /// Insert `widget` into `menu` at `position`.
    ///
    /// `widget` must have been created with `menu` as its parent and must not
    /// already be one of its entries ([`Error::DuplicateEntry`]). The
    /// highlighted entry stays the same when inserting before it. If the
    /// entry's title cannot be rendered the widget is destroyed.
    pub fn add_entry(
        tree: &mut WidgetTree,
        menu: WidgetId,
        widget: WidgetId,
        position: Position,
    ) -> Result<()> {
        tree.check_kind(menu, KindTag::Menu, "Menu::add_entry")?;
        let title = tree.title(widget).ok_or(Error::UnknownWidget)?.to_string();
        if tree.parent(widget) != Some(menu) {
            return Err(Error::ParentMismatch);
        }
        if tree.widget::<Menu>(menu, "Menu::add_entry")?.position_of(widget).is_some() {
            return Err(Error::DuplicateEntry);
        }

        let entry = match Entry::new(tree.text(), widget, &title) {
            Ok(entry) => entry,
            Err(err) => {
                tree.destroy(widget);
                return Err(err);
            }
        };

        tree.with_widget::<Menu, _>(menu, "Menu::add_entry", |menu, _| menu.insert(entry, position))?;
        tree.layout(menu);
        Ok(())
    }

    /// Entry widgets in display order.
    pub fn entries(tree: &WidgetTree, menu: WidgetId) -> Result<Vec<WidgetId>> {
        let menu = tree.widget::<Menu>(menu, "Menu::entries")?;
        Ok(menu.entries.iter().map(|entry| entry.widget).collect())
    }

    /// The highlighted entry, if the menu has any.
    pub fn current(tree: &WidgetTree, menu: WidgetId) -> Result<Option<WidgetId>> {
        let menu = tree.widget::<Menu>(menu, "Menu::current")?;
        Ok(menu.entries.get(menu.current).map(|entry| entry.widget))
    }

    fn position_of(&self, widget: WidgetId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.widget == widget)
    }

    fn insert(&mut self, entry: Entry, position: Position) {
        let len = self.entries.len();
        let index = match position {
            Position::At(index) => index.min(len),
            Position::End => len,
        };
        if len > 0 && index <= self.current {
            self.current += 1;
        }
        self.entries.insert(index, entry);
    }

    /// Drop the entry for a destroyed child.
    fn remove_entry(&mut self, child: WidgetId) {
        let Some(index) = self.position_of(child) else {
            return;
        };
        self.entries.remove(index);
        if index < self.current || self.current >= self.entries.len() {
            self.current = self.current.saturating_sub(1);
        }
    }

    /// Highlight the entry that just took focus from this menu.
    pub(crate) fn follow_focus(&mut self, child: WidgetId) {
        if let Some(index) = self.position_of(child) {
            self.current = index;
        }
    }

    /// Move the highlight one enabled entry forwards or backwards.
    ///
    /// Stops where it started if no other entry is enabled.
    fn step(&mut self, tree: &WidgetTree, forward: bool) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }

        let start = self.current;
        loop {
            self.current = if forward {
                (self.current + 1) % count
            } else {
                (self.current + count - 1) % count
            };
            if self.current == start || tree.is_enabled(self.entries[self.current].widget) {
                break;
            }
        }
    }

    fn activate_current(&mut self, cx: &mut Cx<'_>) {
        if let Some(entry) = self.entries.get(self.current) {
            let widget = entry.widget;
            cx.tree_mut().activate(widget);
        }
    }

    /// Entry under a point `offset` pixels below the first row.
    fn row_at(&self, mut offset: u32) -> Option<usize> {
        for (index, entry) in self.entries.iter().enumerate() {
            let height = entry.height();
            if offset < height {
                return Some(index);
            }
            offset -= height;
        }
        self.entries.len().checked_sub(1)
    }

    fn key(&mut self, cx: &mut Cx<'_>, key: Key) -> bool {
        match key {
            Key::Up => self.step(cx.tree(), false),
            Key::Down => self.step(cx.tree(), true),
            Key::Right | Key::Space | Key::Enter => self.activate_current(cx),
            Key::Left => cx.pop_focus(),
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

        if action == MouseAction::Up(MouseButton::Right) {
            cx.pop_focus();
            return true;
        }

        let y = (position.y - rect.top_left.y) as u32;
        let first_row = EDGE_WIDTH * 2 + self.title.height() + GUTTER_WIDTH;
        let rows_end = size.height.saturating_sub(BORDER_WIDTH + GUTTER_WIDTH);
        if y < first_row || y >= rows_end {
            return true;
        }

        let Some(index) = self.row_at(y - first_row) else {
            return true;
        };
        let widget = self.entries[index].widget;
        if !cx.tree().is_enabled(widget) {
            return true;
        }

        self.current = index;
        if let MouseAction::Up(_) = action {
            cx.tree_mut().activate(widget);
        }
        true
    }
}

impl Widget for Menu {
    fn render<D>(&mut self, cx: &mut Cx<'_>, target: &mut D, frame: Frame) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let size = cx.base().size();
        let rect = frame.rect(size);
        let palette = *cx.palette();
        let origin = rect.top_left;
        let edge = EDGE_WIDTH as i32;

        // Frame and title
        fill_rect(target, rect, palette.get(Colour::Interface))?;
        self.title.draw(target, origin + Point::new(edge, edge))?;

        // Body
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

        // Rows
        let row_x = origin.x + (BORDER_WIDTH + GUTTER_WIDTH) as i32;
        let row_width = size.width.saturating_sub((BORDER_WIDTH + GUTTER_WIDTH) * 2);
        let text_x = row_x + PADDING_WIDTH as i32;
        let detail_right = size.width.saturating_sub(EDGE_WIDTH * 2);
        let mut y = body_top + GUTTER_WIDTH as i32;

        let tree = cx.tree();
        for (index, entry) in self.entries.iter().enumerate() {
            let selected = index == self.current;
            let enabled = tree.is_enabled(entry.widget);
            let state = EntryState::of(selected, enabled);
            let title = &entry.titles[state.index()];

            if selected {
                let highlight = if enabled {
                    Colour::Selection
                } else {
                    Colour::SelectedDisabled
                };
                let row = Rectangle::new(Point::new(row_x, y), Size::new(row_width, title.height()));
                fill_rect(target, row, palette.get(highlight))?;
            }

            title.draw(target, Point::new(text_x, y))?;
            if let Some(detail) = &entry.details[state.index()] {
                let offset = detail_right.saturating_sub(detail.width()) as i32;
                detail.draw(target, Point::new(text_x + offset, y))?;
            }

            y += entry.height() as i32;
        }

        Ok(())
    }

    fn activate(&mut self, cx: &mut Cx<'_>) {
        cx.take_focus();
    }

    fn layout(&mut self, cx: &mut Cx<'_>) {
        let tree = cx.tree();

        let current_disabled = self
            .entries
            .get(self.current)
            .is_some_and(|entry| !tree.is_enabled(entry.widget));
        if current_disabled {
            self.step(tree, true);
        }

        let mut title_max = 0;
        let mut detail_max = 0;
        let mut height = self.title.height();
        for entry in &mut self.entries {
            for state in EntryState::ALL {
                entry.details[state.index()] =
                    tree.detail(entry.widget, TextSize::Normal, state.colour());
            }

            title_max = title_max.max(entry.titles[EntryState::Normal.index()].width());
            if let Some(detail) = &entry.details[EntryState::Normal.index()] {
                detail_max = detail_max.max(detail.width());
            }
            height += entry.height();
        }

        let width = self
            .title
            .width()
            .max(title_max + EDGE_WIDTH * 4 + detail_max);
        cx.base_mut().set_size(Size::new(
            EDGE_WIDTH * 2 + width,
            EDGE_WIDTH * 2 + height + BORDER_WIDTH + GUTTER_WIDTH * 2,
        ));
    }

    fn input(&mut self, cx: &mut Cx<'_>, event: &InputEvent, frame: Frame) -> bool {
        match *event {
            InputEvent::Key(key) => self.key(cx, key),
            InputEvent::Mouse { action, position } => self.mouse(cx, action, position, frame),
        }
    }

    fn detail(&self, text: &TextService, size: TextSize, colour: Colour) -> Option<Rc<Text>> {
        text.common(colour, size, CommonText::ArrowRight)
    }

    fn forget_child(&mut self, child: WidgetId) {
        self.remove_entry(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::core::FocusState;
    use crate::ui::tree::testing::{centre, targets, tree, viewport};
    use crate::ui::widgets::{Action, Toggle};
    use alloc::vec;
    use embedded_graphics::mock_display::MockDisplay;

    fn abc(tree: &mut WidgetTree) -> (WidgetId, [WidgetId; 3]) {
        let menu = Menu::create(tree, None, "M").unwrap();
        let entries = ["A", "B", "C"].map(|title| {
            let action = Action::create(tree, Some(menu), title, None).unwrap();
            Menu::add_entry(tree, menu, action, Position::End).unwrap();
            action
        });
        tree.set_focus(menu, true);
        (menu, entries)
    }

    fn press(tree: &mut WidgetTree, root: WidgetId, key: Key) -> bool {
        tree.input(root, &InputEvent::Key(key), viewport(), centre())
    }

    fn mouse(tree: &mut WidgetTree, root: WidgetId, action: MouseAction, x: i32, y: i32) -> bool {
        tree.input(
            root,
            &InputEvent::mouse(action, Point::new(x, y)),
            viewport(),
            centre(),
        )
    }

    #[test]
    fn test_down_skips_disabled_and_wraps() {
        let mut tree = tree();
        let (menu, [a, b, c]) = abc(&mut tree);
        tree.set_enabled(b, false);
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(a));

        assert!(press(&mut tree, menu, Key::Down));
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(c));

        assert!(press(&mut tree, menu, Key::Down));
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(a));
    }

    #[test]
    fn test_up_wraps_to_last() {
        let mut tree = tree();
        let (menu, [_, _, c]) = abc(&mut tree);

        press(&mut tree, menu, Key::Up);
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(c));
    }

    #[test]
    fn test_navigation_stops_when_everything_is_disabled() {
        let mut tree = tree();
        let (menu, entries) = abc(&mut tree);
        for entry in entries {
            tree.set_enabled(entry, false);
        }
        let start = Menu::current(&tree, menu).unwrap();

        press(&mut tree, menu, Key::Down);
        assert_eq!(Menu::current(&tree, menu).unwrap(), start);
        press(&mut tree, menu, Key::Up);
        assert_eq!(Menu::current(&tree, menu).unwrap(), start);
    }

    #[test]
    fn test_disabling_current_entry_moves_highlight() {
        let mut tree = tree();
        let (menu, [a, b, _]) = abc(&mut tree);

        tree.set_enabled(a, false);
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(b));
    }

    #[test]
    fn test_layout_size_and_idempotence() {
        let mut tree = tree();
        let (menu, _) = abc(&mut tree);

        // 6x10 glyphs: width 2*6 + max(6, 6 + 4*6), height 2*6 + 10 + 3*10 + 2 + 2*2
        assert_eq!(tree.size(menu), Some(Size::new(42, 58)));
        tree.layout(menu);
        tree.layout(menu);
        assert_eq!(tree.size(menu), Some(Size::new(42, 58)));
    }

    #[test]
    fn test_insert_before_current_keeps_highlight() {
        let mut tree = tree();
        let (menu, [a, b, c]) = abc(&mut tree);
        press(&mut tree, menu, Key::Down);
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(b));

        let first = Action::create(&mut tree, Some(menu), "Z", None).unwrap();
        Menu::add_entry(&mut tree, menu, first, Position::At(0)).unwrap();
        assert_eq!(Menu::entries(&tree, menu).unwrap(), vec![first, a, b, c]);
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(b));

        let last = Action::create(&mut tree, Some(menu), "Y", None).unwrap();
        Menu::add_entry(&mut tree, menu, last, Position::At(99)).unwrap();
        assert_eq!(Menu::entries(&tree, menu).unwrap().last(), Some(&last));
    }

    #[test]
    fn test_add_entry_checks_parent_and_kind() {
        let mut tree = tree();
        let (menu, [a, _, _]) = abc(&mut tree);

        let stray = Action::create(&mut tree, None, "Stray", None).unwrap();
        assert!(matches!(
            Menu::add_entry(&mut tree, menu, stray, Position::End),
            Err(Error::ParentMismatch)
        ));
        assert!(matches!(
            Menu::add_entry(&mut tree, a, stray, Position::End),
            Err(Error::WrongKind { .. })
        ));
    }

    #[test]
    fn test_duplicate_entry_is_an_error() {
        let mut tree = tree();
        let (menu, [a, b, c]) = abc(&mut tree);

        assert!(matches!(
            Menu::add_entry(&mut tree, menu, b, Position::At(0)),
            Err(Error::DuplicateEntry)
        ));
        assert_eq!(Menu::entries(&tree, menu).unwrap(), [a, b, c]);
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(a));
    }

    #[test]
    fn test_unrenderable_entry_title_destroys_entry() {
        let mut tree = tree();
        let (menu, _) = abc(&mut tree);
        let bad = Action::create(&mut tree, Some(menu), "\u{b0}C", None).unwrap();

        let result = Menu::add_entry(&mut tree, menu, bad, Position::End);
        assert!(matches!(result, Err(Error::UnsupportedGlyph { .. })));
        assert!(!tree.contains(bad));
        assert_eq!(Menu::entries(&tree, menu).unwrap().len(), 3);
    }

    #[test]
    fn test_factory_constructor() {
        let mut tree = tree();
        let titles = ["Calibrate", "Acquire", "Stop"];
        let menu = Menu::create_with(&mut tree, None, "Main", titles.len(), |tree, menu, index| {
            Action::create(tree, Some(menu), titles[index], None)
        })
        .unwrap();

        let entries = Menu::entries(&tree, menu).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(tree.title(entries[1]), Some("Acquire"));
    }

    #[test]
    fn test_factory_failure_destroys_menu() {
        let mut tree = tree();
        let result = Menu::create_with(&mut tree, None, "Main", 3, |tree, menu, index| {
            if index == 1 {
                return Err(Error::UnknownWidget);
            }
            Action::create(tree, Some(menu), "A", None)
        });

        assert!(result.is_err());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_keys_enter_and_leave_submenu() {
        let mut tree = tree();
        let root = Menu::create(&mut tree, None, "Root").unwrap();
        let sub = Menu::create(&mut tree, Some(root), "Sub").unwrap();
        Menu::add_entry(&mut tree, root, sub, Position::End).unwrap();
        tree.set_focus(root, true);

        assert!(press(&mut tree, root, Key::Right));
        assert_eq!(tree.focus_state(root), FocusState::Child(sub));
        assert_eq!(tree.focus_target(root), Some(sub));

        assert!(!press(&mut tree, root, Key::Char('x')));

        assert!(press(&mut tree, root, Key::Left));
        assert_eq!(tree.focus_target(root), Some(root));
        assert_eq!(tree.focus_state(sub), FocusState::None);

        // Left on the root has nowhere to go but is still consumed
        assert!(press(&mut tree, root, Key::Left));
        assert_eq!(targets(&tree), 1);
    }

    #[test]
    fn test_toggle_entry_detail_refreshes() {
        let mut tree = tree();
        let menu = Menu::create(&mut tree, None, "Config").unwrap();
        let toggle = Toggle::create(&mut tree, Some(menu), "LED", false, None).unwrap();
        Menu::add_entry(&mut tree, menu, toggle, Position::End).unwrap();
        tree.set_focus(menu, true);

        press(&mut tree, menu, Key::Enter);
        assert!(Toggle::value(&tree, toggle).unwrap());
        // "On" detail column is now part of the layout
        assert_eq!(tree.size(menu).unwrap().width, 2 * 6 + 18 + 4 * 6 + 12);
    }

    #[test]
    fn test_mouse_hover_and_click() {
        let mut tree = tree();
        let (menu, [a, b, c]) = abc(&mut tree);
        let rect = crate::ui::styling::widget_rect(tree.size(menu).unwrap(), centre(), &viewport());
        // first row starts below the title and body gutter
        let first_row = rect.top_left.y + (EDGE_WIDTH * 2 + 10 + GUTTER_WIDTH) as i32;
        let x = rect.top_left.x + 10;

        assert!(mouse(&mut tree, menu, MouseAction::Motion, x, first_row + 12));
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(b));

        tree.set_enabled(c, false);
        assert!(mouse(&mut tree, menu, MouseAction::Motion, x, first_row + 22));
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(b));

        // clicks on the title bar are swallowed without moving the highlight
        assert!(mouse(&mut tree, menu, MouseAction::Up(MouseButton::Left), x, rect.top_left.y + 1));
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(b));

        assert!(!mouse(&mut tree, menu, MouseAction::Motion, 0, 0));

        assert!(mouse(&mut tree, menu, MouseAction::Up(MouseButton::Left), x, first_row + 2));
        assert_eq!(Menu::current(&tree, menu).unwrap(), Some(a));
    }

    #[test]
    fn test_mouse_release_activates_submenu_and_right_click_returns() {
        let mut tree = tree();
        let root = Menu::create(&mut tree, None, "R").unwrap();
        let sub = Menu::create(&mut tree, Some(root), "S").unwrap();
        Menu::add_entry(&mut tree, root, sub, Position::End).unwrap();
        tree.set_focus(root, true);

        let rect = crate::ui::styling::widget_rect(tree.size(root).unwrap(), centre(), &viewport());
        let row_y = rect.top_left.y + (EDGE_WIDTH * 2 + 10 + GUTTER_WIDTH) as i32 + 3;
        assert!(mouse(&mut tree, root, MouseAction::Up(MouseButton::Left), rect.top_left.x + 8, row_y));
        assert_eq!(tree.focus_target(root), Some(sub));

        // the submenu is now drawn where the root was
        assert!(mouse(&mut tree, root, MouseAction::Up(MouseButton::Right), 32, 32));
        assert_eq!(tree.focus_target(root), Some(root));
    }

    #[test]
    fn test_render_frame_body_and_highlight() {
        let mut tree = tree();
        let (menu, _) = abc(&mut tree);
        let palette = *tree.palette();

        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        tree.render(menu, &mut display, viewport(), centre()).unwrap();

        // 42x58 box centred on (32, 32)
        assert_eq!(display.get_pixel(Point::new(11, 3)), Some(palette.get(Colour::Interface)));
        assert_eq!(display.get_pixel(Point::new(52, 60)), Some(palette.get(Colour::Interface)));
        assert_eq!(display.get_pixel(Point::new(10, 3)), None);
        // body background just above the first row
        assert_eq!(display.get_pixel(Point::new(13, 26)), Some(palette.get(Colour::Background)));
        // highlight of the current row, left of its text
        assert_eq!(display.get_pixel(Point::new(15, 27)), Some(palette.get(Colour::Selection)));
        // the second row is not highlighted
        assert_eq!(display.get_pixel(Point::new(15, 37)), Some(palette.get(Colour::Background)));
    }

    #[test]
    fn test_submenu_renders_in_place_of_parent() {
        let mut tree = tree();
        let root = Menu::create(&mut tree, None, "Root").unwrap();
        let sub = Menu::create(&mut tree, Some(root), "S").unwrap();
        Menu::add_entry(&mut tree, root, sub, Position::End).unwrap();
        tree.set_focus(root, true);
        tree.activate(sub);

        let palette = *tree.palette();
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        tree.render(root, &mut display, viewport(), centre()).unwrap();

        let sub_rect = crate::ui::styling::widget_rect(tree.size(sub).unwrap(), centre(), &viewport());
        assert_eq!(display.affected_area(), sub_rect);
        assert_eq!(
            display.get_pixel(sub_rect.top_left),
            Some(palette.get(Colour::Interface))
        );
    }
}
