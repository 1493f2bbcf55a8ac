// src/ui/tree.rs
//! The widget tree: arena storage, base dispatch and focus routing.
//!
//! [`WidgetTree`] owns every widget, the text/colour service and the clock.
//! Widgets are addressed by [`WidgetId`] handles; parents own their children
//! and children refer back to their parent by handle only.
//!
//! # Dispatch
//!
//! The public operations apply the rules shared by all kinds before any
//! kind-specific code runs:
//!
//! - `render` does nothing while a widget's focus is [`FocusState::None`] and
//!   renders the focused child instead while it is [`FocusState::Child`]
//! - `input` is ignored in `None` and forwarded verbatim in `Child`
//! - `activate` does nothing while a widget is disabled
//! - `set_enabled` lays out the parent afterwards
//!
//! While a kind runs, its state is moved out of the arena so it can reach the
//! rest of the tree through a [`Cx`]. Layout requested for a widget that is
//! currently running (typically a menu whose entry changed value) is queued
//! and performed as soon as that widget's call returns.
//!
//! # Focus
//!
//! Along the path from a root there is at most one [`FocusState::Target`].
//! Every ancestor above it is in [`FocusState::Child`] naming the next widget
//! down. Breaking that chain is a programming error and panics.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, error, trace, warn};
use slotmap::{SecondaryMap, SlotMap};

use crate::config::ToolkitConfig;
use crate::error::{Error, Result};
use crate::ui::core::{BoxedClock, Clock, FocusState, InputEvent};
use crate::ui::styling::{Colour, Palette};
use crate::ui::text::{Text, TextService, TextSize};
use crate::ui::widgets::{Frame, KindAccess, KindTag, Widget, WidgetId, WidgetKind};

// ---------------------------------------------------------------------------
// Widget base
// ---------------------------------------------------------------------------

/// State shared by every widget regardless of kind.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    title: String,
    parent: Option<WidgetId>,
    enabled: bool,
    size: Size,
    focus: FocusState,
    kind: KindTag,
}

impl WidgetBase {
    fn new(title: &str, parent: Option<WidgetId>, kind: KindTag) -> Self {
        Self {
            title: title.to_string(),
            parent,
            enabled: true,
            size: Size::zero(),
            focus: FocusState::None,
            kind,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Size from the most recent layout. Zero before the first one.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    pub fn kind(&self) -> KindTag {
        self.kind
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

struct Node {
    base: WidgetBase,
    /// `None` while the kind is handling a call.
    kind: Option<WidgetKind>,
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// Owner of all widgets and the services they draw with.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    text: TextService,
    clock: BoxedClock,
    caret_interval: Duration,
    pending_layout: Vec<WidgetId>,
}

impl WidgetTree {
    /// Create an empty tree.
    ///
    /// `clock` is sampled on every render to drive the text input caret.
    pub fn new(config: &ToolkitConfig, clock: impl Clock + 'static) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            text: TextService::new(config),
            clock: Box::new(clock),
            caret_interval: Duration::from_millis(u64::from(config.caret_blink_ms)),
            pending_layout: Vec::new(),
        }
    }

    pub fn text(&self) -> &TextService {
        &self.text
    }

    pub fn palette(&self) -> &Palette {
        self.text.palette()
    }

    /// Current time from the tree's clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn base(&self, id: WidgetId) -> Option<&WidgetBase> {
        self.nodes.get(id).map(|node| &node.base)
    }

    pub fn title(&self, id: WidgetId) -> Option<&str> {
        self.base(id).map(WidgetBase::title)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.base(id).and_then(WidgetBase::parent)
    }

    pub fn kind(&self, id: WidgetId) -> Option<KindTag> {
        self.base(id).map(WidgetBase::kind)
    }

    pub fn size(&self, id: WidgetId) -> Option<Size> {
        self.base(id).map(WidgetBase::size)
    }

    /// Whether `id` is live and enabled.
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.base(id).is_some_and(WidgetBase::is_enabled)
    }

    /// Focus state of `id`; [`FocusState::None`] for stale handles.
    pub fn focus_state(&self, id: WidgetId) -> FocusState {
        self.base(id).map_or(FocusState::None, WidgetBase::focus)
    }

    /// Follow the focus chain down from `root` to the widget owning input.
    pub fn focus_target(&self, root: WidgetId) -> Option<WidgetId> {
        let mut id = root;
        loop {
            match self.base(id)?.focus {
                FocusState::None => return None,
                FocusState::Target => return Some(id),
                FocusState::Child(child) => id = child,
            }
        }
    }

    // -----------------------------------------------------------------------
    // Frame interface
    // -----------------------------------------------------------------------

    /// Draw `id` centred on `at`, kept inside `viewport`.
    pub fn render<D>(
        &mut self,
        id: WidgetId,
        target: &mut D,
        viewport: Rectangle,
        at: Point,
    ) -> core::result::Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(focus) = self.base(id).map(WidgetBase::focus) else {
            return Ok(());
        };

        match focus {
            FocusState::None => Ok(()),
            FocusState::Child(child) => self.render(child, target, viewport, at),
            FocusState::Target => {
                let frame = Frame { viewport, at };
                self.with_kind(id, |kind, cx| kind.render(cx, target, frame))
                    .unwrap_or(Ok(()))
            }
        }
    }

    /// Route one host event down the focus chain starting at `id`.
    ///
    /// Returns whether the event was handled. `viewport` and `at` must match
    /// the values passed to [`WidgetTree::render`] so mouse hit-tests line up
    /// with what is on screen.
    pub fn input(&mut self, id: WidgetId, event: &InputEvent, viewport: Rectangle, at: Point) -> bool {
        let Some(focus) = self.base(id).map(WidgetBase::focus) else {
            return false;
        };

        match focus {
            FocusState::None => false,
            FocusState::Child(child) => self.input(child, event, viewport, at),
            FocusState::Target => {
                let frame = Frame { viewport, at };
                self.with_kind(id, |kind, cx| kind.input(cx, event, frame))
                    .unwrap_or(false)
            }
        }
    }

    /// Press `id`. Disabled widgets ignore this.
    pub fn activate(&mut self, id: WidgetId) {
        match self.nodes.get(id) {
            Some(node) if node.base.enabled => {}
            _ => return,
        }
        self.with_kind(id, |kind, cx| kind.activate(cx));
    }

    /// Recompute the size of `id` from its content.
    pub fn layout(&mut self, id: WidgetId) {
        match self.nodes.get(id) {
            None => return,
            Some(node) if node.kind.is_none() => {
                self.request_layout(id);
                return;
            }
            Some(_) => {}
        }
        self.with_kind(id, |kind, cx| kind.layout(cx));
    }

    /// Give `id` input focus, or take it away.
    ///
    /// Only menus, inputs and selects can hold focus; other kinds ignore the
    /// call. A widget delegating to a child clears the child first. If `id`
    /// has a parent, the parent must already delegate to `id`; losing focus
    /// hands it back to the parent.
    ///
    /// # Panics
    /// If the parent does not delegate focus to `id`.
    pub fn set_focus(&mut self, id: WidgetId, focus: bool) {
        let Some(base) = self.base(id) else {
            return;
        };
        if !base.kind.is_focusable() {
            return;
        }

        if let FocusState::Child(child) = base.focus {
            self.set_focus(child, false);
        }

        let parent = self.nodes[id].base.parent;
        if let Some(parent) = parent {
            let parent_focus = self.nodes[parent].base.focus;
            assert_eq!(
                parent_focus,
                FocusState::Child(id),
                "focus change on {id:?} while its parent {parent:?} does not delegate to it",
            );
        }

        self.nodes[id].base.focus = if focus {
            FocusState::Target
        } else {
            FocusState::None
        };

        if let (false, Some(parent)) = (focus, parent) {
            self.nodes[parent].base.focus = FocusState::Target;
        }

        trace!("focus {:?} -> {}", id, focus);
    }

    /// Value text a menu shows on the row of `id`.
    pub fn detail(&self, id: WidgetId, size: TextSize, colour: Colour) -> Option<Rc<Text>> {
        self.nodes
            .get(id)?
            .kind
            .as_ref()?
            .detail(&self.text, size, colour)
    }

    /// Enable or disable `id`, then lay out its parent.
    pub fn set_enabled(&mut self, id: WidgetId, enable: bool) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.base.enabled = enable;

        if let Some(parent) = node.base.parent {
            self.layout(parent);
        }
    }

    /// Destroy `id` and everything it owns, children first.
    ///
    /// The widget is removed from its parent menu, and if the parent was
    /// delegating focus to it the parent becomes the focus target again.
    pub fn destroy(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let parent = node.base.parent;

        if let Some(parent_node) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            if parent_node.base.focus == FocusState::Child(id) {
                parent_node.base.focus = FocusState::Target;
            }
            match parent_node.kind.as_mut() {
                Some(kind) => kind.forget_child(id),
                None => warn!("destroying {:?} while its parent is dispatching", id),
            }
        }

        self.destroy_subtree(id);

        if let Some(parent) = parent {
            self.layout(parent);
        }
    }

    /// Remove `id` and its descendants, children before their parent.
    fn destroy_subtree(&mut self, id: WidgetId) {
        let mut children: SecondaryMap<WidgetId, Vec<WidgetId>> = SecondaryMap::new();
        for (child, node) in &self.nodes {
            if let Some(entry) = node.base.parent.and_then(|parent| children.entry(parent)) {
                entry.or_default().push(child);
            }
        }

        // Depth-first order, parents first; removed back to front.
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            if let Some(kids) = children.remove(current) {
                stack.extend(kids);
            }
        }

        for current in order.into_iter().rev() {
            if let Some(node) = self.nodes.remove(current) {
                debug!(
                    "destroyed {} widget {:?} \"{}\"",
                    node.base.kind, current, node.base.title
                );
            }
        }

        let nodes = &self.nodes;
        self.pending_layout.retain(|pending| nodes.contains_key(*pending));
    }

    // -----------------------------------------------------------------------
    // Kind plumbing
    // -----------------------------------------------------------------------

    /// Add a freshly built widget. Fails if `parent` is not live.
    pub(crate) fn insert(
        &mut self,
        title: &str,
        parent: Option<WidgetId>,
        kind: WidgetKind,
    ) -> Result<WidgetId> {
        if let Some(parent) = parent {
            if !self.nodes.contains_key(parent) {
                return Err(Error::UnknownWidget);
            }
        }

        let tag = kind.tag();
        let id = self.nodes.insert(Node {
            base: WidgetBase::new(title, parent, tag),
            kind: Some(kind),
        });
        debug!("created {} widget {:?} \"{}\"", tag, id, title);

        Ok(id)
    }

    /// Run `f` on the kind of `id` with a context for the rest of the tree.
    ///
    /// Returns `None` if `id` is stale or already running.
    pub(crate) fn with_kind<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut WidgetKind, &mut Cx<'_>) -> R,
    ) -> Option<R> {
        let mut kind = self.nodes.get_mut(id)?.kind.take()?;

        let result = f(&mut kind, &mut Cx { tree: self, id });

        if let Some(node) = self.nodes.get_mut(id) {
            node.kind = Some(kind);
        }
        self.flush_pending_layout();

        Some(result)
    }

    /// Queue a layout of `id` for when no call on it is running.
    pub(crate) fn request_layout(&mut self, id: WidgetId) {
        if !self.pending_layout.contains(&id) {
            self.pending_layout.push(id);
        }
    }

    fn flush_pending_layout(&mut self) {
        let mut index = 0;
        while index < self.pending_layout.len() {
            let id = self.pending_layout[index];
            if self.nodes.get(id).is_some_and(|node| node.kind.is_none()) {
                index += 1;
                continue;
            }
            self.pending_layout.remove(index);
            self.layout(id);
        }
    }

    /// Log and reject a kind-specific call on the wrong kind.
    pub(crate) fn check_kind(&self, id: WidgetId, expected: KindTag, operation: &'static str) -> Result<()> {
        let found = self.kind(id).ok_or(Error::UnknownWidget)?;
        if found != expected {
            error!("{}: {:?} is a {} widget, not a {}", operation, id, found, expected);
            return Err(Error::WrongKind {
                operation,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Borrow the concrete state of `id` as kind `W`.
    pub(crate) fn widget<W: KindAccess>(&self, id: WidgetId, operation: &'static str) -> Result<&W> {
        self.check_kind(id, W::TAG, operation)?;
        self.nodes
            .get(id)
            .and_then(|node| node.kind.as_ref())
            .and_then(W::from_kind)
            .ok_or(Error::Busy)
    }

    /// Run `f` on `id` as kind `W`, with a context for the rest of the tree.
    pub(crate) fn with_widget<W: KindAccess, R>(
        &mut self,
        id: WidgetId,
        operation: &'static str,
        f: impl FnOnce(&mut W, &mut Cx<'_>) -> R,
    ) -> Result<R> {
        self.check_kind(id, W::TAG, operation)?;
        self.with_kind(id, |kind, cx| W::from_kind_mut(kind).map(|widget| f(widget, cx)))
            .flatten()
            .ok_or(Error::Busy)
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// What a running kind can reach: its own base, the rest of the tree and
/// the services.
pub(crate) struct Cx<'a> {
    tree: &'a mut WidgetTree,
    id: WidgetId,
}

impl Cx<'_> {
    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn base(&self) -> &WidgetBase {
        &self.tree.nodes[self.id].base
    }

    pub fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.tree.nodes[self.id].base
    }

    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.tree
    }

    pub fn text(&self) -> &TextService {
        &self.tree.text
    }

    pub fn palette(&self) -> &Palette {
        self.tree.text.palette()
    }

    pub fn now(&self) -> Duration {
        self.tree.clock.now()
    }

    pub fn caret_interval(&self) -> Duration {
        self.tree.caret_interval
    }

    /// Become the focus target, taking it from the parent.
    ///
    /// # Panics
    /// If the widget has no parent or the parent is not the focus target.
    pub fn take_focus(&mut self) {
        let id = self.id;
        let Some(parent) = self.base().parent else {
            panic!("{id:?} activated without a parent to take focus from");
        };

        let parent_node = &mut self.tree.nodes[parent];
        assert_eq!(
            parent_node.base.focus,
            FocusState::Target,
            "{parent:?} must own input to hand it to {id:?}",
        );
        parent_node.base.focus = FocusState::Child(id);
        if let Some(WidgetKind::Menu(menu)) = parent_node.kind.as_mut() {
            menu.follow_focus(id);
        }

        self.base_mut().focus = FocusState::Target;
        trace!("{:?} took focus from {:?}", id, parent);
    }

    /// Hand focus back to the parent, if there is one.
    ///
    /// # Panics
    /// If the parent does not delegate focus to this widget.
    pub fn pop_focus(&mut self) {
        let id = self.id;
        let Some(parent) = self.base().parent else {
            return;
        };

        let parent_base = &mut self.tree.nodes[parent].base;
        assert_eq!(
            parent_base.focus,
            FocusState::Child(id),
            "{parent:?} does not delegate focus to {id:?}",
        );
        parent_base.focus = FocusState::Target;

        self.base_mut().focus = FocusState::None;
        trace!("{:?} returned focus to {:?}", id, parent);
    }

    /// Lay out the parent once the current call returns.
    pub fn relayout_parent(&mut self) {
        if let Some(parent) = self.base().parent {
            self.tree.request_layout(parent);
        }
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::config::FontChoice;
    use crate::ui::core::FrozenClock;

    /// Configuration with the small font so widgets fit a mock display.
    pub fn small_config() -> ToolkitConfig {
        ToolkitConfig {
            normal_font: FontChoice::Font6x10,
            large_font: FontChoice::Font6x10,
            ..ToolkitConfig::default()
        }
    }

    pub fn tree() -> WidgetTree {
        WidgetTree::new(&small_config(), FrozenClock)
    }

    /// The 64x64 area of a [`embedded_graphics::mock_display::MockDisplay`].
    pub fn viewport() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(64, 64))
    }

    pub fn centre() -> Point {
        Point::new(32, 32)
    }

    /// Number of widgets currently owning input.
    pub fn targets(tree: &WidgetTree) -> usize {
        tree.nodes
            .values()
            .filter(|node| node.base.focus == FocusState::Target)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::ui::core::Key;
    use crate::ui::widgets::{Action, Menu, Position, Toggle};
    use alloc::vec;
    use core::cell::Cell;
    use embedded_graphics::mock_display::MockDisplay;

    fn key(tree: &mut WidgetTree, root: WidgetId, key: Key) -> bool {
        tree.input(root, &InputEvent::Key(key), viewport(), centre())
    }

    /// Root menu with a submenu holding one action.
    fn nested(tree: &mut WidgetTree) -> (WidgetId, WidgetId, WidgetId) {
        let root = Menu::create(tree, None, "Root").unwrap();
        let sub = Menu::create(tree, Some(root), "Sub").unwrap();
        Menu::add_entry(tree, root, sub, Position::End).unwrap();
        let action = Action::create(tree, Some(sub), "Go", None).unwrap();
        Menu::add_entry(tree, sub, action, Position::End).unwrap();
        tree.set_focus(root, true);
        (root, sub, action)
    }

    #[test]
    fn test_root_focus_toggles() {
        let mut tree = tree();
        let root = Menu::create(&mut tree, None, "Root").unwrap();
        assert_eq!(tree.focus_state(root), FocusState::None);

        tree.set_focus(root, true);
        assert_eq!(tree.focus_state(root), FocusState::Target);
        assert_eq!(tree.focus_target(root), Some(root));

        tree.set_focus(root, false);
        assert_eq!(tree.focus_state(root), FocusState::None);
        assert_eq!(tree.focus_target(root), None);
    }

    #[test]
    fn test_activate_submenu_moves_target_down() {
        let mut tree = tree();
        let (root, sub, _) = nested(&mut tree);

        tree.activate(sub);
        assert_eq!(tree.focus_state(root), FocusState::Child(sub));
        assert_eq!(tree.focus_state(sub), FocusState::Target);
        assert_eq!(tree.focus_target(root), Some(sub));
        assert_eq!(targets(&tree), 1);
    }

    #[test]
    fn test_clearing_root_clears_whole_chain() {
        let mut tree = tree();
        let (root, sub, _) = nested(&mut tree);
        tree.activate(sub);

        tree.set_focus(root, false);
        assert_eq!(tree.focus_state(root), FocusState::None);
        assert_eq!(tree.focus_state(sub), FocusState::None);
        assert_eq!(targets(&tree), 0);
    }

    #[test]
    fn test_single_target_across_navigation() {
        let mut tree = tree();
        let (root, sub, _) = nested(&mut tree);

        let sequence = [
            Key::Enter,
            Key::Left,
            Key::Right,
            Key::Down,
            Key::Left,
            Key::Space,
            Key::Up,
            Key::Left,
            Key::Left,
        ];
        for k in sequence {
            key(&mut tree, root, k);
            assert_eq!(targets(&tree), 1, "after {k:?}");
        }
        assert_eq!(tree.focus_target(root), Some(root));
        assert_eq!(tree.focus_state(sub), FocusState::None);
    }

    #[test]
    #[should_panic]
    fn test_focus_without_delegating_parent_panics() {
        let mut tree = tree();
        let (_, sub, _) = nested(&mut tree);
        // root is the target, it does not delegate to sub
        tree.set_focus(sub, true);
    }

    #[test]
    fn test_unfocused_widget_is_not_rendered() {
        let mut tree = tree();
        let root = Menu::create(&mut tree, None, "Root").unwrap();

        let mut display = MockDisplay::<Rgb565>::new();
        tree.render(root, &mut display, viewport(), centre()).unwrap();
        assert_eq!(display, MockDisplay::new());
    }

    #[test]
    fn test_disabled_widget_ignores_activate() {
        let mut tree = tree();
        let root = Menu::create(&mut tree, None, "Root").unwrap();
        let presses = Rc::new(Cell::new(0));
        let counter = presses.clone();
        let action = Action::create(
            &mut tree,
            Some(root),
            "Go",
            Some(Box::new(move || counter.set(counter.get() + 1))),
        )
        .unwrap();
        Menu::add_entry(&mut tree, root, action, Position::End).unwrap();

        tree.activate(action);
        tree.set_enabled(action, false);
        tree.activate(action);
        assert_eq!(presses.get(), 1);
        assert!(!tree.is_enabled(action));
    }

    #[test]
    fn test_destroy_is_recursive_and_detaches() {
        let mut tree = tree();
        let (root, sub, action) = nested(&mut tree);
        assert_eq!(tree.len(), 3);

        tree.destroy(sub);
        assert!(!tree.contains(sub));
        assert!(!tree.contains(action));
        assert_eq!(Menu::entries(&tree, root).unwrap(), vec![]);

        tree.destroy(root);
        assert!(tree.is_empty());

        // stale handles are inert
        tree.destroy(root);
        tree.activate(action);
        assert_eq!(tree.title(root), None);
        assert!(!tree.input(root, &InputEvent::Key(Key::Down), viewport(), centre()));
    }

    #[test]
    fn test_destroy_deep_and_wide_tree() {
        let mut tree = tree();
        let root = Menu::create(&mut tree, None, "Root").unwrap();
        let mut parent = root;
        for _ in 0..20 {
            let sub = Menu::create(&mut tree, Some(parent), "Sub").unwrap();
            Menu::add_entry(&mut tree, parent, sub, Position::End).unwrap();
            for _ in 0..5 {
                let action = Action::create(&mut tree, Some(sub), "Go", None).unwrap();
                Menu::add_entry(&mut tree, sub, action, Position::End).unwrap();
            }
            parent = sub;
        }
        let bystander = Menu::create(&mut tree, None, "Other").unwrap();
        assert_eq!(tree.len(), 1 + 20 * 6 + 1);

        tree.destroy(root);
        assert_eq!(tree.len(), 1);
        assert!(tree.contains(bystander));
    }

    #[test]
    fn test_destroying_focused_child_returns_focus() {
        let mut tree = tree();
        let (root, sub, _) = nested(&mut tree);
        tree.activate(sub);

        tree.destroy(sub);
        assert_eq!(tree.focus_state(root), FocusState::Target);
        assert_eq!(targets(&tree), 1);
    }

    #[test]
    fn test_wrong_kind_setter_is_rejected() {
        let mut tree = tree();
        let root = Menu::create(&mut tree, None, "Root").unwrap();

        let result = Toggle::set_value(&mut tree, root, true);
        assert!(matches!(
            result,
            Err(Error::WrongKind {
                expected: KindTag::Toggle,
                found: KindTag::Menu,
                ..
            })
        ));
    }

    #[test]
    fn test_title_and_detail() {
        let mut tree = tree();
        let (root, sub, action) = nested(&mut tree);

        assert_eq!(tree.title(root), Some("Root"));
        assert_eq!(
            tree.detail(sub, TextSize::Normal, Colour::Interface)
                .map(|text| text.content().to_string()),
            Some(">".to_string())
        );
        assert!(tree.detail(action, TextSize::Normal, Colour::Interface).is_none());
    }
}
