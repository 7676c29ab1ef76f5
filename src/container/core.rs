use std::rc::Rc;

use crate::error::{Result, TrellisError};
use crate::event::{EventFlow, UiEvent};
use crate::geometry::{Insets, Point, Rect, Size};
use crate::host::{Context, ScrollbarPeer, Surface};
use crate::layout::Layout;
use crate::logging::{LogLevel, json_kv};
use crate::metrics::LayoutMetrics;
use crate::node::{FindFlags, Node, NodeBase, NodeRef, parse_bool, parse_int};

const TARGET: &str = "trellis::container";

/// Who is responsible for a child's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// The container releases children when they are removed, cleared or
    /// when the container itself is dropped.
    #[default]
    Owned,
    /// Children are only referenced; removal just detaches them.
    Borrowed,
}

/// Everything a container holds apart from its layout strategy.
///
/// Layouts receive this by `&mut` while arranging, which keeps the child
/// list and scroll state borrowable independently of the layout's own state.
pub struct ContainerCore {
    pub(crate) base: NodeBase,
    items: Vec<NodeRef>,
    inset: Insets,
    padding: i32,
    fixed: Size,
    ownership: Ownership,
    pub(super) scroll_pos: i32,
    pub(super) scrollbar: Option<Box<dyn ScrollbarPeer>>,
    pub(super) allow_scrollbar: bool,
    pub(super) relayout: bool,
}

impl Default for ContainerCore {
    fn default() -> Self {
        Self {
            base: NodeBase::default(),
            items: Vec::new(),
            inset: Insets::default(),
            padding: 0,
            fixed: Size::default(),
            ownership: Ownership::Owned,
            scroll_pos: 0,
            scrollbar: None,
            allow_scrollbar: false,
            relayout: false,
        }
    }
}

impl ContainerCore {
    pub fn items(&self) -> &[NodeRef] {
        &self.items
    }

    /// Visible children in paint order.
    pub fn visible_items(&self) -> Vec<NodeRef> {
        self.items
            .iter()
            .filter(|item| item.borrow().is_visible())
            .cloned()
            .collect()
    }

    pub fn inset(&self) -> Insets {
        self.inset
    }

    pub fn padding(&self) -> i32 {
        self.padding
    }

    /// Configured size hint; 0 on an axis means "size to the parent".
    pub fn fixed_size(&self) -> Size {
        self.fixed
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn scroll_pos(&self) -> i32 {
        self.scroll_pos
    }

    /// Width taken from the viewport by a visible scrollbar, else 0.
    pub fn scrollbar_gutter(&self, cx: &Context<'_>) -> i32 {
        if self.is_scroll_visible() {
            cx.host.metrics().scrollbar_width
        } else {
            0
        }
    }

    /// Ask the owning container to lay out again once the current pass ends.
    pub fn request_relayout(&mut self) {
        self.relayout = true;
    }

    pub(crate) fn paint(
        &self,
        surface: &mut dyn Surface,
        dirty: Rect,
        cx: &Context<'_>,
        with_background: bool,
    ) {
        let own = self.base.rect;
        let Some(visible_dirty) = dirty.intersect(&own) else {
            return;
        };

        surface.push_clip(own);
        if with_background {
            self.base.paint_background(surface, visible_dirty, cx);
        }

        let mut painted = 0;
        let mut culled = 0;
        for item in &self.items {
            let child = item.borrow();
            if !child.is_visible() {
                continue;
            }
            let pos = child.pos();
            if !dirty.intersects(&pos) || !own.intersects(&pos) {
                culled += 1;
                continue;
            }
            child.do_paint(surface, dirty, cx);
            painted += 1;
        }
        surface.pop_clip();

        cx.record(|m| m.record_paint(painted, culled));
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "inset" => self.inset = Insets::uniform(parse_int(name, value)?),
            "padding" => self.padding = parse_int(name, value)?,
            "width" => self.fixed.width = parse_int(name, value)?,
            "height" => self.fixed.height = parse_int(name, value)?,
            "scrollbar" => self.enable_scrollbar(parse_bool(name, value)?),
            _ => return self.base.set_attribute(name, value),
        }
        Ok(())
    }

    pub(super) fn enable_scrollbar(&mut self, enable: bool) {
        if self.allow_scrollbar == enable {
            return;
        }
        self.scroll_pos = 0;
        self.allow_scrollbar = enable;
        if let Some(bar) = self.scrollbar.as_mut() {
            bar.set_position(0);
            if !enable {
                bar.set_range_max(0);
                bar.set_visible(false);
            }
        }
    }

    fn release_all(&mut self) {
        let items = std::mem::take(&mut self.items);
        if self.ownership == Ownership::Owned {
            for item in &items {
                release(item);
            }
        }
    }
}

impl Drop for ContainerCore {
    fn drop(&mut self) {
        self.release_all();
    }
}

fn release(node: &NodeRef) {
    if let Ok(mut node) = node.try_borrow_mut() {
        node.release();
    }
}

/// Depth-first search through `nodes` and their descendants.
///
/// Returns the first node accepted by `predicate` that also passes the
/// visibility, enablement and hit-test filters named in `flags`. A node
/// rejected by a filter is skipped together with its subtree.
pub fn find_control(
    nodes: &[NodeRef],
    flags: FindFlags,
    point: Point,
    predicate: &mut dyn FnMut(&dyn Node) -> bool,
) -> Option<NodeRef> {
    for item in nodes {
        let node = item.borrow();
        if flags.contains(FindFlags::VISIBLE) && !node.is_visible() {
            continue;
        }
        if flags.contains(FindFlags::ENABLED) && !node.is_enabled() {
            continue;
        }
        if flags.contains(FindFlags::HIT_TEST) && !node.pos().contains(point) {
            continue;
        }
        if flags.contains(FindFlags::ME_FIRST) && predicate(&*node) {
            return Some(Rc::clone(item));
        }
        if let Some(found) = find_control(node.children(), flags, point, predicate) {
            return Some(found);
        }
        if !flags.contains(FindFlags::ME_FIRST) && predicate(&*node) {
            return Some(Rc::clone(item));
        }
    }
    None
}

/// Layout of the plain container: one child filling the inset area.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleChild;

impl Layout for SingleChild {
    fn class_name(&self) -> &'static str {
        "Container"
    }

    fn arrange(&mut self, core: &mut ContainerCore, rect: Rect, cx: &Context<'_>) {
        let Some(first) = core.items().first() else {
            return;
        };
        debug_assert_eq!(
            core.items().len(),
            1,
            "a plain container positions exactly one child"
        );
        first.borrow_mut().set_pos(rect.deflate(core.inset()), cx);
    }
}

/// A node holding an ordered list of children positioned by `L`.
pub struct Container<L = SingleChild> {
    pub(super) core: ContainerCore,
    pub(super) layout: L,
}

impl Default for Container<SingleChild> {
    fn default() -> Self {
        Self::new(SingleChild)
    }
}

impl<L: Layout> Container<L> {
    pub fn new(layout: L) -> Self {
        Self {
            core: ContainerCore::default(),
            layout,
        }
    }

    pub fn with_inset(mut self, inset: Insets) -> Self {
        self.core.inset = inset;
        self
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.core.padding = padding;
        self
    }

    pub fn with_ownership(mut self, ownership: Ownership) -> Self {
        self.core.ownership = ownership;
        self
    }

    pub fn core(&self) -> &ContainerCore {
        &self.core
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    pub fn item(&self, index: usize) -> Option<NodeRef> {
        self.core.items.get(index).cloned()
    }

    pub fn count(&self) -> usize {
        self.core.items.len()
    }

    /// Append `node`. Returns `false` if it is already a child.
    pub fn add(&mut self, node: NodeRef, cx: &Context<'_>) -> bool {
        if self.core.items.iter().any(|item| Rc::ptr_eq(item, &node)) {
            return false;
        }
        self.core.items.push(node);
        cx.host.request_layout();
        true
    }

    /// Remove the first entry that is `node`, releasing it when owned.
    ///
    /// Both ownership modes request a relayout so detached children never
    /// leave stale geometry behind.
    pub fn remove(&mut self, node: &NodeRef, cx: &Context<'_>) -> bool {
        let Some(index) = self.core.items.iter().position(|item| Rc::ptr_eq(item, node)) else {
            return false;
        };
        let removed = self.core.items.remove(index);
        self.layout.detach(&removed);
        if self.core.ownership == Ownership::Owned {
            release(&removed);
        }
        cx.host.request_layout();
        true
    }

    pub fn remove_all(&mut self, cx: &Context<'_>) {
        for item in &self.core.items {
            self.layout.detach(item);
        }
        self.core.release_all();
        self.core.scroll_pos = 0;
        if let Some(bar) = self.core.scrollbar.as_mut() {
            bar.set_position(0);
        }
        cx.host.request_layout();
    }

    pub fn set_ownership(&mut self, ownership: Ownership) {
        self.core.ownership = ownership;
    }

    pub fn set_auto_destroy(&mut self, auto: bool) {
        self.core.ownership = if auto {
            Ownership::Owned
        } else {
            Ownership::Borrowed
        };
    }

    pub fn set_inset(&mut self, inset: Insets) {
        self.core.inset = inset;
    }

    pub fn set_padding(&mut self, padding: i32) {
        self.core.padding = padding;
    }

    pub fn set_width(&mut self, width: i32) {
        self.core.fixed.width = width;
    }

    pub fn set_height(&mut self, height: i32) {
        self.core.fixed.height = height;
    }

    /// Permit a scrollbar to appear on overflow. Toggling resets the
    /// scroll position to 0.
    pub fn enable_scrollbar(&mut self, enable: bool) {
        self.core.enable_scrollbar(enable);
    }

    /// Index of the first visible, enabled, selectable child scanning from
    /// `start` (clamped into range) in the given direction.
    ///
    /// A backward scan that finds nothing restarts forward from index 0.
    pub fn find_selectable(&self, start: i32, forward: bool) -> Option<usize> {
        let count = self.count();
        if count == 0 {
            return None;
        }
        let start = start.clamp(0, count as i32 - 1) as usize;
        let selectable = |index: &usize| {
            let node = self.core.items[*index].borrow();
            node.as_selectable().is_some() && node.is_visible() && node.is_enabled()
        };
        if forward {
            (start..count).find(selectable)
        } else {
            (0..=start)
                .rev()
                .find(selectable)
                .or_else(|| self.find_selectable(0, true))
        }
    }

    /// See [`find_control`]; searches this container's descendants.
    pub fn find_control(
        &self,
        flags: FindFlags,
        point: Point,
        predicate: &mut dyn FnMut(&dyn Node) -> bool,
    ) -> Option<NodeRef> {
        find_control(&self.core.items, flags, point, predicate)
    }

    /// Run the layout, repeating while the pass itself asked for another
    /// one (a scrollbar appeared or the scroll position was reset).
    pub(super) fn run_layout(&mut self, rect: Rect, cx: &Context<'_>) {
        self.core.base.rect = rect;
        let mut passes = 0;
        loop {
            self.core.relayout = false;
            self.layout.arrange(&mut self.core, rect, cx);
            cx.record(LayoutMetrics::record_layout);
            passes += 1;
            if !self.core.relayout || passes >= cx.config.max_layout_passes {
                break;
            }
            cx.record(LayoutMetrics::record_nested_layout);
        }
        cx.log_fields(
            LogLevel::Trace,
            TARGET,
            "layout",
            [
                json_kv("class", self.layout.class_name()),
                json_kv("children", self.core.items.len()),
                json_kv("passes", passes),
            ],
        );
    }
}

impl<L: Layout> Node for Container<L> {
    fn base(&self) -> &NodeBase {
        &self.core.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.core.base
    }

    fn class_name(&self) -> &'static str {
        self.layout.class_name()
    }

    fn set_pos(&mut self, rect: Rect, cx: &Context<'_>) {
        self.run_layout(rect, cx);
    }

    fn estimate_size(&mut self, available: Size) -> Size {
        self.layout.estimate_size(&self.core, available)
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(bar) = self.core.scrollbar.as_mut() {
            bar.set_visible(visible);
        }
        for item in &self.core.items {
            item.borrow_mut().set_visible(visible);
        }
        self.core.base.visible = visible;
    }

    fn do_paint(&self, surface: &mut dyn Surface, dirty: Rect, cx: &Context<'_>) {
        self.core.paint(surface, dirty, cx, true);
    }

    fn event(&mut self, event: &UiEvent, cx: &Context<'_>) -> EventFlow {
        self.scroll_event(event, cx)
    }

    fn set_attribute(&mut self, name: &str, value: &str, cx: &Context<'_>) -> Result<()> {
        match self.layout.set_attribute(name, value, cx) {
            Err(TrellisError::UnknownAttribute(_)) => self.core.set_attribute(name, value),
            handled => handled,
        }
    }

    fn children(&self) -> &[NodeRef] {
        &self.core.items
    }

    fn release(&mut self) {
        for item in &self.core.items {
            self.layout.detach(item);
        }
        self.core.release_all();
        self.core.scrollbar = None;
    }
}
