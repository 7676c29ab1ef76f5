use std::rc::Rc;

use super::strategy::Layout;
use crate::container::{Container, ContainerCore};
use crate::geometry::{Rect, Size};
use crate::host::Context;
use crate::logging::{LogLevel, json_kv};
use crate::node::NodeRef;

const TARGET: &str = "trellis::layout.dialog";

bitflags::bitflags! {
    /// How one dialog child reacts when the dialog grows past its authored
    /// size.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StretchFlags: u8 {
        const MOVE_X = 1 << 0;
        const MOVE_Y = 1 << 1;
        const SIZE_X = 1 << 2;
        const SIZE_Y = 1 << 3;
        /// Start a new group with its own stretch increment.
        const NEW_GROUP = 1 << 4;
        /// Restart the move offset while keeping the group's increment.
        const NEW_LINE = 1 << 5;
    }
}

impl StretchFlags {
    pub const SIZE: Self = Self::SIZE_X.union(Self::SIZE_Y);

    /// Flag for one markup token such as `"size-x"`.
    pub fn from_markup(name: &str) -> Option<Self> {
        match name.trim() {
            "move-x" => Some(Self::MOVE_X),
            "move-y" => Some(Self::MOVE_Y),
            "size-x" => Some(Self::SIZE_X),
            "size-y" => Some(Self::SIZE_Y),
            "new-group" => Some(Self::NEW_GROUP),
            "new-line" => Some(Self::NEW_LINE),
            _ => None,
        }
    }
}

struct StretchEntry {
    node: NodeRef,
    flags: StretchFlags,
    /// Authored rectangle, relative to the dialog bounds once captured.
    original: Rect,
}

/// Authored geometry is read from the children exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Snapshot {
    Pending,
    Captured { bounds: Rect },
}

/// Children keep the rectangles they were authored with and stretch by
/// groups when the dialog is larger than its authored size.
pub struct Dialog {
    entries: Vec<StretchEntry>,
    snapshot: Snapshot,
}

impl Default for Dialog {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            snapshot: Snapshot::Pending,
        }
    }
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` with explicit stretch behaviour, snapshotting its
    /// current rectangle.
    ///
    /// Registering the same node again keeps its place in the order and
    /// replaces its flags. Its rectangle is re-read only while the dialog
    /// is still uncaptured; captured rectangles never change.
    pub fn set_stretch_mode(&mut self, node: &NodeRef, flags: StretchFlags) {
        let mut original = node.borrow().pos();
        let captured = match self.snapshot {
            Snapshot::Captured { bounds } => {
                original = original.offset(-bounds.x, -bounds.y);
                true
            }
            Snapshot::Pending => false,
        };
        match self.entries.iter_mut().find(|e| Rc::ptr_eq(&e.node, node)) {
            Some(entry) => {
                entry.flags = flags;
                if !captured {
                    entry.original = original;
                }
            }
            None => self.entries.push(StretchEntry {
                node: Rc::clone(node),
                flags,
                original,
            }),
        }
    }

    pub fn stretch_mode(&self, node: &NodeRef) -> Option<StretchFlags> {
        self.entries
            .iter()
            .find(|e| Rc::ptr_eq(&e.node, node))
            .map(|e| e.flags)
    }

    pub fn is_captured(&self) -> bool {
        matches!(self.snapshot, Snapshot::Captured { .. })
    }

    /// Authored extent of the dialog, capturing it on first use.
    pub fn authored_size(&mut self, core: &ContainerCore) -> Size {
        self.bounds(core).size()
    }

    fn bounds(&mut self, core: &ContainerCore) -> Rect {
        match self.snapshot {
            Snapshot::Captured { bounds } => bounds,
            Snapshot::Pending => {
                let bounds = self.capture(core);
                self.snapshot = Snapshot::Captured { bounds };
                bounds
            }
        }
    }

    fn capture(&mut self, core: &ContainerCore) -> Rect {
        for item in core.items() {
            if self.stretch_mode(item).is_none() {
                self.set_stretch_mode(item, StretchFlags::NEW_GROUP);
            }
        }
        let bounds = core
            .items()
            .iter()
            .map(|item| item.borrow().pos())
            .reduce(|acc, pos| acc.union(&pos))
            .unwrap_or_default();
        for entry in &mut self.entries {
            entry.original = entry.original.offset(-bounds.x, -bounds.y);
        }
        bounds
    }

    /// Number of sizing entries following `leader`, counted up to the next
    /// group or line marker. The leader itself is not counted. Never 0.
    fn group_sizers(&self, leader: usize) -> i32 {
        let sizers = self.entries[leader + 1..]
            .iter()
            .take_while(|e| {
                !e.flags
                    .intersects(StretchFlags::NEW_GROUP | StretchFlags::NEW_LINE)
            })
            .filter(|e| e.flags.intersects(StretchFlags::SIZE))
            .count() as i32;
        sizers.max(1)
    }
}

impl Container<Dialog> {
    pub fn dialog() -> Self {
        Container::new(Dialog::new())
    }

    pub fn set_stretch_mode(&mut self, node: &NodeRef, flags: StretchFlags) {
        self.layout_mut().set_stretch_mode(node, flags);
    }
}

impl Layout for Dialog {
    fn class_name(&self) -> &'static str {
        "DialogLayout"
    }

    fn arrange(&mut self, core: &mut ContainerCore, rect: Rect, cx: &Context<'_>) {
        let first = !self.is_captured();
        let bounds = self.bounds(core);
        if first {
            cx.log_fields(
                LogLevel::Debug,
                TARGET,
                "dialog_captured",
                [
                    json_kv("entries", self.entries.len()),
                    json_kv("width", bounds.width),
                    json_kv("height", bounds.height),
                ],
            );
        }

        core.process_scrollbar(rect, bounds.height, cx);
        let mut area = rect;
        area.width = (area.width - core.scrollbar_gutter(cx)).max(0);

        let grow_x = (area.width - bounds.width).max(0);
        let grow_y = (area.height - bounds.height).max(0);
        let origin_x = area.x;
        let origin_y = area.y - core.scroll_pos();

        let (mut stretch_x, mut stretch_y) = (0, 0);
        let (mut move_x, mut move_y) = (0, 0);
        for (index, entry) in self.entries.iter().enumerate() {
            if index == 0 || entry.flags.contains(StretchFlags::NEW_GROUP) {
                let sizers = self.group_sizers(index);
                stretch_x = grow_x / sizers;
                stretch_y = grow_y / sizers;
                move_x = 0;
                move_y = 0;
            }
            if entry.flags.contains(StretchFlags::NEW_LINE) {
                move_x = 0;
                move_y = 0;
            }

            let mut pos = entry.original.offset(origin_x, origin_y);
            if entry.flags.contains(StretchFlags::MOVE_X) {
                pos.x += move_x;
            }
            if entry.flags.contains(StretchFlags::MOVE_Y) {
                pos.y += move_y;
            }
            if entry.flags.contains(StretchFlags::SIZE_X) {
                pos.width += stretch_x;
            }
            if entry.flags.contains(StretchFlags::SIZE_Y) {
                pos.height += stretch_y;
            }
            if entry.flags.intersects(StretchFlags::SIZE) {
                move_x += stretch_x;
                move_y += stretch_y;
            }
            entry.node.borrow_mut().set_pos(pos, cx);
        }
    }

    fn estimate_size(&mut self, core: &ContainerCore, _available: Size) -> Size {
        self.authored_size(core)
    }

    fn detach(&mut self, node: &NodeRef) {
        self.entries.retain(|e| !Rc::ptr_eq(&e.node, node));
    }
}
