//! Recording doubles for the host, the paint surface and tree nodes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::geometry::{Rect, Size};
use crate::host::{Color, Host, Image, ScrollbarPeer, Surface, ThemeColor, VirtualScrollbar};
use crate::node::{Node, NodeBase};

/// Host that counts what the tree asks of it.
#[derive(Default)]
pub(crate) struct TestHost {
    bitmaps: HashMap<String, Size>,
    live_bitmaps: Rc<Cell<usize>>,
    refuse_scrollbars: bool,
    scrollbars_created: Cell<usize>,
    layout_requests: Cell<usize>,
    invalidations: RefCell<Vec<Rect>>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn refusing_scrollbars(mut self) -> Self {
        self.refuse_scrollbars = true;
        self
    }

    pub(crate) fn with_bitmap(mut self, name: &str, size: Size) -> Self {
        self.bitmaps.insert(name.to_string(), size);
        self
    }

    pub(crate) fn layout_requests(&self) -> usize {
        self.layout_requests.get()
    }

    pub(crate) fn scrollbars_created(&self) -> usize {
        self.scrollbars_created.get()
    }

    /// Bitmaps loaded and not yet dropped.
    pub(crate) fn live_bitmaps(&self) -> usize {
        self.live_bitmaps.get()
    }

    pub(crate) fn invalidations(&self) -> Vec<Rect> {
        self.invalidations.borrow().clone()
    }
}

impl Host for TestHost {
    fn theme_color(&self, color: ThemeColor) -> Color {
        match color {
            ThemeColor::WindowBackground => Color::rgb(0xf0, 0xf0, 0xf0),
            ThemeColor::DialogBackground => Color::rgb(0xe0, 0xe0, 0xe0),
            ThemeColor::ControlBackgroundNormal => Color::rgb(0xff, 0xff, 0xff),
            ThemeColor::ControlBackgroundHover => Color::rgb(0xd0, 0xe8, 0xff),
            ThemeColor::ControlBackgroundDisabled => Color::rgb(0xc0, 0xc0, 0xc0),
        }
    }

    fn create_scrollbar(&self) -> Option<Box<dyn ScrollbarPeer>> {
        if self.refuse_scrollbars {
            return None;
        }
        self.scrollbars_created.set(self.scrollbars_created.get() + 1);
        Some(Box::new(VirtualScrollbar::default()))
    }

    fn load_bitmap(&self, name: &str) -> Option<Box<dyn Image>> {
        let size = *self.bitmaps.get(name)?;
        self.live_bitmaps.set(self.live_bitmaps.get() + 1);
        Some(Box::new(TestImage {
            size,
            live: Rc::clone(&self.live_bitmaps),
        }))
    }

    fn invalidate(&self, rect: Rect) {
        self.invalidations.borrow_mut().push(rect);
    }

    fn request_layout(&self) {
        self.layout_requests.set(self.layout_requests.get() + 1);
    }
}

struct TestImage {
    size: Size,
    live: Rc<Cell<usize>>,
}

impl Image for TestImage {
    fn size(&self) -> Size {
        self.size
    }
}

impl Drop for TestImage {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PaintOp {
    Fill(Rect, Color),
    PushClip(Rect),
    PopClip,
    Image(Rect),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) ops: Vec<PaintOp>,
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(PaintOp::Fill(rect, color));
    }

    fn draw_image(&mut self, _image: &dyn Image, rect: Rect) {
        self.ops.push(PaintOp::Image(rect));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ops.push(PaintOp::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.ops.push(PaintOp::PopClip);
    }
}

/// Leaf that reports how often it was released.
pub(crate) struct Tracked {
    base: NodeBase,
    preferred: Size,
    released: Rc<Cell<usize>>,
}

impl Tracked {
    pub(crate) fn new(preferred: Size) -> (Self, Rc<Cell<usize>>) {
        let released = Rc::new(Cell::new(0));
        let tracked = Self {
            base: NodeBase::default(),
            preferred,
            released: Rc::clone(&released),
        };
        (tracked, released)
    }
}

impl Node for Tracked {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn class_name(&self) -> &'static str {
        "Tracked"
    }

    fn estimate_size(&mut self, _available: Size) -> Size {
        self.preferred
    }

    fn do_paint(&self, _surface: &mut dyn Surface, _dirty: Rect, _cx: &crate::host::Context<'_>) {}

    fn release(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}
