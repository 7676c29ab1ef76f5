use super::core::{Container, SingleChild};
use crate::error::{Result, TrellisError};
use crate::event::{EventFlow, UiEvent};
use crate::geometry::{Rect, Size};
use crate::host::{Context, Image, Surface, ThemeColor};
use crate::layout::Layout;
use crate::logging::{LogLevel, json_kv};
use crate::node::{Background, Node, NodeBase, NodeRef};

const TARGET: &str = "trellis::canvas";

/// Corner a watermark is pinned to. Both hug the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatermarkAnchor {
    TopRight,
    #[default]
    BottomRight,
}

impl WatermarkAnchor {
    /// Unrecognised names fall back to bottom-right.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "top-right" => Self::TopRight,
            _ => Self::BottomRight,
        }
    }
}

struct Watermark {
    image: Box<dyn Image>,
    anchor: WatermarkAnchor,
}

/// A container that paints a background and an unscaled watermark bitmap
/// beneath its children.
pub struct Canvas<L = SingleChild> {
    container: Container<L>,
    watermark: Option<Watermark>,
}

impl Default for Canvas<SingleChild> {
    fn default() -> Self {
        Self::new(SingleChild)
    }
}

impl Canvas<SingleChild> {
    /// Canvas used behind native controls: no inset, themed control
    /// background.
    pub fn control() -> Self {
        let mut canvas = Self::default();
        canvas.base_mut().background = Background::Theme(ThemeColor::ControlBackgroundNormal);
        canvas
    }
}

impl<L: Layout> Canvas<L> {
    pub fn new(layout: L) -> Self {
        Self {
            container: Container::new(layout),
            watermark: None,
        }
    }

    pub fn container(&self) -> &Container<L> {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container<L> {
        &mut self.container
    }

    pub fn has_watermark(&self) -> bool {
        self.watermark.is_some()
    }

    /// Replace the watermark with the bitmap called `name`.
    ///
    /// The previous bitmap is released before loading, so a failed load
    /// leaves the canvas without any watermark.
    pub fn set_watermark(
        &mut self,
        name: &str,
        anchor: WatermarkAnchor,
        cx: &Context<'_>,
    ) -> Result<()> {
        self.watermark = None;
        let Some(image) = cx.host.load_bitmap(name) else {
            cx.log_fields(
                LogLevel::Warn,
                TARGET,
                "watermark_load_failed",
                [json_kv("bitmap", name)],
            );
            return Err(TrellisError::BitmapLoad(name.to_string()));
        };
        self.watermark = Some(Watermark { image, anchor });
        cx.host.invalidate(self.pos());
        Ok(())
    }

    /// Where the watermark lands inside the current rectangle.
    pub fn watermark_rect(&self) -> Option<Rect> {
        let watermark = self.watermark.as_ref()?;
        let own = self.pos();
        let Size { width, height } = watermark.image.size();
        let top = match watermark.anchor {
            WatermarkAnchor::TopRight => own.y,
            WatermarkAnchor::BottomRight => own.bottom() - height,
        };
        Some(Rect::new(own.right() - width, top, width, height))
    }
}

impl<L: Layout> Node for Canvas<L> {
    fn base(&self) -> &NodeBase {
        self.container.base()
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        self.container.base_mut()
    }

    fn class_name(&self) -> &'static str {
        "Canvas"
    }

    fn set_pos(&mut self, rect: Rect, cx: &Context<'_>) {
        self.container.set_pos(rect, cx);
    }

    fn estimate_size(&mut self, available: Size) -> Size {
        self.container.estimate_size(available)
    }

    fn set_visible(&mut self, visible: bool) {
        self.container.set_visible(visible);
    }

    fn do_paint(&self, surface: &mut dyn Surface, dirty: Rect, cx: &Context<'_>) {
        let own = self.pos();
        if let Some(fill) = dirty.intersect(&own) {
            self.base().paint_background(surface, fill, cx);
        }

        if let (Some(watermark), Some(target)) = (self.watermark.as_ref(), self.watermark_rect()) {
            if dirty.intersects(&target) {
                surface.push_clip(own);
                surface.draw_image(watermark.image.as_ref(), target);
                surface.pop_clip();
            }
        }

        // Background already painted above.
        self.container.core.paint(surface, dirty, cx, false);
    }

    fn event(&mut self, event: &UiEvent, cx: &Context<'_>) -> EventFlow {
        self.container.event(event, cx)
    }

    fn set_attribute(&mut self, name: &str, value: &str, cx: &Context<'_>) -> Result<()> {
        if name != "watermark" {
            return self.container.set_attribute(name, value, cx);
        }
        let (bitmap, anchor) = match value.split_once(',') {
            Some((bitmap, anchor)) => (bitmap.trim(), WatermarkAnchor::from_name(anchor)),
            None => (value.trim(), WatermarkAnchor::default()),
        };
        self.set_watermark(bitmap, anchor, cx)
    }

    fn children(&self) -> &[NodeRef] {
        self.container.children()
    }

    fn release(&mut self) {
        self.watermark = None;
        self.container.release();
    }
}
