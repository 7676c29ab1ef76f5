use super::core::{Node, NodeBase, Selectable, parse_bool, parse_int};
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::host::{Context, Surface};

/// A childless node with a fixed preferred size.
///
/// Zero on an axis makes it adjustable in stack layouts. With `selectable`
/// set it also behaves as a list item.
#[derive(Debug, Clone, Default)]
pub struct Leaf {
    base: NodeBase,
    preferred: Size,
    selectable: bool,
    selected: bool,
}

impl Leaf {
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            ..Self::default()
        }
    }

    /// Fills whatever space the parent gives it.
    pub fn expanding() -> Self {
        Self::default()
    }

    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    pub fn at(mut self, rect: Rect) -> Self {
        self.base.rect = rect;
        self
    }

    pub fn preferred(&self) -> Size {
        self.preferred
    }

    pub fn set_preferred(&mut self, preferred: Size) {
        self.preferred = preferred;
    }
}

impl Node for Leaf {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn class_name(&self) -> &'static str {
        "Leaf"
    }

    fn estimate_size(&mut self, _available: Size) -> Size {
        self.preferred
    }

    fn do_paint(&self, surface: &mut dyn Surface, dirty: Rect, cx: &Context<'_>) {
        if let Some(area) = dirty.intersect(&self.base.rect) {
            self.base.paint_background(surface, area, cx);
        }
    }

    fn set_attribute(&mut self, name: &str, value: &str, _cx: &Context<'_>) -> Result<()> {
        match name {
            "width" => self.preferred.width = parse_int(name, value)?,
            "height" => self.preferred.height = parse_int(name, value)?,
            "selectable" => self.selectable = parse_bool(name, value)?,
            _ => return self.base.set_attribute(name, value),
        }
        Ok(())
    }

    fn as_selectable(&self) -> Option<&dyn Selectable> {
        self.selectable.then_some(self as &dyn Selectable)
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        if self.selectable {
            Some(self)
        } else {
            None
        }
    }
}

impl Selectable for Leaf {
    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
