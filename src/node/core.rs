use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, TrellisError};
use crate::event::{EventFlow, UiEvent};
use crate::geometry::{Rect, Size};
use crate::host::{Color, Context, Surface, ThemeColor};

/// Shared handle to a node in the tree. Identity is pointer identity.
pub type NodeRef = Rc<RefCell<dyn Node>>;

/// Wrap a node into a tree handle.
pub fn node_ref<N: Node + 'static>(node: N) -> NodeRef {
    Rc::new(RefCell::new(node))
}

/// How a node fills its own rectangle before children are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Transparent,
    Solid(Color),
    Theme(ThemeColor),
}

bitflags::bitflags! {
    /// Filters applied while walking the tree in `find_control`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FindFlags: u8 {
        const VISIBLE = 1 << 0;
        const ENABLED = 1 << 1;
        const HIT_TEST = 1 << 2;
        /// Test a node before its children rather than after.
        const ME_FIRST = 1 << 3;
    }
}

/// Capability of items that can be picked in lists and combos.
pub trait Selectable {
    fn is_selected(&self) -> bool;
    fn set_selected(&mut self, selected: bool);
}

/// State every node carries: rectangle, flags and background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBase {
    pub rect: Rect,
    pub visible: bool,
    pub enabled: bool,
    pub background: Background,
}

impl Default for NodeBase {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            visible: true,
            enabled: true,
            background: Background::Transparent,
        }
    }
}

impl NodeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes understood by every node: `visible`, `enabled`, `bkcolor`
    /// and `pos` (`left,top,right,bottom`).
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "pos" => self.rect = parse_rect(name, value)?,
            "visible" => self.visible = parse_bool(name, value)?,
            "enabled" => self.enabled = parse_bool(name, value)?,
            "bkcolor" => self.background = parse_background(name, value)?,
            _ => return Err(TrellisError::UnknownAttribute(name.to_string())),
        }
        Ok(())
    }

    /// Fill `area` with the background. Transparent backgrounds paint nothing.
    pub fn paint_background(&self, surface: &mut dyn Surface, area: Rect, cx: &Context<'_>) {
        let color = match self.background {
            Background::Transparent => return,
            Background::Solid(color) => color,
            Background::Theme(theme) => cx.host.theme_color(theme),
        };
        surface.fill_rect(area, color);
    }
}

pub(crate) fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(TrellisError::invalid(name, value)),
    }
}

pub(crate) fn parse_int(name: &str, value: &str) -> Result<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| TrellisError::invalid(name, value))
}

fn parse_rect(name: &str, value: &str) -> Result<Rect> {
    let edges = value
        .split(',')
        .map(|part| parse_int(name, part))
        .collect::<Result<Vec<_>>>()?;
    match edges[..] {
        [left, top, right, bottom] => Ok(Rect::from_edges(left, top, right, bottom)),
        _ => Err(TrellisError::invalid(name, value)),
    }
}

fn parse_background(name: &str, value: &str) -> Result<Background> {
    if value == "transparent" {
        return Ok(Background::Transparent);
    }
    if let Some(color) = Color::parse_hex(value) {
        return Ok(Background::Solid(color));
    }
    ThemeColor::from_name(value)
        .map(Background::Theme)
        .ok_or_else(|| TrellisError::invalid(name, value))
}

/// A positioned, paintable element of the visual tree.
pub trait Node {
    fn base(&self) -> &NodeBase;

    fn base_mut(&mut self) -> &mut NodeBase;

    fn class_name(&self) -> &'static str;

    fn pos(&self) -> Rect {
        self.base().rect
    }

    fn set_pos(&mut self, rect: Rect, _cx: &Context<'_>) {
        self.base_mut().rect = rect;
    }

    /// Preferred size given the space on offer. A zero component means
    /// "expand to whatever the parent decides".
    fn estimate_size(&mut self, available: Size) -> Size;

    fn is_visible(&self) -> bool {
        self.base().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.base_mut().visible = visible;
    }

    fn is_enabled(&self) -> bool {
        self.base().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().enabled = enabled;
    }

    fn do_paint(&self, surface: &mut dyn Surface, dirty: Rect, cx: &Context<'_>);

    fn event(&mut self, _event: &UiEvent, _cx: &Context<'_>) -> EventFlow {
        EventFlow::Continue
    }

    fn set_attribute(&mut self, name: &str, value: &str, _cx: &Context<'_>) -> Result<()> {
        self.base_mut().set_attribute(name, value)
    }

    fn as_selectable(&self) -> Option<&dyn Selectable> {
        None
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        None
    }

    /// Children for tree traversal. Leaves have none.
    fn children(&self) -> &[NodeRef] {
        &[]
    }

    /// Called once by an owning container when the node is destroyed.
    fn release(&mut self) {}
}
