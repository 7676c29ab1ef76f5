use crate::container::ContainerCore;
use crate::error::{Result, TrellisError};
use crate::geometry::{Rect, Size};
use crate::host::Context;
use crate::node::NodeRef;

/// A positioning algorithm plugged into a [`Container`](crate::Container).
pub trait Layout {
    fn class_name(&self) -> &'static str;

    /// Position the children of `core` inside `rect`.
    ///
    /// `rect` is the container's full rectangle; insets, scroll offset and
    /// scrollbar reconciliation are the layout's responsibility.
    fn arrange(&mut self, core: &mut ContainerCore, rect: Rect, cx: &Context<'_>);

    fn estimate_size(&mut self, core: &ContainerCore, _available: Size) -> Size {
        core.fixed_size()
    }

    /// Layout-specific attributes. Unknown names fall through to the
    /// container.
    fn set_attribute(&mut self, name: &str, _value: &str, _cx: &Context<'_>) -> Result<()> {
        Err(TrellisError::UnknownAttribute(name.to_string()))
    }

    /// `node` left the container; drop any state kept for it.
    fn detach(&mut self, _node: &NodeRef) {}
}
