//! Services a container tree consumes from its owning manager.
//!
//! Nothing here is global: the manager hands a [`Context`] to every layout,
//! paint, event and mutation call.

mod core;
mod scrollbar;
mod surface;

pub use core::{Color, Context, Host, SystemMetrics, ThemeColor};
pub use scrollbar::{ScrollbarPeer, VirtualScrollbar};
pub use surface::{Image, Surface};
