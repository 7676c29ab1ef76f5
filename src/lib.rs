//! Retained-mode container and layout engine.
//!
//! A tree of [`Node`]s is positioned by containers that each plug in a
//! [`Layout`]: vertical and horizontal stacks, a tile grid and a dialog
//! layout that stretches authored geometry by groups. Containers own their
//! children, scroll vertically on overflow and paint with dirty-rectangle
//! culling. Everything the tree needs from its window manager arrives via
//! an explicit [`Context`].

pub mod config;
pub mod container;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod logging;
pub mod markup;
pub mod metrics;
pub mod node;

#[cfg(test)]
mod testing;

pub use config::EngineConfig;
pub use container::{
    Canvas, Container, ContainerCore, Ownership, SingleChild, WatermarkAnchor, find_control,
};
pub use error::{Result, TrellisError};
pub use event::{EventFlow, ScrollAction, UiEvent};
pub use geometry::{Insets, Point, Rect, Size};
pub use host::{
    Color, Context, Host, Image, ScrollbarPeer, Surface, SystemMetrics, ThemeColor,
    VirtualScrollbar,
};
pub use layout::{
    Axis, Dialog, DialogLayout, Layout, Stack, StackLayout, StretchFlags, Tile, TileLayout,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use markup::NodeSpec;
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use node::{Background, FindFlags, Leaf, Node, NodeBase, NodeRef, Selectable, node_ref};
