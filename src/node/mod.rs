//! The visual node contract shared by leaves, containers and layouts.

mod core;
mod leaf;

pub use core::{Background, FindFlags, Node, NodeBase, NodeRef, Selectable, node_ref};
pub use leaf::Leaf;

pub(crate) use core::{parse_bool, parse_int};
