//! Containers: ordered child collections with scroll state.
//!
//! [`Container`] is generic over the [`Layout`](crate::layout::Layout) that
//! positions its children; the plain container wraps exactly one child.

mod canvas;
mod core;
mod scroll;

pub use canvas::{Canvas, WatermarkAnchor};
pub use core::{Container, ContainerCore, Ownership, SingleChild, find_control};
