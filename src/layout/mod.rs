//! Layout module orchestrator.
//!
//! Each strategy turns a container's child list and available rectangle
//! into final child rectangles; containers pick one through their type
//! parameter.

mod dialog;
mod stack;
mod strategy;
mod tile;

pub use dialog::{Dialog, StretchFlags};
pub use stack::{Axis, Stack};
pub use strategy::Layout;
pub use tile::Tile;

use crate::container::Container;

pub type StackLayout = Container<Stack>;
pub type TileLayout = Container<Tile>;
pub type DialogLayout = Container<Dialog>;
