use super::core::Color;
use crate::geometry::{Rect, Size};

/// A loaded bitmap. Dropping it releases the underlying resource.
pub trait Image {
    fn size(&self) -> Size;
}

/// Paint primitives provided by the host renderer.
///
/// Clips nest: `push_clip` intersects with the current clip and `pop_clip`
/// restores the previous one.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_image(&mut self, image: &dyn Image, rect: Rect);
    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);
}
