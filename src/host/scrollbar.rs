use crate::geometry::Rect;

/// A vertical scrollbar control owned by exactly one container.
///
/// The range minimum is always 0; only the maximum is tracked.
pub trait ScrollbarPeer {
    fn range_max(&self) -> i32;
    fn set_range_max(&mut self, max: i32);
    fn position(&self) -> i32;
    fn set_position(&mut self, pos: i32);
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    /// Place the control next to the viewport it scrolls.
    fn move_to(&mut self, rect: Rect);
}

/// Scrollbar with no platform backing, for hosts that draw their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualScrollbar {
    pub range_max: i32,
    pub position: i32,
    pub visible: bool,
    pub rect: Rect,
}

impl ScrollbarPeer for VirtualScrollbar {
    fn range_max(&self) -> i32 {
        self.range_max
    }

    fn set_range_max(&mut self, max: i32) {
        self.range_max = max.max(0);
        self.position = self.position.clamp(0, self.range_max);
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, pos: i32) {
        self.position = pos.clamp(0, self.range_max);
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn move_to(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_stays_in_range() {
        let mut bar = VirtualScrollbar::default();
        bar.set_range_max(30);
        bar.set_position(50);
        assert_eq!(bar.position(), 30);
        bar.set_range_max(10);
        assert_eq!(bar.position(), 10);
        bar.set_position(-4);
        assert_eq!(bar.position(), 0);
    }
}
