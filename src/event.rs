use crossterm::event::KeyEvent;

use crate::geometry::Point;

/// Messages sent by a vertical scrollbar peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    /// Thumb dragged; carries the tracked position.
    ThumbTrack(i32),
    /// Thumb released at a position.
    ThumbPosition(i32),
    LineUp,
    LineDown,
    PageUp,
    PageDown,
}

/// Events routed through the visual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    VScroll(ScrollAction),
    Key(KeyEvent),
    MouseDown(Point),
    MouseUp(Point),
    MouseMove(Point),
    SetFocus,
    KillFocus,
}

/// Control the propagation of an event up the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    Consumed,
}
