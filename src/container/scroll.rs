use crossterm::event::KeyCode;

use super::core::{Container, ContainerCore};
use crate::error::TrellisError;
use crate::event::{EventFlow, ScrollAction, UiEvent};
use crate::geometry::Rect;
use crate::host::{Context, ScrollbarPeer};
use crate::layout::Layout;
use crate::logging::{LogLevel, json_kv};
use crate::metrics::LayoutMetrics;

const TARGET: &str = "trellis::container";

impl ContainerCore {
    /// True while a scrollbar peer exists and is shown.
    pub fn is_scroll_visible(&self) -> bool {
        self.scrollbar.as_ref().is_some_and(|bar| bar.is_visible())
    }

    /// Largest valid scroll position; 0 without a scrollbar.
    pub fn scroll_range(&self) -> i32 {
        self.scrollbar.as_ref().map_or(0, |bar| bar.range_max())
    }

    pub fn scrollbar(&self) -> Option<&dyn ScrollbarPeer> {
        self.scrollbar.as_deref()
    }

    /// Reconcile the scrollbar with `content_height` of content shown in the
    /// viewport `rect`.
    ///
    /// The first overflow creates the peer and requests another layout pass
    /// so the viewport can shrink by the scrollbar's width. Afterwards the
    /// peer is kept beside the viewport and its range tracks the overflow.
    pub fn process_scrollbar(&mut self, rect: Rect, content_height: i32, cx: &Context<'_>) {
        if self.scrollbar.is_none() {
            if content_height > rect.height && self.allow_scrollbar {
                self.create_scrollbar(cx);
            }
            return;
        }
        if !self.allow_scrollbar {
            return;
        }
        let Some(bar) = self.scrollbar.as_mut() else {
            return;
        };

        let width = cx.host.metrics().scrollbar_width;
        bar.move_to(Rect::new(rect.right(), rect.y, width, rect.height));

        let range = (content_height - rect.height).max(0);
        if self.scroll_pos > range {
            self.scroll_pos = 0;
            bar.set_position(0);
            self.relayout = true;
            cx.host.invalidate(self.base.rect);
        }
        if bar.range_max() != range {
            bar.set_range_max(range);
            let show = range > 0;
            if bar.is_visible() != show {
                // The gutter changes width, so the viewport must be laid out again.
                self.relayout = true;
                cx.log_fields(
                    LogLevel::Debug,
                    TARGET,
                    "scrollbar_visibility",
                    [json_kv("visible", show), json_kv("range", range)],
                );
            }
            bar.set_visible(show);
        }
    }

    fn create_scrollbar(&mut self, cx: &Context<'_>) {
        match cx.host.create_scrollbar() {
            Some(mut bar) => {
                bar.set_position(0);
                bar.set_visible(true);
                self.scrollbar = Some(bar);
                self.relayout = true;
                cx.log(LogLevel::Debug, TARGET, "scrollbar_created");
            }
            None => cx.log_fields(
                LogLevel::Warn,
                TARGET,
                "scrollbar_unavailable",
                [json_kv("error", TrellisError::ScrollbarUnavailable.to_string())],
            ),
        }
    }
}

impl<L: Layout> Container<L> {
    pub fn scroll_pos(&self) -> i32 {
        self.core.scroll_pos
    }

    pub fn scroll_range(&self) -> i32 {
        self.core.scroll_range()
    }

    /// Distance moved by a page scroll.
    pub fn scroll_page(&self, cx: &Context<'_>) -> i32 {
        cx.config.page_size
    }

    pub fn is_scroll_visible(&self) -> bool {
        self.core.is_scroll_visible()
    }

    /// Scroll to `target`, clamped into `[0, scroll_range]`, then lay the
    /// children out again at the last known rectangle.
    ///
    /// A target that clamps to the current position does nothing: no layout
    /// pass and no invalidation.
    pub fn set_scroll_pos(&mut self, target: i32, cx: &Context<'_>) {
        let clamped = target.clamp(0, self.core.scroll_range());
        if clamped == self.core.scroll_pos {
            return;
        }
        if let Some(bar) = self.core.scrollbar.as_mut() {
            bar.set_position(clamped);
        }
        self.core.scroll_pos = clamped;
        cx.record(LayoutMetrics::record_scroll);

        let rect = self.core.base.rect;
        self.run_layout(rect, cx);
        cx.host.invalidate(rect);
    }

    /// Scrollbar messages and navigation keys, handled only while the
    /// scrollbar is showing.
    pub(super) fn scroll_event(&mut self, event: &UiEvent, cx: &Context<'_>) -> EventFlow {
        if !self.core.is_scroll_visible() {
            return EventFlow::Continue;
        }

        let pos = self.core.scroll_pos;
        let line = cx.config.line_step;
        let page = self.scroll_page(cx);
        let target = match event {
            UiEvent::VScroll(action) => match *action {
                ScrollAction::ThumbTrack(track) | ScrollAction::ThumbPosition(track) => track,
                ScrollAction::LineUp => pos - line,
                ScrollAction::LineDown => pos + line,
                ScrollAction::PageUp => pos - page,
                ScrollAction::PageDown => pos + page,
            },
            UiEvent::Key(key) => match key.code {
                KeyCode::Down => pos + line,
                KeyCode::Up => pos - line,
                KeyCode::PageDown => pos + page,
                KeyCode::PageUp => pos - page,
                KeyCode::Home => 0,
                KeyCode::End => cx.config.end_sentinel,
                _ => return EventFlow::Continue,
            },
            _ => return EventFlow::Continue,
        };
        self.set_scroll_pos(target, cx);
        EventFlow::Consumed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::config::EngineConfig;
    use crate::geometry::Size;
    use crate::layout::Stack;
    use crate::logging::{Logger, MemorySink};
    use crate::node::{Leaf, Node, NodeRef, node_ref};
    use crate::testing::TestHost;

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Ten 50px rows in a 100px viewport: 400px of overflow.
    fn overflowing(cx: &Context<'_>) -> (Container<Stack>, Vec<NodeRef>) {
        let mut container = Container::new(Stack::vertical());
        container.enable_scrollbar(true);
        let rows: Vec<_> = (0..10)
            .map(|_| node_ref(Leaf::new(Size::new(0, 50))))
            .collect();
        for row in &rows {
            container.add(Rc::clone(row), cx);
        }
        container.set_pos(Rect::new(0, 0, 100, 100), cx);
        (container, rows)
    }

    #[test]
    fn overflow_creates_single_scrollbar() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let (mut container, rows) = overflowing(&cx);

        assert!(container.is_scroll_visible());
        assert_eq!(container.scroll_range(), 400);
        assert_eq!(host.scrollbars_created(), 1);
        assert_eq!(rows[0].borrow().pos(), Rect::new(0, 0, 84, 50));

        container.set_pos(Rect::new(0, 0, 100, 100), &cx);
        assert_eq!(host.scrollbars_created(), 1);
        let bar = container.core().scrollbar().unwrap();
        assert!(bar.is_visible());
    }

    #[test]
    fn scrollbar_creation_costs_one_nested_pass() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let metrics = RefCell::new(LayoutMetrics::new());
        let cx = Context::new(&host, &config).with_metrics(&metrics);
        let (mut container, _rows) = overflowing(&cx);

        let snap = metrics.borrow().snapshot();
        assert_eq!(snap.layout_passes, 2);
        assert_eq!(snap.nested_passes, 1);
        container.set_scroll_pos(10, &cx);
        assert_eq!(metrics.borrow().snapshot().scroll_changes, 1);
    }

    #[test]
    fn scroll_pos_is_clamped() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let (mut container, rows) = overflowing(&cx);

        for (target, expected) in [(-50, 0), (0, 0), (37, 37), (400, 400), (9999, 400), (i32::MIN, 0)] {
            container.set_scroll_pos(target, &cx);
            assert_eq!(container.scroll_pos(), expected, "target {target}");
        }
        container.set_scroll_pos(120, &cx);
        assert_eq!(rows[0].borrow().pos().y, -120);
        assert_eq!(container.core().scrollbar().unwrap().position(), 120);
        assert_eq!(host.invalidations().last(), Some(&Rect::new(0, 0, 100, 100)));
    }

    #[test]
    fn unchanged_position_skips_layout_and_invalidation() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let metrics = RefCell::new(LayoutMetrics::new());
        let cx = Context::new(&host, &config).with_metrics(&metrics);
        let (mut container, _rows) = overflowing(&cx);
        container.set_scroll_pos(120, &cx);

        let invalidations = host.invalidations().len();
        let passes = metrics.borrow().snapshot().layout_passes;
        container.set_scroll_pos(120, &cx);
        container.set_scroll_pos(9999, &cx);
        container.set_scroll_pos(400, &cx);
        assert_eq!(host.invalidations().len(), invalidations + 1);
        assert_eq!(metrics.borrow().snapshot().layout_passes, passes + 1);
        assert_eq!(metrics.borrow().snapshot().scroll_changes, 2);
    }

    #[test]
    fn without_scrollbar_position_stays_zero() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let mut container = Container::new(Stack::vertical());
        container.add(node_ref(Leaf::new(Size::new(0, 500))), &cx);
        container.set_pos(Rect::new(0, 0, 100, 100), &cx);
        container.set_scroll_pos(50, &cx);
        assert_eq!(container.scroll_pos(), 0);
        assert_eq!(host.scrollbars_created(), 0);
    }

    #[test]
    fn keys_and_scroll_messages_move_position() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let (mut container, _rows) = overflowing(&cx);

        assert_eq!(container.event(&key(KeyCode::Down), &cx), EventFlow::Consumed);
        assert_eq!(container.scroll_pos(), 5);
        container.event(&key(KeyCode::PageDown), &cx);
        assert_eq!(container.scroll_pos(), 45);
        container.event(&UiEvent::VScroll(ScrollAction::LineUp), &cx);
        assert_eq!(container.scroll_pos(), 40);
        container.event(&UiEvent::VScroll(ScrollAction::ThumbTrack(250)), &cx);
        assert_eq!(container.scroll_pos(), 250);
        container.event(&key(KeyCode::End), &cx);
        assert_eq!(container.scroll_pos(), 400);
        container.event(&UiEvent::VScroll(ScrollAction::PageDown), &cx);
        assert_eq!(container.scroll_pos(), 400);
        container.event(&key(KeyCode::Home), &cx);
        assert_eq!(container.scroll_pos(), 0);
        assert_eq!(container.event(&key(KeyCode::Char('x')), &cx), EventFlow::Continue);
    }

    #[test]
    fn events_pass_through_without_visible_scrollbar() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let mut container = Container::new(Stack::vertical());
        assert_eq!(container.event(&key(KeyCode::Down), &cx), EventFlow::Continue);
    }

    #[test]
    fn shrinking_content_hides_scrollbar_and_resets_position() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let (mut container, rows) = overflowing(&cx);
        container.set_scroll_pos(300, &cx);

        for row in &rows[1..] {
            container.remove(row, &cx);
        }
        container.set_pos(Rect::new(0, 0, 100, 100), &cx);

        assert_eq!(container.scroll_pos(), 0);
        assert_eq!(container.scroll_range(), 0);
        assert!(!container.is_scroll_visible());
        assert_eq!(rows[0].borrow().pos(), Rect::new(0, 0, 100, 50));
    }

    #[test]
    fn hiding_scrollbar_widens_viewport_in_same_call() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let (mut container, rows) = overflowing(&cx);

        for row in &rows[1..] {
            container.remove(row, &cx);
        }
        container.set_pos(Rect::new(0, 0, 100, 100), &cx);
        let first = rows[0].borrow().pos();
        container.set_pos(Rect::new(0, 0, 100, 100), &cx);

        assert!(!container.is_scroll_visible());
        assert_eq!(first, Rect::new(0, 0, 100, 50));
        assert_eq!(rows[0].borrow().pos(), first);
    }

    #[test]
    fn showing_scrollbar_again_narrows_viewport_in_same_call() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let (mut container, rows) = overflowing(&cx);

        container.enable_scrollbar(false);
        container.set_pos(Rect::new(0, 0, 100, 100), &cx);
        assert_eq!(rows[0].borrow().pos().width, 100);

        container.enable_scrollbar(true);
        container.set_pos(Rect::new(0, 0, 100, 100), &cx);
        let first = rows[0].borrow().pos();
        container.set_pos(Rect::new(0, 0, 100, 100), &cx);

        assert!(container.is_scroll_visible());
        assert_eq!(host.scrollbars_created(), 1);
        assert_eq!(first, Rect::new(0, 0, 84, 50));
        assert_eq!(rows[0].borrow().pos(), first);
    }

    #[test]
    fn disabling_scrollbar_resets_position() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let (mut container, _rows) = overflowing(&cx);
        container.set_scroll_pos(80, &cx);
        container.enable_scrollbar(false);
        assert_eq!(container.scroll_pos(), 0);
        assert!(!container.is_scroll_visible());
    }

    #[test]
    fn hidden_container_hides_scrollbar() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let (mut container, _rows) = overflowing(&cx);
        container.set_visible(false);
        assert!(!container.core().scrollbar().unwrap().is_visible());
    }

    #[test]
    fn refused_scrollbar_is_logged() {
        let host = TestHost::new().refusing_scrollbars();
        let config = EngineConfig::default();
        let sink = MemorySink::new();
        let logger = Logger::new(sink.clone());
        let cx = Context::new(&host, &config).with_logger(&logger);
        let (container, _rows) = overflowing(&cx);
        assert!(!container.is_scroll_visible());
        assert!(sink.messages().contains(&"scrollbar_unavailable".to_string()));
    }
}
