use super::strategy::Layout;
use crate::container::ContainerCore;
use crate::geometry::{Rect, Size};
use crate::host::Context;

/// Layout direction of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    fn main(self, size: Size) -> i32 {
        match self {
            Axis::Vertical => size.height,
            Axis::Horizontal => size.width,
        }
    }

    /// Slice of `area` starting at `start` along the axis, spanning the
    /// whole cross axis.
    fn span(self, area: Rect, start: i32, extent: i32) -> Rect {
        match self {
            Axis::Vertical => Rect::new(area.x, start, area.width, extent),
            Axis::Horizontal => Rect::new(start, area.y, extent, area.height),
        }
    }
}

/// Children placed one after another along an axis.
///
/// Children reporting 0 on the axis are adjustable and share whatever the
/// fixed children leave over. Only vertical stacks scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    axis: Axis,
}

impl Stack {
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
        }
    }

    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Layout for Stack {
    fn class_name(&self) -> &'static str {
        match self.axis {
            Axis::Vertical => "VerticalLayout",
            Axis::Horizontal => "HorizontalLayout",
        }
    }

    fn arrange(&mut self, core: &mut ContainerCore, rect: Rect, cx: &Context<'_>) {
        let mut area = rect.deflate(core.inset());
        if self.axis == Axis::Vertical {
            area.width = (area.width - core.scrollbar_gutter(cx)).max(0);
        }

        let visible = core.visible_items();
        let available = area.size();
        let preferred: Vec<i32> = visible
            .iter()
            .map(|child| self.axis.main(child.borrow_mut().estimate_size(available)))
            .collect();
        let padding = core.padding();
        let extents = distribute(&preferred, self.axis.main(available), padding);

        let mut cursor = match self.axis {
            Axis::Vertical => area.y - core.scroll_pos(),
            Axis::Horizontal => area.x,
        };
        for (child, extent) in visible.iter().zip(&extents) {
            child
                .borrow_mut()
                .set_pos(self.axis.span(area, cursor, *extent), cx);
            cursor += extent + padding;
        }

        if self.axis == Axis::Vertical {
            let consumed = extents.iter().sum::<i32>() + gaps(extents.len(), padding);
            core.process_scrollbar(area, consumed, cx);
        }
    }
}

fn gaps(count: usize, padding: i32) -> i32 {
    padding * (count as i32 - 1).max(0)
}

/// Resolve preferred extents along the axis. Zero entries split the space
/// left by fixed entries and gaps; the last of them takes the rounding
/// remainder so the total matches `available` exactly.
fn distribute(preferred: &[i32], available: i32, padding: i32) -> Vec<i32> {
    let adjustable = preferred.iter().filter(|extent| **extent == 0).count() as i32;
    if adjustable == 0 {
        return preferred.to_vec();
    }
    let fixed = preferred.iter().sum::<i32>() + gaps(preferred.len(), padding);
    let expand = ((available - fixed) / adjustable).max(0);
    let remainder = (available - fixed - expand * adjustable).max(0);

    let mut seen = 0;
    preferred
        .iter()
        .map(|&extent| {
            if extent != 0 {
                return extent;
            }
            seen += 1;
            if seen == adjustable {
                expand + remainder
            } else {
                expand
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::config::EngineConfig;
    use crate::container::Container;
    use crate::geometry::Insets;
    use crate::node::{Leaf, Node, NodeRef, node_ref};
    use crate::testing::TestHost;

    fn build(
        stack: Stack,
        sizes: &[Size],
        padding: i32,
        cx: &Context<'_>,
    ) -> (Container<Stack>, Vec<NodeRef>) {
        let mut container = Container::new(stack).with_padding(padding);
        let nodes: Vec<_> = sizes.iter().map(|s| node_ref(Leaf::new(*s))).collect();
        for node in &nodes {
            container.add(Rc::clone(node), cx);
        }
        (container, nodes)
    }

    fn rects(nodes: &[NodeRef]) -> Vec<Rect> {
        nodes.iter().map(|n| n.borrow().pos()).collect()
    }

    #[test]
    fn distribute_gives_remainder_to_last_adjustable() {
        assert_eq!(distribute(&[20, 0, 30, 0], 100, 5), vec![20, 17, 30, 18]);
        assert_eq!(distribute(&[0, 0, 0], 10, 0), vec![3, 3, 4]);
    }

    #[test]
    fn distribute_without_adjustables_keeps_preferences() {
        assert_eq!(distribute(&[10, 20], 100, 5), vec![10, 20]);
        assert_eq!(distribute(&[], 100, 5), Vec::<i32>::new());
    }

    #[test]
    fn distribute_overflow_collapses_adjustables() {
        assert_eq!(distribute(&[80, 0, 40], 100, 0), vec![80, 0, 40]);
    }

    #[test]
    fn vertical_fills_available_height_exactly() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let sizes = [
            Size::new(0, 20),
            Size::new(0, 0),
            Size::new(0, 30),
            Size::new(0, 0),
        ];
        let (mut container, nodes) = build(Stack::vertical(), &sizes, 5, &cx);
        container.set_pos(Rect::new(0, 0, 60, 100), &cx);

        assert_eq!(
            rects(&nodes),
            vec![
                Rect::new(0, 0, 60, 20),
                Rect::new(0, 25, 60, 17),
                Rect::new(0, 47, 60, 30),
                Rect::new(0, 82, 60, 18),
            ]
        );
        let total: i32 = nodes.iter().map(|n| n.borrow().pos().height).sum::<i32>() + 3 * 5;
        assert_eq!(total, 100);
    }

    #[test]
    fn horizontal_fills_available_width_inside_inset() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let sizes = [Size::new(0, 0), Size::new(25, 0), Size::new(0, 0)];
        let (container, nodes) = build(Stack::horizontal(), &sizes, 2, &cx);
        let mut container = container.with_inset(Insets::uniform(3));
        container.set_pos(Rect::new(10, 10, 106, 40), &cx);

        assert_eq!(
            rects(&nodes),
            vec![
                Rect::new(13, 13, 35, 34),
                Rect::new(50, 13, 25, 34),
                Rect::new(77, 13, 36, 34),
            ]
        );
        assert_eq!(nodes[2].borrow().pos().right(), 113);
    }

    #[test]
    fn invisible_children_are_skipped() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let sizes = [Size::new(0, 10), Size::new(0, 10), Size::new(0, 0)];
        let (mut container, nodes) = build(Stack::vertical(), &sizes, 0, &cx);
        nodes[1].borrow_mut().set_visible(false);
        container.set_pos(Rect::new(0, 0, 10, 50), &cx);

        assert_eq!(nodes[0].borrow().pos(), Rect::new(0, 0, 10, 10));
        assert_eq!(nodes[2].borrow().pos(), Rect::new(0, 10, 10, 40));
    }

    #[test]
    fn repeated_layout_is_stable() {
        let host = TestHost::new();
        let config = EngineConfig::default();
        let cx = Context::new(&host, &config);
        let sizes = [Size::new(0, 7), Size::new(0, 0), Size::new(0, 0)];
        let (mut container, nodes) = build(Stack::vertical(), &sizes, 3, &cx);
        container.set_pos(Rect::new(0, 0, 33, 71), &cx);
        let first = rects(&nodes);
        container.set_pos(Rect::new(0, 0, 33, 71), &cx);
        assert_eq!(rects(&nodes), first);
    }

    #[test]
    fn class_names_follow_axis() {
        assert_eq!(Stack::vertical().class_name(), "VerticalLayout");
        assert_eq!(Stack::horizontal().class_name(), "HorizontalLayout");
    }
}
