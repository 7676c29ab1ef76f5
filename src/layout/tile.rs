use super::strategy::Layout;
use crate::container::{Container, ContainerCore};
use crate::error::{Result, TrellisError};
use crate::geometry::{Insets, Rect, Size};
use crate::host::Context;
use crate::logging::{LogLevel, json_kv};
use crate::node::parse_int;

const TARGET: &str = "trellis::layout.tile";

/// Height offered to children when measuring a row.
const UNBOUNDED_HEIGHT: i32 = 9999;

/// Grid of equally wide columns, rows as tall as their tallest child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    columns: i32,
}

impl Default for Tile {
    fn default() -> Self {
        Self { columns: 2 }
    }
}

impl Tile {
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Change the column count. Non-positive counts are refused and leave
    /// the grid unchanged.
    pub fn set_columns(&mut self, columns: i32, cx: &Context<'_>) -> bool {
        if columns <= 0 {
            cx.log_fields(
                LogLevel::Warn,
                TARGET,
                "columns_rejected",
                [json_kv("columns", columns)],
            );
            return false;
        }
        self.columns = columns;
        cx.host.request_layout();
        true
    }

    /// Horizontal extent of `column`. Edge columns lose half the padding on
    /// their inner side only.
    fn column_span(&self, area: Rect, column: i32, half_padding: i32) -> (i32, i32) {
        let width = area.width / self.columns;
        let mut left = area.x + column * width;
        let mut right = left + width;
        if column == 0 {
            right -= half_padding;
        } else if column == self.columns - 1 {
            left += half_padding;
        } else {
            left += half_padding;
            right -= half_padding;
        }
        (left, right - left)
    }
}

impl Container<Tile> {
    /// Tile container with the customary padding and inset of 10.
    pub fn tiled(columns: i32) -> Self {
        let tile = Tile {
            columns: columns.max(1),
        };
        Container::new(tile)
            .with_padding(10)
            .with_inset(Insets::uniform(10))
    }

    pub fn set_columns(&mut self, columns: i32, cx: &Context<'_>) -> bool {
        self.layout_mut().set_columns(columns, cx)
    }
}

impl Layout for Tile {
    fn class_name(&self) -> &'static str {
        "TileLayout"
    }

    fn arrange(&mut self, core: &mut ContainerCore, rect: Rect, cx: &Context<'_>) {
        let mut area = rect.deflate(core.inset());
        area.width = (area.width - core.scrollbar_gutter(cx)).max(0);

        let half_padding = core.padding() / 2;
        let measure_rows = core.fixed_size().height == 0;
        let origin_y = area.y - core.scroll_pos();
        let mut y = origin_y;
        let mut bottom = origin_y;

        for row in core.visible_items().chunks(self.columns as usize) {
            let spans: Vec<_> = (0..row.len() as i32)
                .map(|column| self.column_span(area, column, half_padding))
                .collect();
            let row_height = if measure_rows {
                row.iter()
                    .zip(&spans)
                    .map(|(child, (_, width))| {
                        child
                            .borrow_mut()
                            .estimate_size(Size::new(*width, UNBOUNDED_HEIGHT))
                            .height
                    })
                    .max()
                    .unwrap_or(0)
            } else {
                0
            };

            for (child, (x, width)) in row.iter().zip(spans) {
                child
                    .borrow_mut()
                    .set_pos(Rect::new(x, y, width, row_height), cx);
            }
            bottom = y + row_height;
            y = bottom + core.padding();
        }

        core.process_scrollbar(area, bottom - origin_y, cx);
    }

    fn set_attribute(&mut self, name: &str, value: &str, cx: &Context<'_>) -> Result<()> {
        if name != "columns" {
            return Err(TrellisError::UnknownAttribute(name.to_string()));
        }
        if self.set_columns(parse_int(name, value)?, cx) {
            Ok(())
        } else {
            Err(TrellisError::invalid(name, value))
        }
    }
}
