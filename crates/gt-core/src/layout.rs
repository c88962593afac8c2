//! Row layout and item geometry.
//!
//! Rows stack top-to-bottom in display order. The viewport's `scroll_top`
//! shifts them up; only rows intersecting the viewport are kept. All
//! positions produced here are chart-relative pixels.

use crate::id::RowId;
use crate::model::{Item, Rect, Row, TimeWindow};
use serde::{Deserialize, Serialize};

/// Visible chart area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    /// A non-positive height means "unbounded": every row is visible.
    pub height: f64,
    #[serde(default)]
    pub scroll_top: f64,
}

/// A row currently on screen, with its chart-relative vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleRow {
    pub id: RowId,
    pub top: f64,
    pub height: f64,
}

impl VisibleRow {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Stack `rows` in order and keep the ones intersecting the viewport.
pub fn resolve_visible_rows<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    viewport: Viewport,
) -> Vec<VisibleRow> {
    let mut top = -viewport.scroll_top;
    let mut visible = Vec::new();
    for row in rows {
        let current = VisibleRow {
            id: row.id,
            top,
            height: row.height,
        };
        top += row.height;
        if current.bottom() <= 0.0 {
            continue;
        }
        if viewport.height > 0.0 && current.top >= viewport.height {
            break;
        }
        visible.push(current);
    }
    visible
}

/// Row under chart-relative `y`: the last row whose top is at or above `y`,
/// clamped to the first row when `y` is above every row.
pub fn row_at(rows: &[VisibleRow], y: f64) -> Option<RowId> {
    let first = rows.first()?;
    let found = rows.iter().take_while(|r| r.top <= y).last();
    Some(found.unwrap_or(first).id)
}

/// Chart-relative bounds of `item`, or `None` if its row is not visible.
pub fn item_bounds(item: &Item, window: &TimeWindow, rows: &[VisibleRow]) -> Option<Rect> {
    let row = rows.iter().find(|r| r.id == item.row)?;
    Some(Rect::new(
        window.px_at(item.time.start),
        row.top,
        window.px_len(item.time.duration()),
        row.height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<Row> {
        vec![
            Row::new("l0").with_height(30.0),
            Row::new("l1").with_height(30.0),
            Row::new("l2").with_height(30.0),
        ]
    }

    #[test]
    fn rows_stack_in_order() {
        let rows = rows();
        let visible = resolve_visible_rows(&rows, Viewport::default());
        let tops: Vec<f64> = visible.iter().map(|r| r.top).collect();
        assert_eq!(tops, vec![0.0, 30.0, 60.0]);
    }

    #[test]
    fn scroll_and_height_clip_rows() {
        let rows = rows();
        let viewport = Viewport {
            width: 100.0,
            height: 30.0,
            scroll_top: 30.0,
        };
        let visible = resolve_visible_rows(&rows, viewport);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, RowId::intern("l1"));
        assert_eq!(visible[0].top, 0.0);
    }

    #[test]
    fn row_at_clamps_to_bounds() {
        let rows = rows();
        let visible = resolve_visible_rows(&rows, Viewport::default());
        assert_eq!(row_at(&visible, -10.0), Some(RowId::intern("l0")));
        assert_eq!(row_at(&visible, 45.0), Some(RowId::intern("l1")));
        assert_eq!(row_at(&visible, 60.0), Some(RowId::intern("l2")));
        assert_eq!(row_at(&visible, 9_999.0), Some(RowId::intern("l2")));
        assert_eq!(row_at(&[], 10.0), None);
    }

    #[test]
    fn item_bounds_follow_time_ratio() {
        let rows = rows();
        let visible = resolve_visible_rows(&rows, Viewport::default());
        let window = TimeWindow {
            from: 100,
            to: 1_100,
            time_per_pixel: 2.0,
        };
        let item = Item::new("bounds", "l1", 200, 300);
        let b = item_bounds(&item, &window, &visible).unwrap();
        assert_eq!(b, Rect::new(50.0, 30.0, 50.0, 30.0));
    }
}
