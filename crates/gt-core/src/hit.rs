//! Hit testing: chart-relative point → surface lookup.
//!
//! Items in a row are checked in reverse cache order so that the one drawn
//! last wins. A point on a row but outside every item falls on a cell.

use crate::id::{ItemId, RowId};
use crate::layout::item_bounds;
use crate::model::{CellId, Rect, Time, TimeWindow, Timeline};

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    ItemBody(ItemId),
    /// The resize handle on the item's right edge.
    ItemHandle(ItemId),
    Cell { row: RowId, column: i64 },
    Outside,
}

impl Surface {
    pub fn item(&self) -> Option<ItemId> {
        match self {
            Surface::ItemBody(id) | Surface::ItemHandle(id) => Some(*id),
            _ => None,
        }
    }
}

/// Column index of chart-relative pixel `px` for cells `cell_duration` wide.
pub fn column_at(window: &TimeWindow, px: f64, cell_duration: Time) -> i64 {
    if cell_duration <= 0 {
        return 0;
    }
    (window.time_at(px) - window.from).div_euclid(cell_duration)
}

/// Find the surface at chart-relative `(px, py)`.
pub fn hit_test(
    state: &Timeline,
    px: f64,
    py: f64,
    handle_width: f64,
    cell_duration: Time,
) -> Surface {
    let Some(row) = state
        .visible_rows
        .iter()
        .find(|r| py >= r.top && py < r.bottom())
    else {
        return Surface::Outside;
    };

    for id in state.row(row.id).items.iter().rev() {
        let item = state.item(*id);
        if let Some(b) = item_bounds(item, &state.time, &state.visible_rows)
            && b.contains(px, py)
        {
            if px >= b.right() - handle_width {
                return Surface::ItemHandle(*id);
            }
            return Surface::ItemBody(*id);
        }
    }

    Surface::Cell {
        row: row.id,
        column: column_at(&state.time, px, cell_duration),
    }
}

/// All items whose bounds intersect the chart-relative rectangle.
/// Used for area selection.
pub fn hit_test_rect(state: &Timeline, rect: &Rect) -> Vec<ItemId> {
    let mut result = Vec::new();
    if rect.is_empty() {
        return result;
    }
    for row in &state.visible_rows {
        for id in &state.row(row.id).items {
            if let Some(b) = item_bounds(state.item(*id), &state.time, &state.visible_rows)
                && b.intersects(rect)
            {
                result.push(*id);
            }
        }
    }
    result
}

/// All cells intersecting the chart-relative rectangle, row-major.
pub fn cells_in_rect(state: &Timeline, rect: &Rect, cell_duration: Time) -> Vec<CellId> {
    let mut cells = Vec::new();
    if rect.is_empty() {
        return cells;
    }
    let first = column_at(&state.time, rect.x, cell_duration);
    let last = column_at(&state.time, rect.right(), cell_duration);
    for row in &state.visible_rows {
        if row.bottom() <= rect.y || row.top >= rect.bottom() {
            continue;
        }
        for column in first..=last {
            cells.push(CellId {
                row: row.id,
                column,
            });
        }
    }
    cells
}
