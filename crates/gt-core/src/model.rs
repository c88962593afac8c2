//! Core data model for the timeline.
//!
//! Items live on rows and occupy a half-open time interval `[start, end)`.
//! Rows are stacked vertically; the host keeps the visible slice of them in
//! `visible_rows` together with each row's pixel offset. The interaction
//! slices (`movement`, `selection`) are owned by the pointer engine and only
//! ever written through the store.

use crate::id::{ItemId, RowId};
use crate::layout::{Viewport, VisibleRow, resolve_visible_rows};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Absolute time, in the host's smallest time unit (usually milliseconds).
pub type Time = i64;

// ─── Geometry ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. Width and height are never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanned by two corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Same rectangle shifted by `(-dx, -dy)`.
    pub fn relative_to(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x - dx, self.y - dy, self.width, self.height)
    }
}

// ─── Time ────────────────────────────────────────────────────────────────

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: Time,
    pub end: Time,
}

impl Interval {
    pub const fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// The visible time window and its pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Time at the left edge of the chart (pixel 0).
    pub from: Time,
    /// Time at the right edge of the chart.
    pub to: Time,
    /// Time units per horizontal pixel.
    pub time_per_pixel: f64,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            from: 0,
            to: 0,
            time_per_pixel: 1.0,
        }
    }
}

impl TimeWindow {
    /// Time under chart-relative pixel `px`, rounded to the nearest unit.
    pub fn time_at(&self, px: f64) -> Time {
        self.from + (px * self.time_per_pixel).round() as Time
    }

    /// Chart-relative pixel of `time`.
    pub fn px_at(&self, time: Time) -> f64 {
        (time - self.from) as f64 / self.time_per_pixel
    }

    /// Width in pixels of a duration.
    pub fn px_len(&self, duration: Time) -> f64 {
        duration as f64 / self.time_per_pixel
    }

    pub fn contains(&self, start: Time, end: Time) -> bool {
        start >= self.from && end <= self.to
    }

    /// Check that the pixel mapping is usable.
    ///
    /// # Errors
    /// Returns a message if `time_per_pixel` is not a positive finite number.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.time_per_pixel.is_finite() && self.time_per_pixel > 0.0) {
            return Err(format!(
                "time_per_pixel must be positive, got {}",
                self.time_per_pixel
            ));
        }
        Ok(())
    }
}

// ─── Snapping ────────────────────────────────────────────────────────────

/// `snap(current, delta, item) -> new value`.
pub type SnapFn = Rc<dyn Fn(Time, Time, &Item) -> Time>;

/// Quantization policy applied to a proposed start or end time.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Snap {
    /// `current + delta`.
    #[default]
    None,
    /// Round `current + delta` to the nearest multiple of the step.
    Step(Time),
    #[serde(skip)]
    Custom(SnapFn),
}

impl Snap {
    pub fn custom(f: impl Fn(Time, Time, &Item) -> Time + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    pub fn apply(&self, current: Time, delta: Time, item: &Item) -> Time {
        match self {
            Snap::None => current + delta,
            Snap::Step(step) if *step > 0 => {
                let value = current + delta;
                let rem = value.rem_euclid(*step);
                if rem * 2 >= *step {
                    value - rem + step
                } else {
                    value - rem
                }
            }
            Snap::Step(_) => current + delta,
            Snap::Custom(f) => f(current, delta, item),
        }
    }
}

impl fmt::Debug for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snap::None => write!(f, "None"),
            Snap::Step(step) => write!(f, "Step({step})"),
            Snap::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

// ─── Interaction policy ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Time axis only.
    X,
    /// Row axis only.
    Y,
}

/// Where an item may be dragged.
///
/// Deserializes from `true`, `false`, `"x"`, `"y"`, or a list of row IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMoveable", into = "RawMoveable")]
pub enum Moveable {
    #[default]
    Unrestricted,
    AxisRestricted(Axis),
    /// Any time, but only onto the listed rows.
    RowAllowList(SmallVec<[RowId; 4]>),
    Disabled,
}

impl Moveable {
    pub fn allows_time(&self) -> bool {
        matches!(
            self,
            Moveable::Unrestricted
                | Moveable::AxisRestricted(Axis::X)
                | Moveable::RowAllowList(_)
        )
    }

    pub fn allows_rows(&self) -> bool {
        match self {
            Moveable::Unrestricted | Moveable::AxisRestricted(Axis::Y) => true,
            Moveable::RowAllowList(rows) => !rows.is_empty(),
            _ => false,
        }
    }

    pub fn permits_row(&self, row: RowId) -> bool {
        match self {
            Moveable::Unrestricted | Moveable::AxisRestricted(Axis::Y) => true,
            Moveable::RowAllowList(rows) => rows.contains(&row),
            _ => false,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawMoveable {
    Flag(bool),
    Axis(Axis),
    Rows(Vec<RowId>),
}

impl From<RawMoveable> for Moveable {
    fn from(raw: RawMoveable) -> Self {
        match raw {
            RawMoveable::Flag(true) => Moveable::Unrestricted,
            RawMoveable::Flag(false) => Moveable::Disabled,
            RawMoveable::Axis(axis) => Moveable::AxisRestricted(axis),
            RawMoveable::Rows(rows) => Moveable::RowAllowList(rows.into()),
        }
    }
}

impl From<Moveable> for RawMoveable {
    fn from(m: Moveable) -> Self {
        match m {
            Moveable::Unrestricted => RawMoveable::Flag(true),
            Moveable::Disabled => RawMoveable::Flag(false),
            Moveable::AxisRestricted(axis) => RawMoveable::Axis(axis),
            Moveable::RowAllowList(rows) => RawMoveable::Rows(rows.into_vec()),
        }
    }
}

// ─── Items & rows ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "row_id")]
    pub row: RowId,
    pub time: Interval,
    #[serde(default)]
    pub label: String,
    /// Overrides the configured `moveable` policy.
    #[serde(default)]
    pub moveable: Option<Moveable>,
    /// Overrides the configured `resizable` flag.
    #[serde(default)]
    pub resizable: Option<bool>,
    /// Directed links followed when the item is selected.
    #[serde(default)]
    pub linked_with: Vec<ItemId>,
    #[serde(default)]
    pub snap_start: Option<Snap>,
    #[serde(default)]
    pub snap_end: Option<Snap>,
    #[serde(default)]
    pub selected: bool,
}

impl Item {
    pub fn new(id: &str, row: &str, start: Time, end: Time) -> Self {
        Self {
            id: ItemId::intern(id),
            row: RowId::intern(row),
            time: Interval::new(start, end),
            label: String::new(),
            moveable: None,
            resizable: None,
            linked_with: Vec::new(),
            snap_start: None,
            snap_end: None,
            selected: false,
        }
    }

    pub fn linked(mut self, ids: &[&str]) -> Self {
        self.linked_with = ids.iter().map(|s| ItemId::intern(s)).collect();
        self
    }

    pub fn with_moveable(mut self, moveable: Moveable) -> Self {
        self.moveable = Some(moveable);
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = Some(resizable);
        self
    }

    pub fn with_snap(mut self, start: Snap, end: Snap) -> Self {
        self.snap_start = Some(start);
        self.snap_end = Some(end);
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_row_height() -> f64 {
    40.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    /// `false` pins every item on the row and refuses incoming items.
    #[serde(default = "default_true")]
    pub moveable: bool,
    #[serde(default = "default_row_height")]
    pub height: f64,
    /// Items currently on this row, ordered by start time.
    /// Rebuilt by the store; read-only to interaction code.
    #[serde(skip)]
    pub items: SmallVec<[ItemId; 8]>,
}

impl Row {
    pub fn new(id: &str) -> Self {
        Self {
            id: RowId::intern(id),
            moveable: true,
            height: default_row_height(),
            items: SmallVec::new(),
        }
    }

    pub fn pinned(mut self) -> Self {
        self.moveable = false;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }
}

// ─── Input primitives ────────────────────────────────────────────────────

/// Modifier keys held during an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
    /// Back, forward, or any code a device may report beyond those.
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => PointerButton::Primary,
            1 => PointerButton::Auxiliary,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }
}

/// A raw pointer event as recorded in the selection channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub time: Time,
}

impl PointerSample {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ─── Movement slice ──────────────────────────────────────────────────────

/// Detached visual proxy that follows the pointer during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ghost {
    pub item: ItemId,
    /// Page coordinates of the ghost's top-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Grab point inside the ghost, kept fixed under the pointer.
    pub grab_x: f64,
    pub grab_y: f64,
}

impl Ghost {
    /// Move so the grab point sits under the pointer.
    pub fn track(&mut self, px: f64, py: f64) {
        self.x = px - self.grab_x;
        self.y = py - self.grab_y;
    }
}

/// Per-item drag/resize lifecycle record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub moving: bool,
    pub resizing: bool,
    pub waiting: bool,
    pub ghost: Option<Ghost>,
    /// Chart-relative top of the item's row at gesture start.
    pub item_top: f64,
    /// Chart-relative pixel of the dragged edge at gesture start
    /// (start edge when moving, end edge when resizing).
    pub item_x: f64,
    /// Page offset of the chart's bounding box.
    pub gantt_top: f64,
    pub gantt_left: f64,
    /// Pointer position (page coordinates) at gesture start.
    pub pointer_x: f64,
    pub pointer_y: f64,
}

impl MovementRecord {
    pub fn is_active(&self) -> bool {
        self.moving || self.resizing
    }

    pub fn is_idle(&self) -> bool {
        !self.moving && !self.resizing && !self.waiting && self.ghost.is_none()
    }
}

/// Widget-wide drag activity, without per-item detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentMovement {
    pub moving: bool,
    pub resizing: bool,
    pub waiting: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementSlice {
    pub records: HashMap<ItemId, MovementRecord>,
    pub current: CurrentMovement,
}

// ─── Selection slice ─────────────────────────────────────────────────────

/// A grid cell: one row crossed with one fixed-duration time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub row: RowId,
    pub column: i64,
}

/// Kind of surface under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Cell,
    Item,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selected {
    pub items: Vec<ItemId>,
    pub cells: Vec<CellId>,
}

impl Selected {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.cells.is_empty()
    }
}

/// Last-seen pointer gesture, mirrored for consumers such as cursor styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSnapshot {
    pub initial: Point,
    pub current: Point,
    pub target: TargetKind,
    pub item: Option<ItemId>,
    pub dragging: bool,
    pub down: Option<PointerSample>,
    pub moved: Option<PointerSample>,
    pub up: Option<PointerSample>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// In-progress area selection.
    pub selecting: Selected,
    /// Committed selection.
    pub selected: Selected,
    /// Normalized rectangle of the current area drag, in page coordinates.
    pub area: Rect,
    pub is_selecting: bool,
    pub pointer: PointerSnapshot,
}

// ─── Timeline ────────────────────────────────────────────────────────────

/// Host-provided description of a timeline, as loaded from configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub time: TimeWindow,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub viewport: Viewport,
    /// Page-space bounding box of the chart area.
    #[serde(default)]
    pub chart: Rect,
}

/// Complete state held by the store.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub items: HashMap<ItemId, Item>,
    pub rows: HashMap<RowId, Row>,
    /// Row display order, top to bottom.
    pub row_order: Vec<RowId>,
    pub time: TimeWindow,
    pub viewport: Viewport,
    pub visible_rows: Vec<VisibleRow>,
    pub chart: Rect,
    pub movement: MovementSlice,
    pub selection: SelectionState,
}

impl Timeline {
    /// Build a timeline, validating the time window and that items reference
    /// known rows and have a positive duration.
    ///
    /// # Errors
    /// Returns a message naming the first offending item.
    pub fn from_config(config: TimelineConfig) -> Result<Self, String> {
        config.time.validate()?;
        let mut timeline = Timeline {
            time: config.time,
            viewport: config.viewport,
            chart: config.chart,
            ..Default::default()
        };
        for row in config.rows {
            if !timeline.rows.contains_key(&row.id) {
                timeline.row_order.push(row.id);
            }
            timeline.rows.insert(row.id, row);
        }
        for item in config.items {
            if !timeline.rows.contains_key(&item.row) {
                return Err(format!("item {} references unknown row {}", item.id, item.row));
            }
            if item.time.end <= item.time.start {
                return Err(format!(
                    "item {} has empty interval [{}, {})",
                    item.id, item.time.start, item.time.end
                ));
            }
            timeline.items.insert(item.id, item);
        }
        timeline.reindex_rows();
        timeline.relayout();
        Ok(timeline)
    }

    /// Strict item lookup.
    ///
    /// # Panics
    /// If `id` is unknown: callers must never hold stale IDs.
    pub fn item(&self, id: ItemId) -> &Item {
        self.items
            .get(&id)
            .unwrap_or_else(|| panic!("unknown item {id}"))
    }

    /// Strict row lookup.
    ///
    /// # Panics
    /// If `id` is unknown.
    pub fn row(&self, id: RowId) -> &Row {
        self.rows
            .get(&id)
            .unwrap_or_else(|| panic!("unknown row {id}"))
    }

    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn get_row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(&id)
    }

    pub fn items_in_row(&self, row: RowId) -> impl Iterator<Item = &Item> {
        self.row(row).items.iter().map(|id| self.item(*id))
    }

    pub fn visible_row(&self, row: RowId) -> Option<&VisibleRow> {
        self.visible_rows.iter().find(|r| r.id == row)
    }

    /// Rebuild every row's item cache.
    pub fn reindex_rows(&mut self) {
        for row in self.rows.values_mut() {
            row.items.clear();
        }
        let mut ordered: Vec<&Item> = self.items.values().collect();
        ordered.sort_by(|a, b| {
            a.time
                .start
                .cmp(&b.time.start)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        for item in ordered {
            if let Some(row) = self.rows.get_mut(&item.row) {
                row.items.push(item.id);
            }
        }
    }

    /// Recompute visible rows from row order and viewport.
    pub fn relayout(&mut self) {
        let rows = self.row_order.iter().filter_map(|id| self.rows.get(id));
        self.visible_rows = resolve_visible_rows(rows, self.viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rect_from_corners_is_direction_invariant() {
        let a = Point::new(10.0, 80.0);
        let b = Point::new(60.0, 20.0);
        assert_eq!(Rect::from_corners(a, b), Rect::from_corners(b, a));
        assert_eq!(Rect::from_corners(a, b), Rect::new(10.0, 20.0, 50.0, 60.0));
    }

    #[test]
    fn step_snap_rounds_to_nearest() {
        let item = Item::new("snap", "r", 0, 10);
        let hour = Snap::Step(3_600);
        assert_eq!(hour.apply(0, 1_700, &item), 0);
        assert_eq!(hour.apply(0, 1_800, &item), 3_600);
        assert_eq!(hour.apply(3_600, -1_900, &item), 0);
        assert_eq!(Snap::None.apply(100, 7, &item), 107);
    }

    #[test]
    fn custom_snap_sees_item() {
        let item = Item::new("custom_snap", "r", 0, 10);
        let snap = Snap::custom(|current, delta, item| current + delta + item.time.end);
        assert_eq!(snap.apply(5, 5, &item), 20);
    }

    #[test]
    fn moveable_deserializes_every_shape() {
        let parse = |s: &str| serde_json::from_str::<Moveable>(s).unwrap();
        assert_eq!(parse("true"), Moveable::Unrestricted);
        assert_eq!(parse("false"), Moveable::Disabled);
        assert_eq!(parse("\"x\""), Moveable::AxisRestricted(Axis::X));
        assert_eq!(
            parse("[\"r1\", \"r2\"]"),
            Moveable::RowAllowList(SmallVec::from_vec(vec![
                RowId::intern("r1"),
                RowId::intern("r2")
            ]))
        );
    }

    #[test]
    fn allow_list_restricts_rows_but_not_time() {
        let m = Moveable::RowAllowList(SmallVec::from_vec(vec![RowId::intern("ok")]));
        assert!(m.allows_time());
        assert!(m.allows_rows());
        assert!(m.permits_row(RowId::intern("ok")));
        assert!(!m.permits_row(RowId::intern("nope")));
        assert!(!Moveable::AxisRestricted(Axis::X).allows_rows());
        assert!(!Moveable::AxisRestricted(Axis::Y).allows_time());
    }

    #[test]
    fn from_config_rejects_unknown_row() {
        let config = TimelineConfig {
            rows: vec![Row::new("known")],
            items: vec![Item::new("orphan", "missing", 0, 10)],
            ..Default::default()
        };
        let err = Timeline::from_config(config).unwrap_err();
        assert!(err.contains("unknown row"), "{err}");
    }

    #[test]
    fn from_config_rejects_empty_interval() {
        let config = TimelineConfig {
            rows: vec![Row::new("r")],
            items: vec![Item::new("flat", "r", 10, 10)],
            ..Default::default()
        };
        assert!(Timeline::from_config(config).is_err());
    }

    #[test]
    fn from_config_rejects_degenerate_pixel_ratio() {
        for time_per_pixel in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let config = TimelineConfig {
                time: TimeWindow {
                    from: 0,
                    to: 100,
                    time_per_pixel,
                },
                ..Default::default()
            };
            let err = Timeline::from_config(config).unwrap_err();
            assert!(err.contains("time_per_pixel"), "{err}");
        }
    }

    #[test]
    fn button_codes_beyond_secondary_are_not_primary() {
        assert_eq!(PointerButton::from_code(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_code(3), PointerButton::Other(3));
        assert_eq!(PointerButton::from_code(4), PointerButton::Other(4));
        assert_eq!(PointerButton::from_code(-1), PointerButton::Other(-1));
    }

    #[test]
    fn row_cache_is_ordered_by_start() {
        let config = TimelineConfig {
            rows: vec![Row::new("cache_row")],
            items: vec![
                Item::new("late", "cache_row", 500, 600),
                Item::new("early", "cache_row", 0, 100),
            ],
            ..Default::default()
        };
        let timeline = Timeline::from_config(config).unwrap();
        let ids: Vec<&str> = timeline
            .items_in_row(RowId::intern("cache_row"))
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
    }
}
