//! Drag/resize controller.
//!
//! Per-item state machine: `idle → waiting → moving → idle` for the item
//! body and `idle → resizing → idle` for the resize handle. Pointer-down
//! arrives item-scoped; moves and ups are document-scoped and routed to
//! every item whose record is active.
//!
//! ## Move
//!
//! | Step | Decision |
//! |------|----------|
//! | time | snap the proposed start, shift the end by the snapped delta, validate in the current row |
//! | row  | last visible row at or above the pointer, gated by the move policy and a collision check at the interval being committed |
//! | ghost | always follows the pointer |
//!
//! Time and row are decided independently on every event.

use crate::collision::collides;
use crate::config::InteractionConfig;
use crate::input::InputEvent;
use crate::movement;
use gt_core::hit::Surface;
use gt_core::id::ItemId;
use gt_core::layout::{item_bounds, row_at};
use gt_core::model::{Ghost, Item, Moveable, MovementRecord, PointerSample, Snap, Time, Timeline};
use gt_core::store::{Mutation, Store};

/// A pending drag start, fired once `deadline` is reached.
#[derive(Debug, Clone, Copy)]
struct WaitTimer {
    item: ItemId,
    deadline: Time,
    origin: PointerSample,
}

/// Which edge a gesture drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

#[derive(Debug, Default)]
pub struct DragController {
    timers: Vec<WaitTimer>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of wait timers not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Item-scoped pointer-down.
    pub fn pointer_down(
        &mut self,
        store: &mut Store,
        config: &InteractionConfig,
        event: &InputEvent,
        surface: Surface,
    ) {
        if !event.is_primary() {
            return;
        }
        let (id, on_handle) = match surface {
            Surface::ItemBody(id) => (id, false),
            Surface::ItemHandle(id) => (id, true),
            _ => return,
        };

        if on_handle && is_resizable(store.state(), config, id) {
            let mut record = movement::get(store, id);
            capture_origin(store.state(), id, &event.sample(), Edge::End, &mut record);
            record.resizing = true;
            log::debug!("{id}: idle -> resizing");
            movement::save(store, id, record);
            return;
        }

        if resolve_moveable(store.state(), config, store.item(id)) == Moveable::Disabled {
            log::trace!("{id}: not moveable, ignoring pointer-down");
            return;
        }

        let mut record = movement::get(store, id);
        record.waiting = true;
        log::debug!("{id}: idle -> waiting ({} units)", config.wait);
        movement::save(store, id, record);
        self.timers.retain(|t| t.item != id);
        self.timers.push(WaitTimer {
            item: id,
            deadline: event.time() + config.wait,
            origin: event.sample(),
        });
    }

    /// Fire every wait timer due at `now`. A timer whose item is no longer
    /// waiting does nothing.
    pub fn advance_time(&mut self, store: &mut Store, config: &InteractionConfig, now: Time) {
        let (due, pending): (Vec<WaitTimer>, Vec<WaitTimer>) =
            self.timers.drain(..).partition(|t| t.deadline <= now);
        self.timers = pending;

        for timer in due {
            let id = timer.item;
            let mut record = movement::get(store, id);
            if !record.waiting {
                log::trace!("{id}: wait timer fired after release, ignored");
                continue;
            }
            let state = store.state();
            record.waiting = false;
            record.moving = true;
            capture_origin(state, id, &timer.origin, Edge::Start, &mut record);
            if config.ghost_node {
                record.ghost = make_ghost(state, id, &record);
            }
            log::debug!("{id}: waiting -> moving");
            movement::save(store, id, record);
        }
    }

    /// Document-scoped pointer-move.
    pub fn pointer_move(&mut self, store: &mut Store, config: &InteractionConfig, event: &InputEvent) {
        for id in movement::active_items(store) {
            let record = movement::get(store, id);
            if record.resizing {
                resize_item(store, config, id, &record, event);
            } else if record.moving {
                move_item(store, config, id, record, event);
            }
        }
    }

    /// Document-scoped pointer-up: every record goes back to idle and every
    /// pending drag start is cancelled.
    pub fn pointer_up(&mut self, store: &mut Store) {
        if !self.timers.is_empty() {
            log::trace!("cancel {} pending wait timer(s)", self.timers.len());
            self.timers.clear();
        }
        movement::reset_all(store);
    }
}

/// Effective move policy of `item`, taking its row into account.
pub fn resolve_moveable(state: &Timeline, config: &InteractionConfig, item: &Item) -> Moveable {
    if !state.row(item.row).moveable {
        return Moveable::Disabled;
    }
    item.moveable.clone().unwrap_or_else(|| config.moveable.clone())
}

pub fn is_resizable(state: &Timeline, config: &InteractionConfig, id: ItemId) -> bool {
    state.item(id).resizable.unwrap_or(config.resizable)
}

fn start_snap<'a>(config: &'a InteractionConfig, item: &'a Item) -> &'a Snap {
    item.snap_start.as_ref().unwrap_or(&config.snap_start)
}

fn end_snap<'a>(config: &'a InteractionConfig, item: &'a Item) -> &'a Snap {
    item.snap_end.as_ref().unwrap_or(&config.snap_end)
}

fn capture_origin(
    state: &Timeline,
    id: ItemId,
    origin: &PointerSample,
    edge: Edge,
    record: &mut MovementRecord,
) {
    let item = state.item(id);
    let edge_time = match edge {
        Edge::Start => item.time.start,
        Edge::End => item.time.end,
    };
    record.gantt_left = state.chart.x;
    record.gantt_top = state.chart.y;
    record.item_x = state.time.px_at(edge_time);
    record.item_top = state.visible_row(item.row).map(|r| r.top).unwrap_or_default();
    record.pointer_x = origin.x;
    record.pointer_y = origin.y;
}

/// Ghost placed over the item, with the grab point under the pointer.
fn make_ghost(state: &Timeline, id: ItemId, record: &MovementRecord) -> Option<Ghost> {
    let bounds = item_bounds(state.item(id), &state.time, &state.visible_rows)?;
    let grab_x = record.pointer_x - (record.gantt_left + record.item_x);
    let grab_y = record.pointer_y - (record.gantt_top + record.item_top);
    let mut ghost = Ghost {
        item: id,
        x: 0.0,
        y: 0.0,
        width: bounds.width,
        height: bounds.height,
        grab_x,
        grab_y,
    };
    ghost.track(record.pointer_x, record.pointer_y);
    Some(ghost)
}

fn move_item(
    store: &mut Store,
    config: &InteractionConfig,
    id: ItemId,
    mut record: MovementRecord,
    event: &InputEvent,
) {
    let pointer = event.position();
    let state = store.state();
    let item = state.item(id);
    let policy = resolve_moveable(state, config, item);
    let mut changes = Vec::with_capacity(2);
    // Interval the item will have once this event's changes are committed.
    let (mut start, mut end) = (item.time.start, item.time.end);

    if policy.allows_time() {
        let left = record.item_x + (pointer.x - record.pointer_x);
        let delta = state.time.time_at(left) - item.time.start;
        let new_start = start_snap(config, item).apply(item.time.start, delta, item);
        let snapped = new_start - item.time.start;
        if snapped != 0 {
            let new_end = end_snap(config, item).apply(item.time.end, snapped, item);
            if new_end <= new_start {
                log::trace!("{id}: snapped interval [{new_start}, {new_end}) is empty");
            } else if collides(state, config, item.row, id, new_start, new_end) {
                log::trace!("{id}: move to [{new_start}, {new_end}) rejected");
            } else {
                changes.push(Mutation::SetItemTime {
                    id,
                    start: new_start,
                    end: new_end,
                });
                (start, end) = (new_start, new_end);
            }
        }
    }

    if policy.allows_rows()
        && let Some(target) = row_at(&state.visible_rows, pointer.y - record.gantt_top)
        && target != item.row
    {
        if !policy.permits_row(target) {
            log::trace!("{id}: row {target} not in allow-list");
        } else if !state.row(target).moveable {
            log::trace!("{id}: row {target} is pinned");
        } else if collides(state, config, target, id, start, end) {
            log::trace!("{id}: row {target} is occupied at [{start}, {end})");
        } else {
            changes.push(Mutation::SetItemRow { id, row: target });
        }
    }

    if !changes.is_empty() {
        store.multi().extend(changes).done();
    }

    if let Some(ghost) = record.ghost.as_mut() {
        ghost.track(pointer.x, pointer.y);
        movement::save(store, id, record);
    }
}

fn resize_item(
    store: &mut Store,
    config: &InteractionConfig,
    id: ItemId,
    record: &MovementRecord,
    event: &InputEvent,
) {
    let state = store.state();
    if !is_resizable(state, config, id) {
        return;
    }
    let item = state.item(id);
    let right = record.item_x + (event.position().x - record.pointer_x);
    let delta = state.time.time_at(right) - item.time.end;
    if item.time.end + delta <= item.time.start {
        log::trace!("{id}: resize would invert interval");
        return;
    }
    let new_end = end_snap(config, item).apply(item.time.end, delta, item);
    if new_end == item.time.end {
        return;
    }
    if new_end <= item.time.start {
        log::trace!("{id}: snapped end {new_end} precedes start");
        return;
    }
    if collides(state, config, item.row, id, item.time.start, new_end) {
        log::trace!("{id}: resize to {new_end} rejected");
        return;
    }
    let start = item.time.start;
    store.update(Mutation::SetItemTime {
        id,
        start,
        end: new_end,
    });
}
