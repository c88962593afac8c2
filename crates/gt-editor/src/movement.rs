//! Movement state store.
//!
//! One `MovementRecord` per item, kept in the store's movement slice and
//! created lazily on first access. Records are never removed, only reset.
//! Every save also republishes the widget-wide `CurrentMovement` summary.

use gt_core::id::ItemId;
use gt_core::model::{CurrentMovement, MovementRecord, Timeline};
use gt_core::store::{Mutation, Store};

/// Record for `id`, or a fresh all-false one if the item was never touched.
pub fn get(store: &Store, id: ItemId) -> MovementRecord {
    store
        .state()
        .movement
        .records
        .get(&id)
        .cloned()
        .unwrap_or_default()
}

/// Write `record` back and republish the summary in one transaction.
pub fn save(store: &mut Store, id: ItemId, record: MovementRecord) {
    let current = summary_with(store.state(), id, &record);
    store
        .multi()
        .update(Mutation::SaveMovement {
            id,
            record: Box::new(record),
        })
        .update(Mutation::SetCurrentMovement(current))
        .done();
}

/// Reset every tracked record to idle and drop all ghosts.
///
/// Runs on any pointer-up, so a record left active by a missed release on
/// another item cannot stay stuck.
pub fn reset_all(store: &mut Store) {
    let stale: Vec<ItemId> = store
        .state()
        .movement
        .records
        .iter()
        .filter(|(_, r)| !r.is_idle())
        .map(|(id, _)| *id)
        .collect();
    if stale.is_empty() && store.state().movement.current == CurrentMovement::default() {
        return;
    }
    log::debug!("reset {} movement record(s)", stale.len());
    store
        .multi()
        .extend(stale.into_iter().map(|id| Mutation::SaveMovement {
            id,
            record: Box::default(),
        }))
        .update(Mutation::SetCurrentMovement(CurrentMovement::default()))
        .done();
}

/// Items currently moving or resizing, in a stable order.
pub fn active_items(store: &Store) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = store
        .state()
        .movement
        .records
        .iter()
        .filter(|(_, r)| r.is_active())
        .map(|(id, _)| *id)
        .collect();
    ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    ids
}

/// Summary across all records, with `id` replaced by `record`.
fn summary_with(state: &Timeline, id: ItemId, record: &MovementRecord) -> CurrentMovement {
    let others = state
        .movement
        .records
        .iter()
        .filter(|(other, _)| **other != id)
        .map(|(_, r)| r);
    std::iter::once(record)
        .chain(others)
        .fold(CurrentMovement::default(), |acc, r| CurrentMovement {
            moving: acc.moving || r.moving,
            resizing: acc.resizing || r.resizing,
            waiting: acc.waiting || r.waiting,
        })
}
