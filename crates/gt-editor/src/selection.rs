//! Selection engine.
//!
//! Two gestures feed the selection:
//!
//! - **Item**: pointer-down on an item selects its link closure, the set of
//!   items reachable through `linked_with`. Ctrl unions it with the current
//!   selection; otherwise it replaces it.
//! - **Area**: dragging over cells sweeps a normalized rectangle. Covered
//!   items and cells become the in-progress selection and are committed on
//!   release.
//!
//! Item `selected` flags are always rewritten in one transaction together
//! with the published `SelectionState`, so observers never see a partial
//! selection. The pointer snapshot is mirrored on every event.

use crate::config::InteractionConfig;
use crate::input::InputEvent;
use gt_core::hit::{Surface, cells_in_rect, hit_test_rect};
use gt_core::id::ItemId;
use gt_core::model::{PointerSnapshot, Rect, SelectionState, TargetKind, Timeline};
use gt_core::store::{Mutation, Store};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;

/// Every item reachable from `start` through `linked_with`, `start` first,
/// each exactly once. Cycles are fine; links to unknown items are dropped.
pub fn link_closure(state: &Timeline, start: ItemId) -> Vec<ItemId> {
    let mut graph: DiGraphMap<ItemId, ()> = DiGraphMap::new();
    graph.add_node(start);
    for item in state.items.values() {
        for linked in item.linked_with.iter().filter(|id| state.items.contains_key(*id)) {
            graph.add_edge(item.id, *linked, ());
        }
    }
    let mut dfs = Dfs::new(&graph, start);
    let mut closure = Vec::new();
    while let Some(id) = dfs.next(&graph) {
        closure.push(id);
    }
    closure
}

/// `base` followed by the members of `extra` not already in it.
fn union(base: &[ItemId], extra: &[ItemId]) -> Vec<ItemId> {
    let mut merged = base.to_vec();
    for id in extra {
        if !merged.contains(id) {
            merged.push(*id);
        }
    }
    merged
}

#[derive(Debug, Default)]
pub struct SelectionEngine {
    /// Items selected before the current ctrl-held area drag began.
    base: Vec<ItemId>,
    additive: bool,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(
        &mut self,
        store: &mut Store,
        config: &InteractionConfig,
        event: &InputEvent,
        surface: Surface,
    ) {
        let mut selection = store.state().selection.clone();
        let sample = event.sample();
        let (target, item) = match surface {
            Surface::ItemBody(id) | Surface::ItemHandle(id) => (TargetKind::Item, Some(id)),
            Surface::Cell { .. } => (TargetKind::Cell, None),
            Surface::Outside => (TargetKind::None, None),
        };
        selection.pointer = PointerSnapshot {
            initial: sample.position(),
            current: sample.position(),
            target,
            item,
            dragging: event.is_primary(),
            down: Some(sample),
            moved: None,
            up: None,
        };

        if !event.is_primary() {
            store.update(Mutation::SetSelection(Box::new(selection)));
            return;
        }

        self.additive = sample.modifiers.ctrl;
        self.base = if self.additive {
            selection.selected.items.clone()
        } else {
            Vec::new()
        };

        match surface {
            Surface::ItemBody(id) | Surface::ItemHandle(id) if config.selection.items => {
                let closure = if config.selection.link_expansion {
                    link_closure(store.state(), id)
                } else {
                    vec![id]
                };
                let items = union(&self.base, &closure);
                log::debug!("select {id}: {} item(s)", items.len());
                selection.selected.items = items;
                if !self.additive {
                    selection.selected.cells.clear();
                }
                selection.is_selecting = false;
                commit(store, selection);
            }
            Surface::Cell { .. } if config.selection.cells || config.selection.items => {
                selection.is_selecting = true;
                selection.area = Rect::new(sample.x, sample.y, 0.0, 0.0);
                selection.selecting = Default::default();
                if !self.additive {
                    selection.selected.cells.clear();
                }
                store.update(Mutation::SetSelection(Box::new(selection)));
            }
            _ => store.update(Mutation::SetSelection(Box::new(selection))),
        }
    }

    pub fn pointer_move(&mut self, store: &mut Store, config: &InteractionConfig, event: &InputEvent) {
        let mut selection = store.state().selection.clone();
        let sample = event.sample();
        selection.pointer.current = sample.position();
        selection.pointer.moved = Some(sample);

        let area_drag = selection.pointer.dragging
            && selection.pointer.target == TargetKind::Cell
            && selection.is_selecting;
        if !area_drag {
            store.update(Mutation::SetSelection(Box::new(selection)));
            return;
        }

        let area = Rect::from_corners(selection.pointer.initial, selection.pointer.current);
        selection.area = area;
        let state = store.state();
        let local = area.relative_to(state.chart.x, state.chart.y);
        let covered = if config.selection.items {
            hit_test_rect(state, &local)
        } else {
            Vec::new()
        };
        selection.selecting.cells = if config.selection.cells {
            cells_in_rect(state, &local, config.cell_duration)
        } else {
            Vec::new()
        };

        if covered.is_empty() {
            selection.selected.items.clear();
        } else {
            selection.selected.items = union(&self.base, &covered);
        }
        selection.selecting.items = covered;
        commit(store, selection);
    }

    pub fn pointer_up(&mut self, store: &mut Store, event: &InputEvent) {
        let mut selection = store.state().selection.clone();
        let sample = event.sample();
        selection.pointer.current = sample.position();
        selection.pointer.up = Some(sample);
        selection.pointer.dragging = false;

        if selection.is_selecting {
            let swept = std::mem::take(&mut selection.selecting);
            if self.additive {
                for cell in swept.cells {
                    if !selection.selected.cells.contains(&cell) {
                        selection.selected.cells.push(cell);
                    }
                }
            } else {
                selection.selected.cells = swept.cells;
            }
            selection.is_selecting = false;
            log::debug!(
                "area selection done: {} item(s), {} cell(s)",
                selection.selected.items.len(),
                selection.selected.cells.len()
            );
        }
        self.base.clear();
        self.additive = false;
        store.update(Mutation::SetSelection(Box::new(selection)));
    }
}

/// Rewrite every item's `selected` flag to match `selection.selected.items`
/// and publish `selection`, all in one transaction.
fn commit(store: &mut Store, mut selection: SelectionState) {
    let state = store.state();
    selection.selected.items.retain(|id| state.items.contains_key(id));
    let mut changes: Vec<Mutation> = state
        .items
        .values()
        .filter(|item| item.selected && !selection.selected.items.contains(&item.id))
        .map(|item| Mutation::SetItemSelected {
            id: item.id,
            selected: false,
        })
        .collect();
    changes.extend(
        selection
            .selected
            .items
            .iter()
            .filter(|id| !state.item(**id).selected)
            .map(|id| Mutation::SetItemSelected {
                id: *id,
                selected: true,
            }),
    );
    store
        .multi()
        .extend(changes)
        .update(Mutation::SetSelection(Box::new(selection)))
        .done();
}
