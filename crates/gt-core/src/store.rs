//! Reactive state store: the single source of truth for a timeline.
//!
//! Every change is a `Mutation` value. Mutations are applied through a
//! `Transaction` (`store.multi().update(..).update(..).done()`), which
//! applies the whole batch and then notifies each subscriber at most once,
//! so no listener ever observes a half-applied batch.
//!
//! Listeners subscribe to a `Topic`. `Topic::Items` hears every per-item
//! change; every other topic matches only itself.

use crate::id::{ItemId, RowId};
use crate::layout::Viewport;
use crate::model::*;

/// Callback invoked after a transaction touching a subscribed topic.
pub type Listener = Box<dyn FnMut(&Timeline)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Addressable part of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Items,
    Item(ItemId),
    Rows,
    Time,
    VisibleRows,
    Chart,
    Movement,
    CurrentMovement,
    Selection,
}

impl Topic {
    fn matches(&self, changed: &Topic) -> bool {
        self == changed || matches!((self, changed), (Topic::Items, Topic::Item(_)))
    }
}

/// A single state change.
#[derive(Debug, Clone)]
pub enum Mutation {
    SetItemTime { id: ItemId, start: Time, end: Time },
    SetItemRow { id: ItemId, row: RowId },
    SetItemSelected { id: ItemId, selected: bool },
    ReplaceItem(Box<Item>),
    InsertItem(Box<Item>),
    RemoveItem { id: ItemId },
    InsertRow(Box<Row>),
    SetTime(TimeWindow),
    SetViewport(Viewport),
    SetChart(Rect),
    SaveMovement { id: ItemId, record: Box<MovementRecord> },
    SetCurrentMovement(CurrentMovement),
    SetSelection(Box<SelectionState>),
}

impl Mutation {
    fn topic(&self) -> Topic {
        match self {
            Mutation::SetItemTime { id, .. }
            | Mutation::SetItemRow { id, .. }
            | Mutation::SetItemSelected { id, .. }
            | Mutation::RemoveItem { id } => Topic::Item(*id),
            Mutation::ReplaceItem(item) | Mutation::InsertItem(item) => Topic::Item(item.id),
            Mutation::InsertRow(_) => Topic::Rows,
            Mutation::SetTime(_) => Topic::Time,
            Mutation::SetViewport(_) => Topic::VisibleRows,
            Mutation::SetChart(_) => Topic::Chart,
            Mutation::SaveMovement { .. } => Topic::Movement,
            Mutation::SetCurrentMovement(_) => Topic::CurrentMovement,
            Mutation::SetSelection(_) => Topic::Selection,
        }
    }
}

/// Follow-up work a batch requires before listeners run.
#[derive(Default)]
struct Derived {
    reindex: bool,
    relayout: bool,
    selection: bool,
}

pub struct Store {
    state: Timeline,
    listeners: Vec<(SubscriptionId, Topic, Listener)>,
    next_subscription: u64,
    revision: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Timeline::default())
    }
}

impl Store {
    pub fn new(state: Timeline) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_subscription: 0,
            revision: 0,
        }
    }

    /// Build a store from host configuration.
    ///
    /// # Errors
    /// See [`Timeline::from_config`].
    pub fn from_config(config: TimelineConfig) -> Result<Self, String> {
        Ok(Self::new(Timeline::from_config(config)?))
    }

    pub fn state(&self) -> &Timeline {
        &self.state
    }

    /// Number of committed transactions.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Strict item lookup; panics on unknown IDs.
    pub fn item(&self, id: ItemId) -> &Item {
        self.state.item(id)
    }

    /// Strict row lookup; panics on unknown IDs.
    pub fn row(&self, id: RowId) -> &Row {
        self.state.row(id)
    }

    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.state.get_item(id)
    }

    pub fn get_row(&self, id: RowId) -> Option<&Row> {
        self.state.get_row(id)
    }

    /// Apply a single mutation as its own transaction.
    pub fn update(&mut self, mutation: Mutation) {
        self.multi().update(mutation).done();
    }

    /// Apply a pure reducer to one item.
    pub fn update_item(&mut self, id: ItemId, reducer: impl FnOnce(&Item) -> Item) {
        let next = reducer(self.item(id));
        self.update(Mutation::ReplaceItem(Box::new(next)));
    }

    /// Start a batched update.
    pub fn multi(&mut self) -> Transaction<'_> {
        Transaction {
            store: self,
            pending: Vec::new(),
        }
    }

    pub fn subscribe(
        &mut self,
        topic: Topic,
        listener: impl FnMut(&Timeline) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, topic, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _, _)| *sid != id);
        self.listeners.len() != before
    }

    fn apply(&mut self, mutation: Mutation, derived: &mut Derived) {
        let state = &mut self.state;
        match mutation {
            Mutation::SetItemTime { id, start, end } => {
                let item = item_mut(state, id);
                item.time = Interval::new(start, end);
                derived.reindex = true;
            }
            Mutation::SetItemRow { id, row } => {
                if !state.rows.contains_key(&row) {
                    panic!("unknown row {row}");
                }
                item_mut(state, id).row = row;
                derived.reindex = true;
            }
            Mutation::SetItemSelected { id, selected } => {
                item_mut(state, id).selected = selected;
            }
            Mutation::ReplaceItem(item) => {
                let current = item_mut(state, item.id);
                derived.reindex |= current.row != item.row || current.time != item.time;
                *current = *item;
            }
            Mutation::InsertItem(item) => {
                state.items.insert(item.id, *item);
                derived.reindex = true;
            }
            Mutation::RemoveItem { id } => {
                state.items.remove(&id);
                state.movement.records.remove(&id);
                derived.reindex = true;
                derived.selection |= forget_item(&mut state.selection, id);
            }
            Mutation::InsertRow(row) => {
                if !state.rows.contains_key(&row.id) {
                    state.row_order.push(row.id);
                }
                state.rows.insert(row.id, *row);
                derived.reindex = true;
                derived.relayout = true;
            }
            Mutation::SetTime(window) => state.time = window,
            Mutation::SetViewport(viewport) => {
                state.viewport = viewport;
                derived.relayout = true;
            }
            Mutation::SetChart(rect) => state.chart = rect,
            Mutation::SaveMovement { id, record } => {
                state.movement.records.insert(id, *record);
            }
            Mutation::SetCurrentMovement(current) => state.movement.current = current,
            Mutation::SetSelection(selection) => state.selection = *selection,
        }
    }
}

fn item_mut(state: &mut Timeline, id: ItemId) -> &mut Item {
    state
        .items
        .get_mut(&id)
        .unwrap_or_else(|| panic!("unknown item {id}"))
}

/// Drop every reference to `id` from the selection. Returns whether any
/// was found.
fn forget_item(selection: &mut SelectionState, id: ItemId) -> bool {
    let before = selection.selected.items.len() + selection.selecting.items.len();
    selection.selected.items.retain(|i| *i != id);
    selection.selecting.items.retain(|i| *i != id);
    let mut changed = before != selection.selected.items.len() + selection.selecting.items.len();
    if selection.pointer.item == Some(id) {
        selection.pointer.item = None;
        changed = true;
    }
    changed
}

/// Batched update builder. Nothing is applied until [`Transaction::done`].
#[must_use = "a transaction does nothing until `done()` is called"]
pub struct Transaction<'a> {
    store: &'a mut Store,
    pending: Vec<Mutation>,
}

impl Transaction<'_> {
    pub fn update(mut self, mutation: Mutation) -> Self {
        self.pending.push(mutation);
        self
    }

    pub fn extend(mut self, mutations: impl IntoIterator<Item = Mutation>) -> Self {
        self.pending.extend(mutations);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every queued mutation, then notify listeners once.
    pub fn done(self) {
        if self.pending.is_empty() {
            return;
        }
        let store = self.store;
        let mut derived = Derived::default();
        let mut touched: Vec<Topic> = Vec::with_capacity(self.pending.len());
        for mutation in self.pending {
            let topic = mutation.topic();
            if !touched.contains(&topic) {
                touched.push(topic);
            }
            store.apply(mutation, &mut derived);
        }
        if derived.reindex {
            store.state.reindex_rows();
        }
        if derived.selection && !touched.contains(&Topic::Selection) {
            touched.push(Topic::Selection);
        }
        if derived.relayout {
            store.state.relayout();
            if !touched.contains(&Topic::VisibleRows) {
                touched.push(Topic::VisibleRows);
            }
        }
        store.revision += 1;
        log::trace!(
            "store revision {} ({} topics)",
            store.revision,
            touched.len()
        );

        let state = &store.state;
        for (_, topic, listener) in store.listeners.iter_mut() {
            if touched.iter().any(|t| topic.matches(t)) {
                listener(state);
            }
        }
    }
}
