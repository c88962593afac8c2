//! Interaction engine: routes pointer events into the drag/resize
//! controller and the selection engine.
//!
//! The engine owns the store, so every piece of transient state (movement
//! records, selection, pending wait timers) lives and dies with it. Hosts
//! either tell the engine which surface a pointer-down landed on
//! ([`InteractionEngine::pointer_down`]) or let it hit-test the chart
//! itself ([`InteractionEngine::pointer_down_at`]).

use crate::config::InteractionConfig;
use crate::drag::DragController;
use crate::input::InputEvent;
use crate::selection::SelectionEngine;
use gt_core::hit::{Surface, hit_test};
use gt_core::model::{CurrentMovement, Ghost, SelectionState, Time, TimelineConfig};
use gt_core::store::Store;

pub struct InteractionEngine {
    store: Store,
    config: InteractionConfig,
    drag: DragController,
    selection: SelectionEngine,
}

impl InteractionEngine {
    pub fn new(store: Store, config: InteractionConfig) -> Self {
        Self {
            store,
            config,
            drag: DragController::new(),
            selection: SelectionEngine::new(),
        }
    }

    /// Build an engine from host configuration.
    ///
    /// # Errors
    /// Returns a message if the timeline is inconsistent.
    pub fn from_config(timeline: TimelineConfig, config: InteractionConfig) -> Result<Self, String> {
        Ok(Self::new(Store::from_config(timeline)?, config))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Direct store access for host-side updates (time window, viewport, items).
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
    }

    /// Surface under page coordinates `(x, y)`.
    pub fn surface_at(&self, x: f64, y: f64) -> Surface {
        let state = self.store.state();
        hit_test(
            state,
            x - state.chart.x,
            y - state.chart.y,
            self.config.handle_width,
            self.config.cell_duration,
        )
    }

    /// Pointer-down on a known surface.
    pub fn pointer_down(&mut self, event: InputEvent, surface: Surface) {
        self.advance_time(event.time());
        self.drag
            .pointer_down(&mut self.store, &self.config, &event, surface);
        self.selection
            .pointer_down(&mut self.store, &self.config, &event, surface);
    }

    /// Pointer-down, hit-testing the chart to find the surface.
    pub fn pointer_down_at(&mut self, event: InputEvent) -> Surface {
        let p = event.position();
        let surface = self.surface_at(p.x, p.y);
        self.pointer_down(event, surface);
        surface
    }

    /// Document-scoped pointer-move.
    pub fn pointer_move(&mut self, event: InputEvent) {
        self.advance_time(event.time());
        self.drag
            .pointer_move(&mut self.store, &self.config, &event);
        self.selection
            .pointer_move(&mut self.store, &self.config, &event);
    }

    /// Document-scoped pointer-up.
    pub fn pointer_up(&mut self, event: InputEvent) {
        self.advance_time(event.time());
        self.drag.pointer_up(&mut self.store);
        self.selection.pointer_up(&mut self.store, &event);
    }

    /// Fire wait timers due at `now`.
    pub fn advance_time(&mut self, now: Time) {
        self.drag.advance_time(&mut self.store, &self.config, now);
    }

    pub fn pending_timers(&self) -> usize {
        self.drag.pending_timers()
    }

    /// Ghost proxies the host should draw, in a stable order.
    pub fn ghosts(&self) -> Vec<Ghost> {
        let mut ghosts: Vec<Ghost> = self
            .store
            .state()
            .movement
            .records
            .values()
            .filter_map(|r| r.ghost)
            .collect();
        ghosts.sort_by(|a, b| a.item.as_str().cmp(b.item.as_str()));
        ghosts
    }

    pub fn current_movement(&self) -> CurrentMovement {
        self.store.state().movement.current
    }

    pub fn selection(&self) -> &SelectionState {
        &self.store.state().selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::id::ItemId;
    use gt_core::model::{Item, Modifiers, Rect, Row, TimeWindow};

    fn engine() -> InteractionEngine {
        InteractionEngine::from_config(
            TimelineConfig {
                time: TimeWindow {
                    from: 0,
                    to: 1_000,
                    time_per_pixel: 1.0,
                },
                rows: vec![Row::new("en_row")],
                items: vec![Item::new("en_1", "en_row", 100, 200)],
                chart: Rect::new(50.0, 50.0, 1_000.0, 40.0),
                ..Default::default()
            },
            InteractionConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn surface_at_uses_page_coordinates() {
        let engine = engine();
        assert_eq!(
            engine.surface_at(200.0, 60.0),
            Surface::ItemBody(ItemId::intern("en_1"))
        );
        assert!(matches!(engine.surface_at(400.0, 60.0), Surface::Cell { .. }));
        assert_eq!(engine.surface_at(200.0, 10.0), Surface::Outside);
    }

    #[test]
    fn events_fire_due_timers_first() {
        let mut engine = engine();
        engine.pointer_down_at(InputEvent::from_pointer_down(200.0, 60.0, 0, Modifiers::NONE, 0));
        assert!(engine.current_movement().waiting);
        engine.pointer_move(InputEvent::from_pointer_move(220.0, 60.0, Modifiers::NONE, 1));
        assert!(engine.current_movement().moving);
        assert_eq!(engine.ghosts().len(), 1);
        assert_eq!(engine.store().item(ItemId::intern("en_1")).time.start, 120);
    }
}
