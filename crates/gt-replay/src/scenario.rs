//! Scripted pointer scenarios.
//!
//! A scenario bundles interaction settings, a timeline, and a list of
//! pointer events with timestamps. Replaying it drives the same
//! [`InteractionEngine`] a browser host would, then captures a snapshot of
//! the store that is stable across runs (everything sorted by id).

use gt_core::model::{CellId, CurrentMovement, Ghost, Modifiers, Time, TimelineConfig};
use gt_editor::{InputEvent, InteractionConfig, InteractionEngine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: InteractionConfig,
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedEvent {
    Down {
        x: f64,
        y: f64,
        time: Time,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        button: i16,
    },
    Move {
        x: f64,
        y: f64,
        time: Time,
        #[serde(default)]
        ctrl: bool,
    },
    Up {
        x: f64,
        y: f64,
        time: Time,
        #[serde(default)]
        ctrl: bool,
    },
    /// Let wall-clock time pass without pointer input.
    Tick { time: Time },
}

impl ScriptedEvent {
    fn apply(self, engine: &mut InteractionEngine) {
        match self {
            ScriptedEvent::Down {
                x,
                y,
                time,
                ctrl,
                button,
            } => {
                let surface =
                    engine.pointer_down_at(InputEvent::from_pointer_down(x, y, button, mods(ctrl), time));
                log::debug!("down at ({x}, {y}) t={time} on {surface:?}");
            }
            ScriptedEvent::Move { x, y, time, ctrl } => {
                engine.pointer_move(InputEvent::from_pointer_move(x, y, mods(ctrl), time));
            }
            ScriptedEvent::Up { x, y, time, ctrl } => {
                engine.pointer_up(InputEvent::from_pointer_up(x, y, mods(ctrl), time));
            }
            ScriptedEvent::Tick { time } => engine.advance_time(time),
        }
    }
}

fn mods(ctrl: bool) -> Modifiers {
    Modifiers {
        ctrl,
        ..Modifiers::NONE
    }
}

/// Final state of a replayed scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub items: Vec<ItemSnapshot>,
    pub selected_items: Vec<String>,
    pub selected_cells: Vec<CellId>,
    pub ghosts: Vec<Ghost>,
    pub movement: CurrentMovement,
    pub pending_timers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSnapshot {
    pub id: String,
    pub row: String,
    pub start: Time,
    pub end: Time,
    pub selected: bool,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    /// Returns a message describing the first syntax or shape problem.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid scenario: {e}"))
    }

    /// Replay every event in order and snapshot the result.
    ///
    /// # Errors
    /// Returns a message if the timeline is inconsistent.
    pub fn run(self) -> Result<Snapshot, String> {
        let mut engine = InteractionEngine::from_config(self.timeline, self.config)?;
        for event in self.events {
            event.apply(&mut engine);
        }
        Ok(snapshot(&engine))
    }
}

fn snapshot(engine: &InteractionEngine) -> Snapshot {
    let state = engine.store().state();

    let mut items: Vec<ItemSnapshot> = state
        .items
        .values()
        .map(|item| ItemSnapshot {
            id: item.id.as_str().to_string(),
            row: item.row.as_str().to_string(),
            start: item.time.start,
            end: item.time.end,
            selected: item.selected,
        })
        .collect();
    items.sort_by(|a, b| a.id.cmp(&b.id));

    let mut selected_items: Vec<String> = state
        .selection
        .selected
        .items
        .iter()
        .map(|id| id.as_str().to_string())
        .collect();
    selected_items.sort();

    let mut selected_cells = state.selection.selected.cells.clone();
    selected_cells.sort_by(|a, b| {
        a.row
            .as_str()
            .cmp(b.row.as_str())
            .then(a.column.cmp(&b.column))
    });

    Snapshot {
        items,
        selected_items,
        selected_cells,
        ghosts: engine.ghosts(),
        movement: engine.current_movement(),
        pending_timers: engine.pending_timers(),
    }
}
