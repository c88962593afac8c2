//! WASM bridge for the Gantt timeline: exposes the interaction engine to
//! JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host forwards raw
//! pointer events (page coordinates plus `event.timeStamp`), calls `tick`
//! from a timer so pending drag starts fire without further input, and reads
//! state back as JSON to render items, ghosts, and the selection rectangle.

use gt_core::layout::Viewport;
use gt_core::model::{Modifiers, Rect, TimeWindow, TimelineConfig};
use gt_core::store::{Mutation, Store};
use gt_editor::{InputEvent, InteractionConfig, InteractionEngine};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The main WASM-facing timeline controller.
///
/// Every interaction from the page goes through this struct. Methods that
/// take input return `true` when the store changed and the host should
/// re-render.
#[wasm_bindgen]
pub struct GanttCanvas {
    engine: InteractionEngine,
}

impl Default for GanttCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl GanttCanvas {
    /// Create an empty controller with default interaction settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            engine: InteractionEngine::new(Store::default(), InteractionConfig::default()),
        }
    }

    /// Replace the timeline (rows, items, time window, chart box) from JSON.
    /// Returns an error message, or an empty string on success.
    pub fn load(&mut self, timeline_json: &str) -> String {
        match load_timeline(timeline_json) {
            Ok(store) => {
                let config = self.engine.config().clone();
                self.engine = InteractionEngine::new(store, config);
                String::new()
            }
            Err(e) => e,
        }
    }

    /// Replace the interaction settings from JSON.
    /// Returns an error message, or an empty string on success.
    pub fn set_config(&mut self, config_json: &str) -> String {
        match InteractionConfig::from_json(config_json) {
            Ok(config) => {
                self.engine.set_config(config);
                String::new()
            }
            Err(e) => e,
        }
    }

    /// Update the page-space bounding box of the chart area.
    pub fn set_chart_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.engine
            .store_mut()
            .update(Mutation::SetChart(Rect::new(x, y, width, height)));
    }

    /// Update the visible time window (zoom/scroll).
    /// Returns an error message, or an empty string on success.
    pub fn set_time_window(&mut self, from: f64, to: f64, time_per_pixel: f64) -> String {
        let window = TimeWindow {
            from: from as i64,
            to: to as i64,
            time_per_pixel,
        };
        if let Err(e) = window.validate() {
            log::warn!("rejected time window: {e}");
            return e;
        }
        self.engine.store_mut().update(Mutation::SetTime(window));
        String::new()
    }

    /// Update the vertical viewport; visible rows are recomputed.
    pub fn set_viewport(&mut self, width: f64, height: f64, scroll_top: f64) {
        self.engine.store_mut().update(Mutation::SetViewport(Viewport {
            width,
            height,
            scroll_top,
        }));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
        time: f64,
    ) -> bool {
        let mods = modifiers(shift, ctrl, alt, meta);
        let event = InputEvent::from_pointer_down(x, y, button, mods, time as i64);
        self.track(|engine| {
            engine.pointer_down_at(event);
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
        time: f64,
    ) -> bool {
        let mods = modifiers(shift, ctrl, alt, meta);
        let event = InputEvent::from_pointer_move(x, y, mods, time as i64);
        self.track(|engine| engine.pointer_move(event))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_up(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
        time: f64,
    ) -> bool {
        let mods = modifiers(shift, ctrl, alt, meta);
        let event = InputEvent::from_pointer_up(x, y, mods, time as i64);
        self.track(|engine| engine.pointer_up(event))
    }

    /// Fire wait timers due at `time`.
    pub fn tick(&mut self, time: f64) -> bool {
        self.track(|engine| engine.advance_time(time as i64))
    }

    /// Whether a drag start is still pending; the host keeps ticking while true.
    pub fn has_pending_timers(&self) -> bool {
        self.engine.pending_timers() > 0
    }

    /// Items with their current interval, row, and selection flag.
    pub fn items_json(&self) -> String {
        let state = self.engine.store().state();
        let mut items: Vec<ItemView<'_>> = state
            .items
            .values()
            .map(|item| ItemView {
                id: item.id.as_str(),
                row: item.row.as_str(),
                start: item.time.start,
                end: item.time.end,
                selected: item.selected,
            })
            .collect();
        items.sort_by(|a, b| a.id.cmp(b.id));
        to_json(&items)
    }

    /// Ghost proxies to draw on top of the chart.
    pub fn ghosts_json(&self) -> String {
        to_json(&self.engine.ghosts())
    }

    pub fn selection_json(&self) -> String {
        to_json(self.engine.selection())
    }

    pub fn movement_json(&self) -> String {
        to_json(&self.engine.current_movement())
    }
}

impl GanttCanvas {
    /// Run `f` and report whether it committed anything.
    fn track(&mut self, f: impl FnOnce(&mut InteractionEngine)) -> bool {
        let before = self.engine.store().revision();
        f(&mut self.engine);
        self.engine.store().revision() != before
    }
}

#[derive(Serialize)]
struct ItemView<'a> {
    id: &'a str,
    row: &'a str,
    start: i64,
    end: i64,
    selected: bool,
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

fn load_timeline(json: &str) -> Result<Store, String> {
    let config: TimelineConfig =
        serde_json::from_str(json).map_err(|e| format!("invalid timeline: {e}"))?;
    Store::from_config(config)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("serialization failed: {e}");
        String::from("null")
    })
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Gantt WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TIMELINE: &str = r#"{
        "time": { "from": 0, "to": 1000, "time_per_pixel": 1.0 },
        "chart": { "x": 0, "y": 0, "width": 1000, "height": 40 },
        "rows": [ { "id": "w_row" } ],
        "items": [ { "id": "w_item", "row_id": "w_row", "time": { "start": 100, "end": 200 } } ]
    }"#;

    #[test]
    fn load_reports_errors_as_strings() {
        let mut canvas = GanttCanvas::new();
        assert_eq!(canvas.load(TIMELINE), "");
        assert!(canvas.load("{ not json").starts_with("invalid timeline"));
        assert!(canvas.set_config("{ \"wait\": [] }").starts_with("invalid interaction config"));
    }

    #[test]
    fn time_window_needs_positive_ratio() {
        let mut canvas = GanttCanvas::new();
        canvas.load(TIMELINE);
        assert!(canvas.set_time_window(0.0, 1000.0, 0.0).contains("time_per_pixel"));
        assert_eq!(canvas.engine.store().state().time.time_per_pixel, 1.0);
        assert_eq!(canvas.set_time_window(0.0, 2000.0, 2.0), "");
        assert_eq!(canvas.engine.store().state().time.time_per_pixel, 2.0);
    }

    #[test]
    fn drag_roundtrip_through_bridge() {
        let mut canvas = GanttCanvas::new();
        canvas.load(TIMELINE);
        assert!(canvas.handle_pointer_down(150.0, 20.0, 0, false, false, false, false, 0.0));
        assert!(canvas.has_pending_timers());
        assert!(canvas.tick(0.0));
        assert!(canvas.ghosts_json().contains("w_item"));
        assert!(canvas.handle_pointer_move(175.0, 20.0, false, false, false, false, 1.0));
        assert!(canvas.items_json().contains("\"start\":125"));
        assert!(canvas.handle_pointer_up(175.0, 20.0, false, false, false, false, 2.0));
        assert_eq!(canvas.ghosts_json(), "[]");
        assert!(canvas.movement_json().contains("\"moving\":false"));
    }
}
