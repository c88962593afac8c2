//! Interaction configuration.
//!
//! Every field has a default, so a host may pass `{}` or only the fields it
//! cares about.

use gt_core::model::{Moveable, Snap, Time};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Allow selecting items.
    pub items: bool,
    /// Allow area-selecting cells.
    pub cells: bool,
    /// Follow `linked_with` when an item is selected.
    pub link_expansion: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            items: true,
            cells: true,
            link_expansion: true,
        }
    }
}

/// Configuration for the pointer interaction engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Delay between pointer-down on an item body and the start of the drag.
    pub wait: Time,
    /// Reject placements that overlap another item in the row.
    pub collision_detection: bool,
    /// Reject placements leaving the visible time window.
    pub out_of_borders: bool,
    /// Default move policy, overridable per item.
    pub moveable: Moveable,
    /// Default resize policy, overridable per item.
    pub resizable: bool,
    /// Show a ghost proxy while moving.
    pub ghost_node: bool,
    /// Width of the resize handle on an item's right edge, in pixels.
    pub handle_width: f64,
    /// Smallest representable tick of the host's time axis.
    pub time_unit: Time,
    pub snap_start: Snap,
    pub snap_end: Snap,
    /// Width of one selection cell column.
    pub cell_duration: Time,
    pub selection: SelectionConfig,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            wait: 0,
            collision_detection: true,
            out_of_borders: false,
            moveable: Moveable::Unrestricted,
            resizable: true,
            ghost_node: true,
            handle_width: 8.0,
            time_unit: 1,
            snap_start: Snap::None,
            snap_end: Snap::None,
            cell_duration: 3_600_000,
            selection: SelectionConfig::default(),
        }
    }
}

impl InteractionConfig {
    /// Parse a JSON configuration object.
    ///
    /// # Errors
    /// Returns the deserializer's message on malformed input.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid interaction config: {e}"))
    }

    /// `time_unit`, never below one.
    pub fn tick(&self) -> Time {
        self.time_unit.max(1)
    }
}
