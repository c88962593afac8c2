//! Placement validation.
//!
//! Intervals are half-open `[start, end)`. For the overlap test the end is
//! pulled back by one tick to the last occupied tick, and both sides are
//! compared inclusively. Items that merely touch (`a.end == b.start`) do not
//! collide; anything sharing a tick does.

use crate::config::InteractionConfig;
use gt_core::id::{ItemId, RowId};
use gt_core::model::{Time, Timeline};

/// Whether placing `item` on `row` at `[start, end)` is illegal.
///
/// # Panics
/// If `row` or any item cached on it is unknown.
pub fn collides(
    state: &Timeline,
    config: &InteractionConfig,
    row: RowId,
    item: ItemId,
    start: Time,
    end: Time,
) -> bool {
    if !config.collision_detection {
        return false;
    }
    if config.out_of_borders && !state.time.contains(start, end) {
        return true;
    }
    let tick = config.tick();
    if end - start <= tick {
        return true;
    }
    let last = end - tick;

    state
        .items_in_row(row)
        .filter(|other| other.id != item)
        .any(|other| {
            let s = other.time.start;
            let e = other.time.end - tick;
            (start >= s && start <= e) || (last >= s && last <= e) || (start <= s && last >= e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::model::{Item, Row, TimeWindow, TimelineConfig};

    fn timeline() -> Timeline {
        Timeline::from_config(TimelineConfig {
            time: TimeWindow {
                from: 0,
                to: 1_000,
                time_per_pixel: 1.0,
            },
            rows: vec![Row::new("col_row"), Row::new("col_empty")],
            items: vec![
                Item::new("col_a", "col_row", 100, 200),
                Item::new("col_b", "col_row", 240, 300),
            ],
            ..Default::default()
        })
        .unwrap()
    }

    fn check(config: &InteractionConfig, start: Time, end: Time) -> bool {
        collides(
            &timeline(),
            config,
            RowId::intern("col_row"),
            ItemId::intern("col_a"),
            start,
            end,
        )
    }

    #[test]
    fn existing_layout_is_legal() {
        let t = timeline();
        let config = InteractionConfig::default();
        for item in t.items.values() {
            assert!(!collides(
                &t,
                &config,
                item.row,
                item.id,
                item.time.start,
                item.time.end
            ));
        }
    }

    #[test]
    fn overlap_in_any_shape_collides() {
        let config = InteractionConfig::default();
        assert!(check(&config, 150, 250), "end inside other");
        assert!(check(&config, 250, 350), "start inside other");
        assert!(check(&config, 200, 400), "contains other");
        assert!(check(&config, 260, 280), "inside other");
    }

    #[test]
    fn touching_boundary_is_legal() {
        let config = InteractionConfig::default();
        assert!(!check(&config, 140, 240));
        assert!(!check(&config, 300, 400));
        assert!(check(&config, 141, 241));
    }

    #[test]
    fn own_interval_is_ignored() {
        let config = InteractionConfig::default();
        assert!(!check(&config, 100, 200));
    }

    #[test]
    fn tiny_intervals_always_collide() {
        let config = InteractionConfig::default();
        assert!(check(&config, 10, 11));
        assert!(check(&config, 10, 10));
        assert!(check(&config, 10, 5));
    }

    #[test]
    fn disabled_detection_accepts_anything() {
        let config = InteractionConfig {
            collision_detection: false,
            ..Default::default()
        };
        assert!(!check(&config, 150, 250));
        assert!(!check(&config, 10, 5));
    }

    #[test]
    fn out_of_borders_rejects_outside_window() {
        let config = InteractionConfig {
            out_of_borders: true,
            ..Default::default()
        };
        assert!(check(&config, -50, 50));
        assert!(check(&config, 950, 1_050));
        assert!(!check(&config, 0, 50));
    }

    #[test]
    fn other_rows_do_not_interfere() {
        let t = timeline();
        assert!(!collides(
            &t,
            &InteractionConfig::default(),
            RowId::intern("col_empty"),
            ItemId::intern("col_a"),
            240,
            300
        ));
    }
}
