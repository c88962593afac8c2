//! Integration tests: selection engine.
//!
//! Item clicks with link expansion, ctrl-additive selection, and area drags
//! over cells, observed through the store.

use gt_core::id::{ItemId, RowId};
use gt_core::model::*;
use gt_core::store::{Mutation, Topic};
use gt_editor::{InputEvent, InteractionConfig, InteractionEngine};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn make_engine() -> InteractionEngine {
    let timeline: TimelineConfig =
        serde_json::from_str(include_str!("fixtures/two_rows.json")).unwrap();
    InteractionEngine::from_config(timeline, InteractionConfig::default()).unwrap()
}

fn id(s: &str) -> ItemId {
    ItemId::intern(s)
}

fn click(engine: &mut InteractionEngine, x: f64, y: f64, modifiers: Modifiers, time: Time) {
    engine.pointer_down_at(InputEvent::from_pointer_down(x, y, 0, modifiers, time));
    engine.pointer_up(InputEvent::from_pointer_up(x, y, modifiers, time));
}

fn sweep(engine: &mut InteractionEngine, from: Point, to: Point, modifiers: Modifiers) {
    engine.pointer_down_at(InputEvent::from_pointer_down(from.x, from.y, 0, modifiers, 0));
    engine.pointer_move(InputEvent::from_pointer_move(to.x, to.y, modifiers, 1));
}

fn selected_flags(engine: &InteractionEngine) -> Vec<&str> {
    let mut ids: Vec<&str> = engine
        .store()
        .state()
        .items
        .values()
        .filter(|item| item.selected)
        .map(|item| item.id.as_str())
        .collect();
    ids.sort();
    ids
}

fn selected_set(engine: &InteractionEngine) -> Vec<&str> {
    let mut ids: Vec<&str> = engine
        .selection()
        .selected
        .items
        .iter()
        .map(|id| id.as_str())
        .collect();
    ids.sort();
    ids
}

// ─── Item selection ─────────────────────────────────────────────────────

#[test]
fn click_selects_single_item() {
    let mut engine = make_engine();
    click(&mut engine, 150.0, 20.0, Modifiers::NONE, 0);
    assert_eq!(selected_flags(&engine), vec!["I1"]);
    assert_eq!(selected_set(&engine), vec!["I1"]);
}

#[test]
fn cyclic_links_select_each_item_once() {
    let mut engine = make_engine();
    click(&mut engine, 550.0, 60.0, Modifiers::NONE, 0);
    assert_eq!(engine.selection().selected.items.len(), 2);
    assert_eq!(selected_flags(&engine), vec!["I3", "I4"]);

    click(&mut engine, 550.0, 60.0, Modifiers::NONE, 1);
    assert_eq!(engine.selection().selected.items.len(), 2);
    assert_eq!(selected_flags(&engine), vec!["I3", "I4"]);
}

#[test]
fn plain_click_replaces_selection() {
    let mut engine = make_engine();
    click(&mut engine, 550.0, 60.0, Modifiers::NONE, 0);
    click(&mut engine, 260.0, 20.0, Modifiers::NONE, 1);
    assert_eq!(selected_flags(&engine), vec!["I2"]);
}

#[test]
fn ctrl_click_is_a_strict_union() {
    let mut engine = make_engine();
    click(&mut engine, 150.0, 20.0, Modifiers::NONE, 0);
    click(&mut engine, 550.0, 60.0, Modifiers::CTRL, 1);
    assert_eq!(selected_set(&engine), vec!["I1", "I3", "I4"]);
    assert_eq!(selected_flags(&engine), vec!["I1", "I3", "I4"]);

    click(&mut engine, 750.0, 60.0, Modifiers::CTRL, 2);
    assert_eq!(engine.selection().selected.items.len(), 3, "no duplicates");
    assert_eq!(selected_flags(&engine), vec!["I1", "I3", "I4"]);
}

#[test]
fn removed_item_leaves_selection_before_next_ctrl_click() {
    let mut engine = make_engine();
    click(&mut engine, 550.0, 60.0, Modifiers::NONE, 0);
    assert_eq!(selected_set(&engine), vec!["I3", "I4"]);

    engine.store_mut().update(Mutation::RemoveItem { id: id("I4") });
    assert_eq!(selected_set(&engine), vec!["I3"]);

    click(&mut engine, 150.0, 20.0, Modifiers::CTRL, 1);
    assert_eq!(selected_set(&engine), vec!["I1", "I3"]);
    assert_eq!(selected_flags(&engine), vec!["I1", "I3"]);
}

#[test]
fn selection_commit_is_atomic() {
    let mut engine = make_engine();
    click(&mut engine, 150.0, 20.0, Modifiers::NONE, 0);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    engine.store_mut().subscribe(Topic::Items, move |state| {
        let mut flags: Vec<String> = state
            .items
            .values()
            .filter(|i| i.selected)
            .map(|i| i.id.as_str().to_string())
            .collect();
        flags.sort();
        sink.borrow_mut().push(flags);
    });

    click(&mut engine, 550.0, 60.0, Modifiers::NONE, 1);
    assert_eq!(*seen.borrow(), vec![vec!["I3".to_string(), "I4".to_string()]]);
}

#[test]
fn secondary_click_only_mirrors_pointer() {
    let mut engine = make_engine();
    engine.pointer_down_at(InputEvent::from_pointer_down(150.0, 20.0, 2, Modifiers::NONE, 0));
    assert!(selected_flags(&engine).is_empty());
    let pointer = &engine.selection().pointer;
    assert_eq!(pointer.target, TargetKind::Item);
    assert_eq!(pointer.down.map(|d| d.button), Some(PointerButton::Secondary));
}

// ─── Area selection ─────────────────────────────────────────────────────

#[test]
fn area_rect_is_invariant_under_drag_direction() {
    let a = Point::new(400.0, 10.0);
    let b = Point::new(950.0, 70.0);

    let mut forward = make_engine();
    sweep(&mut forward, a, b, Modifiers::NONE);
    let mut backward = make_engine();
    sweep(&mut backward, b, a, Modifiers::NONE);

    assert_eq!(forward.selection().area, backward.selection().area);
    assert_eq!(forward.selection().area, Rect::new(400.0, 10.0, 550.0, 60.0));
    assert_eq!(
        forward.selection().selecting.items,
        backward.selection().selecting.items
    );
    assert_eq!(selected_flags(&forward), vec!["I3", "I4"]);
}

#[test]
fn area_release_commits_cells() {
    let mut engine = make_engine();
    engine.set_config(InteractionConfig {
        cell_duration: 100,
        ..Default::default()
    });
    sweep(&mut engine, Point::new(400.0, 10.0), Point::new(480.0, 30.0), Modifiers::NONE);
    assert!(engine.selection().is_selecting);
    assert!(engine.selection().selected.cells.is_empty());

    engine.pointer_up(InputEvent::from_pointer_up(480.0, 30.0, Modifiers::NONE, 2));
    let selection = engine.selection();
    assert!(!selection.is_selecting);
    assert!(selection.selecting.is_empty());
    assert_eq!(
        selection.selected.cells,
        vec![CellId {
            row: RowId::intern("R1"),
            column: 4
        }]
    );
}

#[test]
fn empty_sweep_deselects_everything() {
    let mut engine = make_engine();
    click(&mut engine, 150.0, 20.0, Modifiers::NONE, 0);
    assert_eq!(selected_flags(&engine), vec!["I1"]);

    sweep(&mut engine, Point::new(350.0, 5.0), Point::new(450.0, 30.0), Modifiers::NONE);
    assert!(selected_flags(&engine).is_empty());
    assert!(engine.selection().selected.items.is_empty());
}

#[test]
fn ctrl_sweep_adds_to_selection() {
    let mut engine = make_engine();
    click(&mut engine, 150.0, 20.0, Modifiers::NONE, 0);
    sweep(&mut engine, Point::new(450.0, 50.0), Point::new(650.0, 70.0), Modifiers::CTRL);
    assert_eq!(selected_flags(&engine), vec!["I1", "I3"]);
}

#[test]
fn pointer_state_is_mirrored_between_gestures() {
    let mut engine = make_engine();
    click(&mut engine, 150.0, 20.0, Modifiers::NONE, 0);
    engine.pointer_move(InputEvent::from_pointer_move(420.0, 30.0, Modifiers::NONE, 5));

    let pointer = &engine.selection().pointer;
    assert!(!pointer.dragging);
    assert_eq!(pointer.current, Point::new(420.0, 30.0));
    assert_eq!(pointer.item, Some(id("I1")));
    assert!(pointer.up.is_some());
    assert_eq!(selected_flags(&engine), vec!["I1"], "hover does not select");
}
