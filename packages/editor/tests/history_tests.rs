//! Undo/redo behaviour through the editor core

mod common;

use assert_matches::assert_matches;
use common::{editor, labels};
use pagewright_editor::{tree, AnimationSettings, EditorError, MoveDirection};
use serde_json::json;

fn title(value: &str) -> pagewright_editor::PropMap {
    json!({ "title": value }).as_object().cloned().unwrap()
}

#[test]
fn test_cursor_stays_in_bounds() {
    let (mut core, _requests) = editor();

    assert_matches!(core.undo(), Err(EditorError::NothingToUndo));
    assert_matches!(core.redo(), Err(EditorError::NothingToRedo));

    core.add("hero").unwrap();
    core.add("text").unwrap();
    for _ in 0..5 {
        let _ = core.undo();
    }
    let history = &core.session().history;
    assert_eq!(history.cursor(), 0);
    assert!(history.cursor() < history.len());

    for _ in 0..5 {
        let _ = core.redo();
    }
    let history = &core.session().history;
    assert_eq!(history.cursor(), history.len() - 1);
}

#[test]
fn test_undo_then_redo_restores_identical_tree() {
    let (mut core, _requests) = editor();
    core.switch_page("about");
    core.duplicate("C").unwrap();
    core.move_component("B", MoveDirection::Down).unwrap();

    let before = serde_json::to_string(core.components()).unwrap();
    core.undo().unwrap();
    core.redo().unwrap();
    let after = serde_json::to_string(core.components()).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_structural_edit_discards_redo() {
    let (mut core, _requests) = editor();
    core.add("hero").unwrap();
    core.add("text").unwrap();
    core.undo().unwrap();
    core.undo().unwrap();
    assert!(core.can_redo());

    core.add("columns").unwrap();
    assert!(!core.can_redo());
    assert_matches!(core.redo(), Err(EditorError::NothingToRedo));
    assert_eq!(labels(core.components()), vec!["Intro", "Columns"]);
}

#[test]
fn test_continuous_edits_batch_into_one_entry() {
    let (mut core, _requests) = editor();
    let hero = core.add("hero").unwrap();
    let entries_before = core.session().history.len();

    for value in ["S", "Sp", "Spr", "Spri", "Sprin", "Spring"] {
        core.update_props(&hero, title(value)).unwrap();
    }
    assert_eq!(core.session().history.len(), entries_before);
    assert!(core.session().pending_continuous_edit);

    core.set_selection(Some("A"));
    assert_eq!(core.session().history.len(), entries_before + 1);
    assert!(!core.session().pending_continuous_edit);

    // one undo reverts the whole burst
    core.undo().unwrap();
    let node = tree::find(core.components(), &hero).unwrap();
    assert_eq!(node.props["title"], "Welcome");
}

#[test]
fn test_selection_change_without_pending_edit_adds_nothing() {
    let (mut core, _requests) = editor();
    let entries = core.session().history.len();

    core.set_selection(Some("A"));
    core.set_selection(None);
    assert_eq!(core.session().history.len(), entries);
}

#[test]
fn test_undo_flushes_pending_edit_first() {
    let (mut core, _requests) = editor();
    core.update_animation(
        "A",
        Some(AnimationSettings {
            entrance: Some("fade-in".into()),
            ..Default::default()
        }),
    )
    .unwrap();
    assert!(core.can_undo());

    core.undo().unwrap();
    assert!(core.components()[0].animation.is_none());

    core.redo().unwrap();
    let animation = core.components()[0].animation.clone().unwrap();
    assert_eq!(animation.entrance.as_deref(), Some("fade-in"));
}

#[test]
fn test_structural_edit_absorbs_pending_edit() {
    let (mut core, _requests) = editor();
    core.update_props("A", title("Edited")).unwrap();
    core.add("text").unwrap();

    assert!(!core.session().pending_continuous_edit);
    assert_eq!(core.session().history.len(), 2);

    core.undo().unwrap();
    assert_eq!(labels(core.components()), vec!["Intro"]);
    assert!(core.components()[0].props.is_empty());
}

#[test]
fn test_explicit_flush() {
    let (mut core, _requests) = editor();
    core.update_styles("A", title("x")).unwrap();

    core.flush_pending_edit();
    core.flush_pending_edit();
    assert_eq!(core.session().history.len(), 2);
}

#[test]
fn test_edits_to_missing_node_are_ignored() {
    let (mut core, _requests) = editor();
    core.update_props("ghost", title("x")).unwrap();
    assert!(!core.session().pending_continuous_edit);
}
