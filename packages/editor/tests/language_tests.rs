//! Language overlay resolution and per-language history

mod common;

use assert_matches::assert_matches;
use common::{drain, editor, labels};
use pagewright_editor::{EditorError, PersistRequest, WriteTarget};

fn languages_sent(requests: &[PersistRequest]) -> Vec<Option<String>> {
    requests
        .iter()
        .filter_map(|request| match request {
            PersistRequest::UpdatePageComponents { language, .. } => Some(language.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_missing_overlay_falls_back_and_writes_default_tree() {
    let (mut core, mut requests) = editor();
    core.switch_language(Some("fr")).unwrap();
    drain(&mut requests);

    assert_eq!(core.write_target(), WriteTarget::Default);
    assert_eq!(labels(core.components()), vec!["Intro"]);

    core.add("hero").unwrap();

    let home = core.page("home").unwrap();
    assert_eq!(labels(&home.components), vec!["Intro", "Hero"]);
    assert!(home.translations.is_empty());
    assert_eq!(languages_sent(&drain(&mut requests)), vec![None]);
}

#[test]
fn test_existing_overlay_receives_edits() {
    let (mut core, mut requests) = editor();
    core.create_translation("home", "de").unwrap();
    core.switch_language(Some("de")).unwrap();
    drain(&mut requests);

    assert_eq!(core.write_target(), WriteTarget::Overlay("de".into()));
    core.add("text").unwrap();

    let home = core.page("home").unwrap();
    assert_eq!(labels(&home.components), vec!["Intro"]);
    assert_eq!(labels(&home.translations["de"].components), vec!["Intro", "Text"]);
    assert_eq!(
        languages_sent(&drain(&mut requests)),
        vec![Some("de".to_string())]
    );
}

#[test]
fn test_translation_keeps_node_ids() {
    let (mut core, _requests) = editor();
    core.create_translation("about", "fr").unwrap();

    let about = core.page("about").unwrap();
    assert_eq!(about.translations["fr"].components, about.components);
}

#[test]
fn test_switching_language_resets_history() {
    let (mut core, _requests) = editor();
    core.add("hero").unwrap();
    core.add("text").unwrap();
    assert!(core.can_undo());

    core.switch_language(Some("fr")).unwrap();
    assert_eq!(core.session().history.len(), 1);
    assert!(!core.can_undo());
    assert_matches!(core.undo(), Err(EditorError::NothingToUndo));
}

#[test]
fn test_default_language_normalises_to_none() {
    let (mut core, _requests) = editor();
    core.switch_language(Some("en")).unwrap();
    assert_eq!(core.session().active_language, None);
}

#[test]
fn test_unknown_language_is_rejected() {
    let (mut core, _requests) = editor();
    assert_matches!(
        core.switch_language(Some("xx")),
        Err(EditorError::UnknownLanguage(code)) if code == "xx"
    );
    assert_matches!(
        core.create_translation("home", "xx"),
        Err(EditorError::UnknownLanguage(_))
    );
    assert_eq!(core.session().active_language, None);
}

#[test]
fn test_selection_survives_language_switch_when_node_exists() {
    let (mut core, _requests) = editor();
    core.switch_page("about");
    core.create_translation("about", "fr").unwrap();
    core.set_selection(Some("C1"));

    core.switch_language(Some("fr")).unwrap();
    assert_eq!(core.selected_id(), Some("C1"));
}

#[test]
fn test_removing_active_overlay_falls_back() {
    let (mut core, _requests) = editor();
    core.create_translation("home", "fr").unwrap();
    core.switch_language(Some("fr")).unwrap();
    let added = core.add("hero").unwrap();
    core.set_selection(Some(&added));

    core.remove_translation("home", "fr");

    assert_eq!(core.write_target(), WriteTarget::Default);
    assert_eq!(labels(core.components()), vec!["Intro"]);
    assert_eq!(core.selected_id(), None);
    assert!(!core.can_undo());
}
