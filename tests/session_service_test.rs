//! Tests for the selection session lifecycle and its persistence

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use treeselect::application::services::{
    SelectionSession, SessionState, SessionStore, TreeService,
};
use treeselect::application::ApplicationError;
use treeselect::domain::{CheckState, NodeDef, SelectionSet, TreeBuilder, TreeModel};
use treeselect::infrastructure::traits::RealFileSystem;
use treeselect::util::testing;

fn fixture_path() -> PathBuf {
    PathBuf::from("tests/resources/trees/fields.toml")
}

fn open_fields_session() -> SelectionSession {
    testing::init_test_setup();
    let service = TreeService::new(Arc::new(RealFileSystem));
    let model = service.load(&fixture_path()).expect("load fields.toml");
    let mut session = SelectionSession::new(model);
    session.open();
    session
}

fn store_in(dir: &Path) -> SessionStore {
    SessionStore::new(Arc::new(RealFileSystem), dir.join("state").join("session.toml"))
}

// ============================================================
// TreeService
// ============================================================

#[test]
fn given_missing_tree_file_when_loading_then_tree_file_not_found() {
    let service = TreeService::new(Arc::new(RealFileSystem));
    let err = service
        .load(Path::new("tests/resources/trees/does-not-exist.toml"))
        .unwrap_err();
    assert!(matches!(err, ApplicationError::TreeFileNotFound(_)));
}

#[test]
fn given_duplicate_ids_when_loading_then_domain_error() {
    let service = TreeService::new(Arc::new(RealFileSystem));
    let err = service
        .load(Path::new("tests/resources/trees/duplicate.toml"))
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(_)));
    assert_eq!(err.to_string(), "duplicate node id: shared");
}

// ============================================================
// Session operations
// ============================================================

#[test]
fn given_nested_group_when_last_child_toggled_then_parent_groups_follow() {
    let mut session = open_fields_session();

    session.toggle("org.department").unwrap();
    session.toggle("org.location.city").unwrap();
    assert_eq!(session.state("org.location").unwrap(), CheckState::Indeterminate);
    assert_eq!(session.state("org").unwrap(), CheckState::Indeterminate);

    session.toggle("org.location.country").unwrap();
    assert_eq!(session.state("org.location").unwrap(), CheckState::Checked);
    assert_eq!(session.state("org").unwrap(), CheckState::Checked);
    assert!(session.selection().contains("org"));
    assert!(session.selection().contains("org.location"));
}

#[test]
fn given_unknown_id_when_toggling_then_unknown_node_and_selection_kept() {
    let mut session = open_fields_session();
    session.toggle("notes").unwrap();

    let err = session.toggle("nope").unwrap_err();
    assert!(matches!(err, ApplicationError::UnknownNode(ref id) if id == "nope"));
    assert_eq!(session.selection().iter().collect::<Vec<_>>(), vec!["notes"]);
}

#[test]
fn given_selected_groups_when_confirming_then_only_fields_in_tree_order() {
    let mut session = open_fields_session();
    session.toggle_many(&["notes", "org.location", "basic.name"]).unwrap();

    let labels: Vec<String> = session
        .confirm()
        .unwrap()
        .into_iter()
        .map(|f| f.label)
        .collect();
    assert_eq!(labels, vec!["Name", "City, State", "Country", "Notes"]);
}

#[test]
fn given_session_when_select_all_twice_then_empty() {
    let mut session = open_fields_session();
    assert_eq!(session.select_all().unwrap().len(), session.model().len());
    assert!(session.select_all().unwrap().is_empty());
}

// ============================================================
// SessionStore
// ============================================================

#[test]
fn given_no_state_file_when_loading_then_none() {
    let temp = TempDir::new().unwrap();
    let store = store_in(temp.path());
    assert!(store.load().unwrap().is_none());
    assert!(!store.clear().unwrap());
}

#[test]
fn given_saved_session_when_restored_then_selection_and_expansion_survive() {
    let temp = TempDir::new().unwrap();
    let store = store_in(temp.path());

    let mut session = open_fields_session();
    session.toggle("basic").unwrap();
    session.toggle_expanded("org").unwrap();
    store.save(&session.snapshot()).unwrap();
    assert!(store.path().exists());

    let state = store.load().unwrap().expect("state saved");
    let model = TreeService::new(Arc::new(RealFileSystem))
        .load(&fixture_path())
        .unwrap();
    let restored = SelectionSession::restore(model, state);

    assert!(restored.is_open());
    assert_eq!(restored.selection(), session.selection());
    assert!(restored.expansion().is_expanded("org"));
    assert_eq!(restored.state("basic").unwrap(), CheckState::Checked);
}

fn group_with(children: &[&str]) -> TreeModel {
    let fields = children
        .iter()
        .map(|id| NodeDef::field(*id, &id.to_uppercase(), *id))
        .collect();
    TreeBuilder::new()
        .build(&[NodeDef::group("g", "G", fields)])
        .unwrap()
}

fn assert_groups_consistent(model: &TreeModel, selection: &SelectionSet) {
    for (_, node) in model.iter().filter(|(_, n)| !n.is_leaf()) {
        let all_children = node
            .children
            .iter()
            .all(|&c| selection.contains_all(model.get_node(c).unwrap().closure()));
        assert_eq!(
            selection.contains(node.id()),
            all_children,
            "group {} inconsistent in {:?}",
            node.id(),
            selection
        );
    }
}

#[test]
fn given_group_gained_child_when_restoring_then_group_indeterminate() {
    testing::init_test_setup();
    let state = SessionState {
        selected: ["g", "x", "y"].into_iter().collect(),
        ..SessionState::default()
    };

    let session = SelectionSession::restore(group_with(&["x", "y", "z"]), state);

    assert_groups_consistent(session.model(), session.selection());
    assert_eq!(session.state("g").unwrap(), CheckState::Indeterminate);
    assert_eq!(session.state("z").unwrap(), CheckState::Unchecked);
    let ids: Vec<String> = session.confirm().unwrap().into_iter().map(|f| f.id).collect();
    assert_eq!(ids, vec!["x", "y"]);
}

#[test]
fn given_group_lost_only_unselected_child_when_restoring_then_group_selected() {
    testing::init_test_setup();
    let state = SessionState {
        selected: ["x"].into_iter().collect(),
        ..SessionState::default()
    };

    let session = SelectionSession::restore(group_with(&["x"]), state);

    assert_groups_consistent(session.model(), session.selection());
    assert!(session.selection().contains("g"));
    assert_eq!(session.state("g").unwrap(), CheckState::Checked);
}

#[test]
fn given_saved_session_when_cleared_then_file_removed() {
    let temp = TempDir::new().unwrap();
    let store = store_in(temp.path());
    store.save(&SessionState::default()).unwrap();

    assert!(store.clear().unwrap());
    assert!(!store.path().exists());
    assert!(store.load().unwrap().is_none());
}

#[test]
fn given_corrupt_state_file_when_loading_then_invalid_state() {
    let temp = TempDir::new().unwrap();
    let store = store_in(temp.path());
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "selected = 42\n").unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, ApplicationError::InvalidState { .. }));
}

#[test]
fn given_state_file_when_written_then_is_readable_toml() {
    let temp = TempDir::new().unwrap();
    let store = store_in(temp.path());
    let state = SessionState {
        selected: ["basic", "basic.name"].into_iter().collect(),
        expanded: ["basic"].into_iter().collect(),
    };
    store.save(&state).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    assert!(content.contains("selected = ["));
    assert!(content.contains("\"basic.name\""));
    assert_eq!(store.load().unwrap(), Some(state));
}
