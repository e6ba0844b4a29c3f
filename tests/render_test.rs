//! Tests for terminal tree rendering

use treeselect::application::services::SelectionSession;
use treeselect::application::{RenderOptions, TreeRender};
use treeselect::domain::{NodeDef, TreeBuilder};

fn session() -> SelectionSession {
    let model = TreeBuilder::new()
        .build(&[
            NodeDef::group(
                "group",
                "Group",
                vec![
                    NodeDef::field("x", "Field X", "x"),
                    NodeDef::field("y", "Field Y", "y"),
                ],
            ),
            NodeDef::field("solo", "Solo", "solo"),
        ])
        .unwrap();
    let mut session = SelectionSession::new(model);
    session.open();
    session
}

#[test]
fn given_collapsed_group_when_rendering_then_children_hidden() {
    let mut session = session();
    session.toggle("x").unwrap();

    let text = session.to_tree_string(&RenderOptions::default()).to_string();

    assert!(text.starts_with("fields (1/3 selected)"));
    assert!(text.contains("[-] ▸ Group"));
    assert!(text.contains("[ ] Solo"));
    assert!(!text.contains("Field X"));
}

#[test]
fn given_expanded_group_when_rendering_then_children_shown_with_states() {
    let mut session = session();
    session.toggle("x").unwrap();
    session.toggle_expanded("group").unwrap();

    let text = session.to_tree_string(&RenderOptions::default()).to_string();

    assert!(text.contains("[-] ▾ Group"));
    assert!(text.contains("[x] Field X"));
    assert!(text.contains("[ ] Field Y"));
}

#[test]
fn given_expand_all_and_ids_when_rendering_then_everything_shown_with_ids() {
    let mut session = session();
    session.select_all().unwrap();

    let options = RenderOptions {
        expand_all: true,
        show_ids: true,
    };
    let text = session.to_tree_string(&options).to_string();

    assert!(text.contains("[x] ▾ Group <group>"));
    assert!(text.contains("[x] Field Y <y>"));
    assert!(text.contains("fields (3/3 selected)"));
}
