//! Longer chains of mutations against the undo stack
//!
//! - Move + edit + delete chains
//! - Undo/redo sequences
//! - Page integrity after operations

use protypo_editor::{Mutation, MutationError, UndoStack};
use protypo_tree::{find_by_id, parse, ProtypoNode};
use serde_json::json;

fn page() -> Vec<ProtypoNode> {
    parse(
        r#"[
        { "id": "root", "tag": "div", "children": [
            { "id": "c1", "tag": "div", "children": [ { "id": "t1", "tag": "text", "text": "Child 1" } ] },
            { "id": "c2", "tag": "div", "children": [ { "id": "t2", "tag": "text", "text": "Child 2" } ] }
        ] }
    ]"#,
    )
    .unwrap()
}

#[test]
fn test_move_then_delete_sequence() {
    let original = page();
    let mut page = original.clone();
    let mut stack = UndoStack::new();

    stack
        .apply(
            Mutation::MoveTag {
                tag_id: "c2".to_string(),
                parent_id: Some("c1".to_string()),
                index: 1,
            },
            &mut page,
        )
        .unwrap();
    assert_eq!(find_by_id(&page, "c1").unwrap().node.children().len(), 2);
    assert_eq!(find_by_id(&page, "c2").unwrap().parent.unwrap().id(), Some("c1"));

    stack
        .apply(
            Mutation::RemoveTag {
                tag_id: "c1".to_string(),
            },
            &mut page,
        )
        .unwrap();
    assert!(find_by_id(&page, "c1").is_none());
    assert!(find_by_id(&page, "c2").is_none());
    assert!(page[0].children.is_none());

    stack.undo(&mut page).unwrap();
    assert!(find_by_id(&page, "c2").is_some());

    stack.undo(&mut page).unwrap();
    assert_eq!(page, original);
}

#[test]
fn test_undo_redo_chain_is_stable() {
    let original = page();
    let mut page = original.clone();
    let mut stack = UndoStack::new();

    let edits = vec![
        Mutation::SetAttribute {
            tag_id: "c1".to_string(),
            name: "class".to_string(),
            value: Some(json!("panel")),
        },
        Mutation::UpdateText {
            tag_id: "t2".to_string(),
            text: "Second".to_string(),
        },
        Mutation::InsertTag {
            parent_id: Some("root".to_string()),
            index: 0,
            tag: ProtypoNode::new("em").with_id("e"),
        },
    ];
    for edit in edits {
        stack.apply(edit, &mut page).unwrap();
    }
    let edited = page.clone();

    while stack.undo(&mut page).unwrap() {}
    assert_eq!(page, original);

    while stack.redo(&mut page).unwrap() {}
    assert_eq!(page, edited);
    assert_eq!(page[0].children()[0].id(), Some("e"));
}

#[test]
fn test_remove_attribute_undo_restores_value() {
    let mut page = vec![ProtypoNode::new("input")
        .with_id("i")
        .with_attr("name", "Search")
        .with_attr("validate", json!({ "minlength": 2 }))];
    let original = page.clone();
    let mut stack = UndoStack::new();

    stack
        .apply(
            Mutation::SetAttribute {
                tag_id: "i".to_string(),
                name: "validate".to_string(),
                value: None,
            },
            &mut page,
        )
        .unwrap();
    assert!(page[0].attr("validate").is_none());

    stack.undo(&mut page).unwrap();
    assert_eq!(page, original);
}

#[test]
fn test_move_into_descendant_is_rejected() {
    let mut page = page();
    let mut stack = UndoStack::new();

    let result = stack.apply(
        Mutation::MoveTag {
            tag_id: "root".to_string(),
            parent_id: Some("c1".to_string()),
            index: 0,
        },
        &mut page,
    );

    assert_eq!(result, Err(MutationError::CycleDetected));
    assert!(!stack.can_undo());
}

#[test]
fn test_replace_page_undo() {
    let original = page();
    let mut page = original.clone();
    let mut stack = UndoStack::new();

    stack
        .apply(
            Mutation::ReplacePage {
                nodes: vec![ProtypoNode::new("p").with_id("p")],
            },
            &mut page,
        )
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].tag, "p");

    stack.undo(&mut page).unwrap();
    assert_eq!(page, original);
}
