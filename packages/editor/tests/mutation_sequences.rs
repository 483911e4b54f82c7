//! Tests for chains of mutations
//!
//! This tests:
//! - Move + update + delete chains
//! - Deletion completeness
//! - Tree integrity (unique ids, no lost nodes) after operations

use pagecraft_editor::mutations::{collect_ids, count_elements, find_element, path_to};
use pagecraft_editor::{ElementPatch, History, Mutation, MutationError, UpdateScope};
use pagecraft_model::{Breakpoint, Element, ElementKind};
use std::collections::HashSet;

fn page() -> Vec<Element> {
    vec![
        Element::new("hero", ElementKind::Section, "Hero")
            .with_child(Element::new("title", ElementKind::Heading, "Title").with_content("Welcome"))
            .with_child(
                Element::new("cols", ElementKind::Columns, "Columns")
                    .with_child(Element::new("left", ElementKind::Container, "Left"))
                    .with_child(
                        Element::new("right", ElementKind::Container, "Right")
                            .with_child(Element::new("cta", ElementKind::Button, "CTA").with_content("Go")),
                    ),
            ),
        Element::new("footer", ElementKind::Section, "Footer"),
    ]
}

fn apply_all(tree: &[Element], history: &mut History, mutations: &[Mutation]) -> Vec<Element> {
    let mut tree = tree.to_vec();
    for mutation in mutations {
        let description = mutation.description(&tree);
        tree = mutation.apply(&tree).unwrap();
        history.commit(description, &tree);
    }
    tree
}

#[test]
fn test_move_then_delete_sequence() {
    let tree = page();
    let mut history = History::new(&tree);

    // Move the button into the left column, then delete the whole columns block
    let tree = apply_all(
        &tree,
        &mut history,
        &[
            Mutation::MoveElement {
                node_id: "cta".to_string(),
                new_parent_id: Some("left".to_string()),
                index: 0,
            },
            Mutation::DeleteElement {
                node_id: "cols".to_string(),
            },
        ],
    );

    for id in ["cols", "left", "right", "cta"] {
        assert!(find_element(&tree, id).is_none(), "{} should be gone", id);
    }
    assert_eq!(history.current_entry().description, "Deleted Columns");

    // Undo the delete: the moved button is back under the left column
    let restored = history.undo().unwrap();
    let path = path_to(&restored, "cta");
    let path: Vec<_> = path.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(path, vec!["hero", "cols", "left", "cta"]);

    // Undo the move too
    let original = history.undo().unwrap();
    assert_eq!(original, page());
}

#[test]
fn test_deletion_removes_whole_subtree() {
    let tree = page();
    let removed: HashSet<String> = collect_ids(std::slice::from_ref(find_element(&tree, "hero").unwrap()))
        .into_iter()
        .collect();

    let next = Mutation::DeleteElement {
        node_id: "hero".to_string(),
    }
    .apply(&tree)
    .unwrap();

    assert!(collect_ids(&next).iter().all(|id| !removed.contains(id)));
    assert_eq!(count_elements(&next), 1);
    // Input untouched
    assert_eq!(tree, page());
}

#[test]
fn test_style_and_content_updates_with_undo_redo() {
    let tree = page();
    let mut history = History::new(&tree);

    let tree = apply_all(
        &tree,
        &mut history,
        &[
            Mutation::UpdateElement {
                node_id: "title".to_string(),
                scope: UpdateScope::Base(ElementPatch::content("Hello")),
            },
            Mutation::UpdateElement {
                node_id: "title".to_string(),
                scope: UpdateScope::style(Breakpoint::Desktop, "fontSize", "48px"),
            },
            Mutation::UpdateElement {
                node_id: "title".to_string(),
                scope: UpdateScope::style(Breakpoint::Tablet, "fontSize", "32px"),
            },
        ],
    );

    let title = find_element(&tree, "title").unwrap();
    assert_eq!(title.content.as_deref(), Some("Hello"));
    assert_eq!(title.style.get("fontSize").map(String::as_str), Some("48px"));
    assert_eq!(history.current_entry().description, "Styled Title (Tablet)");

    let undone = history.undo().unwrap();
    assert!(find_element(&undone, "title").unwrap().responsive_overrides.is_empty());

    let redone = history.redo().unwrap();
    assert_eq!(redone, tree);
}

#[test]
fn test_rejected_mutations_leave_tree_alone() {
    let tree = page();

    let into_button = Mutation::InsertElement {
        parent_id: Some("cta".to_string()),
        index: None,
        element: Element::new("x", ElementKind::Text, "Text"),
    };
    assert!(matches!(
        into_button.apply(&tree),
        Err(MutationError::NotAContainer { kind: ElementKind::Button, .. })
    ));

    let into_own_child = Mutation::MoveElement {
        node_id: "cols".to_string(),
        new_parent_id: Some("right".to_string()),
        index: 0,
    };
    assert!(matches!(
        into_own_child.apply(&tree),
        Err(MutationError::CycleDetected { .. })
    ));

    let reused_id = Mutation::InsertElement {
        parent_id: None,
        index: None,
        element: Element::new("title", ElementKind::Text, "Dup"),
    };
    assert_eq!(
        reused_id.apply(&tree),
        Err(MutationError::DuplicateId {
            id: "title".to_string()
        })
    );

    assert_eq!(tree, page());
}

#[test]
fn test_tree_integrity_after_complex_sequence() {
    let tree = page();
    let mut history = History::new(&tree);

    let tree = apply_all(
        &tree,
        &mut history,
        &[
            Mutation::InsertElement {
                parent_id: Some("footer".to_string()),
                index: None,
                element: Element::new("copy", ElementKind::Text, "Copyright").with_content("(c)"),
            },
            Mutation::MoveElement {
                node_id: "title".to_string(),
                new_parent_id: Some("footer".to_string()),
                index: 0,
            },
            Mutation::MoveElement {
                node_id: "footer".to_string(),
                new_parent_id: None,
                index: 0,
            },
            Mutation::DeleteElement {
                node_id: "left".to_string(),
            },
            Mutation::UpdateElement {
                node_id: "gone".to_string(),
                scope: UpdateScope::Base(ElementPatch::name("Ghost")),
            },
        ],
    );

    let ids = collect_ids(&tree);
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(count_elements(&tree), 7);

    let roots: Vec<_> = tree.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(roots, vec!["footer", "hero"]);
    let footer: Vec<_> = tree[0].children.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(footer, vec!["title", "copy"]);
}
