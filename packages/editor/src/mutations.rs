//! # Tree Mutations
//!
//! Structural and content operations on the page tree.
//!
//! ## Design Principles
//!
//! 1. **Pure**: every operation borrows the input tree and returns a new one
//! 2. **Stale ids are no-ops**: selection state and tree state can race in a
//!    single-threaded UI (an inspector still open on a deleted element), so an
//!    unknown id yields an unchanged tree, never an error
//! 3. **Structural violations are rejected**: inserting into a kind that
//!    cannot hold children, inserting an id the tree already holds, or moving
//!    a node into its own subtree, returns a [`MutationError`] and leaves the
//!    tree untouched
//!
//! ## Mutation Semantics
//!
//! ### Insert
//! - Appends to the roots when no parent is given, else to the parent's children
//! - Optional index is clamped to the children length
//! - Every id in the inserted subtree must be new to the tree
//!
//! ### Update
//! - Base fields only apply where the element kind gives them meaning
//! - Desktop style writes the base layer; tablet/mobile write override layers
//!   holding only values that differ from what the breakpoint inherits
//! - Empty style values remove the property
//!
//! ### Delete
//! - Removes the node and its whole subtree from its actual parent
//!
//! ### Move
//! - Detaches and reinserts; fails on cycles and non-container targets

use pagecraft_model::{
    clone_with_fresh_ids, resolve_style, AnimationKind, AnimationTrigger, Breakpoint, Easing,
    Element, ElementKind, ElementTemplate, IdGenerator, MenuItem, StyleMap,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Changes to an element's base fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_items: Option<Vec<MenuItem>>,
}

impl ElementPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::default()
        }
    }

    pub fn menu_items(items: Vec<MenuItem>) -> Self {
        Self {
            menu_items: Some(items),
            ..Self::default()
        }
    }
}

/// Changes to an element's animation; unset fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnimationKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<AnimationTrigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,
}

impl AnimationPatch {
    pub fn kind(kind: AnimationKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Which facet of an element an update targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "kebab-case")]
pub enum UpdateScope {
    Base(ElementPatch),
    Style {
        breakpoint: Breakpoint,
        patch: StyleMap,
    },
    Animation(AnimationPatch),
}

impl UpdateScope {
    /// Style update for a single property
    pub fn style(breakpoint: Breakpoint, key: impl Into<String>, value: impl Into<String>) -> Self {
        UpdateScope::Style {
            breakpoint,
            patch: StyleMap::from([(key.into(), value.into())]),
        }
    }
}

/// Semantic operations on the page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Insert an already-materialized element
    InsertElement {
        parent_id: Option<String>,
        index: Option<usize>,
        element: Element,
    },

    UpdateElement {
        node_id: String,
        scope: UpdateScope,
    },

    /// Remove a node and its subtree
    DeleteElement { node_id: String },

    /// Reparent and/or reorder a node
    MoveElement {
        node_id: String,
        new_parent_id: Option<String>,
        index: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Element {id} ({kind:?}) cannot contain children")]
    NotAContainer { id: String, kind: ElementKind },

    #[error("Cannot move {node_id} into its own subtree")]
    CycleDetected { node_id: String },

    #[error("Element id {id} is already in use")]
    DuplicateId { id: String },
}

impl Mutation {
    /// Apply to `tree`, returning the new tree. The input is not modified.
    pub fn apply(&self, tree: &[Element]) -> Result<Vec<Element>, MutationError> {
        match self {
            Mutation::InsertElement {
                parent_id,
                index,
                element,
            } => insert_element(tree, element.clone(), parent_id.as_deref(), *index),

            Mutation::UpdateElement { node_id, scope } => Ok(update_element(tree, node_id, scope)),

            Mutation::DeleteElement { node_id } => Ok(delete_element(tree, node_id)),

            Mutation::MoveElement {
                node_id,
                new_parent_id,
                index,
            } => move_element(tree, node_id, new_parent_id.as_deref(), *index),
        }
    }

    /// Human-readable label for the history panel
    pub fn description(&self, tree: &[Element]) -> String {
        let name_of = |id: &str| {
            find_element(tree, id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        match self {
            Mutation::InsertElement { element, .. } => format!("Added {}", element.name),
            Mutation::UpdateElement { node_id, scope } => match scope {
                UpdateScope::Base(_) => format!("Updated {}", name_of(node_id)),
                UpdateScope::Style { breakpoint, .. } => match breakpoint {
                    Breakpoint::Desktop => format!("Styled {}", name_of(node_id)),
                    bp => format!("Styled {} ({:?})", name_of(node_id), bp),
                },
                UpdateScope::Animation(_) => format!("Animated {}", name_of(node_id)),
            },
            Mutation::DeleteElement { node_id } => format!("Deleted {}", name_of(node_id)),
            Mutation::MoveElement { node_id, .. } => format!("Moved {}", name_of(node_id)),
        }
    }

    /// The element this mutation targets, if it names one
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Mutation::InsertElement { element, .. } => Some(element.id.as_str()),
            Mutation::UpdateElement { node_id, .. }
            | Mutation::DeleteElement { node_id }
            | Mutation::MoveElement { node_id, .. } => Some(node_id.as_str()),
        }
    }
}

/// Depth-first search. The result borrows the tree; clone before editing.
pub fn find_element<'a>(tree: &'a [Element], id: &str) -> Option<&'a Element> {
    tree.iter().find_map(|root| root.find(id))
}

fn find_element_mut<'a>(tree: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
    tree.iter_mut().find_map(|root| root.find_mut(id))
}

/// Materialize `template` and append it to the roots or to `parent_id`'s children
pub fn add_element(
    tree: &[Element],
    template: &ElementTemplate,
    parent_id: Option<&str>,
    ids: &mut IdGenerator,
) -> Result<Vec<Element>, MutationError> {
    let element = template.materialize(ids);
    insert_element(tree, element, parent_id, None)
}

/// Insert `element` under `parent_id` (or the roots) at `index` (or the end)
pub fn insert_element(
    tree: &[Element],
    element: Element,
    parent_id: Option<&str>,
    index: Option<usize>,
) -> Result<Vec<Element>, MutationError> {
    if let Some(parent_id) = parent_id {
        match find_element(tree, parent_id) {
            None => {
                debug!(parent_id, "Insert target not found, ignoring");
                return Ok(tree.to_vec());
            }
            Some(parent) if !parent.accepts_children() => {
                return Err(MutationError::NotAContainer {
                    id: parent.id.clone(),
                    kind: parent.kind,
                });
            }
            Some(_) => {}
        }
    }

    let mut seen: HashSet<String> = collect_ids(tree).into_iter().collect();
    if let Some(id) = collect_ids(std::slice::from_ref(&element))
        .into_iter()
        .find(|id| !seen.insert(id.clone()))
    {
        return Err(MutationError::DuplicateId { id });
    }

    let mut next = tree.to_vec();
    let siblings = match parent_id {
        None => &mut next,
        Some(parent_id) => match find_element_mut(&mut next, parent_id) {
            Some(parent) => &mut parent.children,
            None => return Ok(tree.to_vec()),
        },
    };

    let at = index.unwrap_or(siblings.len()).min(siblings.len());
    siblings.insert(at, element);
    Ok(next)
}

/// Merge `scope` into the element with `id`. Unknown ids leave the tree unchanged.
pub fn update_element(tree: &[Element], id: &str, scope: &UpdateScope) -> Vec<Element> {
    if find_element(tree, id).is_none() {
        debug!(node_id = id, "Update target not found, ignoring");
        return tree.to_vec();
    }

    let mut next = tree.to_vec();
    let Some(element) = find_element_mut(&mut next, id) else {
        return next;
    };

    match scope {
        UpdateScope::Base(patch) => apply_base_patch(element, patch),
        UpdateScope::Style { breakpoint, patch } => apply_style_patch(element, *breakpoint, patch),
        UpdateScope::Animation(patch) => apply_animation_patch(element, patch),
    }

    next
}

fn apply_base_patch(element: &mut Element, patch: &ElementPatch) {
    if let Some(name) = &patch.name {
        element.name = name.clone();
    }
    if let Some(content) = &patch.content {
        if element.kind.uses_content() {
            element.content = Some(content.clone());
        }
    }
    if let Some(src) = &patch.src {
        if element.kind.uses_src() {
            element.src = Some(src.clone());
        }
    }
    if let Some(items) = &patch.menu_items {
        if element.kind.uses_menu() {
            element.menu_items = items.clone();
        }
    }
}

fn apply_style_patch(element: &mut Element, breakpoint: Breakpoint, patch: &StyleMap) {
    match breakpoint.parent() {
        None => {
            for (key, value) in patch {
                if value.is_empty() {
                    element.style.remove(key);
                } else {
                    element.style.insert(key.clone(), value.clone());
                }
            }
        }
        Some(parent) => {
            let inherited = resolve_style(element, parent);
            for (key, value) in patch {
                element.responsive_overrides.set(
                    breakpoint,
                    key,
                    value,
                    inherited.get(key).map(String::as_str),
                );
            }
        }
    }
}

fn apply_animation_patch(element: &mut Element, patch: &AnimationPatch) {
    let animation = element.animation.get_or_insert_with(Default::default);
    if let Some(kind) = patch.kind {
        animation.kind = kind;
    }
    if let Some(duration) = patch.duration_ms {
        animation.duration_ms = duration;
    }
    if let Some(delay) = patch.delay_ms {
        animation.delay_ms = delay;
    }
    if let Some(trigger) = patch.trigger {
        animation.trigger = trigger;
    }
    if let Some(easing) = patch.easing {
        animation.easing = easing;
    }
}

/// Remove the node with `id` and its subtree. Unknown ids leave the tree unchanged.
pub fn delete_element(tree: &[Element], id: &str) -> Vec<Element> {
    tree.iter()
        .filter(|element| element.id != id)
        .map(|element| {
            let mut kept = element.clone();
            kept.children = delete_element(&element.children, id);
            kept
        })
        .collect()
}

/// Move `id` under `new_parent_id` (or the roots) at `index`
pub fn move_element(
    tree: &[Element],
    id: &str,
    new_parent_id: Option<&str>,
    index: usize,
) -> Result<Vec<Element>, MutationError> {
    let Some(node) = find_element(tree, id) else {
        debug!(node_id = id, "Move source not found, ignoring");
        return Ok(tree.to_vec());
    };

    if let Some(parent_id) = new_parent_id {
        if node.contains(parent_id) {
            return Err(MutationError::CycleDetected {
                node_id: id.to_string(),
            });
        }
        match find_element(tree, parent_id) {
            None => {
                debug!(parent_id, "Move target not found, ignoring");
                return Ok(tree.to_vec());
            }
            Some(parent) if !parent.accepts_children() => {
                return Err(MutationError::NotAContainer {
                    id: parent.id.clone(),
                    kind: parent.kind,
                });
            }
            Some(_) => {}
        }
    }

    let node = node.clone();
    let detached = delete_element(tree, id);
    insert_element(&detached, node, new_parent_id, Some(index))
}

/// Deep copy `id` with fresh ids and place the copy right after the original
pub fn duplicate_element(tree: &[Element], id: &str, ids: &mut IdGenerator) -> Vec<Element> {
    let Some((parent_id, index)) = locate(tree, id) else {
        return tree.to_vec();
    };
    let Some(original) = find_element(tree, id) else {
        return tree.to_vec();
    };
    let copy = clone_with_fresh_ids(original, ids);
    // The original's parent is by construction a container (or the roots)
    insert_element(tree, copy, parent_id.as_deref(), Some(index + 1)).unwrap_or_else(|_| tree.to_vec())
}

/// Parent id (`None` for roots) and sibling index of `id`
pub fn locate(tree: &[Element], id: &str) -> Option<(Option<String>, usize)> {
    if let Some(index) = tree.iter().position(|e| e.id == id) {
        return Some((None, index));
    }
    fn search(parent: &Element, id: &str) -> Option<(Option<String>, usize)> {
        if let Some(index) = parent.children.iter().position(|c| c.id == id) {
            return Some((Some(parent.id.clone()), index));
        }
        parent.children.iter().find_map(|child| search(child, id))
    }
    tree.iter().find_map(|root| search(root, id))
}

/// Ancestor chain from a root down to and including `id`
pub fn path_to<'a>(tree: &'a [Element], id: &str) -> Vec<&'a Element> {
    fn descend<'a>(element: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
        path.push(element);
        if element.id == id {
            return true;
        }
        for child in &element.children {
            if descend(child, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    for root in tree {
        if descend(root, id, &mut path) {
            break;
        }
    }
    path
}

/// Every element id in document order
pub fn collect_ids(tree: &[Element]) -> Vec<String> {
    let mut ids = Vec::new();
    for root in tree {
        root.walk(&mut |e| ids.push(e.id.clone()));
    }
    ids
}

/// Give a fresh id to every element whose id already appeared earlier in
/// document order. Returns the repaired tree and the ids that were replaced.
///
/// `ids` must already be past every id in `tree` (see [`IdGenerator::advance_past`]).
pub fn reissue_duplicate_ids(tree: &[Element], ids: &mut IdGenerator) -> (Vec<Element>, Vec<String>) {
    fn repair(element: &mut Element, seen: &mut HashSet<String>, ids: &mut IdGenerator, replaced: &mut Vec<String>) {
        if !seen.insert(element.id.clone()) {
            let fresh = ids.new_id();
            seen.insert(fresh.clone());
            replaced.push(std::mem::replace(&mut element.id, fresh));
        }
        for child in &mut element.children {
            repair(child, seen, ids, replaced);
        }
    }

    let mut next = tree.to_vec();
    let mut seen = HashSet::new();
    let mut replaced = Vec::new();
    for root in &mut next {
        repair(root, &mut seen, ids, &mut replaced);
    }
    (next, replaced)
}

pub fn count_elements(tree: &[Element]) -> usize {
    let mut count = 0;
    for root in tree {
        root.walk(&mut |_| count += 1);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::find_template;

    fn sample() -> Vec<Element> {
        vec![
            Element::new("s1", ElementKind::Section, "Hero")
                .with_child(Element::new("h1", ElementKind::Heading, "Title").with_content("Welcome"))
                .with_child(
                    Element::new("c1", ElementKind::Container, "Actions")
                        .with_child(Element::new("b1", ElementKind::Button, "CTA").with_content("Go")),
                ),
            Element::new("s2", ElementKind::Section, "Footer"),
        ]
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateElement {
            node_id: "h1".to_string(),
            scope: UpdateScope::Base(ElementPatch::content("Hello World")),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_add_to_root_and_parent() {
        let mut ids = IdGenerator::new("home");
        let section = find_template("Section").unwrap();
        let text = find_template("Text").unwrap();

        let tree = add_element(&[], &section, None, &mut ids).unwrap();
        assert_eq!(tree.len(), 1);
        let section_id = tree[0].id.clone();

        let tree = add_element(&tree, &text, Some(&section_id), &mut ids).unwrap();
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].kind, ElementKind::Text);
    }

    #[test]
    fn test_add_to_non_container_is_rejected() {
        let mut ids = IdGenerator::new("home");
        let tree = sample();
        let result = add_element(&tree, &find_template("Text").unwrap(), Some("h1"), &mut ids);

        assert_eq!(
            result,
            Err(MutationError::NotAContainer {
                id: "h1".to_string(),
                kind: ElementKind::Heading
            })
        );
    }

    #[test]
    fn test_add_to_unknown_parent_is_noop() {
        let mut ids = IdGenerator::new("home");
        let tree = sample();
        let next = add_element(&tree, &find_template("Text").unwrap(), Some("gone"), &mut ids).unwrap();
        assert_eq!(next, tree);
    }

    #[test]
    fn test_insert_preserves_order_and_clamps_index() {
        let tree = sample();
        let next = insert_element(&tree, Element::new("x", ElementKind::Spacer, "Gap"), None, Some(99)).unwrap();
        let ids: Vec<_> = next.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "x"]);

        let next = insert_element(&tree, Element::new("y", ElementKind::Spacer, "Gap"), Some("s1"), Some(1)).unwrap();
        let ids: Vec<_> = next[0].children.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["h1", "y", "c1"]);
    }

    #[test]
    fn test_insert_rejects_ids_in_use() {
        let tree = sample();
        let clash = Element::new("b1", ElementKind::Text, "Dup");
        assert_eq!(
            insert_element(&tree, clash, Some("s2"), None),
            Err(MutationError::DuplicateId { id: "b1".to_string() })
        );

        // Nested clash, and a clash inside the inserted subtree itself
        let nested = Element::new("c2", ElementKind::Container, "Wrap")
            .with_child(Element::new("h1", ElementKind::Heading, "Dup"));
        assert!(matches!(
            insert_element(&tree, nested, None, None),
            Err(MutationError::DuplicateId { .. })
        ));
        let self_clash = Element::new("c3", ElementKind::Container, "Wrap")
            .with_child(Element::new("c3", ElementKind::Text, "Dup"));
        assert!(matches!(
            insert_element(&tree, self_clash, None, None),
            Err(MutationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_reissue_duplicate_ids() {
        let mut ids = IdGenerator::new("home");
        let tree = vec![
            Element::new("x", ElementKind::Section, "First"),
            Element::new("x", ElementKind::Section, "Second")
                .with_child(Element::new("x", ElementKind::Text, "Third")),
        ];

        let (repaired, replaced) = reissue_duplicate_ids(&tree, &mut ids);

        assert_eq!(replaced, vec!["x", "x"]);
        assert_eq!(repaired[0].id, "x");
        let all = collect_ids(&repaired);
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), 3);

        let (untouched, replaced) = reissue_duplicate_ids(&sample(), &mut ids);
        assert!(replaced.is_empty());
        assert_eq!(untouched, sample());
    }

    #[test]
    fn test_update_base_respects_kind() {
        let tree = sample();
        let next = update_element(&tree, "h1", &UpdateScope::Base(ElementPatch::content("Hello")));
        assert_eq!(find_element(&next, "h1").unwrap().content.as_deref(), Some("Hello"));

        // Sections carry no content
        let next = update_element(&tree, "s1", &UpdateScope::Base(ElementPatch::content("ignored")));
        assert!(find_element(&next, "s1").unwrap().content.is_none());
    }

    #[test]
    fn test_update_does_not_touch_input() {
        let tree = sample();
        let before = tree.clone();
        let _ = update_element(&tree, "b1", &UpdateScope::style(Breakpoint::Desktop, "color", "red"));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let tree = sample();
        let next = update_element(&tree, "missing", &UpdateScope::Base(ElementPatch::name("x")));
        assert_eq!(next, tree);
    }

    #[test]
    fn test_update_style_per_breakpoint() {
        let tree = sample();
        let tree = update_element(&tree, "h1", &UpdateScope::style(Breakpoint::Desktop, "fontSize", "48px"));
        let tree = update_element(&tree, "h1", &UpdateScope::style(Breakpoint::Tablet, "fontSize", "32px"));
        let tree = update_element(&tree, "h1", &UpdateScope::style(Breakpoint::Mobile, "fontSize", "32px"));

        let heading = find_element(&tree, "h1").unwrap();
        assert_eq!(heading.style["fontSize"], "48px");
        assert_eq!(heading.responsive_overrides.tablet.as_ref().unwrap()["fontSize"], "32px");
        // Same as what mobile inherits from tablet, so nothing is stored
        assert!(heading.responsive_overrides.mobile.is_none());
    }

    #[test]
    fn test_update_style_empty_value_removes() {
        let tree = sample();
        let tree = update_element(&tree, "b1", &UpdateScope::style(Breakpoint::Desktop, "color", "red"));
        let tree = update_element(&tree, "b1", &UpdateScope::style(Breakpoint::Desktop, "color", ""));
        assert!(find_element(&tree, "b1").unwrap().style.is_empty());
    }

    #[test]
    fn test_update_animation_merges() {
        let tree = sample();
        let tree = update_element(&tree, "h1", &UpdateScope::Animation(AnimationPatch::kind(AnimationKind::Fade)));
        let tree = update_element(
            &tree,
            "h1",
            &UpdateScope::Animation(AnimationPatch {
                delay_ms: Some(200),
                ..AnimationPatch::default()
            }),
        );

        let animation = find_element(&tree, "h1").unwrap().animation.clone().unwrap();
        assert_eq!(animation.kind, AnimationKind::Fade);
        assert_eq!(animation.delay_ms, 200);
        assert_eq!(animation.duration_ms, 600);
    }

    #[test]
    fn test_delete_removes_subtree() {
        let tree = sample();
        let next = delete_element(&tree, "c1");
        assert!(find_element(&next, "c1").is_none());
        assert!(find_element(&next, "b1").is_none());
        assert!(find_element(&next, "h1").is_some());
        assert_eq!(count_elements(&next), 3);
    }

    #[test]
    fn test_move_rejects_cycle() {
        let tree = sample();
        let result = move_element(&tree, "s1", Some("c1"), 0);
        assert_eq!(
            result,
            Err(MutationError::CycleDetected {
                node_id: "s1".to_string()
            })
        );
    }

    #[test]
    fn test_move_between_parents() {
        let tree = sample();
        let next = move_element(&tree, "b1", Some("s2"), 0).unwrap();
        assert!(find_element(&next, "c1").unwrap().children.is_empty());
        assert_eq!(next[1].children[0].id, "b1");
    }

    #[test]
    fn test_move_reorders_roots() {
        let tree = sample();
        let next = move_element(&tree, "s2", None, 0).unwrap();
        assert_eq!(next[0].id, "s2");
        assert_eq!(next[1].id, "s1");
    }

    #[test]
    fn test_duplicate_places_copy_after_original() {
        let mut ids = IdGenerator::new("home");
        let tree = sample();
        let next = duplicate_element(&tree, "c1", &mut ids);

        let hero = &next[0];
        assert_eq!(hero.children.len(), 3);
        assert_eq!(hero.children[1].id, "c1");
        assert_ne!(hero.children[2].id, "c1");
        assert_eq!(hero.children[2].name, "Actions");
        assert_ne!(hero.children[2].children[0].id, "b1");
    }

    #[test]
    fn test_locate_and_path() {
        let tree = sample();
        assert_eq!(locate(&tree, "s2"), Some((None, 1)));
        assert_eq!(locate(&tree, "b1"), Some((Some("c1".to_string()), 0)));
        assert_eq!(locate(&tree, "nope"), None);

        let path = path_to(&tree, "b1");
        let ids: Vec<_> = path.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "c1", "b1"]);
        assert!(path_to(&tree, "nope").is_empty());
    }

    #[test]
    fn test_descriptions() {
        let tree = sample();
        let delete = Mutation::DeleteElement {
            node_id: "c1".to_string(),
        };
        assert_eq!(delete.description(&tree), "Deleted Actions");

        let style = Mutation::UpdateElement {
            node_id: "h1".to_string(),
            scope: UpdateScope::style(Breakpoint::Mobile, "color", "red"),
        };
        assert_eq!(style.description(&tree), "Styled Title (Mobile)");
    }
}
