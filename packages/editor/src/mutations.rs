//! # Tree Mutations
//!
//! Pure structural operations on a page tree.
//!
//! Each operation takes the current forest by reference and returns a new one,
//! so a failed mutation can never leave a half-edited tree behind.
//!
//! ## Semantics
//!
//! ### Insert
//! - Appends to the end of the matched container's children
//! - The container must already be a branch
//! - The new subtree may not reuse any id already in the page
//!
//! ### Update
//! - Shallow merge of the patch over the node; `id` is never patched
//! - Matches branches and leaves at any depth
//!
//! ### Delete
//! - Removes the node and all its descendants
//! - The root body is never matched
//!
//! The walk is depth-first and the first match wins: once a subtree reports a
//! change, its later siblings are left alone.

use funnel_common::{collect_ids, find_element};
use funnel_model::{Element, ElementContent, ElementType, Styles, BODY_ID};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Element {0} is not a container")]
    NotAContainer(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Element {0} cannot be removed")]
    ProtectedElement(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

/// Partial element used by update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ElementContent>,
}

impl ElementPatch {
    pub fn styles(styles: Styles) -> Self {
        Self {
            styles: Some(styles),
            ..Default::default()
        }
    }

    pub fn content(content: ElementContent) -> Self {
        Self {
            content: Some(content),
            ..Default::default()
        }
    }

    /// Merge over `element`, keeping its id.
    pub fn apply_to(&self, element: &Element) -> Element {
        Element {
            id: element.id.clone(),
            name: self.name.clone().unwrap_or_else(|| element.name.clone()),
            styles: self.styles.clone().unwrap_or_else(|| element.styles.clone()),
            kind: self.kind.or(element.kind),
            content: self.content.clone().unwrap_or_else(|| element.content.clone()),
        }
    }
}

impl From<Element> for ElementPatch {
    fn from(element: Element) -> Self {
        Self {
            name: Some(element.name),
            styles: Some(element.styles),
            kind: element.kind,
            content: Some(element.content),
        }
    }
}

/// Append `element` to the children of the branch `container_id`.
pub fn insert_element(
    elements: &[Element],
    container_id: &str,
    element: Element,
) -> Result<Vec<Element>, MutationError> {
    if element.is_none() || element.kind.is_none() {
        return Err(MutationError::InvalidStructure(
            "Cannot insert an untyped element".to_string(),
        ));
    }
    if element.id == BODY_ID || element.kind == Some(ElementType::Body) {
        return Err(MutationError::InvalidStructure(
            "A page has exactly one body".to_string(),
        ));
    }

    let mut taken: HashSet<String> = collect_ids(elements).into_iter().collect();
    for id in collect_ids(std::slice::from_ref(&element)) {
        if !taken.insert(id.clone()) {
            return Err(MutationError::DuplicateId(id));
        }
    }

    insert_in_children(elements, container_id, &element)?
        .ok_or_else(|| MutationError::ContainerNotFound(container_id.to_string()))
}

fn insert_in_children(
    children: &[Element],
    container_id: &str,
    new_element: &Element,
) -> Result<Option<Vec<Element>>, MutationError> {
    for (index, child) in children.iter().enumerate() {
        if let Some(updated) = insert_in_element(child, container_id, new_element)? {
            return Ok(Some(replace_at(children, index, updated)));
        }
    }
    Ok(None)
}

fn insert_in_element(
    element: &Element,
    container_id: &str,
    new_element: &Element,
) -> Result<Option<Element>, MutationError> {
    match &element.content {
        ElementContent::Children(children) if element.id == container_id => {
            let mut children = children.clone();
            children.push(new_element.clone());
            Ok(Some(with_children(element, children)))
        }
        ElementContent::Children(children) => Ok(
            insert_in_children(children, container_id, new_element)?
                .map(|children| with_children(element, children)),
        ),
        ElementContent::Leaf(_) if element.id == container_id => {
            Err(MutationError::NotAContainer(container_id.to_string()))
        }
        ElementContent::Leaf(_) => Ok(None),
    }
}

/// Shallow-merge `patch` over the node `element_id`.
pub fn update_element(
    elements: &[Element],
    element_id: &str,
    patch: &ElementPatch,
) -> Result<Vec<Element>, MutationError> {
    let current = find_element(elements, element_id)
        .ok_or_else(|| MutationError::NodeNotFound(element_id.to_string()))?;
    let updated = patch.apply_to(current);

    check_patched_shape(current, &updated)?;

    if let ElementContent::Children(new_children) = &updated.content {
        let own: HashSet<String> = collect_ids(std::slice::from_ref(current)).into_iter().collect();
        let mut taken: HashSet<String> = collect_ids(elements)
            .into_iter()
            .filter(|id| !own.contains(id))
            .collect();
        taken.insert(updated.id.clone());
        for id in collect_ids(new_children) {
            if !taken.insert(id.clone()) {
                return Err(MutationError::DuplicateId(id));
            }
        }
    }

    Ok(update_in_children(elements, element_id, &updated)
        .unwrap_or_else(|| elements.to_vec()))
}

fn check_patched_shape(current: &Element, updated: &Element) -> Result<(), MutationError> {
    if current.is_body() && updated.kind != Some(ElementType::Body) {
        return Err(MutationError::InvalidStructure(
            "The body cannot change its type".to_string(),
        ));
    }
    if !current.is_body() && updated.kind == Some(ElementType::Body) {
        return Err(MutationError::InvalidStructure(
            "A page has exactly one body".to_string(),
        ));
    }
    match updated.kind {
        None => Err(MutationError::InvalidStructure(format!(
            "Element {} would lose its type",
            updated.id
        ))),
        Some(kind) if kind.is_composite() && !updated.is_branch() => {
            Err(MutationError::InvalidStructure(format!(
                "Composite element {} needs children",
                updated.id
            )))
        }
        Some(_) => Ok(()),
    }
}

fn update_in_children(children: &[Element], element_id: &str, updated: &Element) -> Option<Vec<Element>> {
    for (index, child) in children.iter().enumerate() {
        if child.id == element_id {
            return Some(replace_at(children, index, updated.clone()));
        }
        if let Some(grandchildren) = child.children() {
            if let Some(replaced) = update_in_children(grandchildren, element_id, updated) {
                return Some(replace_at(children, index, with_children(child, replaced)));
            }
        }
    }
    None
}

/// Remove the node `element_id` and its subtree.
pub fn delete_element(elements: &[Element], element_id: &str) -> Result<Vec<Element>, MutationError> {
    if element_id == BODY_ID {
        return Err(MutationError::ProtectedElement(element_id.to_string()));
    }
    delete_in_children(elements, element_id)
        .ok_or_else(|| MutationError::NodeNotFound(element_id.to_string()))
}

fn delete_in_children(children: &[Element], element_id: &str) -> Option<Vec<Element>> {
    for (index, child) in children.iter().enumerate() {
        if child.id == element_id && !child.is_body() {
            let mut remaining = children.to_vec();
            remaining.remove(index);
            return Some(remaining);
        }
        if let Some(grandchildren) = child.children() {
            if let Some(pruned) = delete_in_children(grandchildren, element_id) {
                return Some(replace_at(children, index, with_children(child, pruned)));
            }
        }
    }
    None
}

fn with_children(element: &Element, children: Vec<Element>) -> Element {
    Element {
        id: element.id.clone(),
        name: element.name.clone(),
        styles: element.styles.clone(),
        kind: element.kind,
        content: ElementContent::Children(children),
    }
}

fn replace_at(children: &[Element], index: usize, replacement: Element) -> Vec<Element> {
    let mut updated = Vec::with_capacity(children.len());
    updated.extend_from_slice(&children[..index]);
    updated.push(replacement);
    updated.extend_from_slice(&children[index + 1..]);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_model::LeafContent;

    fn text(id: &str, inner: &str) -> Element {
        Element::new(
            id,
            "Text",
            ElementType::Text,
            ElementContent::Leaf(LeafContent {
                inner_text: Some(inner.to_string()),
                ..Default::default()
            }),
        )
    }

    fn container(id: &str, children: Vec<Element>) -> Element {
        Element::new(id, "Container", ElementType::Container, ElementContent::Children(children))
    }

    fn page(children: Vec<Element>) -> Vec<Element> {
        vec![with_children(&Element::body(), children)]
    }

    #[test]
    fn test_patch_serialization() {
        let patch = ElementPatch {
            name: Some("Hero".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"name":"Hero"}"#);
        let deserialized: ElementPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(patch, deserialized);
    }

    #[test]
    fn test_insert_into_nested_container() {
        let doc = page(vec![container("outer", vec![container("inner", vec![])])]);

        let updated = insert_element(&doc, "inner", text("t", "Hi")).unwrap();

        let inner = find_element(&updated, "inner").unwrap();
        assert_eq!(inner.children().unwrap()[0].id, "t");
        // Input untouched
        assert!(find_element(&doc, "t").is_none());
    }

    #[test]
    fn test_insert_into_leaf_is_rejected() {
        let doc = page(vec![text("t", "Hi")]);
        assert_eq!(
            insert_element(&doc, "t", text("u", "")),
            Err(MutationError::NotAContainer("t".to_string()))
        );
    }

    #[test]
    fn test_insert_rejects_duplicate_and_body() {
        let doc = page(vec![text("t", "Hi")]);
        assert_eq!(
            insert_element(&doc, BODY_ID, text("t", "again")),
            Err(MutationError::DuplicateId("t".to_string()))
        );
        assert!(matches!(
            insert_element(&doc, BODY_ID, Element::body()),
            Err(MutationError::InvalidStructure(_))
        ));
        assert!(matches!(
            insert_element(&doc, BODY_ID, Element::none()),
            Err(MutationError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_update_preserves_id() {
        let doc = page(vec![text("t", "Hi")]);
        let mut replacement = text("ignored", "Hello");
        replacement.name = "Greeting".to_string();

        let updated = update_element(&doc, "t", &ElementPatch::from(replacement)).unwrap();
        let node = find_element(&updated, "t").unwrap();
        assert_eq!(node.name, "Greeting");
        assert_eq!(node.leaf().unwrap().inner_text.as_deref(), Some("Hello"));
        assert!(find_element(&updated, "ignored").is_none());
    }

    #[test]
    fn test_update_missing_node() {
        let doc = page(vec![]);
        assert_eq!(
            update_element(&doc, "nope", &ElementPatch::default()),
            Err(MutationError::NodeNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_update_cannot_retype_body() {
        let doc = page(vec![]);
        let patch = ElementPatch {
            kind: Some(ElementType::Container),
            ..Default::default()
        };
        assert!(matches!(
            update_element(&doc, BODY_ID, &patch),
            Err(MutationError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_update_content_cannot_steal_ids() {
        let doc = page(vec![text("a", ""), container("c", vec![])]);
        let patch = ElementPatch::content(ElementContent::Children(vec![text("a", "")]));
        assert_eq!(
            update_element(&doc, "c", &patch),
            Err(MutationError::DuplicateId("a".to_string()))
        );
    }

    #[test]
    fn test_update_with_own_children_is_allowed() {
        let doc = page(vec![container("c", vec![text("a", "")])]);
        let current = find_element(&doc, "c").unwrap().clone();
        assert!(update_element(&doc, "c", &ElementPatch::from(current)).is_ok());
    }

    #[test]
    fn test_delete_nested() {
        let doc = page(vec![container("c", vec![text("a", ""), text("b", "")])]);
        let updated = delete_element(&doc, "a").unwrap();
        let ids: Vec<_> = find_element(&updated, "c")
            .unwrap()
            .children()
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_delete_body_is_protected() {
        let doc = page(vec![]);
        assert_eq!(
            delete_element(&doc, BODY_ID),
            Err(MutationError::ProtectedElement(BODY_ID.to_string()))
        );
    }

    #[test]
    fn test_delete_missing() {
        let doc = page(vec![]);
        assert_eq!(
            delete_element(&doc, "ghost"),
            Err(MutationError::NodeNotFound("ghost".to_string()))
        );
    }
}
