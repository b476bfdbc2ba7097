//! Tree mutation tests against larger documents

use funnel_editor::{
    collect_ids, count_elements, delete_element, descendant_count, find_element, insert_element, update_element,
    Element, ElementContent, ElementFactory, ElementPatch, ElementType, LeafContent, MutationError, SequentialIds,
    BODY_ID, empty_document,
};

fn factory() -> ElementFactory<SequentialIds> {
    ElementFactory::with_ids(SequentialIds::new("mutation-tests"))
}

/// body
/// ├── hero (container)
/// │   ├── title (text)
/// │   └── cols (2Col)
/// │       ├── left (container) ── cta (link)
/// │       └── right (container)
/// └── footer (text)
fn landing_page() -> Vec<Element> {
    fn leaf(id: &str, kind: ElementType, inner: &str) -> Element {
        Element::new(
            id,
            id,
            kind,
            ElementContent::Leaf(LeafContent {
                inner_text: Some(inner.to_string()),
                ..Default::default()
            }),
        )
    }
    fn branch(id: &str, kind: ElementType, children: Vec<Element>) -> Element {
        Element::new(id, id, kind, ElementContent::Children(children))
    }

    let cols = branch(
        "cols",
        ElementType::TwoColumn,
        vec![
            branch("left", ElementType::Container, vec![leaf("cta", ElementType::Link, "Buy")]),
            branch("right", ElementType::Container, vec![]),
        ],
    );
    let hero = branch(
        "hero",
        ElementType::Container,
        vec![leaf("title", ElementType::Text, "Welcome"), cols],
    );

    let mut body = Element::body();
    body.content = ElementContent::Children(vec![hero, leaf("footer", ElementType::Text, "(c)")]);
    vec![body]
}

#[test]
fn test_insert_into_deep_column() {
    let doc = landing_page();
    let video = factory().create(ElementType::Video).unwrap();
    let video_id = video.id.clone();

    let updated = insert_element(&doc, "right", video).unwrap();

    let right = find_element(&updated, "right").unwrap();
    assert_eq!(right.children().unwrap().last().map(|e| e.id.as_str()), Some(video_id.as_str()));
    assert_eq!(count_elements(&updated), count_elements(&doc) + 1);
}

#[test]
fn test_insert_two_column_counts_its_columns() {
    let doc = landing_page();
    let two_col = factory().create(ElementType::TwoColumn).unwrap();

    let updated = insert_element(&doc, BODY_ID, two_col).unwrap();
    assert_eq!(count_elements(&updated), count_elements(&doc) + 3);
}

#[test]
fn test_insert_keeps_sibling_order() {
    let doc = landing_page();
    let mut factory = factory();
    let first = factory.create(ElementType::Text).unwrap();
    let second = factory.create(ElementType::Text).unwrap();
    let expected = vec![first.id.clone(), second.id.clone()];

    let doc = insert_element(&doc, "left", first).unwrap();
    let doc = insert_element(&doc, "left", second).unwrap();

    let ids: Vec<String> = find_element(&doc, "left")
        .unwrap()
        .children()
        .unwrap()
        .iter()
        .skip(1)
        .map(|e| e.id.clone())
        .collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_insert_unknown_container() {
    let doc = landing_page();
    let text = factory().create(ElementType::Text).unwrap();
    assert_eq!(
        insert_element(&doc, "missing", text),
        Err(MutationError::ContainerNotFound("missing".to_string()))
    );
}

#[test]
fn test_delete_removes_whole_subtree() {
    let doc = landing_page();
    let hero = find_element(&doc, "hero").unwrap();
    let expected = count_elements(&doc) - 1 - descendant_count(hero);

    let updated = delete_element(&doc, "hero").unwrap();

    assert_eq!(count_elements(&updated), expected);
    for gone in ["hero", "title", "cols", "left", "cta", "right"] {
        assert!(find_element(&updated, gone).is_none(), "{gone} should be gone");
    }
    assert!(find_element(&updated, "footer").is_some());
}

#[test]
fn test_update_deep_leaf() {
    let doc = landing_page();
    let patch = ElementPatch::content(ElementContent::Leaf(LeafContent {
        inner_text: Some("Buy now".to_string()),
        href: Some("/checkout".to_string()),
        ..Default::default()
    }));

    let updated = update_element(&doc, "cta", &patch).unwrap();
    let cta = find_element(&updated, "cta").unwrap();

    assert_eq!(cta.leaf().unwrap().href.as_deref(), Some("/checkout"));
    assert_eq!(cta.kind, Some(ElementType::Link));
    assert_eq!(collect_ids(&updated), collect_ids(&doc));
}

#[test]
fn test_update_is_idempotent() {
    let doc = landing_page();
    let patch = ElementPatch {
        name: Some("Hero section".to_string()),
        ..Default::default()
    };

    let once = update_element(&doc, "hero", &patch).unwrap();
    let twice = update_element(&once, "hero", &patch).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_update_branch_keeps_children() {
    let doc = landing_page();
    let styles = [("padding".to_string(), "24px".to_string())].into_iter().collect();

    let updated = update_element(&doc, "cols", &ElementPatch::styles(styles)).unwrap();
    let cols = find_element(&updated, "cols").unwrap();
    assert_eq!(cols.children().unwrap().len(), 2);
    assert_eq!(cols.styles.get("padding").map(String::as_str), Some("24px"));
}

#[test]
fn test_empty_document_has_only_body() {
    let doc = empty_document();
    assert_eq!(count_elements(&doc), 1);
    assert_eq!(
        delete_element(&doc, BODY_ID),
        Err(MutationError::ProtectedElement(BODY_ID.to_string()))
    );
}
