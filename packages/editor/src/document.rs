//! # Page Document
//!
//! Boundary between the editor and the external page store.
//!
//! ```text
//! PageStore ──load──▶ raw JSON ──parse_document──▶ Vec<Element> ──LoadData──▶ editor
//! editor ──serialize_document──▶ raw JSON ──save──▶ PageStore
//! ```
//!
//! Hydration never fails: anything that is not a valid page tree becomes the
//! canonical empty page.

use funnel_common::validate_document;
use funnel_model::{empty_document, Element};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

use crate::EditorError;

/// External storage for serialized pages, keyed by page id.
pub trait PageStore {
    /// Serialized page content, or `None` when the page has none yet.
    fn load_page(&self, page_id: &str) -> Result<Option<String>, EditorError>;

    fn save_page(&mut self, page_id: &str, content: String) -> Result<(), EditorError>;
}

/// In-memory page store (tests, previews)
#[derive(Debug, Clone, Default)]
pub struct MemoryPageStore {
    pages: HashMap<String, String>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page_id: impl Into<String>, content: impl Into<String>) -> Self {
        self.pages.insert(page_id.into(), content.into());
        self
    }

    pub fn page(&self, page_id: &str) -> Option<&str> {
        self.pages.get(page_id).map(String::as_str)
    }
}

impl PageStore for MemoryPageStore {
    fn load_page(&self, page_id: &str) -> Result<Option<String>, EditorError> {
        Ok(self.pages.get(page_id).cloned())
    }

    fn save_page(&mut self, page_id: &str, content: String) -> Result<(), EditorError> {
        self.pages.insert(page_id.to_string(), content);
        Ok(())
    }
}

/// Parse stored page content into a valid tree, falling back to the empty page.
pub fn parse_document(raw: &str) -> Vec<Element> {
    let elements = match serde_json::from_str::<Value>(raw) {
        Ok(value) => elements_from_value(value),
        Err(e) => {
            tracing::warn!("Page content is not valid JSON: {}", e);
            None
        }
    };

    match elements {
        Some(elements) => match validate_document(&elements) {
            Ok(()) => elements,
            Err(e) => {
                tracing::warn!("Page content is not a valid page tree: {}", e);
                empty_document()
            }
        },
        None => empty_document(),
    }
}

/// Serialize the tree the way the page store keeps it.
pub fn serialize_document(elements: &[Element]) -> Result<String, EditorError> {
    Ok(serde_json::to_string(elements)?)
}

/// Deserialize a list of elements without failing on a bad shape.
///
/// Accepts an array, or a string holding an encoded array. Anything else
/// yields an empty list, which the reducer turns into the empty page.
pub fn lenient_elements<'de, D>(deserializer: D) -> Result<Vec<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(elements_from_value(value).unwrap_or_default())
}

fn elements_from_value(value: Value) -> Option<Vec<Element>> {
    match value {
        Value::Array(_) => match serde_json::from_value(value) {
            Ok(elements) => Some(elements),
            Err(e) => {
                tracing::warn!("Page elements have an unexpected shape: {}", e);
                None
            }
        },
        Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
            Ok(inner @ Value::Array(_)) => elements_from_value(inner),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_model::BODY_ID;

    const PAGE: &str = r#"[{
        "id": "__body",
        "name": "Body",
        "styles": {},
        "type": "__body",
        "content": [
            { "id": "t1", "name": "Text", "styles": {}, "type": "text", "content": { "innerText": "Hi" } }
        ]
    }]"#;

    #[test]
    fn test_parse_valid_page() {
        let elements = parse_document(PAGE);
        assert_eq!(elements[0].id, BODY_ID);
        assert_eq!(elements[0].children().unwrap()[0].id, "t1");
    }

    #[test]
    fn test_malformed_input_falls_back() {
        for raw in ["", "not json", "{}", "42", "null", "[]", r#"[{"id": 1}]"#] {
            assert_eq!(parse_document(raw), empty_document(), "input: {raw:?}");
        }
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryPageStore::new();
        let elements = parse_document(PAGE);

        store
            .save_page("page-1", serialize_document(&elements).unwrap())
            .unwrap();
        let raw = store.load_page("page-1").unwrap().unwrap();

        assert_eq!(parse_document(&raw), elements);
        assert_eq!(store.load_page("page-2").unwrap(), None);
    }

    #[test]
    fn test_lenient_elements_accepts_encoded_string() {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(deserialize_with = "lenient_elements")]
            elements: Vec<Element>,
        }

        let encoded = serde_json::to_string(PAGE).unwrap();
        let json = format!(r#"{{"elements": {encoded}}}"#);
        let payload: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload.elements.len(), 1);

        let payload: Payload = serde_json::from_str(r#"{"elements": {"not": "an array"}}"#).unwrap();
        assert!(payload.elements.is_empty());
    }
}
