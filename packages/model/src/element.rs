use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::BODY_ID;

/// Free-form style properties (`"backgroundColor" -> "red"`), not validated.
pub type Styles = BTreeMap<String, String>;

/// Kind of an element. The serialized tags are the ones the page store and
/// the drag transfer channel use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "2Col")]
    TwoColumn,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "contactForm")]
    ContactForm,
    #[serde(rename = "paymentForm")]
    PaymentForm,
    #[serde(rename = "__body")]
    Body,
}

impl ElementType {
    pub const ALL: [ElementType; 8] = [
        ElementType::Text,
        ElementType::Container,
        ElementType::TwoColumn,
        ElementType::Link,
        ElementType::Video,
        ElementType::ContactForm,
        ElementType::PaymentForm,
        ElementType::Body,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Container => "container",
            ElementType::TwoColumn => "2Col",
            ElementType::Link => "link",
            ElementType::Video => "video",
            ElementType::ContactForm => "contactForm",
            ElementType::PaymentForm => "paymentForm",
            ElementType::Body => "__body",
        }
    }

    /// Composite kinds hold children instead of a leaf payload.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            ElementType::Container | ElementType::TwoColumn | ElementType::Body
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown element type: {0}")]
pub struct UnknownElementType(pub String);

impl FromStr for ElementType {
    type Err = UnknownElementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownElementType(s.to_string()))
    }
}

/// Payload of a leaf element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Either the ordered children of a branch or the payload of a leaf.
///
/// The JSON shape decides which one it is: an array is a branch, an object
/// is a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementContent {
    Children(Vec<Element>),
    Leaf(LeafContent),
}

impl Default for ElementContent {
    fn default() -> Self {
        ElementContent::Children(Vec::new())
    }
}

/// A node of the page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub styles: Styles,

    /// `None` only for the "no selection" sentinel.
    #[serde(rename = "type")]
    pub kind: Option<ElementType>,

    pub content: ElementContent,
}

impl Element {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ElementType,
        content: ElementContent,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            styles: Styles::new(),
            kind: Some(kind),
            content,
        }
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// The root body of an empty page.
    pub fn body() -> Self {
        Self::new(BODY_ID, "Body", ElementType::Body, ElementContent::default())
    }

    /// The "no selection" sentinel: empty id, empty children, no type.
    pub fn none() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            styles: Styles::new(),
            kind: None,
            content: ElementContent::default(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind.is_none() && self.id.is_empty()
    }

    pub fn is_body(&self) -> bool {
        self.id == BODY_ID
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.content, ElementContent::Children(_))
    }

    pub fn children(&self) -> Option<&[Element]> {
        match &self.content {
            ElementContent::Children(children) => Some(children),
            ElementContent::Leaf(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            ElementContent::Children(children) => Some(children),
            ElementContent::Leaf(_) => None,
        }
    }

    pub fn leaf(&self) -> Option<&LeafContent> {
        match &self.content {
            ElementContent::Leaf(leaf) => Some(leaf),
            ElementContent::Children(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_and_leaf_are_told_apart_by_shape() {
        let json = r#"{
            "id": "c1",
            "name": "Container",
            "styles": {},
            "type": "container",
            "content": [
                {
                    "id": "t1",
                    "name": "Text",
                    "styles": { "color": "black" },
                    "type": "text",
                    "content": { "innerText": "Hi" }
                }
            ]
        }"#;

        let element: Element = serde_json::from_str(json).unwrap();
        assert!(element.is_branch());

        let text = &element.children().unwrap()[0];
        assert!(!text.is_branch());
        assert_eq!(text.leaf().unwrap().inner_text.as_deref(), Some("Hi"));
        assert_eq!(text.styles.get("color").map(String::as_str), Some("black"));
    }

    #[test]
    fn test_empty_leaf_payload_stays_a_leaf() {
        let json = r#"{"id": "f", "name": "Form", "styles": {}, "type": "contactForm", "content": {}}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert!(!element.is_branch());
        assert_eq!(element.leaf(), Some(&LeafContent::default()));
    }

    #[test]
    fn test_wire_tags() {
        let json = serde_json::to_string(&ElementType::TwoColumn).unwrap();
        assert_eq!(json, "\"2Col\"");
        assert_eq!("contactForm".parse::<ElementType>(), Ok(ElementType::ContactForm));
        assert_eq!("__body".parse::<ElementType>(), Ok(ElementType::Body));
        assert!("3Col".parse::<ElementType>().is_err());
    }

    #[test]
    fn test_none_sentinel_serializes_null_type() {
        let value = serde_json::to_value(Element::none()).unwrap();
        assert_eq!(value["type"], serde_json::Value::Null);
        assert_eq!(value["content"], serde_json::json!([]));
        assert!(Element::none().is_none());
        assert!(!Element::body().is_none());
    }

    #[test]
    fn test_leaf_serialization_skips_missing_fields() {
        let leaf = LeafContent {
            inner_text: Some("Hello".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&ElementContent::Leaf(leaf)).unwrap();
        assert_eq!(json, r#"{"innerText":"Hello"}"#);
    }
}
