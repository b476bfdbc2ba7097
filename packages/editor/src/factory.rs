//! # Element Factory
//!
//! Builds fresh elements for the component types a palette can drag onto the
//! canvas. The drag source names the type under the `componentType` key of
//! the platform's drag data.

use funnel_model::{Element, ElementContent, ElementType, IdSource, LeafContent, Styles, UuidIds};
use std::collections::HashMap;

use crate::Action;

/// Drag data key carrying the component type tag.
pub const COMPONENT_TYPE_KEY: &str = "componentType";

pub const DEFAULT_VIDEO_SRC: &str = "https://www.youtube.com/embed/TX9qSaGXFyg?si=fNsKJM7pkgWZamhU";

/// Read side of the platform's drag data transfer.
pub trait DataTransfer {
    fn get_data(&self, key: &str) -> Option<String>;
}

impl DataTransfer for HashMap<String, String> {
    fn get_data(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Styles every new element starts with.
pub fn default_styles() -> Styles {
    [
        ("backgroundPosition", "center"),
        ("objectFit", "cover"),
        ("backgroundRepeat", "no-repeat"),
        ("textAlign", "left"),
        ("opacity", "100%"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub struct ElementFactory<I: IdSource = UuidIds> {
    ids: I,
}

impl ElementFactory<UuidIds> {
    pub fn new() -> Self {
        Self { ids: UuidIds }
    }
}

impl Default for ElementFactory<UuidIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> ElementFactory<I> {
    pub fn with_ids(ids: I) -> Self {
        Self { ids }
    }

    /// A new element of `kind`, or `None` for kinds a palette cannot create.
    pub fn create(&mut self, kind: ElementType) -> Option<Element> {
        let element = match kind {
            ElementType::Text => self.basic(
                "Text",
                kind,
                leaf(|c| c.inner_text = Some("Text Element".to_string())),
                &[("color", "black")],
            ),
            ElementType::Link => self.basic(
                "Link",
                kind,
                leaf(|c| {
                    c.inner_text = Some("Link Element".to_string());
                    c.href = Some("#".to_string());
                }),
                &[("color", "black")],
            ),
            ElementType::Video => self.basic(
                "Video",
                kind,
                leaf(|c| c.src = Some(DEFAULT_VIDEO_SRC.to_string())),
                &[],
            ),
            ElementType::ContactForm => self.basic("Contact Form", kind, leaf(|_| {}), &[]),
            ElementType::PaymentForm => self.basic("Payment Form", kind, leaf(|_| {}), &[]),
            ElementType::Container => self.container(),
            ElementType::TwoColumn => {
                let columns = vec![self.container(), self.container()];
                self.basic(
                    "Two Columns",
                    kind,
                    ElementContent::Children(columns),
                    &[("display", "flex")],
                )
            }
            ElementType::Body => return None,
        };
        Some(element)
    }

    /// Like [`create`](Self::create), from a wire tag. Unknown tags yield `None`.
    pub fn create_from_tag(&mut self, tag: &str) -> Option<Element> {
        match tag.parse::<ElementType>() {
            Ok(kind) => self.create(kind),
            Err(e) => {
                tracing::debug!("Ignoring drop: {}", e);
                None
            }
        }
    }

    /// The action a drop of `transfer` onto `container_id` should dispatch.
    pub fn drop_action(&mut self, container_id: &str, transfer: &dyn DataTransfer) -> Option<Action> {
        let tag = transfer.get_data(COMPONENT_TYPE_KEY)?;
        let element = self.create_from_tag(&tag)?;
        Some(Action::AddElement {
            container_id: container_id.to_string(),
            element,
        })
    }

    fn container(&mut self) -> Element {
        self.basic(
            "Container",
            ElementType::Container,
            ElementContent::Children(Vec::new()),
            &[],
        )
    }

    fn basic(
        &mut self,
        name: &str,
        kind: ElementType,
        content: ElementContent,
        extra_styles: &[(&str, &str)],
    ) -> Element {
        let mut styles = default_styles();
        for (property, value) in extra_styles {
            styles.insert(property.to_string(), value.to_string());
        }
        Element::new(self.ids.next_id(), name, kind, content).with_styles(styles)
    }
}

fn leaf(fill: impl FnOnce(&mut LeafContent)) -> ElementContent {
    let mut content = LeafContent::default();
    fill(&mut content);
    ElementContent::Leaf(content)
}
