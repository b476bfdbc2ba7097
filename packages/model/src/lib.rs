//! # Funnel Model
//!
//! The document tree edited by the funnel page editor.
//!
//! A page is a forest of [`Element`]s whose only top-level entry is the root
//! body ([`BODY_ID`]). A node is a branch iff its [`ElementContent`] is a
//! sequence of children; everything else carries a [`LeafContent`] payload.
//!
//! ```text
//! __body (body)
//! ├── container
//! │   ├── text        { innerText }
//! │   └── link        { innerText, href }
//! └── 2Col
//!     ├── container
//!     └── container
//! ```

pub mod element;
pub mod id_generator;

pub use element::{Element, ElementContent, ElementType, LeafContent, Styles, UnknownElementType};
pub use id_generator::{page_seed, IdSource, SequentialIds, UuidIds};

/// Reserved id of the root body node.
pub const BODY_ID: &str = "__body";

/// The canonical empty document: a single root body.
pub fn empty_document() -> Vec<Element> {
    vec![Element::body()]
}
