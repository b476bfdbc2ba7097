use funnel_model::{Element, ElementContent, LeafContent};

/// Visitor pattern for traversing page trees immutably
///
/// The default implementations walk the entire tree depth-first, parents
/// before children. Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_leaf(&mut self, _leaf: &LeafContent) {
        // Leaf payload, nothing below it
    }
}

pub fn walk_elements<V: Visitor>(visitor: &mut V, elements: &[Element]) {
    for element in elements {
        visitor.visit_element(element);
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    match &element.content {
        ElementContent::Children(children) => walk_elements(visitor, children),
        ElementContent::Leaf(leaf) => visitor.visit_leaf(leaf),
    }
}
