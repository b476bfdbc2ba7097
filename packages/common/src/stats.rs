//! Read-only queries over a page tree.

use crate::visitor::{walk_element, walk_elements, Visitor};
use funnel_model::Element;

#[derive(Default)]
struct NodeCounter(usize);

impl Visitor for NodeCounter {
    fn visit_element(&mut self, element: &Element) {
        self.0 += 1;
        walk_element(self, element);
    }
}

#[derive(Default)]
struct IdCollector(Vec<String>);

impl Visitor for IdCollector {
    fn visit_element(&mut self, element: &Element) {
        self.0.push(element.id.clone());
        walk_element(self, element);
    }
}

/// Number of nodes in the forest, roots included.
pub fn count_elements(elements: &[Element]) -> usize {
    let mut counter = NodeCounter::default();
    walk_elements(&mut counter, elements);
    counter.0
}

/// Number of nodes strictly below `element`.
pub fn descendant_count(element: &Element) -> usize {
    element.children().map(count_elements).unwrap_or(0)
}

/// Every id in the forest, in pre-order.
pub fn collect_ids(elements: &[Element]) -> Vec<String> {
    let mut collector = IdCollector::default();
    walk_elements(&mut collector, elements);
    collector.0
}

/// First node with `id`, depth-first.
pub fn find_element<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    for element in elements {
        if element.id == id {
            return Some(element);
        }
        if let Some(found) = element.children().and_then(|children| find_element(children, id)) {
            return Some(found);
        }
    }
    None
}

pub fn contains_element(elements: &[Element], id: &str) -> bool {
    find_element(elements, id).is_some()
}
