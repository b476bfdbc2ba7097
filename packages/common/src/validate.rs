//! Structural validation of whole documents.

use crate::error::{CommonError, CommonResult};
use crate::visitor::{walk_element, Visitor};
use funnel_model::{Element, ElementType, BODY_ID};
use std::collections::HashSet;

struct StructureChecker {
    seen: HashSet<String>,
    depth: usize,
    error: Option<CommonError>,
}

impl StructureChecker {
    fn check(&mut self, element: &Element) -> CommonResult<()> {
        if element.id.is_empty() {
            return Err(CommonError::EmptyId);
        }
        if !self.seen.insert(element.id.clone()) {
            return Err(CommonError::DuplicateId(element.id.clone()));
        }

        let kind = element
            .kind
            .ok_or_else(|| CommonError::MissingType(element.id.clone()))?;

        if self.depth > 0 && (kind == ElementType::Body || element.id == BODY_ID) {
            return Err(CommonError::MisplacedBody(element.id.clone()));
        }
        if kind.is_composite() && !element.is_branch() {
            return Err(CommonError::CompositeWithoutChildren(element.id.clone()));
        }
        Ok(())
    }
}

impl Visitor for StructureChecker {
    fn visit_element(&mut self, element: &Element) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.check(element) {
            self.error = Some(e);
            return;
        }
        self.depth += 1;
        walk_element(self, element);
        self.depth -= 1;
    }
}

/// Check the document invariants: a single root body with the reserved id,
/// no other body, unique non-empty ids, typed nodes, and composite kinds
/// holding children.
///
/// Leaf kinds carrying an (empty) children array are tolerated; older pages
/// stored forms that way.
pub fn validate_document(elements: &[Element]) -> CommonResult<()> {
    let root = match elements {
        [] => return Err(CommonError::MissingRoot),
        [root] => root,
        _ => return Err(CommonError::MultipleRoots(elements.len())),
    };

    if root.id != BODY_ID || root.kind != Some(ElementType::Body) {
        return Err(CommonError::InvalidRoot(root.id.clone()));
    }

    let mut checker = StructureChecker {
        seen: HashSet::new(),
        depth: 0,
        error: None,
    };
    checker.visit_element(root);

    match checker.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
