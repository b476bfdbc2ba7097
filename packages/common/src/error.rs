use thiserror::Error;

pub type CommonResult<T> = Result<T, CommonError>;

/// Structural problems found in a page tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    #[error("Document has no root body")]
    MissingRoot,

    #[error("Document has {0} top-level elements, expected a single root body")]
    MultipleRoots(usize),

    #[error("Top-level element {0} is not the root body")]
    InvalidRoot(String),

    #[error("Body element nested below the root: {0}")]
    MisplacedBody(String),

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Element with an empty id")]
    EmptyId,

    #[error("Element {0} has no type")]
    MissingType(String),

    #[error("Composite element {0} has leaf content")]
    CompositeWithoutChildren(String),
}
