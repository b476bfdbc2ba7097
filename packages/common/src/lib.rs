pub mod error;
pub mod stats;
pub mod validate;
pub mod visitor;

pub use error::*;
pub use stats::*;
pub use validate::*;
pub use visitor::*;
