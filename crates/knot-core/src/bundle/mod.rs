//! Bundle text extraction: wrapper catalog, body isolation, and root-async
//! classification.

mod body;
mod catalog;
mod roots;

pub use catalog::{ModuleCatalog, Wrapper};
pub use roots::classify_roots;
