//! Custom Axum extractors.
//!
//! Every rejection renders as a `{"detail": ...}` body.

mod pagination;
mod path;
mod validated;

pub use pagination::*;
pub use path::*;
pub use validated::*;
