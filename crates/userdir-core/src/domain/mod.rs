//! Domain entities for the user directory.

pub mod entities;

pub use entities::*;
