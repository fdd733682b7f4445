//! # User Directory Repository
//!
//! Data access for the user directory, backed by SQLite through SQLx.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>        (domain interface)
//! SqliteUserRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! SQLite
//! ```

pub mod pool;
pub mod sqlite;
pub mod traits;

pub use pool::*;
pub use sqlite::*;
pub use traits::*;
