//! # User Directory Service
//!
//! Business logic for the user directory: uniqueness-checked create and
//! update, lookups, listing and deletion.

pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use dto::*;
pub use r#impl::{UserServiceComponent, UserServiceImpl};
pub use user_service::*;
