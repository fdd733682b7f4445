//! # User Directory Server Library
//!
//! Dependency injection wiring and startup for the user directory server.

pub mod app;
pub mod di;
pub mod startup;
