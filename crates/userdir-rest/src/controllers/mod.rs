//! REST API controllers.

pub mod health_controller;
pub mod root_controller;
pub mod user_controller;

pub use health_controller::*;
