//! REST API controllers.

pub mod exercise_controller;
pub mod facet_controller;
pub mod health_controller;

pub use health_controller::*;
