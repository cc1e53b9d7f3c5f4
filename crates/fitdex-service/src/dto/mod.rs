//! Data Transfer Objects (DTOs).

mod exercise_dto;
mod facet_dto;

pub use exercise_dto::*;
pub use facet_dto::*;
