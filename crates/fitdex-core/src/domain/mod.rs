//! # Domain
//!
//! The exercise catalog as seen by this layer: a read-only projection of
//! remote rows plus the filter vocabularies offered to the UI.

pub mod exercise;
pub mod facet;

pub use exercise::*;
pub use facet::*;
