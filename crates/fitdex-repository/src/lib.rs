//! # Fitdex Repository
//!
//! Read-only access to the exercise catalog:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ExerciseSource>
//! PgExerciseSource          (Postgres / SQLx)
//! InMemoryExerciseSource    (JSON seed, development and tests)
//! ```
//!
//! Sources never cache. Results are returned in ascending `id` order and
//! errors are surfaced as [`fitdex_core::FitdexError`] unchanged.

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

pub use memory::*;
pub use pool::*;
pub use postgres::*;
pub use traits::*;
