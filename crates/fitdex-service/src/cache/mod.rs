//! Caching infrastructure for the service layer.
//!
//! Query results are cached in process memory, keyed by query shape, and
//! served until their TTL lapses. Stale entries are not removed; they are
//! overwritten by the next successful fetch for the same key.

pub mod cache_keys;
mod clock;
mod single_flight;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use single_flight::SingleFlight;
pub use store::{CacheStats, ExerciseCacheStore, InMemoryExerciseCache, DEFAULT_TTL};
