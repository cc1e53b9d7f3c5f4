//! Result type aliases for Fitdex.

use crate::FitdexError;

/// A specialized `Result` type for Fitdex operations.
pub type FitdexResult<T> = Result<T, FitdexError>;

