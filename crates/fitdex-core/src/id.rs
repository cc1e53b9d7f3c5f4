//! Typed ID wrappers for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

/// A strongly-typed wrapper for exercise IDs.
///
/// Exercise rows are keyed by a `bigint` primary key in the remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExerciseId(pub i64);

impl ExerciseId {
    /// Creates an exercise ID from its raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses an exercise ID from a string.
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        Ok(Self(s.trim().parse()?))
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExerciseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for ExerciseId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ExerciseId> for i64 {
    fn from(id: ExerciseId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_id_display() {
        assert_eq!(ExerciseId::new(42).to_string(), "42");
    }

    #[test]
    fn test_exercise_id_parse() {
        assert_eq!(ExerciseId::parse("17").unwrap(), ExerciseId(17));
        assert_eq!(" 8 ".parse::<ExerciseId>().unwrap(), ExerciseId(8));
        assert!(ExerciseId::parse("squat").is_err());
    }

    #[test]
    fn test_exercise_id_serializes_transparently() {
        let json = serde_json::to_string(&ExerciseId(3)).unwrap();
        assert_eq!(json, "3");

        let id: ExerciseId = serde_json::from_str("5").unwrap();
        assert_eq!(id.into_inner(), 5);
    }
}
