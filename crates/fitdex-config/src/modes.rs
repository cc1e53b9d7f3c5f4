//! Operating modes selected by configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where exercise records are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Hosted Postgres table.
    #[default]
    Postgres,
    /// Process-local list, optionally seeded from a JSON file.
    Memory,
}

impl SourceKind {
    /// Returns true if the source needs a database connection.
    #[must_use]
    pub const fn needs_database(&self) -> bool {
        matches!(self, Self::Postgres)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// How the freshness of a cache entry is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidityPolicy {
    /// Each entry is fresh for `ttl` after its own insertion.
    #[default]
    PerEntry,
    /// One process-wide last-fetch timestamp gates every entry.
    ///
    /// Any successful fetch refreshes all existing keys at once, so a stale
    /// entry can become valid again without being refetched.
    GlobalTimestamp,
}

impl fmt::Display for ValidityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerEntry => write!(f, "per_entry"),
            Self::GlobalTimestamp => write!(f, "global_timestamp"),
        }
    }
}

/// Where facet vocabularies come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FacetMode {
    /// Hardcoded (or configured) lists; no remote query.
    Static,
    /// Distinct values read once from the remote source.
    #[default]
    Derived,
}

impl FacetMode {
    /// Returns true if the vocabulary is read from the source.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(self, Self::Derived)
    }
}

impl fmt::Display for FacetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Derived => write!(f, "derived"),
        }
    }
}
