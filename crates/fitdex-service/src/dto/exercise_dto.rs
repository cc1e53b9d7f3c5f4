//! Exercise-related DTOs.

use fitdex_core::{Exercise, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Largest offset the Postgres source can bind.
const MAX_OFFSET: usize = i64::MAX as usize;

/// Query parameters for listing a page of exercises.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page size, 1 to 100 (default 20).
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<usize>,

    /// Rows to skip (default 0).
    #[validate(range(max = MAX_OFFSET, message = "offset must not exceed 9223372036854775807"))]
    pub offset: Option<usize>,
}

impl PageQuery {
    /// Resolves defaults into a page request.
    #[must_use]
    pub fn page(&self) -> PageRequest {
        PageRequest::new(
            self.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
            self.offset.unwrap_or(0),
        )
    }
}

/// Query parameters for searching exercises by name.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring to look for in exercise names, ignoring case.
    #[validate(length(min = 1, max = 128, message = "q must be 1-128 characters"))]
    pub q: String,

    /// Maximum number of matches, 1 to 100 (default 20).
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Resolved result limit.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(PageRequest::DEFAULT_LIMIT)
    }
}

/// A page of exercises.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExerciseListResponse {
    pub items: Vec<Exercise>,
    pub limit: usize,
    pub offset: usize,
    /// Number of items in this page; less than `limit` on the last page.
    pub count: usize,
}

impl ExerciseListResponse {
    pub fn new(items: Vec<Exercise>, page: PageRequest) -> Self {
        Self {
            count: items.len(),
            items,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

/// Exercises matching a name search.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub items: Vec<Exercise>,
    pub count: usize,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, items: Vec<Exercise>) -> Self {
        Self {
            query: query.into(),
            count: items.len(),
            items,
        }
    }
}
