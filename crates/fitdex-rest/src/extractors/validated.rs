//! Validated query-string extractor.
//!
//! `ValidatedQuery<T>` deserializes the query string and validates it with
//! the `validator` crate. Both failures are answered with 400 Bad Request in
//! the standard response envelope, validation failures with field details.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use fitdex_core::{field_errors, ErrorResponse};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Query extractor that validates the deserialized value.
///
/// ```ignore
/// async fn list(ValidatedQuery(query): ValidatedQuery<PageQuery>) {
///     // query.limit is within bounds here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T> std::ops::Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated query extraction.
#[derive(Debug)]
pub enum ValidatedQueryRejection {
    /// The query string could not be deserialized.
    InvalidQuery(QueryRejection),
    /// The query string parsed but failed validation.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedQueryRejection {
    fn into_response(self) -> Response {
        let error_response = match self {
            Self::InvalidQuery(rejection) => ErrorResponse {
                code: "INVALID_QUERY".to_string(),
                message: format!("Invalid query string: {}", rejection.body_text()),
                details: None,
            },
            Self::ValidationError(errors) => ErrorResponse {
                code: "VALIDATION_ERROR".to_string(),
                message: "Request validation failed".to_string(),
                details: Some(field_errors(&errors)),
            },
        };
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure(error_response)),
        )
            .into_response()
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidatedQueryRejection::InvalidQuery)?;

        value
            .validate()
            .map_err(ValidatedQueryRejection::ValidationError)?;

        Ok(ValidatedQuery(value))
    }
}
