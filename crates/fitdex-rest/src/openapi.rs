//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{HealthResponse, ReadinessResponse};
use fitdex_core::{ErrorResponse, Exercise, ExerciseId, FacetKind, FieldError};
use fitdex_service::{ExerciseListResponse, FacetListResponse, PageQuery, SearchQuery, SearchResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Fitdex API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fitdex API",
        version = "1.0.0",
        description = "Read-only exercise catalog with cached paging, search, and filter vocabularies"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Exercise endpoints
        crate::controllers::exercise_controller::list_exercises,
        crate::controllers::exercise_controller::search_exercises,
        crate::controllers::exercise_controller::get_exercise,
        // Facet endpoints
        crate::controllers::facet_controller::muscle_groups,
        crate::controllers::facet_controller::equipment_types,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            Exercise,
            ExerciseId,
            FacetKind,
            ErrorResponse,
            FieldError,
            PageQuery,
            SearchQuery,
            ExerciseListResponse,
            SearchResponse,
            FacetListResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "exercises", description = "Exercise catalog endpoints"),
        (name = "facets", description = "Filter vocabulary endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
