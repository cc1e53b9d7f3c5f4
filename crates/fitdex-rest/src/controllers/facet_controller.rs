//! Facet vocabulary controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use fitdex_core::FacetKind;
use fitdex_service::FacetListResponse;

/// Creates the facet router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/muscle-groups", get(muscle_groups))
        .route("/equipment", get(equipment_types))
}

/// Muscle group labels for filtering.
#[utoipa::path(
    get,
    path = "/facets/muscle-groups",
    tag = "facets",
    responses(
        (status = 200, description = "Muscle group vocabulary", body = FacetListResponse)
    )
)]
pub async fn muscle_groups(State(state): State<AppState>) -> ApiResult<FacetListResponse> {
    let values = state.facet_provider.muscle_groups().await;
    ok(FacetListResponse::new(FacetKind::MuscleGroup, &values))
}

/// Equipment labels for filtering.
#[utoipa::path(
    get,
    path = "/facets/equipment",
    tag = "facets",
    responses(
        (status = 200, description = "Equipment vocabulary", body = FacetListResponse)
    )
)]
pub async fn equipment_types(State(state): State<AppState>) -> ApiResult<FacetListResponse> {
    let values = state.facet_provider.equipment_types().await;
    ok(FacetListResponse::new(FacetKind::Equipment, &values))
}
