//! Exercise catalog controller.

use crate::{
    extractors::ValidatedQuery,
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use fitdex_core::{Exercise, ExerciseId, FitdexError};
use fitdex_service::{ExerciseListResponse, PageQuery, SearchQuery, SearchResponse};
use tracing::debug;

/// Creates the exercise router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises))
        .route("/search", get(search_exercises))
        .route("/:id", get(get_exercise))
}

/// List a page of exercises in id order.
#[utoipa::path(
    get,
    path = "/exercises",
    tag = "exercises",
    params(PageQuery),
    responses(
        (status = 200, description = "A page of exercises", body = ExerciseListResponse),
        (status = 400, description = "Invalid paging parameters"),
        (status = 500, description = "Exercise source unavailable")
    )
)]
pub async fn list_exercises(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PageQuery>,
) -> ApiResult<ExerciseListResponse> {
    let page = query.page();
    debug!("List exercises request: limit={} offset={}", page.limit, page.offset);

    let items = state.exercise_service.fetch_page(page).await?;
    ok(ExerciseListResponse::new(items, page))
}

/// Search exercises by name, ignoring case.
#[utoipa::path(
    get,
    path = "/exercises/search",
    tag = "exercises",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching exercises", body = SearchResponse),
        (status = 400, description = "Missing or invalid search term"),
        (status = 500, description = "Exercise source unavailable")
    )
)]
pub async fn search_exercises(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> ApiResult<SearchResponse> {
    debug!("Search exercises request: {:?}", query.q);

    let items = state.exercise_service.search(&query.q, query.limit()).await?;
    ok(SearchResponse::new(query.q, items))
}

/// Get an exercise by id.
#[utoipa::path(
    get,
    path = "/exercises/{id}",
    tag = "exercises",
    params(("id" = i64, Path, description = "Exercise id")),
    responses(
        (status = 200, description = "The exercise", body = Exercise),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "No exercise with this id")
    )
)]
pub async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Exercise> {
    debug!("Get exercise request: {}", id);

    let exercise_id = parse_exercise_id(&id)?;
    let exercise = state
        .exercise_service
        .get_by_id(exercise_id)
        .await?
        .ok_or_else(|| FitdexError::not_found("Exercise", exercise_id))?;
    ok(exercise)
}

fn parse_exercise_id(id: &str) -> Result<ExerciseId, AppError> {
    ExerciseId::parse(id)
        .map_err(|_| AppError(FitdexError::validation(format!("Invalid exercise id: {}", id))))
}
