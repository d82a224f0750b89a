//! `/reviews`

use crate::api::{ApiResult, AppState};
use crate::api::extract::{Json, Path, Query};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use sandwich_core::schema::{ReviewCreate, ReviewFilter, ReviewResponse, ReviewUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(read).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<ReviewCreate>,
) -> ApiResult<(StatusCode, Json<ReviewResponse>)> {
    let review = state.run(move |store| store.create_review(request)).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ReviewFilter>,
) -> ApiResult<Json<Vec<ReviewResponse>>> {
    Ok(Json(state.run(move |store| store.list_reviews(&filter)).await?))
}

async fn read(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<ReviewResponse>> {
    Ok(Json(state.run(move |store| store.get_review(id)).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<ReviewUpdate>,
) -> ApiResult<Json<ReviewResponse>> {
    Ok(Json(
        state.run(move |store| store.update_review(id, request)).await?,
    ))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.run(move |store| store.delete_review(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
