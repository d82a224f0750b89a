//! `/sandwiches`

use crate::api::{ApiResult, AppState};
use crate::api::extract::{Json, Path, Query};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use sandwich_core::Sandwich;
use sandwich_core::schema::{SandwichCreate, SandwichFilter, SandwichUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(read).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<SandwichCreate>,
) -> ApiResult<(StatusCode, Json<Sandwich>)> {
    let sandwich = state.run(move |store| store.create_sandwich(request)).await?;
    Ok((StatusCode::CREATED, Json(sandwich)))
}

async fn list(
    State(state): State<AppState>,
    Query(filter): Query<SandwichFilter>,
) -> ApiResult<Json<Vec<Sandwich>>> {
    Ok(Json(
        state.run(move |store| store.list_sandwiches(&filter)).await?,
    ))
}

async fn read(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<Sandwich>> {
    Ok(Json(state.run(move |store| store.get_sandwich(id)).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<SandwichUpdate>,
) -> ApiResult<Json<Sandwich>> {
    Ok(Json(
        state.run(move |store| store.update_sandwich(id, request)).await?,
    ))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.run(move |store| store.delete_sandwich(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
