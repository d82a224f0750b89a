//! `/resources`

use crate::api::{ApiResult, AppState};
use crate::api::extract::{Json, Path};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use sandwich_core::Resource;
use sandwich_core::schema::{ResourceCreate, ResourceUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(read).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<ResourceCreate>,
) -> ApiResult<(StatusCode, Json<Resource>)> {
    let resource = state.run(move |store| store.create_resource(request)).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Resource>>> {
    Ok(Json(state.run(|store| store.list_resources()).await?))
}

async fn read(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<Resource>> {
    Ok(Json(state.run(move |store| store.get_resource(id)).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<ResourceUpdate>,
) -> ApiResult<Json<Resource>> {
    Ok(Json(
        state.run(move |store| store.update_resource(id, request)).await?,
    ))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.run(move |store| store.delete_resource(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
