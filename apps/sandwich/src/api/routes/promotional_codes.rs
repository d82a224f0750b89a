//! `/promotional-codes`

use crate::api::{ApiResult, AppState};
use crate::api::extract::{Json, Path, Query};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use sandwich_core::PromotionalCode;
use sandwich_core::schema::{PromotionalCodeCreate, PromotionalCodeFilter, PromotionalCodeUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/code/{code}", get(redeemable))
        .route("/{id}", get(read).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<PromotionalCodeCreate>,
) -> ApiResult<(StatusCode, Json<PromotionalCode>)> {
    let promo = state
        .run(move |store| store.create_promotional_code(request))
        .await?;
    Ok((StatusCode::CREATED, Json(promo)))
}

async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PromotionalCodeFilter>,
) -> ApiResult<Json<Vec<PromotionalCode>>> {
    Ok(Json(
        state
            .run(move |store| store.list_promotional_codes(&filter))
            .await?,
    ))
}

/// Only codes that are active and unexpired are found.
async fn redeemable(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<PromotionalCode>> {
    Ok(Json(
        state
            .run(move |store| store.find_redeemable_code(&code))
            .await?,
    ))
}

async fn read(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<PromotionalCode>> {
    Ok(Json(
        state.run(move |store| store.get_promotional_code(id)).await?,
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<PromotionalCodeUpdate>,
) -> ApiResult<Json<PromotionalCode>> {
    Ok(Json(
        state
            .run(move |store| store.update_promotional_code(id, request))
            .await?,
    ))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state
        .run(move |store| store.delete_promotional_code(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
