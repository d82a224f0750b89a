//! `/orders`
//!
//! `POST /` runs the full placement workflow: promo check, stock check,
//! stock deduction and order creation in one transaction.

use crate::api::{ApiResult, AppState};
use crate::api::extract::{Json, Path, Query};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use sandwich_core::schema::{DateRange, OrderCreate, OrderResponse, OrderUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/tracking/{tracking_number}", get(track))
        .route("/{id}", get(read).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<OrderCreate>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    let order = state.run(move |store| store.place_order(request)).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> ApiResult<Json<Vec<OrderResponse>>> {
    Ok(Json(state.run(move |store| store.list_orders(&range)).await?))
}

async fn track(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
) -> ApiResult<Json<OrderResponse>> {
    Ok(Json(
        state
            .run(move |store| store.get_order_by_tracking(&tracking_number))
            .await?,
    ))
}

async fn read(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<OrderResponse>> {
    Ok(Json(state.run(move |store| store.get_order(id)).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<OrderUpdate>,
) -> ApiResult<Json<OrderResponse>> {
    Ok(Json(
        state.run(move |store| store.update_order(id, request)).await?,
    ))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.run(move |store| store.delete_order(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
