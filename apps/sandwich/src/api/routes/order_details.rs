//! `/order-details`

use crate::api::{ApiResult, AppState};
use crate::api::extract::{Json, Path, Query};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use sandwich_core::OrderDetail;
use sandwich_core::schema::{OrderDetailCreate, OrderDetailFilter, OrderDetailUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(read).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<OrderDetailCreate>,
) -> ApiResult<(StatusCode, Json<OrderDetail>)> {
    let detail = state
        .run(move |store| store.create_order_detail(request))
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn list(
    State(state): State<AppState>,
    Query(filter): Query<OrderDetailFilter>,
) -> ApiResult<Json<Vec<OrderDetail>>> {
    Ok(Json(
        state.run(move |store| store.list_order_details(&filter)).await?,
    ))
}

async fn read(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<OrderDetail>> {
    Ok(Json(state.run(move |store| store.get_order_detail(id)).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<OrderDetailUpdate>,
) -> ApiResult<Json<OrderDetail>> {
    Ok(Json(
        state
            .run(move |store| store.update_order_detail(id, request))
            .await?,
    ))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.run(move |store| store.delete_order_detail(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
