//! `/payments`

use crate::api::{ApiResult, AppState};
use crate::api::extract::{Json, Path, Query};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use sandwich_core::Payment;
use sandwich_core::schema::{PaymentCreate, PaymentFilter, PaymentUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/order/{order_id}", get(by_order))
        .route("/{id}", get(read).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<PaymentCreate>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    let payment = state.run(move |store| store.create_payment(request)).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PaymentFilter>,
) -> ApiResult<Json<Vec<Payment>>> {
    Ok(Json(state.run(move |store| store.list_payments(&filter)).await?))
}

async fn by_order(
    State(state): State<AppState>,
    Path(order_id): Path<u64>,
) -> ApiResult<Json<Payment>> {
    Ok(Json(
        state
            .run(move |store| store.get_payment_by_order(order_id))
            .await?,
    ))
}

async fn read(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<Payment>> {
    Ok(Json(state.run(move |store| store.get_payment(id)).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<PaymentUpdate>,
) -> ApiResult<Json<Payment>> {
    Ok(Json(
        state.run(move |store| store.update_payment(id, request)).await?,
    ))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.run(move |store| store.delete_payment(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
