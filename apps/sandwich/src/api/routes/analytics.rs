//! `/analytics`

use crate::api::{ApiResult, AppState};
use crate::api::extract::{Json, Path, Query};
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use sandwich_core::schema::{
    Complaint, ComplaintQuery, DishRatings, PopularDish, PopularQuery, RevenueQuery, RevenueReport,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/revenue", get(revenue))
        .route("/popular-dishes", get(popular_dishes))
        .route("/complaints", get(complaints))
        .route("/dish-ratings/{sandwich_id}", get(dish_ratings))
}

async fn revenue(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> ApiResult<Json<RevenueReport>> {
    Ok(Json(state.run(move |store| store.revenue(&query)).await?))
}

async fn popular_dishes(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> ApiResult<Json<Vec<PopularDish>>> {
    Ok(Json(
        state
            .run(move |store| store.popular_dishes(query.limit))
            .await?,
    ))
}

async fn complaints(
    State(state): State<AppState>,
    Query(query): Query<ComplaintQuery>,
) -> ApiResult<Json<Vec<Complaint>>> {
    Ok(Json(
        state
            .run(move |store| store.complaints(query.min_rating))
            .await?,
    ))
}

async fn dish_ratings(
    State(state): State<AppState>,
    Path(sandwich_id): Path<u64>,
) -> ApiResult<Json<DishRatings>> {
    Ok(Json(
        state
            .run(move |store| store.dish_ratings(sandwich_id))
            .await?,
    ))
}
