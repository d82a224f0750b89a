//! `/recipes`

use crate::api::{ApiResult, AppState};
use crate::api::extract::{Json, Path, Query};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use sandwich_core::Recipe;
use sandwich_core::schema::{RecipeCreate, RecipeFilter, RecipeUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(read).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<RecipeCreate>,
) -> ApiResult<(StatusCode, Json<Recipe>)> {
    let recipe = state.run(move |store| store.create_recipe(request)).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

async fn list(
    State(state): State<AppState>,
    Query(filter): Query<RecipeFilter>,
) -> ApiResult<Json<Vec<Recipe>>> {
    Ok(Json(state.run(move |store| store.list_recipes(&filter)).await?))
}

async fn read(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<Recipe>> {
    Ok(Json(state.run(move |store| store.get_recipe(id)).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<RecipeUpdate>,
) -> ApiResult<Json<Recipe>> {
    Ok(Json(
        state.run(move |store| store.update_recipe(id, request)).await?,
    ))
}

async fn remove(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.run(move |store| store.delete_recipe(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
