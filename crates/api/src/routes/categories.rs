//! Category routes.
//!
//! Unlike the silent auto-creation on the expense path, explicit category
//! creation and renaming report name collisions as conflicts.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::{ApiError, AppState};
use tally_db::CategoryRepository;
use tally_shared::types::{PageQuery, Paginated};

/// Creates the categories router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me/categories", get(list_categories))
        .route("/categories", post(create_category))
        .route(
            "/categories/{id}",
            patch(rename_category).delete(delete_category),
        )
}

#[derive(Debug, Deserialize)]
struct CategoryNameRequest {
    name: String,
}

/// GET /me/categories - Paginated category listing, sorted by name.
async fn list_categories(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let category_repo = CategoryRepository::new((*state.db).clone());

    let (rows, total_items) = category_repo.list_page(user.id(), &page).await?;

    Ok(Json(Paginated::new(rows, &page, total_items)))
}

/// POST /categories - Create a category; 409 on a duplicate name.
async fn create_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CategoryNameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category_repo = CategoryRepository::new((*state.db).clone());

    let category = category_repo.create(user.id(), &payload.name).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// PATCH /categories/{id} - Rename a category; 409 on a duplicate name.
async fn rename_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<CategoryNameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category_repo = CategoryRepository::new((*state.db).clone());

    let category = category_repo
        .rename(user.id(), category_id, &payload.name)
        .await?;

    Ok(Json(category))
}

/// DELETE /categories/{id} - Delete a category, uncategorizing its expenses.
async fn delete_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let category_repo = CategoryRepository::new((*state.db).clone());
    category_repo.delete(user.id(), category_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
