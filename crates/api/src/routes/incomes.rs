//! Income routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::{ApiError, AppState};
use tally_db::IncomeRepository;
use tally_db::repositories::{CreateIncomeInput, UpdateIncomeInput};
use tally_shared::types::{PageQuery, Paginated};

/// Creates the income router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me/income", get(list_income))
        .route("/income", post(create_income))
        .route("/income/{id}", patch(update_income).delete(delete_income))
}

#[derive(Debug, Deserialize)]
struct CreateIncomeRequest {
    amount: Decimal,
    source: String,
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct UpdateIncomeRequest {
    amount: Option<Decimal>,
    source: Option<String>,
    date: Option<DateTime<Utc>>,
}

/// GET /me/income - Paginated income listing, newest first.
async fn list_income(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let income_repo = IncomeRepository::new((*state.db).clone());

    let (rows, total_items) = income_repo.list_page(user.id(), &page).await?;

    Ok(Json(Paginated::new(rows, &page, total_items)))
}

/// POST /income - Record an income.
async fn create_income(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateIncomeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let income_repo = IncomeRepository::new((*state.db).clone());

    let income = income_repo
        .create(
            user.id(),
            CreateIncomeInput {
                amount: payload.amount,
                source: payload.source,
                date: payload.date,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(income)))
}

/// PATCH /income/{id} - Apply a partial income update.
async fn update_income(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(income_id): Path<Uuid>,
    Json(payload): Json<UpdateIncomeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let income_repo = IncomeRepository::new((*state.db).clone());

    let income = income_repo
        .update(
            user.id(),
            income_id,
            UpdateIncomeInput {
                amount: payload.amount,
                source: payload.source,
                date: payload.date,
            },
        )
        .await?;

    Ok(Json(income))
}

/// DELETE /income/{id} - Delete an income.
async fn delete_income(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(income_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let income_repo = IncomeRepository::new((*state.db).clone());
    income_repo.delete(user.id(), income_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
