//! Budget routes.

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
use tally_db::BudgetRepository;
use tally_db::entities::sea_orm_active_enums::BudgetPeriod;
use tally_db::repositories::{CreateBudgetInput, UpdateBudgetInput};
use tally_shared::types::{PageQuery, Paginated};

/// Creates the budgets router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me/budgets", get(list_budgets))
        .route("/budgets", post(create_budget))
        .route("/budgets/{id}", patch(update_budget).delete(delete_budget))
}

#[derive(Debug, Deserialize)]
struct CreateBudgetRequest {
    category: String,
    limit_amount: Decimal,
    period: Option<BudgetPeriod>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct UpdateBudgetRequest {
    category: Option<String>,
    limit_amount: Option<Decimal>,
    period: Option<BudgetPeriod>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

/// GET /me/budgets - Paginated budget listing.
async fn list_budgets(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let budget_repo = BudgetRepository::new((*state.db).clone());

    let (rows, total_items) = budget_repo.list_page(user.id(), &page).await?;

    Ok(Json(Paginated::new(rows, &page, total_items)))
}

/// POST /budgets - Create a budget.
async fn create_budget(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateBudgetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let budget_repo = BudgetRepository::new((*state.db).clone());

    let budget = budget_repo
        .create(
            user.id(),
            CreateBudgetInput {
                category: payload.category,
                limit_amount: payload.limit_amount,
                period: payload.period,
                start_date: payload.start_date,
                end_date: payload.end_date,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(budget)))
}

/// PATCH /budgets/{id} - Apply a partial budget update.
async fn update_budget(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(budget_id): Path<Uuid>,
    Json(payload): Json<UpdateBudgetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let budget_repo = BudgetRepository::new((*state.db).clone());

    let budget = budget_repo
        .update(
            user.id(),
            budget_id,
            UpdateBudgetInput {
                category: payload.category,
                limit_amount: payload.limit_amount,
                period: payload.period,
                start_date: payload.start_date,
                end_date: payload.end_date,
            },
        )
        .await?;

    Ok(Json(budget))
}

/// DELETE /budgets/{id} - Delete a budget.
async fn delete_budget(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(budget_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let budget_repo = BudgetRepository::new((*state.db).clone());
    budget_repo.delete(user.id(), budget_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
