//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::{ApiError, AppState};
use tally_db::ExpenseRepository;
use tally_db::repositories::{CreateExpenseInput, ExpenseWithCategory, UpdateExpenseInput};
use tally_shared::types::{PageQuery, Paginated};

/// Creates the expenses router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me/expenses", get(list_expenses))
        .route("/expenses", post(create_expense))
        .route("/expenses/{id}", patch(update_expense).delete(delete_expense))
}

#[derive(Debug, Deserialize)]
struct CreateExpenseRequest {
    item: String,
    cost: Decimal,
    category: Option<String>,
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct UpdateExpenseRequest {
    item: Option<String>,
    cost: Option<Decimal>,
    category: Option<String>,
    date: Option<DateTime<Utc>>,
}

/// An expense as rendered to the client, category flattened to its name.
#[derive(Debug, Serialize)]
struct ExpenseResponse {
    id: Uuid,
    item: String,
    cost: Decimal,
    date: DateTime<Utc>,
    category: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ExpenseWithCategory> for ExpenseResponse {
    fn from(row: ExpenseWithCategory) -> Self {
        Self {
            id: row.expense.id,
            item: row.expense.item,
            cost: row.expense.cost,
            date: row.expense.date.with_timezone(&Utc),
            category: row.category.map(|c| c.name),
            created_at: row.expense.created_at.with_timezone(&Utc),
        }
    }
}

/// GET /me/expenses - Paginated, sortable expense listing.
async fn list_expenses(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let expense_repo = ExpenseRepository::new((*state.db).clone());

    let (rows, total_items) = expense_repo.list_page(user.id(), &page).await?;
    let data: Vec<ExpenseResponse> = rows.into_iter().map(Into::into).collect();

    Ok(Json(Paginated::new(data, &page, total_items)))
}

/// POST /expenses - Record an expense, auto-creating its category.
async fn create_expense(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense_repo = ExpenseRepository::new((*state.db).clone());

    let created = expense_repo
        .create(
            user.id(),
            CreateExpenseInput {
                item: payload.item,
                cost: payload.cost,
                category: payload.category,
                date: payload.date,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(created))))
}

/// PATCH /expenses/{id} - Apply a partial expense update.
async fn update_expense(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(expense_id): Path<Uuid>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense_repo = ExpenseRepository::new((*state.db).clone());

    let updated = expense_repo
        .update(
            user.id(),
            expense_id,
            UpdateExpenseInput {
                item: payload.item,
                cost: payload.cost,
                category: payload.category,
                date: payload.date,
            },
        )
        .await?;

    Ok(Json(ExpenseResponse::from(updated)))
}

/// DELETE /expenses/{id} - Delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(expense_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let expense_repo = ExpenseRepository::new((*state.db).clone());
    expense_repo.delete(user.id(), expense_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
