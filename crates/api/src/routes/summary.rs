//! Summary and report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use crate::middleware::auth::CurrentUser;
use crate::{ApiError, AppState};
use tally_db::SummaryRepository;

/// Creates the summary router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me/summary", get(trailing_summary))
        .route("/me/reports/monthly", get(monthly_report))
}

#[derive(Debug, Deserialize)]
struct TrailingQuery {
    #[serde(default = "default_days")]
    days: u32,
}

fn default_days() -> u32 {
    30
}

#[derive(Debug, Deserialize)]
struct MonthlyQuery {
    month: u32,
    year: i32,
}

/// GET /me/summary?days - Income/expense totals over a trailing window.
async fn trailing_summary(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<TrailingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary_repo = SummaryRepository::new((*state.db).clone());

    // Window length is validated by the repository; days < 1 is a 400.
    let summary = summary_repo.trailing_summary(user.id(), query.days).await?;

    Ok(Json(summary))
}

/// GET /me/reports/monthly?month&year - Per-category monthly breakdown.
async fn monthly_report(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<MonthlyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary_repo = SummaryRepository::new((*state.db).clone());

    let summary = summary_repo
        .monthly_summary(user.id(), query.month, query.year)
        .await?;

    Ok(Json(summary))
}
