//! Summary repository.
//!
//! Fetches the raw rows and hands the math to `tally-core`, so the
//! aggregation rules stay testable without a database.

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use tally_core::summary::{
    MonthlySummary, TrailingSummary, group_expenses_by_category, month_bounds, trailing_summary,
    trailing_window,
};

use crate::entities::{categories, expenses, incomes};

/// Error types for summary operations.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Month outside 1-12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// Window length of zero or beyond the representable datetime range.
    #[error("Invalid number of days: {0}")]
    InvalidDays(u32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Summary repository for aggregate reports.
#[derive(Debug, Clone)]
pub struct SummaryRepository {
    db: DatabaseConnection,
}

impl SummaryRepository {
    /// Creates a new summary repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Income/expense totals over the trailing `days` window ending now.
    ///
    /// An account with no rows in the window yields an all-zero summary.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidDays` when `days` is zero or too large
    /// to form a window.
    pub async fn trailing_summary(
        &self,
        owner_id: Uuid,
        days: u32,
    ) -> Result<TrailingSummary, SummaryError> {
        if days == 0 {
            return Err(SummaryError::InvalidDays(days));
        }
        let (start, end) =
            trailing_window(Utc::now(), days).ok_or(SummaryError::InvalidDays(days))?;

        let income_rows = incomes::Entity::find()
            .filter(incomes::Column::OwnerId.eq(owner_id))
            .filter(incomes::Column::Date.gte(start))
            .filter(incomes::Column::Date.lte(end))
            .all(&self.db)
            .await?;
        let total_income: Decimal = income_rows.iter().map(|r| r.amount).sum();

        let expense_rows = expenses::Entity::find()
            .filter(expenses::Column::OwnerId.eq(owner_id))
            .filter(expenses::Column::Date.gte(start))
            .filter(expenses::Column::Date.lte(end))
            .all(&self.db)
            .await?;
        let total_expenses: Decimal = expense_rows.iter().map(|r| r.cost).sum();

        Ok(trailing_summary(days, total_income, total_expenses))
    }

    /// Per-category expense breakdown for one calendar month.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidMonth` when `month` is outside 1-12.
    pub async fn monthly_summary(
        &self,
        owner_id: Uuid,
        month: u32,
        year: i32,
    ) -> Result<MonthlySummary, SummaryError> {
        let (start, end) = month_bounds(year, month).ok_or(SummaryError::InvalidMonth(month))?;
        let start = to_utc_midnight(start);
        let end = to_utc_midnight(end);

        let rows = expenses::Entity::find()
            .filter(expenses::Column::OwnerId.eq(owner_id))
            .filter(expenses::Column::Date.gte(start))
            .filter(expenses::Column::Date.lt(end))
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await?;

        let rows: Vec<(Option<String>, Decimal)> = rows
            .into_iter()
            .map(|(expense, category)| (category.map(|c| c.name), expense.cost))
            .collect();

        Ok(group_expenses_by_category(month, year, &rows))
    }
}

fn to_utc_midnight(date: chrono::NaiveDate) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc)
}
