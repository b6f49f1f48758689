//! Budget repository.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use tally_shared::types::PageQuery;

use crate::entities::budgets;
use crate::entities::sea_orm_active_enums::BudgetPeriod;

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Budget not found (or not owned by the caller).
    #[error("Budget not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Free-text category label the budget applies to.
    pub category: String,
    /// Spending limit for the period.
    pub limit_amount: Decimal,
    /// Budget period; defaults to monthly.
    pub period: Option<BudgetPeriod>,
    /// Optional period start for custom budgets.
    pub start_date: Option<chrono::DateTime<Utc>>,
    /// Optional period end for custom budgets.
    pub end_date: Option<chrono::DateTime<Utc>>,
}

/// Input for a partial budget update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    /// New category label.
    pub category: Option<String>,
    /// New spending limit.
    pub limit_amount: Option<Decimal>,
    /// New period.
    pub period: Option<BudgetPeriod>,
    /// New period start.
    pub start_date: Option<chrono::DateTime<Utc>>,
    /// New period end.
    pub end_date: Option<chrono::DateTime<Utc>>,
}

/// Budget repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a budget for an owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        owner_id: Uuid,
        input: CreateBudgetInput,
    ) -> Result<budgets::Model, BudgetError> {
        let budget = budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            category: Set(input.category),
            limit_amount: Set(input.limit_amount),
            period: Set(input.period.unwrap_or(BudgetPeriod::Monthly)),
            start_date: Set(input.start_date.map(Into::into)),
            end_date: Set(input.end_date.map(Into::into)),
            owner_id: Set(owner_id),
            created_at: Set(Utc::now().into()),
        };

        Ok(budget.insert(&self.db).await?)
    }

    /// Finds a budget by id, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if no row matches id and owner
    /// jointly.
    pub async fn get(
        &self,
        owner_id: Uuid,
        budget_id: Uuid,
    ) -> Result<budgets::Model, BudgetError> {
        budgets::Entity::find_by_id(budget_id)
            .filter(budgets::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or(BudgetError::NotFound(budget_id))
    }

    /// Lists one page of an owner's budgets, newest first.
    ///
    /// Returns the page rows and the total row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_page(
        &self,
        owner_id: Uuid,
        page: &PageQuery,
    ) -> Result<(Vec<budgets::Model>, u64), BudgetError> {
        let query = budgets::Entity::find().filter(budgets::Column::OwnerId.eq(owner_id));

        let total_items = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_desc(budgets::Column::CreatedAt)
            .order_by_asc(budgets::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total_items))
    }

    /// Applies a partial budget update.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` on an ownership miss.
    pub async fn update(
        &self,
        owner_id: Uuid,
        budget_id: Uuid,
        input: UpdateBudgetInput,
    ) -> Result<budgets::Model, BudgetError> {
        let budget = self.get(owner_id, budget_id).await?;

        let mut active: budgets::ActiveModel = budget.into();

        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(limit_amount) = input.limit_amount {
            active.limit_amount = Set(limit_amount);
        }
        if let Some(period) = input.period {
            active.period = Set(period);
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(Some(start_date.into()));
        }
        if let Some(end_date) = input.end_date {
            active.end_date = Set(Some(end_date.into()));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a budget, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` on an ownership miss.
    pub async fn delete(&self, owner_id: Uuid, budget_id: Uuid) -> Result<(), BudgetError> {
        let result = budgets::Entity::delete_by_id(budget_id)
            .filter(budgets::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(BudgetError::NotFound(budget_id));
        }

        Ok(())
    }
}
