//! Income repository.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use tally_shared::types::PageQuery;

use crate::entities::incomes;

/// Error types for income operations.
#[derive(Debug, thiserror::Error)]
pub enum IncomeError {
    /// Income not found (or not owned by the caller).
    #[error("Income not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording an income.
#[derive(Debug, Clone)]
pub struct CreateIncomeInput {
    /// Positive amount received.
    pub amount: Decimal,
    /// Where the money came from.
    pub source: String,
    /// When the income arrived; defaults to now.
    pub date: Option<chrono::DateTime<Utc>>,
}

/// Input for a partial income update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateIncomeInput {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New source.
    pub source: Option<String>,
    /// New date.
    pub date: Option<chrono::DateTime<Utc>>,
}

/// Income repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct IncomeRepository {
    db: DatabaseConnection,
}

impl IncomeRepository {
    /// Creates a new income repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an income for an owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        owner_id: Uuid,
        input: CreateIncomeInput,
    ) -> Result<incomes::Model, IncomeError> {
        let income = incomes::ActiveModel {
            id: Set(Uuid::new_v4()),
            amount: Set(input.amount),
            source: Set(input.source),
            date: Set(input.date.unwrap_or_else(Utc::now).into()),
            owner_id: Set(owner_id),
            created_at: Set(Utc::now().into()),
        };

        Ok(income.insert(&self.db).await?)
    }

    /// Finds an income by id, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `IncomeError::NotFound` if no row matches id and owner
    /// jointly.
    pub async fn get(
        &self,
        owner_id: Uuid,
        income_id: Uuid,
    ) -> Result<incomes::Model, IncomeError> {
        incomes::Entity::find_by_id(income_id)
            .filter(incomes::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or(IncomeError::NotFound(income_id))
    }

    /// Lists one page of an owner's incomes, newest first.
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
    ) -> Result<(Vec<incomes::Model>, u64), IncomeError> {
        let query = incomes::Entity::find().filter(incomes::Column::OwnerId.eq(owner_id));

        let total_items = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_desc(incomes::Column::Date)
            .order_by_asc(incomes::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total_items))
    }

    /// Applies a partial income update.
    ///
    /// # Errors
    ///
    /// Returns `IncomeError::NotFound` on an ownership miss.
    pub async fn update(
        &self,
        owner_id: Uuid,
        income_id: Uuid,
        input: UpdateIncomeInput,
    ) -> Result<incomes::Model, IncomeError> {
        let income = self.get(owner_id, income_id).await?;

        let mut active: incomes::ActiveModel = income.into();

        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(source) = input.source {
            active.source = Set(source);
        }
        if let Some(date) = input.date {
            active.date = Set(date.into());
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes an income, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `IncomeError::NotFound` on an ownership miss.
    pub async fn delete(&self, owner_id: Uuid, income_id: Uuid) -> Result<(), IncomeError> {
        let result = incomes::Entity::delete_by_id(income_id)
            .filter(incomes::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(IncomeError::NotFound(income_id));
        }

        Ok(())
    }
}
