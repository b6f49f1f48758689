//! Expense repository.
//!
//! Expense creation accepts a category NAME and silently creates the
//! category if the owner does not have it yet. Category lookup-or-create and
//! the expense insert share one transaction so a failure leaves no stray
//! category behind.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use tally_shared::types::{PageQuery, SortKey};

use crate::entities::{categories, expenses};
use crate::repositories::CategoryRepository;

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found (or not owned by the caller).
    #[error("Expense not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// What the money was spent on.
    pub item: String,
    /// Positive amount spent.
    pub cost: Decimal,
    /// Category name; created for the owner on first use.
    pub category: Option<String>,
    /// When the expense happened; defaults to now.
    pub date: Option<chrono::DateTime<Utc>>,
}

/// Input for a partial expense update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    /// New item description.
    pub item: Option<String>,
    /// New cost.
    pub cost: Option<Decimal>,
    /// New category name; created for the owner on first use.
    pub category: Option<String>,
    /// New date.
    pub date: Option<chrono::DateTime<Utc>>,
}

/// An expense joined with its category row, if any.
#[derive(Debug, Clone)]
pub struct ExpenseWithCategory {
    /// The expense row.
    pub expense: expenses::Model,
    /// The joined category, `None` for uncategorized expenses.
    pub category: Option<categories::Model>,
}

/// Expense repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an expense, auto-creating the named category when needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails.
    pub async fn create(
        &self,
        owner_id: Uuid,
        input: CreateExpenseInput,
    ) -> Result<ExpenseWithCategory, ExpenseError> {
        let txn = self.db.begin().await?;

        let category = match input.category.as_deref() {
            Some(name) => Some(CategoryRepository::find_or_create(&txn, owner_id, name).await?),
            None => None,
        };

        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            item: Set(input.item),
            cost: Set(input.cost),
            date: Set(input.date.unwrap_or_else(Utc::now).into()),
            owner_id: Set(owner_id),
            category_id: Set(category.as_ref().map(|c| c.id)),
            created_at: Set(Utc::now().into()),
        };

        let expense = expense.insert(&txn).await?;
        txn.commit().await?;

        Ok(ExpenseWithCategory { expense, category })
    }

    /// Finds an expense by id, scoped to its owner, with the joined category.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` if no row matches id and owner
    /// jointly.
    pub async fn get(
        &self,
        owner_id: Uuid,
        expense_id: Uuid,
    ) -> Result<ExpenseWithCategory, ExpenseError> {
        let (expense, category) = expenses::Entity::find_by_id(expense_id)
            .filter(expenses::Column::OwnerId.eq(owner_id))
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::NotFound(expense_id))?;

        Ok(ExpenseWithCategory { expense, category })
    }

    /// Lists one page of an owner's expenses with joined categories.
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
    ) -> Result<(Vec<ExpenseWithCategory>, u64), ExpenseError> {
        let base = expenses::Entity::find().filter(expenses::Column::OwnerId.eq(owner_id));

        let total_items = base.clone().count(&self.db).await?;

        let query = match page.sort_key() {
            SortKey::DateDesc => base.order_by_desc(expenses::Column::Date),
            SortKey::DateAsc => base.order_by_asc(expenses::Column::Date),
            SortKey::CostDesc => base.order_by_desc(expenses::Column::Cost),
            SortKey::CostAsc => base.order_by_asc(expenses::Column::Cost),
        };

        // Tiebreak on id so equal sort keys page stably.
        let rows = query
            .order_by_asc(expenses::Column::Id)
            .find_also_related(categories::Entity)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let rows = rows
            .into_iter()
            .map(|(expense, category)| ExpenseWithCategory { expense, category })
            .collect();

        Ok((rows, total_items))
    }

    /// Applies a partial expense update.
    ///
    /// A new category name is looked up or created within the same
    /// transaction as the update itself.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` on an ownership miss.
    pub async fn update(
        &self,
        owner_id: Uuid,
        expense_id: Uuid,
        input: UpdateExpenseInput,
    ) -> Result<ExpenseWithCategory, ExpenseError> {
        let txn = self.db.begin().await?;

        let expense = expenses::Entity::find_by_id(expense_id)
            .filter(expenses::Column::OwnerId.eq(owner_id))
            .one(&txn)
            .await?
            .ok_or(ExpenseError::NotFound(expense_id))?;

        let new_category = match input.category.as_deref() {
            Some(name) => Some(CategoryRepository::find_or_create(&txn, owner_id, name).await?),
            None => None,
        };

        let mut active: expenses::ActiveModel = expense.into();

        if let Some(item) = input.item {
            active.item = Set(item);
        }
        if let Some(cost) = input.cost {
            active.cost = Set(cost);
        }
        if let Some(date) = input.date {
            active.date = Set(date.into());
        }
        if let Some(ref category) = new_category {
            active.category_id = Set(Some(category.id));
        }

        let expense = active.update(&txn).await?;

        let category = match new_category {
            Some(category) => Some(category),
            None => match expense.category_id {
                Some(id) => categories::Entity::find_by_id(id).one(&txn).await?,
                None => None,
            },
        };

        txn.commit().await?;

        Ok(ExpenseWithCategory { expense, category })
    }

    /// Deletes an expense, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` on an ownership miss.
    pub async fn delete(&self, owner_id: Uuid, expense_id: Uuid) -> Result<(), ExpenseError> {
        let result = expenses::Entity::delete_by_id(expense_id)
            .filter(expenses::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ExpenseError::NotFound(expense_id));
        }

        Ok(())
    }
}
