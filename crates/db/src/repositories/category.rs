//! Category repository.
//!
//! Category names are unique per owner. `find_or_create` backs the expense
//! flow's silent auto-creation and must run inside the caller's transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use tally_shared::types::PageQuery;

use crate::entities::categories;

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found (or not owned by the caller).
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// A category with this name already exists for this owner.
    #[error("Category name already exists: {0}")]
    DuplicateName(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category for an owner.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::DuplicateName` if the owner already has a
    /// category with this name.
    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> Result<categories::Model, CategoryError> {
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            owner_id: Set(owner_id),
            created_at: Set(Utc::now().into()),
        };

        category.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                CategoryError::DuplicateName(name.to_string())
            } else {
                CategoryError::Database(e)
            }
        })
    }

    /// Finds a category by id, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if no row matches id and owner
    /// jointly.
    pub async fn get(
        &self,
        owner_id: Uuid,
        category_id: Uuid,
    ) -> Result<categories::Model, CategoryError> {
        categories::Entity::find_by_id(category_id)
            .filter(categories::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(category_id))
    }

    /// Lists one page of an owner's categories, sorted by name.
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
    ) -> Result<(Vec<categories::Model>, u64), CategoryError> {
        let query = categories::Entity::find().filter(categories::Column::OwnerId.eq(owner_id));

        let total_items = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total_items))
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` on an ownership miss and
    /// `CategoryError::DuplicateName` when the new name collides.
    pub async fn rename(
        &self,
        owner_id: Uuid,
        category_id: Uuid,
        name: &str,
    ) -> Result<categories::Model, CategoryError> {
        let category = self.get(owner_id, category_id).await?;

        let mut active: categories::ActiveModel = category.into();
        active.name = Set(name.to_string());

        active.update(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                CategoryError::DuplicateName(name.to_string())
            } else {
                CategoryError::Database(e)
            }
        })
    }

    /// Deletes a category. Expenses referencing it become uncategorized.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` on an ownership miss.
    pub async fn delete(&self, owner_id: Uuid, category_id: Uuid) -> Result<(), CategoryError> {
        use crate::entities::expenses;
        use sea_orm::sea_query::Expr;
        use sea_orm::TransactionTrait;

        let txn = self.db.begin().await?;

        let category = categories::Entity::find_by_id(category_id)
            .filter(categories::Column::OwnerId.eq(owner_id))
            .one(&txn)
            .await?
            .ok_or(CategoryError::NotFound(category_id))?;

        // Unlink before delete to satisfy the FK.
        expenses::Entity::update_many()
            .col_expr(expenses::Column::CategoryId, Expr::value(Option::<Uuid>::None))
            .filter(expenses::Column::CategoryId.eq(category.id))
            .filter(expenses::Column::OwnerId.eq(owner_id))
            .exec(&txn)
            .await?;

        categories::Entity::delete_by_id(category.id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Finds or creates a category by name inside an open transaction.
    ///
    /// On a unique-constraint race (another request created the same name
    /// concurrently), re-selects the winning row instead of failing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn find_or_create(
        txn: &DatabaseTransaction,
        owner_id: Uuid,
        name: &str,
    ) -> Result<categories::Model, DbErr> {
        let existing = categories::Entity::find()
            .filter(categories::Column::OwnerId.eq(owner_id))
            .filter(categories::Column::Name.eq(name))
            .one(txn)
            .await?;

        if let Some(category) = existing {
            return Ok(category);
        }

        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            owner_id: Set(owner_id),
            created_at: Set(Utc::now().into()),
        };

        match category.insert(txn).await {
            Ok(model) => Ok(model),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                categories::Entity::find()
                    .filter(categories::Column::OwnerId.eq(owner_id))
                    .filter(categories::Column::Name.eq(name))
                    .one(txn)
                    .await?
                    .ok_or(e)
            }
            Err(e) => Err(e),
        }
    }
}
