//! Person repository for account operations.
//!
//! Covers registration, credential lookup, partial profile updates, and the
//! transactional account-deletion cascade.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{budgets, categories, expenses, incomes, people};

/// Error types for person operations.
#[derive(Debug, thiserror::Error)]
pub enum PersonError {
    /// Person not found.
    #[error("Person not found: {0}")]
    NotFound(Uuid),

    /// Username is already registered.
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a person.
#[derive(Debug, Clone)]
pub struct CreatePersonInput {
    /// Unique username.
    pub username: String,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Gender.
    pub gender: String,
    /// Age.
    pub age: i32,
    /// Optional profile emoji.
    pub profile_emoji: Option<String>,
    /// Argon2id password hash (hashing happens in `tally-core`).
    pub password_hash: String,
}

/// Input for a partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdatePersonInput {
    /// New username.
    pub username: Option<String>,
    /// New first name.
    pub firstname: Option<String>,
    /// New last name.
    pub lastname: Option<String>,
    /// New gender.
    pub gender: Option<String>,
    /// New age.
    pub age: Option<i32>,
    /// New profile emoji.
    pub profile_emoji: Option<String>,
    /// New password hash (already hashed by the caller).
    pub password_hash: Option<String>,
}

/// Person repository.
#[derive(Debug, Clone)]
pub struct PersonRepository {
    db: DatabaseConnection,
}

impl PersonRepository {
    /// Creates a new person repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a person by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<people::Model>, DbErr> {
        people::Entity::find()
            .filter(people::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds a person by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<people::Model>, DbErr> {
        people::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = people::Entity::find()
            .filter(people::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new person.
    ///
    /// Uniqueness is enforced by the database constraint, so two concurrent
    /// registrations of the same username both resolve deterministically: one
    /// wins, the other gets `UsernameTaken`.
    ///
    /// # Errors
    ///
    /// Returns `PersonError::UsernameTaken` if the username is already
    /// registered.
    pub async fn create(&self, input: CreatePersonInput) -> Result<people::Model, PersonError> {
        let username = input.username.clone();

        let person = people::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username),
            firstname: Set(input.firstname),
            lastname: Set(input.lastname),
            gender: Set(input.gender),
            age: Set(input.age),
            profile_emoji: Set(input.profile_emoji),
            password_hash: Set(input.password_hash),
            created_at: Set(Utc::now().into()),
        };

        person.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                PersonError::UsernameTaken(username)
            } else {
                PersonError::Database(e)
            }
        })
    }

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns `PersonError::NotFound` if the person does not exist and
    /// `PersonError::UsernameTaken` when renaming to a username another
    /// person holds.
    pub async fn update_profile(
        &self,
        person_id: Uuid,
        input: UpdatePersonInput,
    ) -> Result<people::Model, PersonError> {
        let person = self
            .find_by_id(person_id)
            .await?
            .ok_or(PersonError::NotFound(person_id))?;

        if let Some(ref username) = input.username {
            let taken = people::Entity::find()
                .filter(people::Column::Username.eq(username))
                .filter(people::Column::Id.ne(person_id))
                .count(&self.db)
                .await?
                > 0;
            if taken {
                return Err(PersonError::UsernameTaken(username.clone()));
            }
        }

        let requested_username = input.username.clone();
        let mut active: people::ActiveModel = person.into();

        if let Some(username) = input.username {
            active.username = Set(username);
        }
        if let Some(firstname) = input.firstname {
            active.firstname = Set(firstname);
        }
        if let Some(lastname) = input.lastname {
            active.lastname = Set(lastname);
        }
        if let Some(gender) = input.gender {
            active.gender = Set(gender);
        }
        if let Some(age) = input.age {
            active.age = Set(age);
        }
        if let Some(profile_emoji) = input.profile_emoji {
            active.profile_emoji = Set(Some(profile_emoji));
        }
        if let Some(password_hash) = input.password_hash {
            active.password_hash = Set(password_hash);
        }

        // The pre-check above can lose a race; the constraint cannot.
        active.update(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                PersonError::UsernameTaken(requested_username.unwrap_or_default())
            } else {
                PersonError::Database(e)
            }
        })
    }

    /// Deletes a person together with all owned data.
    ///
    /// Runs as a single transaction deleting expenses, categories, incomes,
    /// and budgets (children before parent), then the person row. On any
    /// failure nothing is deleted.
    ///
    /// # Errors
    ///
    /// Returns `PersonError::NotFound` if the person does not exist.
    pub async fn delete_account(&self, person_id: Uuid) -> Result<(), PersonError> {
        let txn = self.db.begin().await?;

        let person = people::Entity::find_by_id(person_id)
            .one(&txn)
            .await?
            .ok_or(PersonError::NotFound(person_id))?;

        expenses::Entity::delete_many()
            .filter(expenses::Column::OwnerId.eq(person_id))
            .exec(&txn)
            .await?;
        categories::Entity::delete_many()
            .filter(categories::Column::OwnerId.eq(person_id))
            .exec(&txn)
            .await?;
        incomes::Entity::delete_many()
            .filter(incomes::Column::OwnerId.eq(person_id))
            .exec(&txn)
            .await?;
        budgets::Entity::delete_many()
            .filter(budgets::Column::OwnerId.eq(person_id))
            .exec(&txn)
            .await?;

        people::Entity::delete_by_id(person.id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}
