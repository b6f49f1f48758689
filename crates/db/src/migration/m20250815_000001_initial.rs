//! Initial database migration.
//!
//! Creates the budget period enum and the people, categories, expenses,
//! incomes, and budgets tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(PEOPLE_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(INCOMES_SQL).await?;
        db.execute_unprepared(BUDGETS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE budget_period AS ENUM (
    'daily',
    'weekly',
    'monthly',
    'custom'
);
";

const PEOPLE_SQL: &str = r"
CREATE TABLE people (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    firstname TEXT NOT NULL,
    lastname TEXT NOT NULL,
    gender TEXT NOT NULL,
    age INTEGER NOT NULL,
    profile_emoji TEXT,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    owner_id UUID NOT NULL REFERENCES people(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uix_owner_category UNIQUE (owner_id, name)
);

CREATE INDEX idx_categories_owner ON categories(owner_id);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY,
    item TEXT NOT NULL,
    cost NUMERIC(19,4) NOT NULL,
    date TIMESTAMPTZ NOT NULL DEFAULT now(),
    owner_id UUID NOT NULL REFERENCES people(id),
    category_id UUID REFERENCES categories(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_expenses_owner_date ON expenses(owner_id, date);
CREATE INDEX idx_expenses_category ON expenses(category_id);
";

const INCOMES_SQL: &str = r"
CREATE TABLE incomes (
    id UUID PRIMARY KEY,
    amount NUMERIC(19,4) NOT NULL,
    source TEXT NOT NULL,
    date TIMESTAMPTZ NOT NULL DEFAULT now(),
    owner_id UUID NOT NULL REFERENCES people(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_incomes_owner_date ON incomes(owner_id, date);
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id UUID PRIMARY KEY,
    category TEXT NOT NULL,
    limit_amount NUMERIC(19,4) NOT NULL,
    period budget_period NOT NULL DEFAULT 'monthly',
    start_date TIMESTAMPTZ,
    end_date TIMESTAMPTZ,
    owner_id UUID NOT NULL REFERENCES people(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_budgets_owner ON budgets(owner_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS budgets;
DROP TABLE IF EXISTS incomes;
DROP TABLE IF EXISTS expenses;
DROP TABLE IF EXISTS categories;
DROP TABLE IF EXISTS people;
DROP TYPE IF EXISTS budget_period;
";
