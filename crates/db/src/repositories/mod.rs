//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding the
//! `SeaORM` implementation details from the rest of the application. Every
//! read, update, and delete filters by the entity id AND the owning person
//! jointly; a row belonging to another user is indistinguishable from a
//! missing row.

pub mod budget;
pub mod category;
pub mod expense;
pub mod income;
pub mod person;
pub mod summary;

pub use budget::{BudgetError, BudgetRepository, CreateBudgetInput, UpdateBudgetInput};
pub use category::{CategoryError, CategoryRepository};
pub use expense::{
    CreateExpenseInput, ExpenseError, ExpenseRepository, ExpenseWithCategory, UpdateExpenseInput,
};
pub use income::{CreateIncomeInput, IncomeError, IncomeRepository, UpdateIncomeInput};
pub use person::{CreatePersonInput, PersonError, PersonRepository, UpdatePersonInput};
pub use summary::{SummaryError, SummaryRepository};
