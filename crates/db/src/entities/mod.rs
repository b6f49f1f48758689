//! `SeaORM` entity definitions.

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod incomes;
pub mod people;
pub mod sea_orm_active_enums;
