//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget period.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "budget_period")]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Daily budget.
    #[sea_orm(string_value = "daily")]
    Daily,
    /// Weekly budget.
    #[sea_orm(string_value = "weekly")]
    Weekly,
    /// Monthly budget (the default).
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Custom period bounded by start/end dates.
    #[sea_orm(string_value = "custom")]
    Custom,
}
