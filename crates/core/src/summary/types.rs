//! Summary report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category label used for expenses without a linked category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Income/expense totals over a trailing window ending now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailingSummary {
    /// Window length in days.
    pub days: u32,
    /// Sum of income amounts in the window.
    pub total_income: Decimal,
    /// Sum of expense costs in the window.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub net: Decimal,
}

/// Total spent in one category during a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name, or [`UNCATEGORIZED`].
    pub category: String,
    /// Sum of expense costs in this category.
    pub total: Decimal,
}

/// Per-category expense breakdown for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Sum across all categories.
    pub total_expense: Decimal,
    /// Per-category totals, sorted by category name.
    pub by_category: Vec<CategoryTotal>,
}
