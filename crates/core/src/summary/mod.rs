//! Financial summary computations.
//!
//! Pure aggregation logic over rows the database layer has already fetched:
//! trailing-window income/expense totals and per-category monthly grouping.

mod report;
mod types;

pub use report::{group_expenses_by_category, month_bounds, trailing_summary, trailing_window};
pub use types::{CategoryTotal, MonthlySummary, TrailingSummary, UNCATEGORIZED};

#[cfg(test)]
mod tests;
