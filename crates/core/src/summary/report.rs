//! Summary aggregation functions.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::types::{CategoryTotal, MonthlySummary, TrailingSummary, UNCATEGORIZED};

/// Returns the inclusive `[now - days, now]` window for a trailing summary.
///
/// `None` when `days` would push the window start outside the representable
/// datetime range.
#[must_use]
pub fn trailing_window(now: DateTime<Utc>, days: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = now.checked_sub_signed(Duration::days(i64::from(days)))?;
    Some((start, now))
}

/// Builds a trailing summary from already-aggregated totals.
///
/// Zero-row aggregates arrive here as `Decimal::ZERO`, so an account with no
/// activity yields an all-zero summary rather than an error.
#[must_use]
pub fn trailing_summary(days: u32, total_income: Decimal, total_expenses: Decimal) -> TrailingSummary {
    TrailingSummary {
        days,
        total_income,
        total_expenses,
        net: total_income - total_expenses,
    }
}

/// Returns the `[start, end)` date bounds of a calendar month.
///
/// `None` when the month is outside 1-12.
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

/// Groups a month's expense rows by category name.
///
/// Each row is the expense's cost paired with its category name, `None` for
/// uncategorized expenses. The result is sorted lexicographically by category
/// name so the ordering is deterministic.
#[must_use]
pub fn group_expenses_by_category(
    month: u32,
    year: i32,
    rows: &[(Option<String>, Decimal)],
) -> MonthlySummary {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for (category, cost) in rows {
        let label = category.clone().unwrap_or_else(|| UNCATEGORIZED.to_string());
        *totals.entry(label).or_insert(Decimal::ZERO) += *cost;
    }

    let total_expense = totals.values().copied().sum();
    let by_category = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();

    MonthlySummary {
        month,
        year,
        total_expense,
        by_category,
    }
}
