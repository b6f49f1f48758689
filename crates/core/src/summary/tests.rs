//! Tests for summary aggregation.

use chrono::{Duration, NaiveDate, Utc};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

#[test]
fn test_monthly_grouping_with_uncategorized() {
    let rows = vec![
        (Some("Food".to_string()), dec!(10)),
        (Some("Food".to_string()), dec!(5)),
        (None, dec!(7)),
    ];

    let summary = group_expenses_by_category(3, 2024, &rows);

    assert_eq!(summary.month, 3);
    assert_eq!(summary.year, 2024);
    assert_eq!(summary.total_expense, dec!(22));
    assert_eq!(summary.by_category.len(), 2);

    let food = summary
        .by_category
        .iter()
        .find(|c| c.category == "Food")
        .unwrap();
    assert_eq!(food.total, dec!(15));

    let uncategorized = summary
        .by_category
        .iter()
        .find(|c| c.category == UNCATEGORIZED)
        .unwrap();
    assert_eq!(uncategorized.total, dec!(7));
}

#[test]
fn test_monthly_grouping_is_lexicographic() {
    let rows = vec![
        (Some("Transport".to_string()), dec!(1)),
        (Some("Food".to_string()), dec!(2)),
        (None, dec!(3)),
        (Some("Bills".to_string()), dec!(4)),
    ];

    let summary = group_expenses_by_category(1, 2025, &rows);
    let names: Vec<&str> = summary
        .by_category
        .iter()
        .map(|c| c.category.as_str())
        .collect();

    assert_eq!(names, vec!["Bills", "Food", "Transport", UNCATEGORIZED]);
}

#[test]
fn test_monthly_grouping_empty() {
    let summary = group_expenses_by_category(6, 2024, &[]);

    assert_eq!(summary.total_expense, Decimal::ZERO);
    assert!(summary.by_category.is_empty());
}

#[test]
fn test_trailing_summary_net() {
    let summary = trailing_summary(30, dec!(1000), dec!(350.50));

    assert_eq!(summary.days, 30);
    assert_eq!(summary.net, dec!(649.50));
}

#[test]
fn test_trailing_summary_zero_rows() {
    let summary = trailing_summary(7, Decimal::ZERO, Decimal::ZERO);

    assert_eq!(summary.total_income, Decimal::ZERO);
    assert_eq!(summary.total_expenses, Decimal::ZERO);
    assert_eq!(summary.net, Decimal::ZERO);
}

#[test]
fn test_trailing_window_bounds() {
    let now = Utc::now();
    let (start, end) = trailing_window(now, 30).unwrap();

    assert_eq!(end, now);
    assert_eq!(end - start, Duration::days(30));
}

#[test]
fn test_trailing_window_huge_days_is_none() {
    // A window start before the representable datetime range must not panic.
    assert!(trailing_window(Utc::now(), u32::MAX).is_none());
}

#[rstest]
#[case(2024, 3, 2024, 4, 1)]
#[case(2024, 12, 2025, 1, 1)]
#[case(2024, 2, 2024, 3, 1)]
fn test_month_bounds(
    #[case] year: i32,
    #[case] month: u32,
    #[case] end_year: i32,
    #[case] end_month: u32,
    #[case] end_day: u32,
) {
    let (start, end) = month_bounds(year, month).unwrap();

    assert_eq!(start, NaiveDate::from_ymd_opt(year, month, 1).unwrap());
    assert_eq!(
        end,
        NaiveDate::from_ymd_opt(end_year, end_month, end_day).unwrap()
    );
}

#[rstest]
#[case(0)]
#[case(13)]
fn test_month_bounds_invalid_month(#[case] month: u32) {
    assert!(month_bounds(2024, month).is_none());
}
