//! Integration tests for the ownership-scoped repositories.
//!
//! These run against a real Postgres instance. Set `TEST_DATABASE_URL` to a
//! database that has the migrations applied; when the variable is unset every
//! test returns early so the suite passes without a database.

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use tally_db::entities::expenses;
use tally_db::repositories::{
    CategoryError, CreateExpenseInput, CreatePersonInput, ExpenseError, PersonError,
};
use tally_db::{CategoryRepository, ExpenseRepository, PersonRepository};
use tally_shared::types::PageQuery;

/// Connects to the test database, or `None` when `TEST_DATABASE_URL` is unset.
async fn test_db() -> Option<DatabaseConnection> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let db = tally_db::connect(&url)
        .await
        .expect("Failed to connect to test database");
    Some(db)
}

/// Creates a fresh person with a unique username.
async fn create_person(db: &DatabaseConnection) -> Uuid {
    create_person_named(db, &format!("test-{}", Uuid::new_v4()))
        .await
        .expect("Failed to create person")
}

async fn create_person_named(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Uuid, PersonError> {
    let repo = PersonRepository::new(db.clone());
    let person = repo
        .create(CreatePersonInput {
            username: username.to_string(),
            firstname: "Test".to_string(),
            lastname: "Person".to_string(),
            gender: "other".to_string(),
            age: 30,
            profile_emoji: None,
            password_hash: "$argon2id$test_hash".to_string(),
        })
        .await?;
    Ok(person.id)
}

fn page(page: u64, limit: u64, sort: Option<&str>) -> PageQuery {
    PageQuery {
        page,
        limit,
        sort: sort.map(ToString::to_string),
    }
}

#[tokio::test]
async fn test_cross_owner_reads_look_like_missing_rows() {
    let Some(db) = test_db().await else { return };
    let alice = create_person(&db).await;
    let bob = create_person(&db).await;

    let expenses = ExpenseRepository::new(db.clone());
    let created = expenses
        .create(
            alice,
            CreateExpenseInput {
                item: "Coffee".to_string(),
                cost: dec!(4.50),
                category: None,
                date: None,
            },
        )
        .await
        .expect("Failed to create expense");

    // Owner sees it.
    let found = expenses.get(alice, created.expense.id).await.unwrap();
    assert_eq!(found.expense.item, "Coffee");

    // Another owner gets NotFound, not a permission error.
    assert!(matches!(
        expenses.get(bob, created.expense.id).await,
        Err(ExpenseError::NotFound(_))
    ));
    assert!(matches!(
        expenses.delete(bob, created.expense.id).await,
        Err(ExpenseError::NotFound(_))
    ));

    // The failed cross-owner delete removed nothing.
    assert!(expenses.get(alice, created.expense.id).await.is_ok());
}

#[tokio::test]
async fn test_expense_category_auto_create_and_reuse() {
    let Some(db) = test_db().await else { return };
    let owner = create_person(&db).await;

    let expenses = ExpenseRepository::new(db.clone());

    let first = expenses
        .create(
            owner,
            CreateExpenseInput {
                item: "Groceries".to_string(),
                cost: dec!(30.00),
                category: Some("Food".to_string()),
                date: None,
            },
        )
        .await
        .unwrap();

    let second = expenses
        .create(
            owner,
            CreateExpenseInput {
                item: "Lunch".to_string(),
                cost: dec!(12.00),
                category: Some("Food".to_string()),
                date: None,
            },
        )
        .await
        .unwrap();

    // Same name resolves to the same category row, no duplicate created.
    let first_cat = first.category.expect("category should be set");
    let second_cat = second.category.expect("category should be set");
    assert_eq!(first_cat.id, second_cat.id);

    let categories = CategoryRepository::new(db.clone());
    let (rows, total) = categories
        .list_page(owner, &page(1, 50, None))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].name, "Food");
}

#[tokio::test]
async fn test_explicit_duplicate_category_is_a_conflict() {
    let Some(db) = test_db().await else { return };
    let owner = create_person(&db).await;

    let categories = CategoryRepository::new(db.clone());
    categories.create(owner, "Travel").await.unwrap();

    assert!(matches!(
        categories.create(owner, "Travel").await,
        Err(CategoryError::DuplicateName(_))
    ));

    // A different owner can use the same name.
    let other = create_person(&db).await;
    assert!(categories.create(other, "Travel").await.is_ok());
}

#[tokio::test]
async fn test_expense_pagination_and_sorting() {
    let Some(db) = test_db().await else { return };
    let owner = create_person(&db).await;

    let expenses = ExpenseRepository::new(db.clone());
    for (item, cost) in [
        ("a", dec!(10.00)),
        ("b", dec!(30.00)),
        ("c", dec!(20.00)),
        ("d", dec!(50.00)),
        ("e", dec!(40.00)),
    ] {
        expenses
            .create(
                owner,
                CreateExpenseInput {
                    item: item.to_string(),
                    cost,
                    category: None,
                    date: None,
                },
            )
            .await
            .unwrap();
    }

    // Most expensive first, two per page.
    let (rows, total) = expenses
        .list_page(owner, &page(1, 2, Some("cost_desc")))
        .await
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].expense.cost, dec!(50.00));
    assert_eq!(rows[1].expense.cost, dec!(40.00));

    let (rows, _) = expenses
        .list_page(owner, &page(3, 2, Some("cost_desc")))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].expense.cost, dec!(10.00));

    // A page past the end is empty, not an error.
    let (rows, total) = expenses
        .list_page(owner, &page(4, 2, Some("cost_desc")))
        .await
        .unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 5);

    // Unknown sort keys fall back to newest-first without failing.
    let (rows, _) = expenses
        .list_page(owner, &page(1, 5, Some("garbage")))
        .await
        .unwrap();
    assert_eq!(rows.len(), 5);
}

#[tokio::test]
async fn test_duplicate_username_is_username_taken_not_a_database_error() {
    let Some(db) = test_db().await else { return };
    let username = format!("test-{}", Uuid::new_v4());

    create_person_named(&db, &username).await.unwrap();

    let people = PersonRepository::new(db.clone());
    assert!(people.username_exists(&username).await.unwrap());

    // The second insert hits the unique constraint directly; it must surface
    // as UsernameTaken even without a pre-check catching it first.
    assert!(matches!(
        create_person_named(&db, &username).await,
        Err(PersonError::UsernameTaken(_))
    ));
}

#[tokio::test]
async fn test_equal_sort_keys_page_without_duplicates_or_gaps() {
    let Some(db) = test_db().await else { return };
    let owner = create_person(&db).await;

    let expenses_repo = ExpenseRepository::new(db.clone());
    let mut all_ids = Vec::new();
    for item in ["a", "b", "c", "d", "e"] {
        let created = expenses_repo
            .create(
                owner,
                CreateExpenseInput {
                    item: item.to_string(),
                    cost: dec!(10.00),
                    category: None,
                    date: None,
                },
            )
            .await
            .unwrap();
        all_ids.push(created.expense.id);
    }

    // Every row has the same cost; paging must still cover each row exactly
    // once.
    let mut seen = Vec::new();
    for page_no in 1..=3 {
        let (rows, total) = expenses_repo
            .list_page(owner, &page(page_no, 2, Some("cost_desc")))
            .await
            .unwrap();
        assert_eq!(total, 5);
        seen.extend(rows.into_iter().map(|r| r.expense.id));
    }

    assert_eq!(seen.len(), 5);
    all_ids.sort();
    seen.sort();
    assert_eq!(seen, all_ids);
}

#[tokio::test]
async fn test_account_deletion_cascades_to_owned_rows() {
    let Some(db) = test_db().await else { return };
    let owner = create_person(&db).await;

    let expenses = ExpenseRepository::new(db.clone());
    expenses
        .create(
            owner,
            CreateExpenseInput {
                item: "Books".to_string(),
                cost: dec!(25.00),
                category: Some("Education".to_string()),
                date: None,
            },
        )
        .await
        .unwrap();

    let people = PersonRepository::new(db.clone());
    people.delete_account(owner).await.unwrap();

    assert!(people.find_by_id(owner).await.unwrap().is_none());

    let (rows, total) = expenses.list_page(owner, &page(1, 10, None)).await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 0);

    let categories = CategoryRepository::new(db.clone());
    let (rows, _) = categories.list_page(owner, &page(1, 10, None)).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_account_cascade_rolls_back_as_a_unit() {
    let Some(db) = test_db().await else { return };
    let alice = create_person(&db).await;
    let bob = create_person(&db).await;

    let expenses_repo = ExpenseRepository::new(db.clone());
    let created = expenses_repo
        .create(
            alice,
            CreateExpenseInput {
                item: "Groceries".to_string(),
                cost: dec!(20.00),
                category: Some("Food".to_string()),
                date: None,
            },
        )
        .await
        .unwrap();
    let food = created.category.expect("category should be set");

    // A foreign row the cascade cannot delete: another owner's expense
    // pinned to alice's category. Deleting alice's categories now violates
    // the FK mid-transaction.
    let pinned = expenses::ActiveModel {
        id: Set(Uuid::new_v4()),
        item: Set("Pinned".to_string()),
        cost: Set(dec!(1.00)),
        date: Set(Utc::now().into()),
        owner_id: Set(bob),
        category_id: Set(Some(food.id)),
        created_at: Set(Utc::now().into()),
    };
    pinned.insert(&db).await.unwrap();

    let people = PersonRepository::new(db.clone());
    assert!(matches!(
        people.delete_account(alice).await,
        Err(PersonError::Database(_))
    ));

    // All-or-nothing: the failed cascade deleted nothing, not even the
    // children removed before the failing step.
    assert!(people.find_by_id(alice).await.unwrap().is_some());

    let (rows, total) = expenses_repo
        .list_page(alice, &page(1, 10, None))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].expense.item, "Groceries");

    let categories = CategoryRepository::new(db.clone());
    let (rows, _) = categories.list_page(alice, &page(1, 10, None)).await.unwrap();
    assert_eq!(rows.len(), 1);
}
