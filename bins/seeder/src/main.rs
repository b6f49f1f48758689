//! Database seeder for Tally development and testing.
//!
//! Seeds a demo person with a few categories, expenses, incomes, and budgets
//! for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use tally_db::entities::{
    budgets, categories, expenses, incomes, people, sea_orm_active_enums::BudgetPeriod,
};

/// Demo person ID (consistent for all seeds)
const DEMO_PERSON_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Demo account password, for local use only.
const DEMO_PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = tally_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo person...");
    seed_demo_person(&db).await;

    println!("Seeding categories and expenses...");
    seed_expenses(&db).await;

    println!("Seeding incomes...");
    seed_incomes(&db).await;

    println!("Seeding budgets...");
    seed_budgets(&db).await;

    println!("Seeding complete!");
}

fn demo_person_id() -> Uuid {
    Uuid::parse_str(DEMO_PERSON_ID).unwrap()
}

/// Seeds the demo person.
async fn seed_demo_person(db: &DatabaseConnection) {
    if people::Entity::find_by_id(demo_person_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo person already exists, skipping...");
        return;
    }

    let password_hash =
        tally_core::auth::hash_password(DEMO_PASSWORD).expect("Failed to hash demo password");

    let person = people::ActiveModel {
        id: Set(demo_person_id()),
        username: Set("demo".to_string()),
        firstname: Set("Demo".to_string()),
        lastname: Set("Person".to_string()),
        gender: Set("other".to_string()),
        age: Set(30),
        profile_emoji: Set(Some("🦀".to_string())),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now().into()),
    };

    if let Err(e) = person.insert(db).await {
        eprintln!("Failed to insert demo person: {e}");
    } else {
        println!("  Created demo person: demo / {DEMO_PASSWORD}");
    }
}

/// Seeds categories with a month of expenses spread across them.
async fn seed_expenses(db: &DatabaseConnection) {
    let owner_id = demo_person_id();

    let category_names = ["Food", "Transport", "Entertainment", "Utilities"];
    let mut category_ids = Vec::new();

    for name in category_names {
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            owner_id: Set(owner_id),
            created_at: Set(Utc::now().into()),
        };

        match category.insert(db).await {
            Ok(model) => category_ids.push(model.id),
            Err(e) => {
                if !e.to_string().contains("duplicate key") {
                    eprintln!("Failed to insert category {name}: {e}");
                }
            }
        }
    }

    let samples: [(&str, Decimal, usize, i64); 8] = [
        ("Groceries", dec!(54.20), 0, 1),
        ("Lunch", dec!(12.50), 0, 2),
        ("Bus pass", dec!(40.00), 1, 3),
        ("Fuel", dec!(38.75), 1, 7),
        ("Cinema", dec!(15.00), 2, 10),
        ("Streaming", dec!(9.99), 2, 14),
        ("Electricity", dec!(82.30), 3, 20),
        ("Water", dec!(24.10), 3, 25),
    ];

    let now = Utc::now();
    let mut inserted = 0;

    for (item, cost, category_idx, days_ago) in samples {
        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            item: Set(item.to_string()),
            cost: Set(cost),
            date: Set((now - Duration::days(days_ago)).into()),
            owner_id: Set(owner_id),
            category_id: Set(category_ids.get(category_idx).copied()),
            created_at: Set(now.into()),
        };

        if let Err(e) = expense.insert(db).await {
            eprintln!("Failed to insert expense {item}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} expenses");
}

/// Seeds a couple of incomes.
async fn seed_incomes(db: &DatabaseConnection) {
    let owner_id = demo_person_id();
    let now = Utc::now();

    let samples: [(&str, Decimal, i64); 2] = [
        ("Salary", dec!(3200.00), 5),
        ("Freelance", dec!(450.00), 12),
    ];

    let mut inserted = 0;
    for (source, amount, days_ago) in samples {
        let income = incomes::ActiveModel {
            id: Set(Uuid::new_v4()),
            amount: Set(amount),
            source: Set(source.to_string()),
            date: Set((now - Duration::days(days_ago)).into()),
            owner_id: Set(owner_id),
            created_at: Set(now.into()),
        };

        if let Err(e) = income.insert(db).await {
            eprintln!("Failed to insert income {source}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} incomes");
}

/// Seeds monthly budgets for the main categories.
async fn seed_budgets(db: &DatabaseConnection) {
    let owner_id = demo_person_id();

    let samples: [(&str, Decimal); 3] = [
        ("Food", dec!(400.00)),
        ("Transport", dec!(150.00)),
        ("Entertainment", dec!(100.00)),
    ];

    let mut inserted = 0;
    for (category, limit_amount) in samples {
        let budget = budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            category: Set(category.to_string()),
            limit_amount: Set(limit_amount),
            period: Set(BudgetPeriod::Monthly),
            start_date: Set(None),
            end_date: Set(None),
            owner_id: Set(owner_id),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = budget.insert(db).await {
            eprintln!("Failed to insert budget {category}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} budgets");
}
