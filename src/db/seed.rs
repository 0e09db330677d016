use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait};

use crate::entities::flight;
use crate::error::{AppError, AppResult};

/// (from, to, (year, month, day), price)
const SEED_FLIGHTS: [(&str, &str, (i32, u32, u32), f64); 4] = [
    ("Mumbai", "Delhi", (2024, 10, 20), 5000.0),
    ("Mumbai", "Bangalore", (2024, 10, 22), 4500.0),
    ("Chennai", "Kolkata", (2024, 11, 1), 5500.0),
    ("Delhi", "Hyderabad", (2024, 10, 25), 4800.0),
];

fn seed_models() -> AppResult<Vec<flight::ActiveModel>> {
    SEED_FLIGHTS
        .iter()
        .map(|&(from, to, (year, month, day), price)| {
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                AppError::Internal(format!("Invalid seed date {}-{}-{}", year, month, day))
            })?;

            Ok(flight::ActiveModel {
                from_city: Set(from.to_string()),
                to_city: Set(to.to_string()),
                date: Set(date),
                price: Set(price),
                ..Default::default()
            })
        })
        .collect()
}

/// Insert the sample flights if the flight table is empty.
///
/// The emptiness check and the inserts share one transaction.
pub async fn seed_flights(db: &DatabaseConnection) -> AppResult<u64> {
    let txn = db.begin().await?;

    if flight::Entity::find().count(&txn).await? > 0 {
        txn.commit().await?;
        return Ok(0);
    }

    let flights = seed_models()?;
    let seeded = flights.len() as u64;
    flight::Entity::insert_many(flights).exec(&txn).await?;
    txn.commit().await?;

    Ok(seeded)
}
