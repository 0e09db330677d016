pub mod bookings;
pub mod flights;
pub mod seed;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub use bookings::{count_bookings, create_booking, list_bookings, BookingWithFlight};
pub use flights::{count_flights, find_flight, search_flights, FlightQuery};
pub use seed::seed_flights;

pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.database_max_connections)
        .min_connections(1);

    Database::connect(options)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))
}

/// Create any missing tables, then seed the flight table if it is empty.
///
/// Safe to call on every startup. Returns the number of flights seeded.
pub async fn prepare(db: &DatabaseConnection) -> AppResult<u64> {
    migration::Migrator::up(db, None).await?;
    seed_flights(db).await
}

#[cfg(test)]
pub(crate) async fn test_db() -> DatabaseConnection {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        reject_unknown_flights: false,
    };

    let db = connect(&config).await.expect("failed to open test database");
    prepare(&db).await.expect("failed to prepare test database");
    db
}
