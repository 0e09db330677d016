pub use sea_orm_migration::prelude::*;

mod m20241015_000001_create_flights;
mod m20241015_000002_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241015_000001_create_flights::Migration),
            Box::new(m20241015_000002_create_bookings::Migration),
        ]
    }
}
