use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::entities::{booking, flight};
use crate::error::AppResult;

/// A booking joined with its flight, if that flight exists.
pub type BookingWithFlight = (booking::Model, Option<flight::Model>);

/// Store a booking against `flight_id`. The flight is not checked for existence.
pub async fn create_booking(
    db: &DatabaseConnection,
    flight_id: i32,
    passenger_name: &str,
) -> AppResult<booking::Model> {
    let new_booking = booking::ActiveModel {
        passenger_name: Set(passenger_name.to_string()),
        flight_id: Set(flight_id),
        booking_date: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    Ok(new_booking.insert(db).await?)
}

/// Every booking in insertion order, each with its flight.
pub async fn list_bookings(db: &DatabaseConnection) -> AppResult<Vec<BookingWithFlight>> {
    let bookings = booking::Entity::find()
        .find_also_related(flight::Entity)
        .order_by_asc(booking::Column::Id)
        .all(db)
        .await?;

    Ok(bookings)
}

pub async fn count_bookings(db: &DatabaseConnection) -> AppResult<u64> {
    Ok(booking::Entity::find().count(db).await?)
}
