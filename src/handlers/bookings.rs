use axum::{
    extract::{Path, State},
    response::Html,
    Form,
};
use serde::Deserialize;

use crate::db;
use crate::error::{AppError, AppResult};
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingForm {
    pub passenger_name: String,
}

/// Render the booking form for a flight
pub async fn booking_form(
    State(state): State<AppState>,
    Path(flight_id): Path<i32>,
) -> AppResult<Html<String>> {
    let flight = db::find_flight(&state.db, flight_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    Ok(views::booking_form(&flight))
}

/// Book a seat on a flight
pub async fn create_booking(
    State(state): State<AppState>,
    Path(flight_id): Path<i32>,
    Form(form): Form<BookingForm>,
) -> AppResult<Html<String>> {
    let flight = db::find_flight(&state.db, flight_id).await?;

    if flight.is_none() {
        if state.config.reject_unknown_flights {
            return Err(AppError::NotFound("Flight not found".to_string()));
        }
        tracing::warn!(flight_id, "Booking against unknown flight");
    }

    let booking = db::create_booking(&state.db, flight_id, &form.passenger_name).await?;
    tracing::info!(booking_id = booking.id, flight_id, "Booking created");

    Ok(views::booking_confirmation(&booking, flight.as_ref()))
}

/// List every booking
pub async fn list_bookings(State(state): State<AppState>) -> AppResult<Html<String>> {
    let bookings = db::list_bookings(&state.db).await?;
    Ok(views::bookings_list(&bookings))
}
