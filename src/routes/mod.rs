use axum::{middleware, routing::get, Router};

use crate::handlers::{bookings, flights};
use crate::middleware::logging::log_request;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(flights::search_form).post(flights::search_flights))
        .route(
            "/book/{flight_id}",
            get(bookings::booking_form).post(bookings::create_booking),
        )
        .route("/bookings", get(bookings::list_bookings))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
