use axum::{extract::State, response::Html, Form};

use crate::db::{self, FlightQuery};
use crate::error::AppResult;
use crate::views;
use crate::AppState;

/// Render the empty search form
pub async fn search_form() -> Html<String> {
    views::search_form()
}

/// Search flights by origin, destination and date
pub async fn search_flights(
    State(state): State<AppState>,
    Form(query): Form<FlightQuery>,
) -> AppResult<Html<String>> {
    let flights = db::search_flights(&state.db, &query).await?;

    tracing::debug!(
        from_city = %query.from_city,
        to_city = %query.to_city,
        date = %query.date,
        results = flights.len(),
        "Flight search"
    );

    Ok(views::search_results(&flights))
}
