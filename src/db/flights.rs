use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::Deserialize;

use crate::entities::flight;
use crate::error::AppResult;

/// Search form fields, matched verbatim against stored flights.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightQuery {
    pub from_city: String,
    pub to_city: String,
    pub date: String,
}

pub fn parse_travel_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Exact, case-sensitive match on origin, destination and date.
///
/// A date that is not `YYYY-MM-DD` cannot match any flight, so the result is
/// empty rather than an error.
pub async fn search_flights(
    db: &DatabaseConnection,
    query: &FlightQuery,
) -> AppResult<Vec<flight::Model>> {
    let Some(date) = parse_travel_date(&query.date) else {
        tracing::debug!(date = %query.date, "Unrecognised travel date");
        return Ok(Vec::new());
    };

    let flights = flight::Entity::find()
        .filter(flight::Column::FromCity.eq(query.from_city.as_str()))
        .filter(flight::Column::ToCity.eq(query.to_city.as_str()))
        .filter(flight::Column::Date.eq(date))
        .order_by_asc(flight::Column::Id)
        .all(db)
        .await?;

    Ok(flights)
}

pub async fn find_flight(db: &DatabaseConnection, id: i32) -> AppResult<Option<flight::Model>> {
    Ok(flight::Entity::find_by_id(id).one(db).await?)
}

pub async fn count_flights(db: &DatabaseConnection) -> AppResult<u64> {
    Ok(flight::Entity::find().count(db).await?)
}
