//! Server-rendered HTML pages.
//!
//! Every page is a plain function over entity models. Text that came from a
//! user or the database goes through [`escape`] before it is written out.

use axum::http::StatusCode;
use axum::response::Html;

use crate::db::BookingWithFlight;
use crate::entities::{booking, flight};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Search flights</a> | <a href="/bookings">View bookings</a></nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

fn flight_summary(flight: &flight::Model) -> String {
    format!(
        "{} &rarr; {} on {} for {:.2}",
        escape(&flight.from_city),
        escape(&flight.to_city),
        flight.date.format("%Y-%m-%d"),
        flight.price
    )
}

pub fn search_form() -> Html<String> {
    layout(
        "Search Flights",
        r#"<form method="post" action="/">
<label>From <input type="text" name="from_city" required></label>
<label>To <input type="text" name="to_city" required></label>
<label>Date <input type="date" name="date" required></label>
<button type="submit">Search</button>
</form>"#,
    )
}

pub fn search_results(flights: &[flight::Model]) -> Html<String> {
    if flights.is_empty() {
        return layout(
            "Search Results",
            r#"<p>No flights found.</p>
<p><a href="/">Try another search</a></p>"#,
        );
    }

    let rows: String = flights
        .iter()
        .map(|flight| {
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td><a href="/book/{}">Book</a></td></tr>
"#,
                escape(&flight.from_city),
                escape(&flight.to_city),
                flight.date.format("%Y-%m-%d"),
                flight.price,
                flight.id
            )
        })
        .collect();

    layout(
        "Search Results",
        &format!(
            r#"<table>
<thead><tr><th>From</th><th>To</th><th>Date</th><th>Price</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
        ),
    )
}

pub fn booking_form(flight: &flight::Model) -> Html<String> {
    layout(
        "Book Flight",
        &format!(
            r#"<p>{summary}</p>
<form method="post" action="/book/{id}">
<label>Passenger name <input type="text" name="passenger_name"></label>
<button type="submit">Book</button>
</form>"#,
            summary = flight_summary(flight),
            id = flight.id,
        ),
    )
}

pub fn booking_confirmation(
    booking: &booking::Model,
    flight: Option<&flight::Model>,
) -> Html<String> {
    let flight_details = match flight {
        Some(flight) => format!("<p>Flight: {}</p>", flight_summary(flight)),
        None => format!(
            "<p>Flight details unavailable for flight #{}.</p>",
            booking.flight_id
        ),
    };

    layout(
        "Booking Confirmed",
        &format!(
            r#"<p>Booking #{id} for <strong>{name}</strong>.</p>
{flight_details}
<p>Booked at {booked_at} UTC.</p>
<p><a href="/bookings">View all bookings</a></p>"#,
            id = booking.id,
            name = escape(&booking.passenger_name),
            booked_at = booking.booking_date.format("%Y-%m-%d %H:%M:%S"),
        ),
    )
}

pub fn bookings_list(bookings: &[BookingWithFlight]) -> Html<String> {
    if bookings.is_empty() {
        return layout("Bookings", "<p>No bookings yet.</p>");
    }

    let rows: String = bookings
        .iter()
        .map(|(booking, flight)| {
            let route = match flight {
                Some(flight) => flight_summary(flight),
                None => format!("Unknown flight #{}", booking.flight_id),
            };
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                booking.id,
                escape(&booking.passenger_name),
                route,
                booking.booking_date.format("%Y-%m-%d %H:%M:%S"),
            )
        })
        .collect();

    layout(
        "Bookings",
        &format!(
            r#"<table>
<thead><tr><th>#</th><th>Passenger</th><th>Flight</th><th>Booked at (UTC)</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
        ),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        &format!(
            r#"<p>{}</p>
<p><a href="/">Back to search</a></p>"#,
            escape(message)
        ),
    )
}
