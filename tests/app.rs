use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::io;
use std::sync::{Arc, Mutex};

use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use flight_booking::{config::Config, db, routes, AppState};

async fn test_app(reject_unknown_flights: bool) -> (Router, AppState) {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        reject_unknown_flights,
    };

    let db = db::connect(&config).await.expect("failed to open database");
    db::prepare(&db).await.expect("failed to prepare database");

    let state = AppState { db, config };
    (routes::create_router(state.clone()), state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_search_form_page() {
    let (app, _) = test_app(false).await;

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"name="from_city""#));
    assert!(body.contains(r#"name="to_city""#));
    assert!(body.contains(r#"name="date""#));
}

#[tokio::test]
async fn test_search_finds_seeded_flight() {
    let (app, _) = test_app(false).await;

    let (status, body) = send(
        &app,
        post_form("/", "from_city=Mumbai&to_city=Delhi&date=2024-10-20"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<a href=\"/book/").count(), 1);
    assert!(body.contains(r#"href="/book/1""#));
    assert!(body.contains("5000.00"));
}

#[tokio::test]
async fn test_search_without_matches_is_empty_state() {
    let (app, _) = test_app(false).await;

    let (status, body) = send(
        &app,
        post_form("/", "from_city=Nowhere&to_city=Nowhere&date=2024-01-01"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No flights found."));
}

#[tokio::test]
async fn test_search_with_malformed_date_is_empty_state() {
    let (app, _) = test_app(false).await;

    let (status, body) = send(
        &app,
        post_form("/", "from_city=Mumbai&to_city=Delhi&date=20%2F10%2F2024"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No flights found."));
}

#[tokio::test]
async fn test_search_missing_field_is_rejected() {
    let (app, _) = test_app(false).await;

    let (status, _) = send(&app, post_form("/", "from_city=Mumbai&to_city=Delhi")).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_booking_form_for_existing_flight() {
    let (app, _) = test_app(false).await;

    let (status, body) = send(&app, get("/book/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="/book/1""#));
    assert!(body.contains("Mumbai"));
}

#[tokio::test]
async fn test_booking_form_for_missing_flight() {
    let (app, _) = test_app(false).await;

    let (status, body) = send(&app, get("/book/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Flight not found"));
}

#[tokio::test]
async fn test_book_flight_adds_one_booking() {
    let (app, state) = test_app(false).await;
    let before = db::count_bookings(&state.db).await.unwrap();

    let (status, body) = send(&app, post_form("/book/1", "passenger_name=Asha")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Booking Confirmed"));
    assert!(body.contains("Asha"));

    assert_eq!(db::count_bookings(&state.db).await.unwrap(), before + 1);
    let bookings = db::list_bookings(&state.db).await.unwrap();
    let (booking, flight) = bookings.last().unwrap();
    assert_eq!(booking.flight_id, 1);
    assert_eq!(booking.passenger_name, "Asha");
    assert_eq!(flight.as_ref().map(|f| f.id), Some(1));
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_booking_log_omits_passenger_name() {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (app, _) = test_app(false).await;
    let (status, _) = send(&app, post_form("/book/1", "passenger_name=Zephyrine")).await;
    assert_eq!(status, StatusCode::OK);

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("Booking created"));
    assert!(!output.contains("Zephyrine"));
}

#[tokio::test]
async fn test_book_unknown_flight_is_stored() {
    let (app, state) = test_app(false).await;

    let (status, body) = send(&app, post_form("/book/999", "passenger_name=X")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Flight details unavailable for flight #999."));

    let bookings = db::list_bookings(&state.db).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].0.flight_id, 999);
    assert!(bookings[0].1.is_none());
}

#[tokio::test]
async fn test_book_unknown_flight_rejected_when_configured() {
    let (app, state) = test_app(true).await;

    let (status, _) = send(&app, post_form("/book/999", "passenger_name=X")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(db::count_bookings(&state.db).await.unwrap(), 0);

    let (status, _) = send(&app, post_form("/book/2", "passenger_name=X")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(db::count_bookings(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_book_with_empty_name() {
    let (app, state) = test_app(false).await;

    let (status, _) = send(&app, post_form("/book/3", "passenger_name=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(db::count_bookings(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_non_integer_flight_id() {
    let (app, _) = test_app(false).await;

    let (status, _) = send(&app, get("/book/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bookings_list() {
    let (app, _) = test_app(false).await;

    let (status, body) = send(&app, get("/bookings")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No bookings yet."));

    send(&app, post_form("/book/1", "passenger_name=Asha")).await;
    send(&app, post_form("/book/4", "passenger_name=Ravi")).await;
    send(&app, post_form("/book/999", "passenger_name=X")).await;

    let (status, body) = send(&app, get("/bookings")).await;
    assert_eq!(status, StatusCode::OK);

    let asha = body.find("Asha").unwrap();
    let ravi = body.find("Ravi").unwrap();
    assert!(asha < ravi);
    assert!(body.contains("Delhi &rarr; Hyderabad"));
    assert!(body.contains("Unknown flight #999"));
    assert_eq!(body.matches("<tr><td>").count(), 3);
}

#[tokio::test]
async fn test_seed_survives_repeated_prepare() {
    let (app, state) = test_app(false).await;

    send(&app, get("/")).await;
    db::prepare(&state.db).await.unwrap();
    db::prepare(&state.db).await.unwrap();

    assert_eq!(db::count_flights(&state.db).await.unwrap(), 4);
}
