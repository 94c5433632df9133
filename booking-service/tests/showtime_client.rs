use booking_service::client::ShowtimeClient;
use serde_json::json;
use shared::error::AppError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn showtime_body() -> serde_json::Value {
    json!({
        "_id": "64f0c6a2e4b0a1b2c3d4e5f4",
        "movieId": "64f0c6a2e4b0a1b2c3d4e5f3",
        "cinemaId": "64f0c6a2e4b0a1b2c3d4e5f2",
        "screenNumber": "3",
        "showDate": "2026-08-30",
        "startTime": "19:30",
        "price": 12.5,
        "totalSeats": 100,
        "availableSeats": 5
    })
}

#[tokio::test]
async fn fetch_showtime_parses_the_wire_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/showtimes/64f0c6a2e4b0a1b2c3d4e5f4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(showtime_body()))
        .mount(&server)
        .await;

    let client = ShowtimeClient::new(&server.uri());
    let showtime = client
        .fetch_showtime("64f0c6a2e4b0a1b2c3d4e5f4")
        .await
        .unwrap();

    assert_eq!(showtime.id, "64f0c6a2e4b0a1b2c3d4e5f4");
    assert_eq!(showtime.show_date, "2026-08-30".parse().unwrap());
    assert_eq!(showtime.start_time.format("%H:%M").to_string(), "19:30");
    assert_eq!(showtime.available_seats, 5);
}

#[tokio::test]
async fn fetch_showtime_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/showtimes/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "Showtime not found with id: missing"})),
        )
        .mount(&server)
        .await;

    let client = ShowtimeClient::new(&server.uri());
    let err = client.fetch_showtime("missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn reduce_seats_sends_the_count_as_a_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/showtimes/64f0c6a2e4b0a1b2c3d4e5f4/reduce"))
        .and(query_param("count", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ShowtimeClient::new(&server.uri());
    client
        .reduce_seats("64f0c6a2e4b0a1b2c3d4e5f4", 3)
        .await
        .unwrap();
}

#[tokio::test]
async fn reduce_seats_surfaces_the_remote_insufficient_seats_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/showtimes/64f0c6a2e4b0a1b2c3d4e5f4/reduce"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"error": "Not enough seats available. Available: 1"})),
        )
        .mount(&server)
        .await;

    let client = ShowtimeClient::new(&server.uri());
    let err = client
        .reduce_seats("64f0c6a2e4b0a1b2c3d4e5f4", 2)
        .await
        .unwrap_err();

    match err {
        AppError::InsufficientSeats(message) => {
            assert_eq!(message, "Not enough seats available. Available: 1");
        }
        other => panic!("expected InsufficientSeats, got {:?}", other),
    }
}

#[tokio::test]
async fn release_seats_maps_400_to_validation() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/showtimes/64f0c6a2e4b0a1b2c3d4e5f4/release"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "releasing 3 seats would exceed total seats"})),
        )
        .mount(&server)
        .await;

    let client = ShowtimeClient::new(&server.uri());
    let err = client
        .release_seats("64f0c6a2e4b0a1b2c3d4e5f4", 3)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn unexpected_statuses_become_upstream_errors() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/showtimes/64f0c6a2e4b0a1b2c3d4e5f4/reduce"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ShowtimeClient::new(&server.uri());
    let err = client
        .reduce_seats("64f0c6a2e4b0a1b2c3d4e5f4", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));
}
