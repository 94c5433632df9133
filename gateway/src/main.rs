use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Extension, Json, Router};
use clap::Parser;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Static descriptor of the platform's services. The gateway holds no logic;
/// it only tells clients where everything else lives.
#[derive(Parser)]
#[command(name = "gateway")]
struct Args {
    #[arg(long, env = "PORT", default_value = "9090")]
    port: u16,

    #[arg(long, env = "USER_SERVICE_URL", default_value = "http://localhost:8081")]
    user_service_url: String,

    #[arg(long, env = "MOVIE_SERVICE_URL", default_value = "http://localhost:8082")]
    movie_service_url: String,

    #[arg(
        long,
        env = "SHOWTIME_SERVICE_URL",
        default_value = "http://localhost:8083"
    )]
    showtime_service_url: String,

    #[arg(
        long,
        env = "BOOKING_SERVICE_URL",
        default_value = "http://localhost:8084"
    )]
    booking_service_url: String,
}

async fn health() -> &'static str {
    "OK"
}

async fn index(Extension(args): Extension<Arc<Args>>) -> Json<Value> {
    Json(json!({
        "message": "Movie Ticket Booking System - API Gateway",
        "status": "Running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "User Service": format!("{}/api/users", args.user_service_url),
            "Movie Service": format!("{}/api/movies", args.movie_service_url),
            "Showtime Service": format!("{}/api/showtimes", args.showtime_service_url),
            "Booking Service": format!("{}/api/bookings", args.booking_service_url),
        },
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Arc::new(Args::parse());
    let port = args.port;

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(args));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("gateway listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
