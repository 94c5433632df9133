use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, routing::post, Extension, Router};
use clap::Parser;
use mongodb::{bson::doc, options::ClientOptions, Client};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use booking_service::client::ShowtimeClient;
use booking_service::controllers::booking_controller::*;

#[derive(Parser)]
#[command(name = "booking-service")]
struct Args {
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    mongodb_uri: String,

    #[arg(long, env = "DATABASE_NAME", default_value = "movie-booking")]
    database: String,

    #[arg(long, env = "PORT", default_value = "8084")]
    port: u16,

    #[arg(
        long,
        env = "SHOWTIME_SERVICE_URL",
        default_value = "http://localhost:8083"
    )]
    showtime_service_url: String,
}

async fn health() -> &'static str {
    "OK"
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let client_options = ClientOptions::parse(&args.mongodb_uri).await?;
    let client = Client::with_options(client_options)?;
    let db = client.database(&args.database);

    db.run_command(doc! {"ping": 1}, None).await?;
    info!("connected to MongoDB database {}", args.database);

    let showtime_client = Arc::new(ShowtimeClient::new(&args.showtime_service_url));
    info!("using showtime service at {}", args.showtime_service_url);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/:id", get(get_booking_by_id))
        .route("/api/bookings/user/:user_id", get(get_bookings_by_user_id))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(db))
        .layer(Extension(showtime_client));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;
    info!("booking service listening on port {}", args.port);
    axum::serve(listener, app).await?;

    Ok(())
}
