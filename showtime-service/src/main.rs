use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use clap::Parser;
use mongodb::{bson::doc, options::ClientOptions, Client};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use showtime_service::controllers::showtime_controller::*;

#[derive(Parser)]
#[command(name = "showtime-service")]
struct Args {
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    mongodb_uri: String,

    #[arg(long, env = "DATABASE_NAME", default_value = "movie-booking")]
    database: String,

    #[arg(long, env = "PORT", default_value = "8083")]
    port: u16,
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

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/showtimes", post(create_showtime))
        .route("/api/showtimes/:id", get(get_showtime_by_id))
        .route("/api/showtimes/:id", put(update_showtime))
        .route("/api/showtimes/:id", delete(delete_showtime))
        .route("/api/showtimes/:id/reduce", put(reduce_seats))
        .route("/api/showtimes/:id/release", put(release_seats))
        .route(
            "/api/showtimes/movie/:movie_id",
            get(get_showtimes_by_movie_id),
        )
        .route(
            "/api/showtimes/cinema/:cinema_id",
            get(get_showtimes_by_cinema_id),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(db));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;
    info!("showtime service listening on port {}", args.port);
    axum::serve(listener, app).await?;

    Ok(())
}
