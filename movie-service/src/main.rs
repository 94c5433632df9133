use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use clap::Parser;
use mongodb::{bson::doc, options::ClientOptions, Client};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

mod controllers;
pub mod models;

use controllers::{admin_movie_controller::*, cinema_controller::*, movie_controller::*};

#[derive(Parser)]
#[command(name = "movie-service")]
struct Args {
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    mongodb_uri: String,

    #[arg(long, env = "DATABASE_NAME", default_value = "movie-booking")]
    database: String,

    #[arg(long, env = "PORT", default_value = "8082")]
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
        .route("/api/movies", get(get_all_movies))
        .route("/api/movies/search", get(search_movies))
        .route("/api/movies/:id", get(get_movie_by_id))
        .route("/api/movies/cinema/:cinema_id", get(get_movies_by_cinema_id))
        .route("/api/admin/movies", post(create_movie))
        .route("/api/admin/movies/:id", put(update_movie))
        .route("/api/admin/movies/:id", delete(delete_movie))
        .route(
            "/api/admin/movies/:movie_id/showtimes",
            post(add_showtime_to_movie).get(get_movie_showtimes),
        )
        .route(
            "/api/admin/movies/:movie_id/showtimes/:showtime_id",
            delete(remove_showtime_from_movie),
        )
        .route("/api/admin/cinemas", post(create_cinema).get(get_all_cinemas))
        .route("/api/admin/cinemas/:id", get(get_cinema_by_id))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(db));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;
    info!("movie service listening on port {}", args.port);
    axum::serve(listener, app).await?;

    Ok(())
}
