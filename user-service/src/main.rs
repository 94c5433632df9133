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

use controllers::user_controller::*;

#[derive(Parser)]
#[command(name = "user-service")]
struct Args {
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    mongodb_uri: String,

    #[arg(long, env = "DATABASE_NAME", default_value = "movie-booking")]
    database: String,

    #[arg(long, env = "PORT", default_value = "8081")]
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
        .route("/api/users", post(create_user).get(get_all_users))
        .route("/api/users/:id", get(get_user_by_id))
        .route("/api/users/:id", put(update_user))
        .route("/api/users/:id", delete(delete_user))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(db));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;
    info!("user service listening on port {}", args.port);
    axum::serve(listener, app).await?;

    Ok(())
}
