mod api;
mod config;
mod models;
mod services;
mod storage;
use crate::{
    config::Config,
    services::startup::{init_logging, shutdown_signal},
    storage::{documents::DocumentStore, users::UserStore},
};
use axum::Router;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub documents: DocumentStore,
    pub users: UserStore,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let documents = DocumentStore::new(&config.document_db);
        let users = UserStore::new(&config.users_db);
        Self {
            config,
            documents,
            users,
        }
    }
}

fn app(state: AppState) -> Router {
    // Anything the API does not claim falls through to the frontend bundle;
    // unknown paths get index.html so client-side routing can take over.
    let spa = ServeDir::new(&state.config.static_dir)
        .not_found_service(ServeFile::new(state.config.static_dir.join("index.html")));

    Router::new()
        .nest("/api", api::routes())
        .fallback_service(spa)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let config = Arc::new(Config::from_env()?);
    tracing::info!(
        "base dir: {} ({})",
        config.base_dir.display(),
        config.environment
    );
    tracing::info!("document store: {}", config.document_db.display());
    tracing::info!("user store: {}", config.users_db.display());
    tracing::info!("frontend bundle: {}", config.static_dir.display());

    let state = AppState::new(Arc::clone(&config));
    let app = app(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    let listener = TcpListener::bind(format!("{}:{}", &config.host, &config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
