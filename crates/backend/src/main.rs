pub mod api;
pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;

use axum::http::{header, Method};
use axum::{middleware, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use shared::app_state::AppState;
use shared::remote::client::RemoteBackendClient;
use system::middleware::request_logger::request_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let client = RemoteBackendClient::new(&config.remote)?;
    tracing::info!("Remote backend: {}", config.remote.base_url);

    let state = Arc::new(AppState::new(config, Arc::new(client)));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let mut app = Router::new()
        .merge(system::api::routes::configure_system_routes(state.clone()))
        .merge(api::routes::configure_business_routes(state.clone()));

    if let Some(dir) = state.config.server.static_dir.as_deref() {
        let dir = shared::config::resolve_path(dir);
        tracing::info!("Serving frontend from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    let app = app
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state.clone());

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
