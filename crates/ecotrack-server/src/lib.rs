pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, MethodRouter};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

fn collection_routes() -> MethodRouter<AppState> {
    get(routes::actions::list_actions).post(routes::actions::create_action)
}

fn item_routes() -> MethodRouter<AppState> {
    get(routes::actions::get_action)
        .put(routes::actions::replace_action)
        .patch(routes::actions::update_action)
        .delete(routes::actions::delete_action)
}

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        // Actions, served with and without the trailing slash
        .route("/api/actions", collection_routes())
        .route("/api/actions/", collection_routes())
        .route("/api/actions/{id}", item_routes())
        .route("/api/actions/{id}/", item_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Serve the API on a pre-bound listener.
///
/// Accepting a `TcpListener` lets the caller read the actual port before
/// starting (useful when port 0 asks the OS for a free one).
pub async fn serve_on(app_state: AppState, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let local: SocketAddr = listener.local_addr()?;
    let app = build_router(app_state);

    tracing::info!("ecotrack API listening on http://{local}");

    axum::serve(listener, app).await?;
    Ok(())
}
