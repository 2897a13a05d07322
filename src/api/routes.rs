use crate::api::handlers::{admin, auth, dashboard, export, health, ingest, AppState};
use crate::api::middleware::require_session;
use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::Level;

pub fn create_router(state: AppState) -> Router {
    // Scanner ingestion, dashboard reads, export and login
    let public_routes = Router::new()
        .route("/", get(dashboard::index))
        .route("/health", get(health::health))
        .route("/api/wigle_data", post(ingest::receive_sighting))
        .route("/api/heartbeat", post(ingest::receive_heartbeat))
        .route("/api/network_data", get(dashboard::network_data))
        .route("/wigle_data", get(export::download_csv))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout));

    // Destructive and outward-facing operations (require a session)
    let protected_routes = Router::new()
        .route("/clear_database", post(admin::clear_database))
        .route("/upload_to_wigle", post(admin::upload_to_wigle))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::span!(
                        Level::INFO,
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(|_request: &Request, _span: &tracing::Span| {
                    tracing::event!(Level::DEBUG, "received request");
                })
                .on_response(
                    |response: &axum::response::Response,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::event!(
                            Level::INFO,
                            status = response.status().as_u16(),
                            latency = ?latency,
                            "request completed"
                        );
                    },
                )
                .on_failure(
                    |_error: tower_http::classify::ServerErrorsFailureClass,
                     _latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::event!(Level::ERROR, "request failed");
                    },
                ),
        )
}
