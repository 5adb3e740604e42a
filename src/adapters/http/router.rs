//! Routes and middleware (CORS, request tracing).

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::landing;
use super::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/termins",
            get(handlers::get_time_slots)
                .post(handlers::book_appointment)
                .delete(handlers::cancel_appointment),
        )
        .route("/dates", get(handlers::get_available_dates));

    Router::new()
        .route("/", get(landing::serve_index))
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
