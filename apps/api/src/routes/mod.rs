pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::layout::handlers as layout_handlers;
use crate::preflight::handlers as preflight_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Layout catalog + reactive field check
        .route("/api/v1/layouts", get(layout_handlers::handle_list_layouts))
        .route(
            "/api/v1/fields/evaluate",
            post(layout_handlers::handle_evaluate_fields),
        )
        .route(
            "/api/v1/fields/toggle",
            post(layout_handlers::handle_toggle_field),
        )
        // Preflight
        .route("/api/v1/preflight", post(preflight_handlers::handle_preflight))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
