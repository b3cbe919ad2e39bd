mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

pub use middleware::CSRF_HEADER;
pub use state::{HttpState, generate_csrf_token};

/// Largest usage log accepted by `/api/upload`.
pub const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route(
            "/upload",
            post(handlers::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/report", post(handlers::report))
        .route("/reset", post(handlers::reset))
        .route("/export", get(handlers::export))
        .route("/settings_get", post(handlers::settings_get))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_csrf,
        ));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::ui_fallback)
        .with_state(state)
}
