use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::access_log::access_log;
use crate::handlers::{
    create_url_handler, get_stats_handler, health_handler, method_not_allowed_handler,
    not_found_handler, redirect_handler, shorturls_redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(health_handler))
            .route(
                "/shorturls",
                post(create_url_handler).get(shorturls_redirect_handler),
            )
            .route("/shorturls/{short_code}", get(get_stats_handler))
            .route("/{short_code}", get(redirect_handler))
            .fallback(not_found_handler)
            .method_not_allowed_fallback(method_not_allowed_handler)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(access_log))
            .with_state(state)
    }
}
