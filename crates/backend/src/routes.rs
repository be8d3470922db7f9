use axum::{
    http::{header, HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::shared::state::AppState;
use crate::system;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-internal-key"),
        ]);

    Router::new()
        .route("/health", get(handlers::health::health))
        // U508: синхронизация цен Shopify (защищено X-Internal-Key)
        .route(
            "/sync-prices",
            post(handlers::u508_sync_prices::sync_prices).layer(
                middleware::from_fn_with_state(
                    state.clone(),
                    system::auth::require_internal_key,
                ),
            ),
        )
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors)
        .with_state(state)
}
