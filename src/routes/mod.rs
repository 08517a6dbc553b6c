use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::state::AppState;

pub mod products;
pub mod recommendations;
pub mod users;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Product catalog
        .route("/products", get(products::list))
        .route("/products", post(products::create))
        .route("/products/:id", get(products::show))
        .route("/products/:id", put(products::update))
        .route("/products/:id", delete(products::destroy))
        // User directory proxies
        .route("/products/:id/seller", get(users::product_seller))
        .route("/users", get(users::list))
        // Recommendations
        .route(
            "/recommendations/similar/:product_id",
            get(recommendations::similar),
        )
        .route(
            "/recommendations/user/:user_id",
            get(recommendations::for_user),
        )
        .route(
            "/recommendations/update-history",
            post(recommendations::update_history),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
