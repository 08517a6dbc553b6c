use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::{error::AppError, services::peers::PeerError, state::AppState};

/// Directory id that owns catalog products
///
/// Seller assignment is not modeled in the catalog; the demo user directory
/// lists every product under this user.
const CATALOG_SELLER_ID: u64 = 1;

/// Proxies a product's seller from the user directory
pub async fn product_seller(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    if state.products.get(id).await.is_none() {
        return Err(AppError::NotFound(format!("Product {} not found", id)));
    }

    Ok(proxy_response(
        state.users.fetch_user(CATALOG_SELLER_ID).await,
        "Failed to fetch seller info from user service",
    ))
}

/// Proxies the full user list from the user directory
pub async fn list(State(state): State<AppState>) -> Response {
    proxy_response(
        state.users.fetch_users().await,
        "Failed to fetch users from user service",
    )
}

/// Maps a peer result onto our response: 2xx bodies and peer error statuses
/// pass through verbatim, transport failures become a 500
fn proxy_response(result: Result<Value, PeerError>, error_label: &str) -> Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err(PeerError::Status { status, body }) => (
            status,
            Json(json!({ "error": error_label, "details": body })),
        )
            .into_response(),
        Err(PeerError::Transport(err)) => {
            tracing::warn!(error = %err, "User service unreachable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Error connecting to user service",
                    "message": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}
