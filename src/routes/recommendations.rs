use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::Product,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct UpdateHistoryRequest {
    pub user_id: u64,
    pub product_id: u64,
}

/// Products similar to the one being viewed
pub async fn similar(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.engine.similar_products(product_id).await?;
    Ok(Json(products))
}

/// Personalized recommendations from a user's purchase history
pub async fn for_user(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.engine.recommendations_for_user(user_id).await?;
    Ok(Json(products))
}

/// Records a purchase event reported by the order service
pub async fn update_history(
    State(state): State<AppState>,
    payload: Result<Json<UpdateHistoryRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let history = state
        .engine
        .record_purchase(request.user_id, request.product_id)
        .await?;

    Ok(Json(json!({
        "message": "Purchase history updated successfully",
        "history": history,
    })))
}
