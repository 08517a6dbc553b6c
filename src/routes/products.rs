use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{NewProduct, Product, ProductPatch},
    state::AppState,
};

/// Lists the whole catalog
pub async fn list(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.products.list().await)
}

/// Fetches one product
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Product>> {
    state
        .products
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
}

/// Creates a product
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let product = state.products.create(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Applies a partial update to a product
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let Json(patch) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    state
        .products
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
}

/// Deletes a product
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Value>> {
    if state.products.delete(id).await {
        Ok(Json(json!({ "message": "Product deleted successfully" })))
    } else {
        Err(AppError::NotFound(format!("Product {} not found", id)))
    }
}
