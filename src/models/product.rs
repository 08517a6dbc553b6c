use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as stored and returned to clients
///
/// Ids are assigned by the product store. Recommendation reads never mutate
/// products; only the CRUD surface does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    /// Unit price; must be non-negative
    pub price: f64,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a product
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
}

/// Partial product update; absent fields keep their current values
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
}
