use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use rand::seq::SliceRandom;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product, ProductPatch};

/// In-memory product catalog
///
/// Ids are assigned sequentially on insert and never reused within a process
/// lifetime. Listing returns products in id order.
#[derive(Clone)]
pub struct ProductStore {
    inner: Arc<RwLock<ProductStoreInner>>,
}

struct ProductStoreInner {
    products: BTreeMap<u64, Product>,
    next_id: u64,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    /// Creates an empty product store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ProductStoreInner {
                products: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Validates and inserts a new product, assigning the next id
    pub async fn create(&self, new: NewProduct) -> AppResult<Product> {
        validate_name(&new.name)?;
        validate_price(new.price)?;

        let now = Utc::now();
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let product = Product {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            stock: new.stock,
            created_at: now,
            updated_at: now,
        };
        inner.products.insert(id, product.clone());

        Ok(product)
    }

    /// Fetches a single product by id
    pub async fn get(&self, id: u64) -> Option<Product> {
        let inner = self.inner.read().await;
        inner.products.get(&id).cloned()
    }

    /// Returns the whole catalog in id order
    pub async fn list(&self) -> Vec<Product> {
        let inner = self.inner.read().await;
        inner.products.values().cloned().collect()
    }

    /// Applies a partial update; `None` if the product doesn't exist
    pub async fn update(&self, id: u64, patch: ProductPatch) -> AppResult<Option<Product>> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }

        let mut inner = self.inner.write().await;
        let Some(product) = inner.products.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = Some(description);
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    /// Removes a product; `true` if it existed
    pub async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        inner.products.remove(&id).is_some()
    }

    /// Materializes ids into products, silently dropping unknown ids
    ///
    /// Output preserves input order, which the recommendation engine relies
    /// on for deterministic responses.
    pub async fn by_ids(&self, ids: &[u64]) -> Vec<Product> {
        let inner = self.inner.read().await;
        ids.iter()
            .filter_map(|id| inner.products.get(id).cloned())
            .collect()
    }

    /// Samples up to `limit` products without replacement, skipping `exclude`
    ///
    /// Returns everything that remains when fewer than `limit` products are
    /// eligible, and an empty list for an empty store. Never synthesizes
    /// placeholder rows.
    pub async fn random_sample(&self, exclude: &HashSet<u64>, limit: usize) -> Vec<Product> {
        let inner = self.inner.read().await;
        let eligible: Vec<&Product> = inner
            .products
            .values()
            .filter(|p| !exclude.contains(&p.id))
            .collect();

        let mut rng = rand::thread_rng();
        eligible
            .choose_multiple(&mut rng, limit)
            .map(|p| (*p).clone())
            .collect()
    }

    /// Number of products in the catalog
    pub async fn count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.products.len()
    }

    /// Inserts the demo catalog rows used at process start
    pub async fn seed_demo(&self) -> AppResult<()> {
        let rows = vec![
            NewProduct {
                name: "Laptop".to_string(),
                description: Some("Powerful laptop for development".to_string()),
                price: 1200.0,
                stock: 10,
            },
            NewProduct {
                name: "Smartphone".to_string(),
                description: Some("Latest smartphone model".to_string()),
                price: 500.0,
                stock: 20,
            },
            NewProduct {
                name: "Headphone".to_string(),
                description: Some("Headphone with noise cancellation".to_string()),
                price: 200.0,
                stock: 15,
            },
        ];

        for row in rows {
            self.create(row).await?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_price(price: f64) -> AppResult<()> {
    if price < 0.0 {
        return Err(AppError::Validation(
            "price must be non-negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price: 10.0,
            stock: 5,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = ProductStore::new();
        let first = store.create(new_product("A")).await.unwrap();
        let second = store.create(new_product("B")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let store = ProductStore::new();
        let result = store.create(new_product("   ")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let store = ProductStore::new();
        let mut new = new_product("A");
        new.price = -1.0;
        let result = store.create(new).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_applies_subset_and_keeps_rest() {
        let store = ProductStore::new();
        let created = store.create(new_product("A")).await.unwrap();

        let patch = ProductPatch {
            stock: Some(99),
            ..Default::default()
        };
        let updated = store.update(created.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.stock, 99);
        assert_eq!(updated.name, "A");
        assert_eq!(updated.price, 10.0);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let store = ProductStore::new();
        let result = store.update(42, ProductPatch::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = ProductStore::new();
        let created = store.create(new_product("A")).await.unwrap();

        assert!(store.delete(created.id).await);
        assert!(!store.delete(created.id).await);
        assert_eq!(store.get(created.id).await, None);
    }

    #[tokio::test]
    async fn test_by_ids_drops_unknown_and_preserves_input_order() {
        let store = ProductStore::new();
        for name in ["A", "B", "C"] {
            store.create(new_product(name)).await.unwrap();
        }

        let products = store.by_ids(&[3, 99, 1]).await;
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A"]);
    }

    #[tokio::test]
    async fn test_random_sample_respects_exclusions_and_limit() {
        let store = ProductStore::new();
        for name in ["A", "B", "C", "D"] {
            store.create(new_product(name)).await.unwrap();
        }

        let exclude: HashSet<u64> = [1, 2].into_iter().collect();
        let sample = store.random_sample(&exclude, 10).await;

        let mut ids: Vec<u64> = sample.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![3, 4]);
    }

    #[tokio::test]
    async fn test_random_sample_limits_size() {
        let store = ProductStore::new();
        for name in ["A", "B", "C", "D"] {
            store.create(new_product(name)).await.unwrap();
        }

        let sample = store.random_sample(&HashSet::new(), 2).await;
        assert_eq!(sample.len(), 2);
    }

    #[tokio::test]
    async fn test_random_sample_empty_store() {
        let store = ProductStore::new();
        let sample = store.random_sample(&HashSet::new(), 5).await;
        assert!(sample.is_empty());
    }

    #[tokio::test]
    async fn test_seed_demo_inserts_catalog() {
        let store = ProductStore::new();
        store.seed_demo().await.unwrap();
        assert_eq!(store.count().await, 3);
        assert_eq!(store.get(1).await.unwrap().name, "Laptop");
    }
}
