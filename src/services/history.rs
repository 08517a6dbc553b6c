use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// In-memory per-user purchase history
///
/// Membership is what drives recommendation exclusion; insertion order is
/// preserved for display. Entries are never expired or deleted.
#[derive(Clone)]
pub struct PurchaseHistoryStore {
    inner: Arc<RwLock<HashMap<u64, Vec<u64>>>>,
}

impl Default for PurchaseHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseHistoryStore {
    /// Creates an empty history store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The reference histories loaded at process start
    pub fn seeded() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::from([
                (1, vec![1, 3, 5]),
                (2, vec![2, 4, 6]),
            ]))),
        }
    }

    /// Product ids a user has purchased; empty for unknown users
    pub async fn get(&self, user_id: u64) -> Vec<u64> {
        let inner = self.inner.read().await;
        inner.get(&user_id).cloned().unwrap_or_default()
    }

    /// Appends a product to a user's history if not already present
    ///
    /// Idempotent: recording the same pair twice is a no-op. The check and
    /// insert happen under a single write lock, so concurrent recorders for
    /// the same user cannot lose updates. Returns the updated history.
    pub async fn record(&self, user_id: u64, product_id: u64) -> Vec<u64> {
        let mut inner = self.inner.write().await;
        let history = inner.entry(user_id).or_default();
        if !history.contains(&product_id) {
            history.push(product_id);
        }
        history.clone()
    }
}
