use std::collections::HashSet;
use std::sync::Arc;

use crate::error::AppResult;
use crate::models::Product;
use crate::services::history::PurchaseHistoryStore;
use crate::services::peers::orders::OrderHistoryClient;
use crate::services::similarity::SimilarityTable;
use crate::store::ProductStore;

/// Recommendation engine
///
/// Resolves "similar to product X" and "recommended for user Y" queries from
/// the similarity table, the order history peer, and the product catalog, and
/// records purchase events into the local history store.
///
/// Policy: a query with no usable signal yields an empty list, never an error
/// and never synthesized data. Unknown products, empty similarity entries,
/// and candidate ids that no longer exist in the catalog all degrade to empty
/// results, and read paths never mutate any store.
#[derive(Clone)]
pub struct RecommendationEngine {
    products: ProductStore,
    similarity: SimilarityTable,
    history: PurchaseHistoryStore,
    orders: Arc<dyn OrderHistoryClient>,
}

impl RecommendationEngine {
    pub fn new(
        products: ProductStore,
        similarity: SimilarityTable,
        history: PurchaseHistoryStore,
        orders: Arc<dyn OrderHistoryClient>,
    ) -> Self {
        Self {
            products,
            similarity,
            history,
            orders,
        }
    }

    /// Products similar to the one being viewed
    ///
    /// Output order follows the similarity table, filtered to products that
    /// still exist in the catalog.
    pub async fn similar_products(&self, product_id: u64) -> AppResult<Vec<Product>> {
        if self.products.get(product_id).await.is_none() {
            tracing::debug!(product_id, "Similar-products query for unknown product");
            return Ok(Vec::new());
        }

        let candidate_ids = self.similarity.similar_ids(product_id);
        if candidate_ids.is_empty() {
            return Ok(Vec::new());
        }

        let products = self.products.by_ids(&candidate_ids).await;

        tracing::debug!(
            product_id,
            candidates = candidate_ids.len(),
            resolved = products.len(),
            "Resolved similar products"
        );

        Ok(products)
    }

    /// Personalized recommendations from a user's purchase history
    ///
    /// The order history peer is the primary source; on any peer failure the
    /// local history store takes over so the caller sees a degraded answer
    /// instead of the peer's error.
    pub async fn recommendations_for_user(&self, user_id: u64) -> AppResult<Vec<Product>> {
        let history = match self.orders.purchase_history(user_id).await {
            Ok(product_ids) => product_ids,
            Err(err) => {
                tracing::warn!(
                    user_id,
                    error = %err,
                    "Order service unavailable, falling back to local purchase history"
                );
                self.history.get(user_id).await
            }
        };

        if history.is_empty() {
            return Ok(Vec::new());
        }

        // Union of similar products over everything the user bought, in
        // first-seen order, excluding products already owned
        let owned: HashSet<u64> = history.iter().copied().collect();
        let mut picked: HashSet<u64> = HashSet::new();
        let mut candidate_ids: Vec<u64> = Vec::new();
        for product_id in &history {
            for candidate in self.similarity.similar_ids(*product_id) {
                if !owned.contains(&candidate) && picked.insert(candidate) {
                    candidate_ids.push(candidate);
                }
            }
        }

        let products = self.products.by_ids(&candidate_ids).await;

        tracing::debug!(
            user_id,
            purchased = owned.len(),
            candidates = candidate_ids.len(),
            resolved = products.len(),
            "Resolved user recommendations"
        );

        Ok(products)
    }

    /// Records a purchase event and returns the user's updated history
    pub async fn record_purchase(&self, user_id: u64, product_id: u64) -> AppResult<Vec<u64>> {
        let history = self.history.record(user_id, product_id).await;

        tracing::info!(
            user_id,
            product_id,
            history_len = history.len(),
            "Recorded purchase"
        );

        Ok(history)
    }
}
