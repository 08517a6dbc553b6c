use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::history::PurchaseHistoryStore;
use crate::services::peers::orders::{HttpOrderClient, OrderHistoryClient};
use crate::services::peers::users::{HttpUserClient, UserDirectoryClient};
use crate::services::recommendations::RecommendationEngine;
use crate::services::similarity::SimilarityTable;
use crate::store::ProductStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub products: ProductStore,
    pub engine: RecommendationEngine,
    pub users: Arc<dyn UserDirectoryClient>,
}

impl AppState {
    /// Assembles state from explicit components
    ///
    /// Tests use this to substitute stub peer clients or custom tables.
    pub fn new(
        products: ProductStore,
        similarity: SimilarityTable,
        history: PurchaseHistoryStore,
        orders: Arc<dyn OrderHistoryClient>,
        users: Arc<dyn UserDirectoryClient>,
    ) -> Self {
        let engine = RecommendationEngine::new(products.clone(), similarity, history, orders);
        Self {
            products,
            engine,
            users,
        }
    }

    /// Wires the full application from configuration, with the reference
    /// similarity table and purchase histories loaded
    pub fn from_config(config: &Config) -> Self {
        let timeout = Duration::from_secs(config.peer_timeout_secs);
        let orders = Arc::new(HttpOrderClient::new(
            config.order_service_url.clone(),
            timeout,
        ));
        let users = Arc::new(HttpUserClient::new(
            config.user_service_url.clone(),
            timeout,
        ));

        Self::new(
            ProductStore::new(),
            SimilarityTable::seeded(),
            PurchaseHistoryStore::seeded(),
            orders,
            users,
        )
    }
}
