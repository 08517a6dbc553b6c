use serde::Deserialize;

/// One order row as returned by the order history service
///
/// Only the product id is projected out; everything else the peer sends is
/// ignored. Rows that don't carry a product id are skipped by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub product_id: u64,
}
