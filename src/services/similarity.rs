use std::collections::HashMap;

/// Static product-to-product similarity table
///
/// Maps a product id to an ordered list of related product ids; order defines
/// preference, so earlier entries win when results are truncated downstream.
/// The table is fixed at construction. A real deployment would load it from a
/// model artifact, which is out of scope here.
#[derive(Debug, Clone, Default)]
pub struct SimilarityTable {
    entries: HashMap<u64, Vec<u64>>,
}

impl SimilarityTable {
    /// Builds a table from explicit entries
    pub fn new(entries: HashMap<u64, Vec<u64>>) -> Self {
        Self { entries }
    }

    /// The reference table loaded at process start
    pub fn seeded() -> Self {
        Self::new(HashMap::from([
            (1, vec![2, 3, 5]),
            (2, vec![1, 4, 6]),
            (3, vec![1, 5, 7]),
            (4, vec![2, 6, 8]),
            (5, vec![1, 3, 7]),
        ]))
    }

    /// Ordered similar-product candidates; empty for unknown products
    pub fn similar_ids(&self, product_id: u64) -> Vec<u64> {
        self.entries.get(&product_id).cloned().unwrap_or_default()
    }
}
