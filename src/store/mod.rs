mod products;

pub use products::ProductStore;
