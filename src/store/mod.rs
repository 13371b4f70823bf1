//! Item store adapters.
//!
//! Handlers only see [`ItemStore`]. Two backends implement it: the
//! [`memory`] actor for local runs and tests, and [`dynamodb`] for the real table.

pub mod dynamodb;
pub mod memory;

use async_trait::async_trait;

use crate::domain::Product;
use crate::error::StoreError;

pub use dynamodb::DynamoStore;
pub use memory::{StoreClient, StoreService};

/// Default logical collection holding the catalog.
pub const DEFAULT_TABLE: &str = "ProductCatalog";

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Unconditional upsert keyed by `product.id`. Last writer wins.
    async fn put(&self, product: Product) -> Result<(), StoreError>;

    /// Point lookup. `Ok(None)` means the id has never been written.
    async fn get_by_id(&self, id: String) -> Result<Option<Product>, StoreError>;

    /// Every stored product, in whatever order the backend returns them.
    async fn scan_all(&self) -> Result<Vec<Product>, StoreError>;
}
