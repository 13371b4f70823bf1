//! DynamoDB-backed item store.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::{debug, error, instrument};

use crate::config::StoreConfig;
use crate::domain::attributes::{self, from_item, to_item};
use crate::domain::Product;
use crate::error::StoreError;
use crate::store::ItemStore;

/// One table, one SDK client. Built once at startup and shared by every invocation.
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Loads SDK configuration from the environment (credentials, region chain)
    /// and applies the explicit overrides from `config`.
    #[instrument(skip(config), fields(table = %config.table))]
    pub async fn connect(config: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), "Loaded SDK configuration");
        Self::new(Client::new(&sdk_config), config.table.clone())
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

fn backend_error<E: std::error::Error>(operation: &str, err: E) -> StoreError {
    let cause = DisplayErrorContext(err).to_string();
    error!(operation, error = %cause, "Store operation failed");
    StoreError::Backend(format!("{}: {}", operation, cause))
}

#[async_trait]
impl ItemStore for DynamoStore {
    #[instrument(skip(self, product), fields(table = %self.table, product_id = %product.id))]
    async fn put(&self, product: Product) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(to_item(&product)))
            .send()
            .await
            .map_err(|e| backend_error("PutItem", e))?;
        debug!("Product stored");
        Ok(())
    }

    #[instrument(skip(self), fields(table = %self.table))]
    async fn get_by_id(&self, id: String) -> Result<Option<Product>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(attributes::ID, AttributeValue::S(id))
            .send()
            .await
            .map_err(|e| backend_error("GetItem", e))?;

        match output.item {
            Some(item) if !item.is_empty() => from_item(&item).map(Some),
            _ => {
                debug!("Product not found");
                Ok(None)
            }
        }
    }

    /// Follows `LastEvaluatedKey` until the table is exhausted so callers always
    /// get the full catalog in one piece.
    #[instrument(skip(self), fields(table = %self.table))]
    async fn scan_all(&self) -> Result<Vec<Product>, StoreError> {
        let mut products = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| backend_error("Scan", e))?;

            for item in output.items() {
                products.push(from_item(item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(product_count = products.len(), "Scanned table");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::operation::get_item::{GetItemError, GetItemOutput};
    use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
    use aws_sdk_dynamodb::operation::scan::ScanOutput;
    use aws_sdk_dynamodb::types::error::{
        ProvisionedThroughputExceededException, ResourceNotFoundException,
    };
    use aws_smithy_mocks::{mock, mock_client};
    use std::collections::HashMap;

    fn widget() -> Product {
        Product::new("p1", "Widget", "A simple widget")
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let rule = mock!(Client::get_item)
            .match_requests(|r| {
                r.table_name() == Some("ProductCatalog")
                    && r.key().and_then(|k| k.get("id")) == Some(&AttributeValue::S("p1".to_string()))
            })
            .then_output(|| GetItemOutput::builder().set_item(Some(to_item(&widget()))).build());
        let store = DynamoStore::new(mock_client!(aws_sdk_dynamodb, &[&rule]), "ProductCatalog");

        let found = store.get_by_id("p1".to_string()).await.unwrap();
        assert_eq!(found, Some(widget()));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_and_empty_item() {
        let missing = mock!(Client::get_item).then_output(|| GetItemOutput::builder().build());
        let empty = mock!(Client::get_item)
            .then_output(|| GetItemOutput::builder().set_item(Some(HashMap::new())).build());
        let store = DynamoStore::new(
            mock_client!(aws_sdk_dynamodb, &[&missing, &empty]),
            "ProductCatalog",
        );

        assert_eq!(store.get_by_id("nope".to_string()).await.unwrap(), None);
        assert_eq!(store.get_by_id("nope".to_string()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_by_id_backend_failure() {
        let rule = mock!(Client::get_item).then_error(|| {
            GetItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("table missing")
                    .build(),
            )
        });
        let store = DynamoStore::new(mock_client!(aws_sdk_dynamodb, &[&rule]), "ProductCatalog");

        let result = store.get_by_id("p1".to_string()).await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_put_writes_all_attributes() {
        let rule = mock!(Client::put_item)
            .match_requests(|r| r.item() == Some(&to_item(&widget())))
            .then_output(|| PutItemOutput::builder().build());
        let store = DynamoStore::new(mock_client!(aws_sdk_dynamodb, &[&rule]), "ProductCatalog");

        store.put(widget()).await.unwrap();
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_put_throttled() {
        let rule = mock!(Client::put_item).then_error(|| {
            PutItemError::ProvisionedThroughputExceededException(
                ProvisionedThroughputExceededException::builder()
                    .message("slow down")
                    .build(),
            )
        });
        let store = DynamoStore::new(mock_client!(aws_sdk_dynamodb, &[&rule]), "ProductCatalog");

        assert!(matches!(store.put(widget()).await, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_scan_follows_last_evaluated_key() {
        let first_page = mock!(Client::scan)
            .match_requests(|r| r.exclusive_start_key().is_none())
            .then_output(|| {
                ScanOutput::builder()
                    .items(to_item(&widget()))
                    .set_last_evaluated_key(Some(HashMap::from([(
                        "id".to_string(),
                        AttributeValue::S("p1".to_string()),
                    )])))
                    .build()
            });
        let second_page = mock!(Client::scan)
            .match_requests(|r| r.exclusive_start_key().is_some())
            .then_output(|| {
                ScanOutput::builder()
                    .items(to_item(&Product::new("p2", "Gadget", "A gadget")))
                    .build()
            });
        let store = DynamoStore::new(
            mock_client!(aws_sdk_dynamodb, &[&first_page, &second_page]),
            "ProductCatalog",
        );

        let products = store.scan_all().await.unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_scan_with_corrupt_record_fails() {
        let rule = mock!(Client::scan).then_output(|| {
            ScanOutput::builder()
                .items(HashMap::from([(
                    "id".to_string(),
                    AttributeValue::S("p1".to_string()),
                )]))
                .build()
        });
        let store = DynamoStore::new(mock_client!(aws_sdk_dynamodb, &[&rule]), "ProductCatalog");

        assert!(matches!(
            store.scan_all().await,
            Err(StoreError::CorruptRecord(_))
        ));
    }
}
