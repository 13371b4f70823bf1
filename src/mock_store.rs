//! # Mock Store
//!
//! Utilities for testing handlers against a scripted store.
//!
//! Use [`create_mock_store`] to get a [`StoreClient`] and the receiver behind it.
//! Then use [`expect_get`], [`expect_put`] or [`expect_scan`] to assert what
//! the handler asked for and answer with whatever the test needs, failures included.

use tokio::sync::{mpsc, oneshot};

use crate::domain::Product;
use crate::error::StoreError;
use crate::store::memory::{StoreClient, StoreRequest};

type Responder<T> = oneshot::Sender<Result<T, StoreError>>;

/// Creates a store client whose requests land on the returned receiver
/// instead of a running `StoreService`.
pub fn create_mock_store(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Responder<Option<Product>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Put request
pub async fn expect_put(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(Product, Responder<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Put { product, respond_to }) => Some((product, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Scan request
pub async fn expect_scan(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<Responder<Vec<Product>>> {
    match receiver.recv().await {
        Some(StoreRequest::Scan { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ItemStore;

    #[tokio::test]
    async fn test_mock_store() {
        let (client, mut receiver) = create_mock_store(10);

        let get_task = tokio::spawn(async move { client.get_by_id("p1".to_string()).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "p1");
        responder.send(Ok(None)).unwrap();

        let result = get_task.await.unwrap();
        assert_eq!(result, Ok(None));
    }
}
