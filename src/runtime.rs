//! Invocation dispatch.
//!
//! In production the Lambda runtime delivers events one at a time; locally a
//! single event can be fed from a file or stdin. Either way the handler sees the
//! raw payload and returns a complete [`ApiResponse`], never an error.

use std::path::Path;
use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::{info, info_span, Instrument};

use crate::error::ConfigError;
use crate::handlers::{ApiResponse, CatalogHandler, Operation};
use crate::store::ItemStore;

/// Serves `operation` for every event the runtime delivers until it stops.
pub async fn run<S>(handler: Arc<CatalogHandler<S>>, operation: Operation) -> Result<(), Error>
where
    S: ItemStore + 'static,
{
    info!(operation = %operation, "Waiting for invocations");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move { dispatch(&handler, operation, event).await }
    }))
    .await
}

pub async fn dispatch<S: ItemStore>(
    handler: &CatalogHandler<S>,
    operation: Operation,
    event: LambdaEvent<Value>,
) -> Result<ApiResponse, Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("invocation", request_id = %context.request_id);

    let response = handler
        .handle(operation, &payload.to_string())
        .instrument(span)
        .await;
    Ok(response)
}

/// Handles one event read from `path` (`-` means stdin).
pub async fn run_single_event<S: ItemStore>(
    handler: &CatalogHandler<S>,
    operation: Operation,
    path: &Path,
) -> Result<ApiResponse, ConfigError> {
    let payload = if path == Path::new("-") {
        let mut payload = String::new();
        tokio::io::stdin().read_to_string(&mut payload).await?;
        payload
    } else {
        tokio::fs::read_to_string(path).await?
    };

    Ok(handler.handle(operation, &payload).await)
}
