mod app_system;
mod config;
mod domain;
mod error;
mod handlers;
mod id;
mod runtime;
mod store;
mod validation;

#[cfg(test)]
mod mock_store;

use clap::Parser;
use tracing::{error, info};

use crate::app_system::{setup_tracing, CatalogSystem};
use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

fn main() -> Result<(), BoxError> {
    let config = Config::parse();
    setup_tracing(&config.log)?;

    // The TLS stack reads SSL_CERT_FILE when the SDK client is built. Export it
    // before the runtime starts any threads.
    if let Some(path) = config.store.ca_bundle_for_backend()? {
        info!(ca_bundle = %path.display(), "Using CA bundle");
        std::env::set_var("SSL_CERT_FILE", path);
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve(config))
}

async fn serve(config: Config) -> Result<(), BoxError> {
    info!(operation = %config.operation, "Starting product catalog");

    let system = CatalogSystem::start(&config.store).await?;

    let result = match &config.event {
        Some(path) => {
            match runtime::run_single_event(&system.handler, config.operation, path).await {
                Ok(response) => {
                    println!("{}", serde_json::to_string(&response)?);
                    Ok(())
                }
                Err(e) => Err(BoxError::from(e)),
            }
        }
        None => runtime::run(system.handler.clone(), config.operation).await,
    };

    if let Err(e) = &result {
        error!(error = %e, "Catalog stopped with an error");
    }

    system.shutdown().await;
    info!("Application completed");
    result
}
