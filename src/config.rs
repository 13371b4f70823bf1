//! Process configuration.
//!
//! Every option can be given as a flag or through its environment variable.
//! The parsed [`Config`] is built once in `main` and passed down explicitly.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, ValueEnum};

use crate::error::ConfigError;
use crate::handlers::Operation;
use crate::store::DEFAULT_TABLE;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "product_catalog",
    version,
    about = "Serve one product catalog operation"
)]
pub struct Config {
    /// Which handler this process serves.
    #[arg(long, env = "CATALOG_OPERATION", value_enum)]
    pub operation: Operation,

    #[command(flatten)]
    pub store: StoreConfig,

    #[command(flatten)]
    pub log: LogConfig,

    /// Handle a single event from this file (`-` for stdin) and print the
    /// response instead of running the invocation loop.
    #[arg(long)]
    pub event: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StoreConfig {
    #[arg(long = "store", env = "CATALOG_STORE", value_enum, default_value_t = StoreBackend::Dynamodb)]
    pub backend: StoreBackend,

    #[arg(long, env = "CATALOG_TABLE", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Overrides the SDK region chain.
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Points the client at a local table (e.g. DynamoDB Local).
    #[arg(long, env = "CATALOG_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// PEM bundle trusted for TLS to the store.
    #[arg(long, env = "CATALOG_CA_BUNDLE")]
    pub ca_bundle: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct LogConfig {
    #[arg(long = "log-level", env = "CATALOG_LOG_LEVEL", value_enum, default_value_t = LogLevel::Off)]
    pub level: LogLevel,

    #[arg(long = "log-sink", env = "CATALOG_LOG_SINK", value_enum, default_value_t = LogSink::Stderr)]
    pub sink: LogSink,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    Dynamodb,
    Memory,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogSink {
    Stdout,
    Stderr,
}

impl StoreConfig {
    /// The CA bundle to trust, if any. Always `None` for the in-memory backend.
    pub fn ca_bundle_for_backend(&self) -> Result<Option<&Path>, ConfigError> {
        match self.backend {
            StoreBackend::Dynamodb => self.check_ca_bundle(),
            StoreBackend::Memory => Ok(None),
        }
    }

    /// Fails when a CA bundle is configured but does not exist on disk.
    pub fn check_ca_bundle(&self) -> Result<Option<&Path>, ConfigError> {
        match &self.ca_bundle {
            Some(path) if !path.is_file() => {
                Err(ConfigError::MissingCaBundle(path.display().to_string()))
            }
            Some(path) => Ok(Some(path.as_path())),
            None => Ok(None),
        }
    }
}
