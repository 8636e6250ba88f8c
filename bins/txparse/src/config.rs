//! Configuration for the txparse CLI

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use txparse_jsonrpc::{JsonRpcClientConfig, Network};

/// Sui transaction parser
///
/// Prints balance changes and gas cost of a transaction, or the balance changes of the
/// objects held by a bag.
#[derive(Parser, Debug)]
#[command(name = "txparse")]
#[command(about = "Parse Sui transaction balance changes", long_about = None)]
pub struct Config {
    /// Sui fullnode JSON-RPC URL (takes precedence over --network)
    #[arg(long, env = "SUI_RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Public network whose fullnode to use when no URL is given
    #[arg(long, global = true)]
    pub network: Option<Network>,

    /// TOML file with RPC client settings
    ///
    /// Keys: rpc_url, request_retry, request_backoff_ms, max_backoff_ms, timeout_ms.
    /// `TXPARSE_*` environment variables override the file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Retries of failed HTTP requests
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Balance changes and gas cost of a transaction
    Parse {
        /// Transaction digest
        digest: String,
    },
    /// Balance changes of the dynamic fields of a bag
    Bag {
        /// Transaction digest
        digest: String,
        /// Object id of the bag
        bag_id: String,
    },
}

/// Settings read from the optional config file and `TXPARSE_*` variables.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub request_retry: Option<u32>,
    #[serde(default)]
    pub request_backoff_ms: Option<u64>,
    #[serde(default)]
    pub max_backoff_ms: Option<u64>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigLoader::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let loaded = builder
            .add_source(Environment::with_prefix("TXPARSE").try_parsing(true))
            .build()?;
        Ok(loaded.try_deserialize()?)
    }
}

impl Config {
    /// Merges CLI flags over the file settings. URL precedence: `--rpc-url`/`SUI_RPC_URL`,
    /// `--network`, file, mainnet.
    pub fn client_config(&self, file: FileConfig) -> JsonRpcClientConfig {
        let rpc_url = self
            .rpc_url
            .clone()
            .or_else(|| self.network.map(|n| n.fullnode_url().to_string()))
            .or(file.rpc_url)
            .unwrap_or_else(|| Network::Mainnet.fullnode_url().to_string());

        JsonRpcClientConfig {
            rpc_url,
            request_retry: self.retries.or(file.request_retry),
            request_backoff_ms: file.request_backoff_ms,
            max_backoff_ms: file.max_backoff_ms,
            timeout_ms: file.timeout_ms,
        }
    }
}
