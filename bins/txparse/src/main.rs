//! txparse - Sui transaction balance change inspector
//!
//! # Usage
//!
//! ```bash
//! # Balance changes and gas cost of a mainnet transaction
//! txparse parse J5BzQREx52w3t75bFSZAy3uRpGne543vx251ZDf6LKmR
//!
//! # Balance changes of the objects held by a bag, as JSON
//! txparse --json bag J5BzQREx52w3t75bFSZAy3uRpGne543vx251ZDf6LKmR 0x64ac48a5...
//!
//! # Against a local node, retrying transport failures
//! txparse --network localnet --retries 3 parse <DIGEST>
//! ```
//!
//! Logs go to stderr and are controlled with `RUST_LOG` (warnings by default).

mod config;

use anyhow::Result;
use clap::Parser;
use config::{Command, Config, FileConfig};
use tracing_subscriber::EnvFilter;
use txparse::{format_amount, DynamicFieldBalanceChange, ParseResult, TxParseClient};
use txparse_jsonrpc::JsonRpcLedgerClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let file = FileConfig::load(config.config.as_deref())?;
    let client_config = config.client_config(file);
    tracing::info!(rpc_url = %client_config.rpc_url, "Using fullnode");

    let client = TxParseClient::new(JsonRpcLedgerClient::new(client_config)?);

    match &config.command {
        Command::Parse { digest } => {
            let result = client.parse_transaction(digest).await?;
            if config.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_parse_result(digest, &result);
            }
        }
        Command::Bag { digest, bag_id } => {
            let changes = client.bag_dynamic_field_balance_changes(digest, bag_id).await?;
            if config.json {
                println!("{}", serde_json::to_string_pretty(&changes)?);
            } else {
                print_bag_changes(bag_id, &changes);
            }
        }
    }

    Ok(())
}

fn print_parse_result(digest: &str, result: &ParseResult) {
    println!("Transaction {digest}");
    println!("Balance changes: {}", result.balance_changes.len());
    for change in &result.balance_changes {
        let owner = if change.owner.is_empty() {
            "-"
        } else {
            change.owner.as_str()
        };
        println!("  {owner}  {}  {}", change.coin_type, change.amount);
    }

    let gas = &result.gas_cost;
    println!("Gas cost:");
    println!("  computation:            {}", gas.computation_cost);
    println!("  storage:                {}", gas.storage_cost);
    println!("  storage rebate:         {}", gas.storage_rebate);
    println!("  non-refundable storage: {}", gas.non_refundable_storage_fee);
}

fn print_bag_changes(bag_id: &str, changes: &[DynamicFieldBalanceChange]) {
    println!("Bag {bag_id}");
    if changes.is_empty() {
        println!("No balance changes");
        return;
    }

    for change in changes {
        let scaled = |raw: &str| match format_amount(raw, change.decimals) {
            Some(display) => format!("{raw} ({display})"),
            None => raw.to_string(),
        };
        println!("  {} (decimals {})", change.coin_type, change.decimals);
        println!("    previous: {}", scaled(&change.previous_value));
        println!("    current:  {}", scaled(&change.current_value));
        println!("    diff:     {}", scaled(&change.value_diff));
    }
}
