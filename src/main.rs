//! `rize` command line entry point.
//!
//! Runs one read-only call against the configured environment and prints the
//! JSON result.

use std::env;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rize_client::domain::{CustomerListQuery, DocumentListQuery, TransactionListQuery};
use rize_client::{RizeClient, RizeConfig};

const USAGE: &str = "usage: rize <command>

commands:
  customers                  list Customers
  customer <uid>             show one Customer
  workflow <customer_uid>    show the latest Compliance Workflow of a Customer
  transactions               list Transactions
  documents                  list statement Documents

environment:
  RIZE_PROGRAM_ID, RIZE_HMAC             credentials (required)
  RIZE_ENVIRONMENT                       sandbox | integration | production
  RIZE_TIMEOUT_MS                        request timeout, default 80000";

/// One parsed invocation
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Customers,
    Customer(String),
    Workflow(String),
    Transactions,
    Documents,
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        match args {
            [cmd] if cmd == "customers" => Ok(Self::Customers),
            [cmd, uid] if cmd == "customer" => Ok(Self::Customer(uid.clone())),
            [cmd, uid] if cmd == "workflow" => Ok(Self::Workflow(uid.clone())),
            [cmd] if cmd == "transactions" => Ok(Self::Transactions),
            [cmd] if cmd == "documents" => Ok(Self::Documents),
            _ => bail!("{USAGE}"),
        }
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to render response")?
    );
    Ok(())
}

async fn run(client: &RizeClient, command: Command) -> Result<()> {
    match command {
        Command::Customers => {
            print_json(&client.customer.get_list(&CustomerListQuery::default()).await?)
        }
        Command::Customer(uid) => print_json(&client.customer.get(&uid).await?),
        Command::Workflow(customer_uid) => print_json(
            &client
                .compliance_workflow
                .view_latest(&customer_uid)
                .await?,
        ),
        Command::Transactions => print_json(
            &client
                .transaction
                .get_list(&TransactionListQuery::default())
                .await?,
        ),
        Command::Documents => {
            print_json(&client.document.get_list(&DocumentListQuery::default()).await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = RizeConfig::from_env().context("Failed to load Rize configuration")?;
    info!(
        environment = %config.environment,
        "rize v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client = RizeClient::new(config)?;
    run(&client, command).await
}
