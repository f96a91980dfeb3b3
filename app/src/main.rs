//! `products` -- form-and-table client for the shared product collection.
//!
//! # Environment variables
//!
//! | Variable       | Required | Description                              |
//! |----------------|----------|------------------------------------------|
//! | `API_BASE_URL` | yes      | Backend base address                     |
//! | `INSTANCE_ID`  | yes      | Sent as the `Instance` query parameter   |
//! | `API_TOKEN`    | no       | Bearer token for the `Authorization` header |

use anyhow::Context;
use clap::Parser;
use product_app::cli::{self, Cli, Commands};
use product_app::{ProductApi, ProductPage, UreqTransport};
use product_core::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_app=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let args = Cli::parse();
    let config = ClientConfig::from_env().context("failed to resolve configuration")?;
    tracing::debug!(
        base_url = %config.base_url,
        instance = %config.instance_id,
        auth = config.token.is_some(),
        "configuration resolved"
    );

    let mut page = ProductPage::new(ProductApi::new(config, UreqTransport::new()));
    cli::run(args.command.unwrap_or(Commands::Shell), &mut page)
}
