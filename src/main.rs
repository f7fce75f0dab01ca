//! Trading212 export converter
//!
//! Converts a Trading212 transaction CSV into the import format of a
//! downstream portfolio client.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use t212_convert::clients::Client;
use t212_convert::convert::convert_export;
use t212_convert::quotes::yahoo::YahooSearch;
use t212_convert::resolver::TickerResolver;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "t212-convert")]
#[command(about = "Convert Trading212 exports for portfolio trackers", long_about = None)]
struct Args {
    /// Path to the Trading212 CSV export
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Path of the CSV file to write
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Target client ("div-tracker" or "stock-events")
    #[arg(short, long, value_name = "CLIENT")]
    client: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let client = match Client::from_str(&args.client) {
        Some(c) => c,
        None => bail!(
            "Unknown client '{}' (expected div-tracker or stock-events)",
            args.client
        ),
    };

    info!(
        "Converting {} for {}",
        args.input.display(),
        client.template().name
    );

    let search = YahooSearch::new().context("Failed to create search client")?;
    let mut resolver = TickerResolver::new(search);

    let result = convert_export(&args.input, &args.output, client, &mut resolver).await?;

    info!(
        "Conversion complete: {} trades -> {}",
        result.trades_written, result.path
    );
    Ok(())
}
