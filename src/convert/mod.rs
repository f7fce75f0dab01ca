//! Conversion run: normalize export rows, resolve tickers, write the client
//! CSV.
//!
//! Rows are processed strictly in input order. The resolver cache fills as
//! rows are resolved, so later rows for an already-seen ISIN reuse the same
//! symbol; keeping the iteration sequential also keeps the log readable.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clients::Client;
use crate::csv_import::{parse_trade_file, TradeRow};
use crate::error::ConvertError;
use crate::quotes::SymbolSearch;
use crate::resolver::TickerResolver;

/// A trade row with its fields normalized for export.
#[derive(Debug, Clone)]
pub struct NormalizedTrade {
    /// Exchange-qualified symbol in the client's convention.
    pub ticker: String,
    /// Cost per share as a decimal string, in major units.
    pub cost: String,
    /// Signed share count; negative for anything but an opening buy.
    pub quantity: f64,
    /// Calendar date (YYYY-MM-DD) of the trade.
    pub date: String,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub path: String,
    pub trades_written: usize,
}

/// Convert a Trading212 export into `client`'s import format.
///
/// The output file is written only after every row has been resolved; a
/// malformed row aborts the run with no partial output.
pub async fn convert_export<S: SymbolSearch>(
    input: &Path,
    output: &Path,
    client: Client,
    resolver: &mut TickerResolver<S>,
) -> Result<ConversionResult, ConvertError> {
    let rows = parse_trade_file(input)?;
    log::info!("Parsed {} trades from {}", rows.len(), input.display());

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let isin = row.get("ISIN").unwrap_or_default();
        log::info!("({}/{}) resolving {}", i + 1, rows.len(), isin);

        let trade = normalize_row(row, client, resolver, i + 2).await?;
        records.push(client.shape_record(&trade, row));
    }

    write_records(output, client, &records)?;

    log::info!("Wrote {} trades to {}", records.len(), output.display());

    Ok(ConversionResult {
        path: output.display().to_string(),
        trades_written: records.len(),
    })
}

/// Normalize one export row for the target client.
///
/// GBX prices arrive in pence and are converted to pounds. The share count
/// is negated for every action other than an opening buy.
async fn normalize_row<S: SymbolSearch>(
    row: &TradeRow,
    client: Client,
    resolver: &mut TickerResolver<S>,
    line: usize,
) -> Result<NormalizedTrade, ConvertError> {
    let currency = row.get("Currency (Price / share)").unwrap_or_default();

    let mut cost = numeric_field(row, "Price / share", line)?;
    if currency == "GBX" {
        cost /= 100.0;
    }

    let mut quantity = numeric_field(row, "No. of shares", line)?;
    if row.get("Action") != Some("Market buy") {
        quantity = -quantity;
    }

    let isin = row.get("ISIN").unwrap_or_default();
    let raw_ticker = row.get("Ticker").unwrap_or_default();
    let ticker = resolver.resolve(client, currency, isin, raw_ticker).await;

    let date = row
        .get("Time")
        .unwrap_or_default()
        .split(' ')
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(NormalizedTrade {
        ticker,
        cost: cost.to_string(),
        quantity,
        date,
    })
}

fn numeric_field(row: &TradeRow, column: &str, line: usize) -> Result<f64, ConvertError> {
    let value = row.get(column).unwrap_or_default();
    value.parse().map_err(|_| {
        ConvertError::MalformedInput(format!(
            "line {}: '{}' is not a number in '{}'",
            line, value, column
        ))
    })
}

/// Write the shaped records under the client's header row.
fn write_records(
    path: &Path,
    client: Client,
    records: &[Vec<String>],
) -> Result<(), ConvertError> {
    let write_err = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_err)?;

    writeln!(file, "{}", client.template().headers.join(",")).map_err(write_err)?;
    for record in records {
        writeln!(file, "{}", record.join(",")).map_err(write_err)?;
    }

    Ok(())
}
