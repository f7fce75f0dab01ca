//! CSV parsing for Trading212 transaction exports.
//!
//! Exports are comma separated with a single header row. Data lines are
//! split on plain commas and zipped with the headers; quoted fields are not
//! supported, as the columns this tool reads are never quoted by the broker.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ConvertError;

/// Columns every export must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Ticker",
    "ISIN",
    "Action",
    "Price / share",
    "Currency (Price / share)",
    "No. of shares",
    "Time",
];

/// One export row as a column name to value mapping.
#[derive(Debug, Clone)]
pub struct TradeRow {
    fields: HashMap<String, String>,
}

impl TradeRow {
    /// Value of a column, if present and non-empty.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Parse a Trading212 export file into rows.
pub fn parse_trade_file(path: &Path) -> Result<Vec<TradeRow>, ConvertError> {
    let content = fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&content)
}

/// Parse export content into rows.
///
/// The first line is the header row; every data line must have exactly as
/// many fields as the header.
pub fn parse_records(content: &str) -> Result<Vec<TradeRow>, ConvertError> {
    let lines: Vec<&str> = content.trim().lines().collect();

    if lines.len() < 2 {
        return Err(ConvertError::MalformedInput(
            "export must contain a header row and at least one trade".to_string(),
        ));
    }

    let headers: Vec<String> = lines[0].split(',').map(|h| h.trim().to_string()).collect();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(ConvertError::MalformedInput(format!(
                "missing required column '{}'",
                required
            )));
        }
    }

    let mut rows = Vec::with_capacity(lines.len() - 1);

    for (line_idx, line) in lines.iter().enumerate().skip(1) {
        let values: Vec<&str> = line.split(',').collect();

        if values.len() != headers.len() {
            return Err(ConvertError::MalformedInput(format!(
                "line {}: {} fields, expected {}",
                line_idx + 1,
                values.len(),
                headers.len()
            )));
        }

        let fields = headers
            .iter()
            .zip(values.iter())
            .map(|(h, v)| (h.clone(), v.trim().to_string()))
            .collect();

        rows.push(TradeRow { fields });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Action,Time,ISIN,Ticker,No. of shares,Price / share,Currency (Price / share)";

    #[test]
    fn test_parse_valid_export() {
        let content = format!(
            "{}\nMarket buy,2023-05-01 10:00:00,GB00B1XZS820,AAF,10,150,GBX",
            HEADER
        );
        let rows = parse_records(&content).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Ticker"), Some("AAF"));
        assert_eq!(rows[0].get("Action"), Some("Market buy"));
        assert_eq!(rows[0].get("Price / share"), Some("150"));
    }

    #[test]
    fn test_empty_value_reads_as_none() {
        let header = format!("{},Stamp duty reserve tax", HEADER);
        let content = format!(
            "{}\nMarket buy,2023-05-01 10:00:00,GB00B1XZS820,AAF,10,150,GBX,",
            header
        );
        let rows = parse_records(&content).unwrap();
        assert_eq!(rows[0].get("Stamp duty reserve tax"), None);
    }

    #[test]
    fn test_header_only_is_malformed() {
        let err = parse_records(HEADER).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedInput(_)));
    }

    #[test]
    fn test_field_count_mismatch_is_malformed() {
        let content = format!("{}\nMarket buy,2023-05-01 10:00:00,GB00B1XZS820", HEADER);
        let err = parse_records(&content).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedInput(_)));
    }

    #[test]
    fn test_missing_required_column_is_malformed() {
        let content = "Action,Time,ISIN\nMarket buy,2023-05-01 10:00:00,GB00B1XZS820";
        let err = parse_records(content).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Ticker"), "unexpected error: {}", message);
    }

    #[test]
    fn test_trailing_newline_ignored() {
        let content = format!(
            "{}\nMarket buy,2023-05-01 10:00:00,GB00B1XZS820,AAF,10,150,GBX\n",
            HEADER
        );
        assert_eq!(parse_records(&content).unwrap().len(), 1);
    }
}
