//! Output clients and their export templates.
//!
//! Each client is one variant of [`Client`] carrying a static
//! [`ClientTemplate`] with its header schema and exchange-suffix mapping.

mod templates;

pub use templates::ClientTemplate;

use crate::convert::NormalizedTrade;
use crate::csv_import::TradeRow;

/// A supported downstream client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Client {
    DivTracker,
    StockEvents,
}

impl Client {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "div-tracker" | "divtracker" => Some(Self::DivTracker),
            "stock-events" | "stockevents" => Some(Self::StockEvents),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.template().id
    }

    /// The client's export template.
    pub fn template(&self) -> &'static ClientTemplate {
        match self {
            Self::DivTracker => &templates::DIV_TRACKER,
            Self::StockEvents => &templates::STOCK_EVENTS,
        }
    }

    /// Suffix appended when no lookup result is available.
    pub fn default_suffix(&self) -> &'static str {
        self.template().default_suffix
    }

    /// Translate a Yahoo market code into the client's exchange suffix.
    /// Unknown codes map to the default suffix.
    pub fn suffix_for(&self, market_code: &str) -> &'static str {
        self.template()
            .suffix_map
            .iter()
            .find(|(code, _)| *code == market_code)
            .map(|(_, suffix)| *suffix)
            .unwrap_or(self.template().default_suffix)
    }

    /// Shape a normalized trade into the client's output record, in the
    /// template's column order.
    pub fn shape_record(&self, trade: &NormalizedTrade, row: &TradeRow) -> Vec<String> {
        match self {
            Self::DivTracker => {
                let conversion_fee = fee_field(row, "Currency conversion fee (GBP)");
                let stamp_duty = fee_field(row, "Stamp duty reserve tax");
                vec![
                    trade.ticker.clone(),
                    trade.quantity.to_string(),
                    trade.cost.clone(),
                    trade.date.clone(),
                    (conversion_fee + stamp_duty).to_string(),
                ]
            }
            Self::StockEvents => vec![
                trade.ticker.clone(),
                trade.date.clone(),
                trade.quantity.to_string(),
                trade.cost.clone(),
            ],
        }
    }
}

/// Optional fee column; absent, empty or unparsable values count as zero.
fn fee_field(row: &TradeRow, column: &str) -> f64 {
    row.get(column)
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Client::from_str("div-tracker"), Some(Client::DivTracker));
        assert_eq!(Client::from_str("STOCK-EVENTS"), Some(Client::StockEvents));
        assert_eq!(Client::from_str("quicken"), None);
    }

    #[test]
    fn test_suffix_mapping() {
        assert_eq!(Client::DivTracker.suffix_for("PA"), "FR");
        assert_eq!(Client::DivTracker.suffix_for("MC"), "ES");
        assert_eq!(Client::StockEvents.suffix_for("PA"), "PA");
    }

    #[test]
    fn test_unknown_market_code_uses_default() {
        assert_eq!(Client::DivTracker.suffix_for("AS"), "GB");
        assert_eq!(Client::StockEvents.suffix_for("AS"), "LSE");
    }

    #[test]
    fn test_header_schemas() {
        assert_eq!(
            Client::DivTracker.template().headers,
            &["Ticker", "Quantity", "Cost Per Share", "Date", "Commission"]
        );
        assert_eq!(
            Client::StockEvents.template().headers,
            &["Symbol", "Date", "Quantity", "Price"]
        );
    }
}
