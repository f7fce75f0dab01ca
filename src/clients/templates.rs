//! Export templates for the supported downstream clients.
//!
//! Contains the header schema and exchange-suffix mapping each client
//! expects.

/// A client template: output header schema plus suffix handling.
#[derive(Debug, Clone)]
pub struct ClientTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Output header row, in column order.
    pub headers: &'static [&'static str],
    /// Suffix used when a lookup falls back or a market code is unknown.
    pub default_suffix: &'static str,
    /// Maps a Yahoo market-code suffix to the client's exchange suffix.
    pub suffix_map: &'static [(&'static str, &'static str)],
}

// ============================================================================
// Client Templates
// ============================================================================

/// Dividend-tracker template
pub(super) const DIV_TRACKER: ClientTemplate = ClientTemplate {
    id: "div-tracker",
    name: "DIV Tracker",
    description: "Dividend tracker transaction import",
    headers: &["Ticker", "Quantity", "Cost Per Share", "Date", "Commission"],
    default_suffix: "GB",
    suffix_map: &[("PA", "FR"), ("MC", "ES")],
};

/// Stock Events template
pub(super) const STOCK_EVENTS: ClientTemplate = ClientTemplate {
    id: "stock-events",
    name: "Stock Events",
    description: "Stock Events portfolio import",
    headers: &["Symbol", "Date", "Quantity", "Price"],
    default_suffix: "LSE",
    suffix_map: &[("PA", "PA"), ("MC", "MC")],
};
