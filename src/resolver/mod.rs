//! Ticker resolution.
//!
//! Maps a Trading212 position (ISIN + raw ticker) to the exchange-qualified
//! symbol a downstream client expects. Yahoo search results are not
//! consistent about market-code suffixes, so every resolved symbol is
//! re-suffixed through the client's mapping table.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::clients::Client;
use crate::quotes::SymbolSearch;

/// Tickers the search service is known to mishandle; these skip the lookup
/// and take the default-suffix fallback directly.
const EXCLUSIONS: &[&str] = &["SSHY", "VUSC"];

static ISIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[A-Z0-9]{9}[0-9]$").expect("valid ISIN regex"));

/// Resolves symbols for one conversion run.
///
/// Owns the per-run ISIN cache: once a lookup for an ISIN succeeds, every
/// later row with that ISIN reuses the same symbol without another request.
pub struct TickerResolver<S> {
    search: S,
    cache: HashMap<String, String>,
}

impl<S: SymbolSearch> TickerResolver<S> {
    pub fn new(search: S) -> Self {
        Self {
            search,
            cache: HashMap::new(),
        }
    }

    /// A resolver with a pre-seeded ISIN cache.
    pub fn with_cache(search: S, cache: HashMap<String, String>) -> Self {
        Self { search, cache }
    }

    /// Resolve the client-facing symbol for one position.
    ///
    /// Never fails: any lookup problem degrades to the raw ticker with the
    /// client's default suffix. The fallback is not cached, so a later row
    /// for the same ISIN retries the lookup.
    pub async fn resolve(
        &mut self,
        client: Client,
        currency: &str,
        isin: &str,
        raw_ticker: &str,
    ) -> String {
        // US listings already carry the symbol both clients expect.
        if currency == "USD" {
            return raw_ticker.to_string();
        }

        if let Some(symbol) = self.cache.get(isin) {
            return symbol.clone();
        }

        if EXCLUSIONS.contains(&raw_ticker) {
            return format!("{}.{}", raw_ticker, client.default_suffix());
        }

        if !ISIN_RE.is_match(isin) {
            log::debug!("query '{}' for {} does not look like an ISIN", isin, raw_ticker);
        }

        match self.lookup(client, isin).await {
            Ok(symbol) => {
                self.cache.insert(isin.to_string(), symbol.clone());
                symbol
            }
            Err(e) => {
                log::warn!("Symbol lookup failed for {} ({}): {}", raw_ticker, isin, e);
                format!("{}.{}", raw_ticker, client.default_suffix())
            }
        }
    }

    async fn lookup(&self, client: Client, isin: &str) -> anyhow::Result<String> {
        let hits = self.search.search(isin).await?;
        let hit = hits
            .first()
            .ok_or_else(|| anyhow::anyhow!("no quotes returned"))?;
        Ok(apply_suffix(client, &hit.symbol))
    }
}

/// Re-suffix a Yahoo symbol into the client's convention.
///
/// `BASE.CODE` maps `CODE` through the client's suffix table (default when
/// unknown); a symbol without a market code passes through verbatim.
fn apply_suffix(client: Client, symbol: &str) -> String {
    match symbol.split_once('.') {
        Some((base, code)) => format!("{}.{}", base, client.suffix_for(code)),
        None => symbol.to_string(),
    }
}
