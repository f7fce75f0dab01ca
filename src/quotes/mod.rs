//! Symbol-search providers.
//!
//! One provider is implemented (Yahoo Finance). The trait keeps the ticker
//! resolver independent of the transport so tests can script lookups and a
//! future implementation can batch or de-duplicate in-flight requests.

pub mod yahoo;

use anyhow::Result;
use async_trait::async_trait;

/// One quote returned by a symbol search, best match first.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub symbol: String,
    pub name: Option<String>,
    pub exchange: Option<String>,
}

/// A service resolving a free-text query (here: an ISIN) to listed symbols.
#[async_trait]
pub trait SymbolSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}
