//! Yahoo Finance symbol search.
//!
//! Queries the public quote-search endpoint. Searching by ISIN returns the
//! listings Yahoo knows for that security, primary listing first.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use super::{SearchHit, SymbolSearch};

const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Yahoo Finance symbol-search client.
#[derive(Debug, Clone)]
pub struct YahooSearch {
    client: reqwest::Client,
}

impl YahooSearch {
    /// HTTP client with the headers Yahoo expects.
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }
}

/// Search response from Yahoo Finance
#[derive(Debug, serde::Deserialize)]
struct SearchResponse {
    quotes: Option<Vec<SearchQuote>>,
}

#[derive(Debug, serde::Deserialize)]
struct SearchQuote {
    symbol: String,
    shortname: Option<String>,
    longname: Option<String>,
    exchange: Option<String>,
}

#[async_trait]
impl SymbolSearch for YahooSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = format!(
            "{}?q={}&lang=en-GB&region=GB&quotesCount=6&newsCount=0",
            SEARCH_URL,
            urlencoding::encode(query)
        );
        log::debug!("Yahoo search for: {}", query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Yahoo search request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Yahoo search error: {}", response.status()));
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse Yahoo search response: {}", e))?;

        let results = data
            .quotes
            .unwrap_or_default()
            .into_iter()
            .map(|q| SearchHit {
                symbol: q.symbol,
                name: q.longname.or(q.shortname),
                exchange: q.exchange,
            })
            .collect();

        Ok(results)
    }
}
