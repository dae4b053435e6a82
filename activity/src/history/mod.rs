//! Account history retrieval from the Hive Engine history service.
//!
//! This module provides:
//! - [`HistoryFetcher`] - Drains the offset-paginated `accountHistory` feed into memory
//! - [`HistoryPageSource`] - The per-page request seam, implemented over HTTP by
//!   [`HiveEngineHistoryClient`]
//! - [`timestamp`] - Epoch timestamp rendering for export

mod client;
pub mod timestamp;

pub use client::HiveEngineHistoryClient;
pub use timestamp::{normalize_all, normalize_timestamp};

use {
    crate::error::ActivityResult,
    async_trait::async_trait,
    serde::Serialize,
    serde_json::{Map, Value},
};

/// A record as returned by upstream. Keys keep their arrival order.
pub type RawRecord = Map<String, Value>;

/// Query parameters for one page of account history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub account: String,
    pub symbol: String,
    pub limit: usize,
    pub offset: usize,
}

/// Something that can serve one page of account history.
#[async_trait]
pub trait HistoryPageSource {
    /// Fetches the records for `request`. An empty page means there is no more data.
    async fn fetch_page(&self, request: &PageRequest) -> ActivityResult<Vec<RawRecord>>;
}

/// Sequential offset/limit paginator.
///
/// Pages are requested one at a time; a page shorter than `limit` (or empty) ends the
/// fetch. The first failing page also ends it, keeping everything gathered so far.
pub struct HistoryFetcher<S> {
    source: S,
    limit: usize,
}

impl<S: HistoryPageSource> HistoryFetcher<S> {
    /// Creates a fetcher that requests `limit` records per page.
    pub fn new(source: S, limit: usize) -> Self {
        Self {
            source,
            limit: limit.max(1),
        }
    }

    /// Fetches the complete history of `symbol` for `account`.
    ///
    /// # Arguments
    ///
    /// * `account` - Account name, passed upstream unvalidated
    /// * `symbol` - Token symbol, passed upstream unvalidated
    ///
    /// # Returns
    ///
    /// Every record in arrival order. Never fails: on a transport or payload error the
    /// records collected before the failing page are returned and the error is logged.
    pub async fn fetch_all(&self, account: &str, symbol: &str) -> Vec<RawRecord> {
        log::info!("Fetching history for account: {account}, symbol: {symbol}...");

        let mut request = PageRequest {
            account: account.to_string(),
            symbol: symbol.to_string(),
            limit: self.limit,
            offset: 0,
        };
        let mut all_records: Vec<RawRecord> = Vec::new();

        loop {
            let page = match self.source.fetch_page(&request).await {
                Ok(page) => page,
                Err(e) => {
                    log::error!(
                        "History fetch stopped at offset {}: {e} (keeping {} records)",
                        request.offset,
                        all_records.len()
                    );
                    break;
                }
            };

            if page.is_empty() {
                break;
            }

            let page_len = page.len();
            all_records.extend(page);
            log::info!(
                "  Fetched {page_len} records (Total: {})",
                all_records.len()
            );

            if page_len < self.limit {
                break;
            }
            request.offset += self.limit;
        }

        all_records
    }
}
