use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A single resolved visit of a short link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// When the visit happened.
    pub timestamp: Timestamp,
    /// The `Referer` header of the visit, empty when absent.
    pub referrer: String,
    /// Who visited (the peer address), or `"unknown"`.
    #[serde(rename = "location")]
    pub origin: String,
}

impl ClickEvent {
    pub const UNKNOWN_ORIGIN: &'static str = "unknown";

    pub fn new(timestamp: Timestamp, referrer: Option<String>, origin: Option<String>) -> Self {
        Self {
            timestamp,
            referrer: referrer.unwrap_or_default(),
            origin: origin.unwrap_or_else(|| Self::UNKNOWN_ORIGIN.to_string()),
        }
    }
}

/// Append-only click ledgers, one per short code.
///
/// Ledgers keep every event in append order. There is no eviction or
/// pagination, so a ledger grows for as long as its link is visited.
#[async_trait]
pub trait AnalyticsStore: Send + Sync + 'static {
    /// Creates an empty ledger for `code` if none exists yet.
    ///
    /// Idempotent: an existing ledger is left untouched.
    async fn open_ledger(&self, code: &ShortCode) -> Result<()>;

    /// Appends `event` to the ledger of `code`.
    ///
    /// Callers must have resolved `code` successfully first.
    async fn record_click(&self, code: &ShortCode, event: ClickEvent) -> Result<()>;

    /// Returns the full ledger of `code` in append order.
    ///
    /// Returns an empty list if the ledger is empty or was never opened.
    async fn read_clicks(&self, code: &ShortCode) -> Result<Vec<ClickEvent>>;
}
