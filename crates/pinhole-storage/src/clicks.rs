use async_trait::async_trait;
use dashmap::DashMap;
use pinhole_core::error::Result;
use pinhole_core::{AnalyticsStore, ClickEvent, ShortCode};
use tracing::trace;

/// In-memory click ledgers keyed by short code.
///
/// Appends take the shard write lock for the code, so concurrent clicks on
/// the same link are serialized into a single total order and none is lost.
#[derive(Debug, Default)]
pub struct InMemoryClickLedger {
    ledgers: DashMap<ShortCode, Vec<ClickEvent>>,
}

impl InMemoryClickLedger {
    pub fn new() -> Self {
        Self {
            ledgers: DashMap::new(),
        }
    }

    /// Returns `true` if a ledger, possibly empty, exists for `code`.
    pub fn has_ledger(&self, code: &ShortCode) -> bool {
        self.ledgers.contains_key(code)
    }
}

#[async_trait]
impl AnalyticsStore for InMemoryClickLedger {
    async fn open_ledger(&self, code: &ShortCode) -> Result<()> {
        self.ledgers.entry(code.clone()).or_default();
        Ok(())
    }

    async fn record_click(&self, code: &ShortCode, event: ClickEvent) -> Result<()> {
        trace!(code = %code, referrer = %event.referrer, "recording click");
        // A resolve can land between the registry's record commit and its
        // ledger open; open on demand so the click is kept either way.
        self.ledgers.entry(code.clone()).or_default().push(event);
        Ok(())
    }

    async fn read_clicks(&self, code: &ShortCode) -> Result<Vec<ClickEvent>> {
        Ok(self
            .ledgers
            .get(code)
            .map(|ledger| ledger.value().clone())
            .unwrap_or_default())
    }
}
