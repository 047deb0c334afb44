use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored link. Records are written once and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The short code this record is registered under.
    pub short_code: ShortCode,
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record stops resolving.
    pub expires_at: Timestamp,
}

impl LinkRecord {
    /// Returns `true` once `now` is strictly past `expires_at`.
    ///
    /// A link is still live at the exact instant of its expiry.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }
}

/// Storage for link records.
#[async_trait]
pub trait LinkRepository: Send + Sync + 'static {
    /// Inserts a new record under `record.short_code`.
    ///
    /// The existence check and the write are a single atomic step. Returns
    /// `Err(Conflict)` if the code was ever registered, expired or not.
    async fn insert(&self, record: LinkRecord) -> Result<()>;

    /// Retrieves the record for a given short code, expired or not.
    /// Returns `None` if the code was never registered.
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;
}
