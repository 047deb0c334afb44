use crate::analytics::ClickEvent;
use crate::error::RegistryError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;

type Result<T> = std::result::Result<T, RegistryError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Default)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub original_url: String,
    /// Lifetime in minutes. Anything other than a positive value falls back
    /// to the registry default.
    pub validity_minutes: Option<i64>,
    /// Optional caller-chosen short code. An empty string counts as absent.
    pub custom_code: Option<String>,
}

/// The outcome of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub short_code: ShortCode,
    pub expires_at: Timestamp,
}

/// Creation metadata and click history of a live link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub total_clicks: usize,
    pub clicks: Vec<ClickEvent>,
}

/// The single source of truth for link existence and expiry.
#[async_trait]
pub trait Registry: Send + Sync + 'static {
    /// Registers a new link and opens its empty click ledger.
    async fn create(&self, params: ShortenParams) -> Result<CreatedLink>;

    /// Resolves a short code to its original URL.
    ///
    /// Does not record a click; callers do that explicitly afterwards.
    async fn resolve(&self, code: &str) -> Result<String>;

    /// Returns the creation metadata and full click history of a live link.
    async fn stats(&self, code: &str) -> Result<LinkStats>;
}
