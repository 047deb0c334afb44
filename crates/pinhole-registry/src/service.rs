use crate::settings::RegistrySettings;
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use pinhole_core::validate::is_valid_url;
use pinhole_core::{
    AnalyticsStore, Clock, CreatedLink, LinkRecord, LinkRepository, LinkStats, Registry,
    RegistryError, ShortCode, ShortenParams, StorageError, SystemClock,
};
use pinhole_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace, warn};

type Result<T> = std::result::Result<T, RegistryError>;

/// A concrete implementation of the [`Registry`] trait.
///
/// This service wraps a [`LinkRepository`], an [`AnalyticsStore`] and a
/// [`Generator`] to handle:
/// - URL and short code validation
/// - Short code generation with collision retry
/// - Expiry computation and enforcement
///
/// Collision detection relies on the repository's atomic insert, so two
/// concurrent creates can never claim the same code.
pub struct RegistryService<R, A, G> {
    repository: Arc<R>,
    analytics: Arc<A>,
    generator: Arc<G>,
    clock: Arc<dyn Clock>,
    settings: RegistrySettings,
}

impl<R: LinkRepository, A: AnalyticsStore, G: Generator> RegistryService<R, A, G> {
    /// Creates a new `RegistryService` with default settings and the system clock.
    ///
    /// The analytics store is shared: the caller keeps its own handle to
    /// record clicks after a successful resolve.
    pub fn new(repository: Arc<R>, analytics: Arc<A>, generator: G) -> Self {
        Self {
            repository,
            analytics,
            generator: Arc::new(generator),
            clock: Arc::new(SystemClock),
            settings: RegistrySettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RegistrySettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(RegistryError::InvalidUrl("URL cannot be empty".to_string()));
        }
        if !is_valid_url(url) {
            return Err(RegistryError::InvalidUrl(format!(
                "URL must be absolute with a scheme and host: {}",
                url
            )));
        }
        Ok(())
    }

    /// Non-positive validities fall back to the default rather than failing.
    fn validity(&self, minutes: Option<i64>) -> SignedDuration {
        minutes
            .filter(|m| *m > 0)
            .map(|m| SignedDuration::from_secs(m.saturating_mul(60)))
            .unwrap_or(self.settings.default_validity)
    }

    /// Writes the record, then opens its ledger.
    async fn commit(&self, record: LinkRecord) -> std::result::Result<(), StorageError> {
        let code = record.short_code.clone();
        self.repository.insert(record).await?;

        // The record is already visible; a missing ledger reads as empty and
        // is opened by the first click, so this failure must not undo it.
        if let Err(e) = self.analytics.open_ledger(&code).await {
            warn!(code = %code, error = %e, "failed to open click ledger");
        }
        Ok(())
    }

    async fn commit_generated(
        &self,
        original_url: String,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Result<ShortCode> {
        let attempts = self.settings.max_generation_attempts;
        for attempt in 1..=attempts {
            let short_code = self.generator.generate();
            let record = LinkRecord {
                short_code: short_code.clone(),
                original_url: original_url.clone(),
                created_at,
                expires_at,
            };
            match self.commit(record).await {
                Ok(()) => return Ok(short_code),
                Err(StorageError::Conflict(_)) => {
                    warn!(code = %short_code, attempt, "generated short code collided, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(RegistryError::GenerationExhausted(attempts))
    }

    /// Looks up a record and fails unless it exists and is still live.
    async fn live_record(&self, code: &str) -> Result<LinkRecord> {
        trace!(code, "looking up short code");

        // A malformed code can never have been registered.
        let Ok(short_code) = ShortCode::new(code) else {
            return Err(RegistryError::NotFound(code.to_string()));
        };

        let Some(record) = self.repository.get(&short_code).await? else {
            debug!(code, "short code not found");
            return Err(RegistryError::NotFound(code.to_string()));
        };

        if record.is_expired_at(self.clock.now()) {
            debug!(code, expires_at = %record.expires_at, "short code has expired");
            return Err(RegistryError::Expired(code.to_string()));
        }

        Ok(record)
    }
}

#[async_trait]
impl<R: LinkRepository, A: AnalyticsStore, G: Generator> Registry for RegistryService<R, A, G> {
    async fn create(&self, params: ShortenParams) -> Result<CreatedLink> {
        Self::validate_url(&params.original_url)?;

        let custom_code = params
            .custom_code
            .filter(|code| !code.is_empty())
            .map(ShortCode::new)
            .transpose()?;

        let created_at = self.clock.now();
        // Validities beyond the representable range saturate instead of failing.
        let expires_at = created_at
            .checked_add(self.validity(params.validity_minutes))
            .unwrap_or(Timestamp::MAX);

        let short_code = match custom_code {
            Some(short_code) => {
                let record = LinkRecord {
                    short_code: short_code.clone(),
                    original_url: params.original_url,
                    created_at,
                    expires_at,
                };
                self.commit(record).await?;
                short_code
            }
            None => {
                self.commit_generated(params.original_url, created_at, expires_at)
                    .await?
            }
        };

        debug!(code = %short_code, %expires_at, "created short link");
        Ok(CreatedLink {
            short_code,
            expires_at,
        })
    }

    async fn resolve(&self, code: &str) -> Result<String> {
        let record = self.live_record(code).await?;
        debug!(code, url = %record.original_url, "resolved short code");
        Ok(record.original_url)
    }

    async fn stats(&self, code: &str) -> Result<LinkStats> {
        let record = self.live_record(code).await?;
        let clicks = self.analytics.read_clicks(&record.short_code).await?;

        Ok(LinkStats {
            original_url: record.original_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            total_clicks: clicks.len(),
            clicks,
        })
    }
}
