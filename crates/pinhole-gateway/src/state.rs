use std::sync::Arc;

use pinhole_core::{AnalyticsStore, Clock, Registry};

/// Shared handles injected into every handler.
///
/// `analytics` must be the same store the registry reads stats from.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<dyn Registry>,
    analytics: Arc<dyn AnalyticsStore>,
    clock: Arc<dyn Clock>,
    base_url: Option<String>,
}

impl AppState {
    pub fn new(
        registry: Arc<dyn Registry>,
        analytics: Arc<dyn AnalyticsStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            analytics,
            clock,
            base_url: None,
        }
    }

    /// Uses a fixed public base URL for short links instead of the `Host` header.
    pub fn with_base_url(mut self, public_base_url: Option<String>) -> Self {
        self.base_url = public_base_url;
        self
    }

    pub fn registry(&self) -> &dyn Registry {
        self.registry.as_ref()
    }

    pub fn analytics(&self) -> &dyn AnalyticsStore {
        self.analytics.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}
