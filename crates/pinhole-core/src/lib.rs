//! Core types and traits for the Pinhole URL shortener.
//!
//! This crate provides the shared domain model used by the registry,
//! the storage backends and the HTTP gateway: validated short codes,
//! link records, click events, the error taxonomy and the storage traits.

pub mod analytics;
pub mod clock;
pub mod error;
pub mod link;
pub mod registry;
pub mod shortcode;
pub mod validate;

pub use analytics::{AnalyticsStore, ClickEvent};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use error::{RegistryError, StorageError};
pub use link::{LinkRecord, LinkRepository};
pub use registry::{CreatedLink, LinkStats, Registry, ShortenParams};
pub use shortcode::ShortCode;
