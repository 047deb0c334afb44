//! Link registry service implementation.
//!
//! This crate provides [`RegistryService`], which owns shortcode creation,
//! resolution and expiry checks on top of a [`LinkRepository`] and an
//! [`AnalyticsStore`]. Core types are re-exported from `pinhole_core`.
//!
//! [`LinkRepository`]: pinhole_core::LinkRepository
//! [`AnalyticsStore`]: pinhole_core::AnalyticsStore

pub mod service;
pub mod settings;

pub use pinhole_core::{CreatedLink, LinkStats, Registry, RegistryError, ShortenParams};
pub use service::RegistryService;
pub use settings::RegistrySettings;
