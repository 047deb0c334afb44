//! In-memory storage backends.
//!
//! State lives only for the lifetime of the process. Both stores are plain
//! owned values; wrap them in an `Arc` to share them between handlers.

pub mod clicks;
pub mod links;

pub use clicks::InMemoryClickLedger;
pub use links::InMemoryLinkRepository;
pub use pinhole_core::{AnalyticsStore, LinkRepository, StorageError};
