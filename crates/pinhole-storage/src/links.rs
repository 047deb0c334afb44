use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use pinhole_core::error::{Result, StorageError};
use pinhole_core::{LinkRecord, LinkRepository, ShortCode};
use tracing::trace;

/// In-memory implementation of [`LinkRepository`] using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking.
///
/// Records are never removed, expired ones included, so a code can never be
/// handed out twice during the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    storage: DashMap<ShortCode, LinkRecord>,
}

impl InMemoryLinkRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of codes ever registered.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        // The entry guard holds the shard lock across check and write.
        match self.storage.entry(record.short_code.clone()) {
            Entry::Occupied(existing) => Err(StorageError::Conflict(existing.key().to_string())),
            Entry::Vacant(slot) => {
                trace!(code = %record.short_code, "inserting link record");
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        Ok(self.storage.get(code).map(|entry| entry.value().clone()))
    }
}
