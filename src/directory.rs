//! The identity port. User records live in an external identity service;
//! the scheduler only ever asks whether an owner exists and, for embedders
//! that want it, fetches the owner projection.

use async_trait::async_trait;
use dashmap::DashMap;
use ulid::Ulid;

use crate::model::Owner;
use crate::store::StoreError;

#[async_trait]
pub trait OwnerDirectory: Send + Sync {
    async fn owner_exists(&self, id: Ulid) -> Result<bool, StoreError>;

    async fn get_owner(&self, id: Ulid) -> Result<Option<Owner>, StoreError>;
}

/// In-memory adapter, for tests and single-process embedders.
pub struct MemoryDirectory {
    owners: DashMap<Ulid, Owner>,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            owners: DashMap::new(),
        }
    }

    pub fn insert(&self, owner: Owner) {
        self.owners.insert(owner.id, owner);
    }

    /// Simulates the identity service deleting a user. The caller is
    /// responsible for also invoking `Scheduler::purge_owner`; the cascade
    /// is the scheduler's contract, not the directory's.
    pub fn remove(&self, id: Ulid) -> Option<Owner> {
        self.owners.remove(&id).map(|(_, owner)| owner)
    }
}

#[async_trait]
impl OwnerDirectory for MemoryDirectory {
    async fn owner_exists(&self, id: Ulid) -> Result<bool, StoreError> {
        Ok(self.owners.contains_key(&id))
    }

    async fn get_owner(&self, id: Ulid) -> Result<Option<Owner>, StoreError> {
        Ok(self.owners.get(&id).map(|entry| entry.value().clone()))
    }
}
