//! In-memory contact repository for embedding hosts and tests.
//!
//! The surrounding product owns real contact persistence; this
//! implementation backs the port with a `DashMap` so the pipeline can run
//! self-contained. The compare-and-swap in `begin_video_generation` is
//! genuine: the shard lock is held across the check and the write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use bondling_domain::{Contact, ContactId, Pet, VideoStatusPatch};

use crate::infrastructure::ports::{ClockPort, ContactRepo, RepoError};

pub struct InMemoryContactRepo {
    contacts: DashMap<ContactId, Contact>,
    clock: Arc<dyn ClockPort>,
}

impl InMemoryContactRepo {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            contacts: DashMap::new(),
            clock,
        }
    }

    /// Seed a contact record (normally done by the contacts collaborator).
    pub fn insert_contact(&self, contact: Contact) {
        self.contacts.insert(contact.id, contact);
    }
}

#[async_trait]
impl ContactRepo for InMemoryContactRepo {
    async fn get(&self, id: ContactId) -> Result<Option<Contact>, RepoError> {
        Ok(self.contacts.get(&id).map(|entry| entry.clone()))
    }

    async fn save_pet(&self, id: ContactId, pet: &Pet) -> Result<(), RepoError> {
        let mut entry = self
            .contacts
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Contact", id.to_string()))?;
        entry.pet = Some(pet.clone());
        Ok(())
    }

    async fn apply_video_patch(
        &self,
        id: ContactId,
        patch: VideoStatusPatch,
    ) -> Result<(), RepoError> {
        let now = self.clock.now();
        let mut entry = self
            .contacts
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Contact", id.to_string()))?;
        let pet = entry
            .pet
            .as_mut()
            .ok_or_else(|| RepoError::not_found("Pet", id.to_string()))?;
        pet.apply_video_patch(patch, now);
        Ok(())
    }

    async fn begin_video_generation(
        &self,
        id: ContactId,
        started_at: DateTime<Utc>,
    ) -> Result<bool, RepoError> {
        let now = self.clock.now();
        let mut entry = self
            .contacts
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Contact", id.to_string()))?;
        let pet = entry
            .pet
            .as_mut()
            .ok_or_else(|| RepoError::not_found("Pet", id.to_string()))?;

        // Shard lock held since get_mut: check and write are atomic.
        if pet.video_generation_status.is_active() {
            return Ok(false);
        }
        pet.apply_video_patch(VideoStatusPatch::Generating { started_at }, now);
        Ok(true)
    }
}
