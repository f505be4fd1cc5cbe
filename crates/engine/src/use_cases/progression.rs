//! Progression recompute: relationship stats in, level/happiness/tokens out.

use std::sync::Arc;

use bondling_domain::{
    progression::{self, ProgressionOutcome, RelationshipStats},
    ContactId,
};

use crate::error::PetError;
use crate::infrastructure::ports::{ClockPort, ContactRepo};

/// Recompute a pet's level and happiness from fresh relationship stats and
/// mint evolution tokens when the level rose. A level drop is applied
/// without any award or claw-back.
pub struct RecomputeHappiness {
    contacts: Arc<dyn ContactRepo>,
    clock: Arc<dyn ClockPort>,
}

impl RecomputeHappiness {
    pub fn new(contacts: Arc<dyn ContactRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { contacts, clock }
    }

    pub async fn execute(
        &self,
        contact_id: ContactId,
        stats: RelationshipStats,
    ) -> Result<ProgressionOutcome, PetError> {
        let contact = self
            .contacts
            .get(contact_id)
            .await?
            .ok_or_else(|| PetError::not_found("Contact", contact_id.to_string()))?;
        let mut pet = contact
            .pet
            .ok_or_else(|| PetError::not_found("Pet", contact_id.to_string()))?;

        let outcome = progression::recompute(stats, pet.level);
        pet.apply_progression(outcome.level, outcome.happiness, self.clock.now());
        if outcome.leveled_up {
            pet.award_tokens(outcome.tokens_awarded);
            tracing::info!(
                contact_id = %contact_id,
                level = outcome.level,
                tokens_awarded = outcome.tokens_awarded,
                "pet leveled up"
            );
        }

        self.contacts.save_pet(contact_id, &pet).await?;
        Ok(outcome)
    }
}
