//! Evolve workflow: token-gated single trait change.
//!
//! Visual changes regenerate the four images only; video stays pending for
//! a later background job to keep latency bounded.

use std::sync::Arc;

use bondling_domain::{ContactId, OwnerId, Pet, TraitField};

use crate::error::PetError;
use crate::infrastructure::ports::{ClockPort, ContactRepo, MediaGenPort};
use crate::infrastructure::settings::EngineSettings;
use crate::selector;
use crate::use_cases::generate_mood_images;

pub struct EvolvePet {
    contacts: Arc<dyn ContactRepo>,
    media: Arc<dyn MediaGenPort>,
    clock: Arc<dyn ClockPort>,
    settings: EngineSettings,
}

impl EvolvePet {
    pub fn new(
        contacts: Arc<dyn ContactRepo>,
        media: Arc<dyn MediaGenPort>,
        clock: Arc<dyn ClockPort>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            contacts,
            media,
            clock,
            settings,
        }
    }

    pub async fn execute(
        &self,
        contact_id: ContactId,
        owner_id: OwnerId,
        field: TraitField,
        value: impl Into<String>,
    ) -> Result<Pet, PetError> {
        let value = value.into();
        let contact = self
            .contacts
            .get(contact_id)
            .await?
            .ok_or_else(|| PetError::not_found("Contact", contact_id.to_string()))?;
        if !contact.is_owned_by(owner_id) {
            return Err(PetError::permission_denied(contact_id.to_string()));
        }
        let mut pet = contact
            .pet
            .ok_or_else(|| PetError::not_found("Pet", contact_id.to_string()))?;

        // Token cost is validated before the trait change lands.
        let cost = field.token_cost();
        if cost > 0 {
            if self.settings.skip_token_checks {
                tracing::warn!(
                    contact_id = %contact_id,
                    field = %field,
                    cost,
                    "token check bypassed via BONDLING_SKIP_TOKEN_CHECKS"
                );
            } else {
                pet.spend_tokens(cost)?;
            }
        }

        match field {
            TraitField::Name => pet.pet_name = value,
            TraitField::Color => pet.color = value,
            TraitField::Pattern => pet.pattern = value,
            TraitField::Accessory => pet.accessory = value,
        }

        let now = self.clock.now();
        if field.is_visual() {
            let traits = pet.traits();
            tracing::info!(
                contact_id = %contact_id,
                field = %field,
                "visual trait changed, regenerating images"
            );
            pet.image_urls =
                generate_mood_images(&self.media, &traits, self.settings.evolution_attempts).await;
            pet.template_id = selector::template_id(&traits, now.timestamp_millis());
            pet.reset_video_status();
        }

        pet.record_evolution(now);
        self.contacts.save_pet(contact_id, &pet).await?;
        Ok(pet)
    }
}
