//! Hatch workflow: first-time pet creation and regeneration.

use std::sync::Arc;

use bondling_domain::{progression, ContactId, OwnerId, Pet};

use crate::error::PetError;
use crate::infrastructure::ports::{ClockPort, ContactRepo, MediaGenPort};
use crate::infrastructure::settings::EngineSettings;
use crate::selector::{self, TraitSelector};
use crate::use_cases::generate_mood_images;

/// Whether the run created a brand-new pet or re-rolled an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HatchOutcome {
    FirstHatch,
    Regenerated,
}

#[derive(Debug, Clone)]
pub struct HatchResult {
    pub outcome: HatchOutcome,
    pub pet: Pet,
}

/// Hatch (or regenerate) the pet embedded in a contact.
///
/// Traits are freshly sampled for a first hatch and preserved from the
/// existing record on regeneration. The four mood images run concurrently;
/// video generation is left pending for a later background job.
pub struct HatchPet {
    contacts: Arc<dyn ContactRepo>,
    media: Arc<dyn MediaGenPort>,
    selector: TraitSelector,
    clock: Arc<dyn ClockPort>,
    settings: EngineSettings,
}

impl HatchPet {
    pub fn new(
        contacts: Arc<dyn ContactRepo>,
        media: Arc<dyn MediaGenPort>,
        selector: TraitSelector,
        clock: Arc<dyn ClockPort>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            contacts,
            media,
            selector,
            clock,
            settings,
        }
    }

    pub async fn execute(
        &self,
        contact_id: ContactId,
        owner_id: OwnerId,
        health: u8,
    ) -> Result<HatchResult, PetError> {
        let contact = self
            .contacts
            .get(contact_id)
            .await?
            .ok_or_else(|| PetError::not_found("Contact", contact_id.to_string()))?;
        if !contact.is_owned_by(owner_id) {
            return Err(PetError::permission_denied(contact_id.to_string()));
        }

        let existing = contact.pet;
        let traits = match &existing {
            Some(pet) => {
                let (_, traits) = self.selector.preserve_traits(pet);
                traits
            }
            None => {
                let template = self.selector.select_template();
                self.selector.select_traits(template)
            }
        };

        tracing::info!(
            contact_id = %contact_id,
            species = %traits.species,
            regeneration = existing.is_some(),
            "hatching pet"
        );

        let image_urls =
            generate_mood_images(&self.media, &traits, self.settings.hatch_image_attempts).await;

        let now = self.clock.now();
        let level = progression::level_for_health(health);
        let happiness = progression::happiness_for_health(health);
        let template_id = selector::template_id(&traits, now.timestamp_millis());

        let (outcome, pet) = match existing {
            Some(mut pet) => {
                pet.record_regeneration(template_id, image_urls, level, happiness, now);
                (HatchOutcome::Regenerated, pet)
            }
            None => {
                let pet_name = default_pet_name(&traits.species);
                let pet = Pet::hatch(
                    traits,
                    pet_name,
                    template_id,
                    image_urls,
                    level,
                    happiness,
                    self.settings.seed_tokens,
                    now,
                );
                (HatchOutcome::FirstHatch, pet)
            }
        };

        self.contacts.save_pet(contact_id, &pet).await?;
        Ok(HatchResult { outcome, pet })
    }
}

/// Default display name until the user renames: the species, capitalized.
fn default_pet_name(species: &str) -> String {
    let mut chars = species.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::{
        MediaGenError, MockClockPort, MockContactRepo, MockMediaGenPort,
    };
    use bondling_domain::{
        Contact, MoodUrls, PetTraits, VideoGenerationStatus,
    };
    use chrono::{TimeZone, Utc};
    use mockall::predicate::*;

    fn fixed_now() -> chrono::DateTime<chrono::Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn use_case(
        contacts: MockContactRepo,
        media: MockMediaGenPort,
    ) -> HatchPet {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        HatchPet::new(
            Arc::new(contacts),
            Arc::new(media),
            TraitSelector::new(Arc::new(FixedRandom(0.0))),
            Arc::new(clock),
            EngineSettings::default(),
        )
    }

    fn contact_without_pet(contact_id: ContactId, owner_id: OwnerId) -> Contact {
        Contact::new(contact_id, owner_id, "Alex")
    }

    fn contact_with_pet(contact_id: ContactId, owner_id: OwnerId) -> Contact {
        let mut contact = Contact::new(contact_id, owner_id, "Alex");
        contact.pet = Some(Pet::hatch(
            PetTraits::new("dragon", "emerald", "scaled", "bow"),
            "Smolder",
            "dragon_emerald_scaled_1",
            MoodUrls::default(),
            2,
            55,
            5,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ));
        contact
    }

    fn media_always_ok() -> MockMediaGenPort {
        let mut media = MockMediaGenPort::new();
        media
            .expect_generate_image()
            .times(4)
            .returning(|_| Ok("https://cdn.example/img.png".to_string()));
        media
    }

    #[tokio::test]
    async fn first_hatch_creates_pet_with_seed_tokens() {
        let contact_id = ContactId::new();
        let owner_id = OwnerId::new();

        let mut contacts = MockContactRepo::new();
        contacts
            .expect_get()
            .with(eq(contact_id))
            .returning(move |_| Ok(Some(contact_without_pet(contact_id, owner_id))));
        contacts
            .expect_save_pet()
            .withf(|_, pet| {
                pet.evolution_tokens == 3
                    && pet.video_generation_status == VideoGenerationStatus::Pending
            })
            .returning(|_, _| Ok(()));

        let result = use_case(contacts, media_always_ok())
            .execute(contact_id, owner_id, 88)
            .await
            .unwrap();

        assert_eq!(result.outcome, HatchOutcome::FirstHatch);
        assert_eq!(result.pet.level, 3);
        assert_eq!(result.pet.happiness, 88);
        assert_eq!(result.pet.hatched_at, fixed_now());
        assert_eq!(result.pet.image_urls.populated_count(), 4);
    }

    #[tokio::test]
    async fn regeneration_preserves_type_tokens_and_hatched_at() {
        let contact_id = ContactId::new();
        let owner_id = OwnerId::new();

        let mut contacts = MockContactRepo::new();
        contacts
            .expect_get()
            .returning(move |_| Ok(Some(contact_with_pet(contact_id, owner_id))));
        contacts.expect_save_pet().returning(|_, _| Ok(()));

        let result = use_case(contacts, media_always_ok())
            .execute(contact_id, owner_id, 40)
            .await
            .unwrap();

        assert_eq!(result.outcome, HatchOutcome::Regenerated);
        assert_eq!(result.pet.pet_type, "dragon");
        assert_eq!(result.pet.evolution_tokens, 5);
        assert_eq!(
            result.pet.hatched_at,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(result.pet.regenerated_at, Some(fixed_now()));
        // Traits preserved, not resampled.
        assert_eq!(result.pet.color, "emerald");
        assert_eq!(result.pet.accessory, "bow");
    }

    #[tokio::test]
    async fn low_health_floors_level_and_happiness() {
        let contact_id = ContactId::new();
        let owner_id = OwnerId::new();

        let mut contacts = MockContactRepo::new();
        contacts
            .expect_get()
            .returning(move |_| Ok(Some(contact_without_pet(contact_id, owner_id))));
        contacts.expect_save_pet().returning(|_, _| Ok(()));

        let result = use_case(contacts, media_always_ok())
            .execute(contact_id, owner_id, 10)
            .await
            .unwrap();

        assert_eq!(result.pet.level, 1);
        assert_eq!(result.pet.happiness, 20);
    }

    #[tokio::test]
    async fn partial_image_failure_still_hatches() {
        let contact_id = ContactId::new();
        let owner_id = OwnerId::new();

        let mut contacts = MockContactRepo::new();
        contacts
            .expect_get()
            .returning(move |_| Ok(Some(contact_without_pet(contact_id, owner_id))));
        contacts.expect_save_pet().returning(|_, _| Ok(()));

        let mut media = MockMediaGenPort::new();
        media.expect_generate_image().times(4).returning(|request| {
            if request.prompt.contains("sad") || request.prompt.contains("sparkling") {
                Err(MediaGenError::RequestFailed("503".into()))
            } else {
                Ok("https://cdn.example/img.png".to_string())
            }
        });

        let result = use_case(contacts, media)
            .execute(contact_id, owner_id, 50)
            .await
            .unwrap();

        assert_eq!(result.pet.image_urls.populated_count(), 2);
        assert!(result.pet.image_urls.sad.is_empty());
        assert!(!result.pet.image_urls.neutral.is_empty());
    }

    #[tokio::test]
    async fn foreign_owner_is_denied() {
        let contact_id = ContactId::new();
        let owner_id = OwnerId::new();

        let mut contacts = MockContactRepo::new();
        contacts
            .expect_get()
            .returning(move |_| Ok(Some(contact_without_pet(contact_id, owner_id))));

        let result = use_case(contacts, MockMediaGenPort::new())
            .execute(contact_id, OwnerId::new(), 50)
            .await;

        assert!(matches!(result, Err(PetError::PermissionDenied { .. })));
    }

    #[tokio::test]
    async fn missing_contact_is_not_found() {
        let mut contacts = MockContactRepo::new();
        contacts.expect_get().returning(|_| Ok(None));

        let result = use_case(contacts, MockMediaGenPort::new())
            .execute(ContactId::new(), OwnerId::new(), 50)
            .await;

        assert!(matches!(result, Err(PetError::NotFound { .. })));
    }
}
