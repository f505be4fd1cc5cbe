//! Customize workflow: the lighter-weight edit path.
//!
//! Applies name/trait changes in one call. Unlike evolve, this path spends
//! no tokens, and a visual change regenerates images AND videos inline
//! rather than deferring video to the background pipeline.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use bondling_domain::{ContactId, MoodState, MoodUrls, Pet, PetTraits, VideoStatusPatch};

use crate::error::PetError;
use crate::infrastructure::ports::{
    ClockPort, ContactRepo, MediaGenPort, RandomPort, VideoRequest,
};
use crate::infrastructure::settings::EngineSettings;
use crate::prompts;
use crate::selector;
use crate::use_cases::generate_mood_images;

#[derive(Debug, Clone, Default)]
pub struct CustomizeRequest {
    pub pet_name: Option<String>,
    pub color: Option<String>,
    pub pattern: Option<String>,
    pub accessory: Option<String>,
}

impl CustomizeRequest {
    fn has_visual_change(&self) -> bool {
        self.color.is_some() || self.pattern.is_some() || self.accessory.is_some()
    }
}

pub struct CustomizePet {
    contacts: Arc<dyn ContactRepo>,
    media: Arc<dyn MediaGenPort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    settings: EngineSettings,
}

impl CustomizePet {
    pub fn new(
        contacts: Arc<dyn ContactRepo>,
        media: Arc<dyn MediaGenPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            contacts,
            media,
            clock,
            random,
            settings,
        }
    }

    pub async fn execute(
        &self,
        contact_id: ContactId,
        request: CustomizeRequest,
    ) -> Result<Pet, PetError> {
        let contact = self
            .contacts
            .get(contact_id)
            .await?
            .ok_or_else(|| PetError::not_found("Contact", contact_id.to_string()))?;
        let mut pet = contact
            .pet
            .ok_or_else(|| PetError::not_found("Pet", contact_id.to_string()))?;

        if let Some(name) = request.pet_name.clone() {
            pet.pet_name = name;
        }
        if let Some(color) = request.color.clone() {
            pet.color = color;
        }
        if let Some(pattern) = request.pattern.clone() {
            pet.pattern = pattern;
        }
        if let Some(accessory) = request.accessory.clone() {
            pet.accessory = accessory;
        }

        let now = self.clock.now();
        if request.has_visual_change() {
            let traits = pet.traits();
            tracing::info!(
                contact_id = %contact_id,
                "customize changed visual traits, regenerating images and videos inline"
            );
            pet.image_urls =
                generate_mood_images(&self.media, &traits, self.settings.evolution_attempts).await;
            pet.video_urls = self.generate_mood_videos(&traits).await;
            pet.template_id = selector::template_id(&traits, now.timestamp_millis());
            pet.apply_video_patch(VideoStatusPatch::Generating { started_at: now }, now);
            pet.apply_video_patch(
                VideoStatusPatch::Completed {
                    completed_at: self.clock.now(),
                },
                self.clock.now(),
            );
        }

        pet.last_updated = self.clock.now();
        self.contacts.save_pet(contact_id, &pet).await?;
        Ok(pet)
    }

    /// Sequential per-state video generation with the inter-job cooldown,
    /// awaited inline. Failed states degrade to empty URLs.
    async fn generate_mood_videos(&self, traits: &PetTraits) -> MoodUrls {
        let seed = self.random.gen_seed();
        let cooldown = Duration::from_secs(self.settings.video_cooldown_secs);
        let mut urls = MoodUrls::default();

        for (index, mood) in MoodState::ALL.iter().enumerate() {
            if index > 0 {
                sleep(cooldown).await;
            }
            let prompt = prompts::video_prompt(traits, *mood);
            match self
                .media
                .generate_video(VideoRequest::new(
                    prompt,
                    seed,
                    self.settings.evolution_attempts,
                ))
                .await
            {
                Ok(url) => urls.set(*mood, url),
                Err(e) => {
                    tracing::warn!(
                        mood = %mood,
                        error = %e,
                        "video generation degraded to empty URL"
                    );
                }
            }
        }
        urls
    }
}
