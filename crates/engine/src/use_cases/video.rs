//! Background video generation workflow.
//!
//! The start call transitions the status machine with an atomic
//! compare-and-swap, then detaches a supervised worker task and returns
//! immediately. The worker drives the four mood states strictly
//! sequentially with an inter-job cooldown, persists each finished URL
//! through the narrow status path, and writes the terminal status itself —
//! there is no caller left to receive its errors.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

use bondling_domain::{ContactId, MoodState, OwnerId, PetTraits, VideoStatusPatch};

use crate::error::PetError;
use crate::infrastructure::ports::{
    ClockPort, ContactRepo, MediaGenPort, RandomPort, RepoError, VideoRequest,
};
use crate::infrastructure::settings::EngineSettings;
use crate::prompts;

/// Result of a start call.
#[derive(Debug)]
pub enum VideoStartOutcome {
    /// A job was started; the handle observes the detached worker.
    Started { task: JoinHandle<()> },
    /// A job is already generating; `started_at` was not reset.
    AlreadyInProgress,
}

pub struct StartVideoGeneration {
    contacts: Arc<dyn ContactRepo>,
    media: Arc<dyn MediaGenPort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    settings: EngineSettings,
}

impl StartVideoGeneration {
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
        owner_id: OwnerId,
    ) -> Result<VideoStartOutcome, PetError> {
        let contact = self
            .contacts
            .get(contact_id)
            .await?
            .ok_or_else(|| PetError::not_found("Contact", contact_id.to_string()))?;
        if !contact.is_owned_by(owner_id) {
            return Err(PetError::permission_denied(contact_id.to_string()));
        }
        let pet = contact
            .pet
            .ok_or_else(|| PetError::not_found("Pet", contact_id.to_string()))?;

        let now = self.clock.now();
        if !self
            .contacts
            .begin_video_generation(contact_id, now)
            .await?
        {
            tracing::info!(contact_id = %contact_id, "video generation already in progress");
            return Ok(VideoStartOutcome::AlreadyInProgress);
        }

        let traits = pet.traits();
        let seed = self.random.gen_seed();
        let task = spawn_video_worker(
            self.contacts.clone(),
            self.media.clone(),
            self.clock.clone(),
            self.settings.clone(),
            contact_id,
            traits,
            seed,
        );

        tracing::info!(contact_id = %contact_id, seed, "video generation started");
        Ok(VideoStartOutcome::Started { task })
    }
}

/// Detach the video worker. Every error is caught at the task boundary and
/// funneled into the status store as a `failed` status.
fn spawn_video_worker(
    contacts: Arc<dyn ContactRepo>,
    media: Arc<dyn MediaGenPort>,
    clock: Arc<dyn ClockPort>,
    settings: EngineSettings,
    contact_id: ContactId,
    traits: PetTraits,
    seed: u32,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = run_video_job(
            &contacts, &media, &*clock, &settings, contact_id, &traits, seed,
        )
        .await
        {
            tracing::error!(
                contact_id = %contact_id,
                error = %e,
                "video generation job failed"
            );
            let patch = VideoStatusPatch::Failed {
                error: e.to_string(),
                completed_at: clock.now(),
            };
            if let Err(write_err) = contacts.apply_video_patch(contact_id, patch).await {
                tracing::error!(
                    contact_id = %contact_id,
                    error = %write_err,
                    "failed to record video job failure"
                );
            }
        }
    })
}

/// Drive the four mood-state video jobs sequentially. Exhausted-retry or
/// timeout outcomes degrade that one state and the loop continues; only
/// storage failures abort the job.
async fn run_video_job(
    contacts: &Arc<dyn ContactRepo>,
    media: &Arc<dyn MediaGenPort>,
    clock: &dyn ClockPort,
    settings: &EngineSettings,
    contact_id: ContactId,
    traits: &PetTraits,
    seed: u32,
) -> Result<(), RepoError> {
    let cooldown = Duration::from_secs(settings.video_cooldown_secs);
    let mut populated = 0usize;

    for (index, mood) in MoodState::ALL.iter().enumerate() {
        if index > 0 {
            sleep(cooldown).await;
        }

        let prompt = prompts::video_prompt(traits, *mood);
        match media
            .generate_video(VideoRequest::new(prompt, seed, settings.evolution_attempts))
            .await
        {
            Ok(url) => {
                // Persist partial progress immediately, not buffered.
                contacts
                    .apply_video_patch(
                        contact_id,
                        VideoStatusPatch::StateVideoReady { mood: *mood, url },
                    )
                    .await?;
                populated += 1;
            }
            Err(e) => {
                tracing::warn!(
                    contact_id = %contact_id,
                    mood = %mood,
                    error = %e,
                    "video state degraded to empty URL"
                );
            }
        }
    }

    contacts
        .apply_video_patch(
            contact_id,
            VideoStatusPatch::Completed {
                completed_at: clock.now(),
            },
        )
        .await?;

    tracing::info!(
        contact_id = %contact_id,
        populated,
        degraded = MoodState::ALL.len() - populated,
        "video generation job completed"
    );
    Ok(())
}
