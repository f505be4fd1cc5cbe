//! Pet entity - the procedurally generated companion embedded in a contact.
//!
//! A pet has no independent identity: it lives and dies with its owning
//! contact record. It is born on first successful hatch, mutated by
//! progression recomputes and explicit customizations, and carries the
//! status of its background video generation job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::{MoodState, PetTraits, VideoGenerationStatus, VideoStatusPatch};

/// One URL per mood state. An empty string means "this state's media is
/// unavailable" (generation degraded), never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodUrls {
    pub neutral: String,
    pub happy: String,
    pub sad: String,
    pub excited: String,
}

impl MoodUrls {
    pub fn get(&self, mood: MoodState) -> &str {
        match mood {
            MoodState::Neutral => &self.neutral,
            MoodState::Happy => &self.happy,
            MoodState::Sad => &self.sad,
            MoodState::Excited => &self.excited,
        }
    }

    pub fn set(&mut self, mood: MoodState, url: impl Into<String>) {
        let slot = match mood {
            MoodState::Neutral => &mut self.neutral,
            MoodState::Happy => &mut self.happy,
            MoodState::Sad => &mut self.sad,
            MoodState::Excited => &mut self.excited,
        };
        *slot = url.into();
    }

    /// Count of mood states with a populated URL
    pub fn populated_count(&self) -> usize {
        MoodState::ALL
            .iter()
            .filter(|m| !self.get(**m).is_empty())
            .count()
    }
}

impl FromIterator<(MoodState, String)> for MoodUrls {
    fn from_iter<T: IntoIterator<Item = (MoodState, String)>>(iter: T) -> Self {
        let mut urls = Self::default();
        for (mood, url) in iter {
            urls.set(mood, url);
        }
        urls
    }
}

/// The relationship pet embedded 1:1 in a contact record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Species key from the template registry
    pub pet_type: String,
    /// User-customizable display name
    pub pet_name: String,
    /// Relationship level, >= 1
    pub level: u32,
    /// 0-100
    pub happiness: u8,
    pub color: String,
    pub pattern: String,
    /// "none" when the pet wears nothing
    pub accessory: String,
    /// Derived identifier: species_color_pattern_timestamp
    pub template_id: String,
    pub image_urls: MoodUrls,
    pub video_urls: MoodUrls,
    /// Spendable customization currency, never negative
    pub evolution_tokens: u32,
    pub total_evolutions: u32,
    pub last_evolution_at: Option<DateTime<Utc>>,
    pub generated_at: DateTime<Utc>,
    /// Set exactly once at first successful hatch, never overwritten
    pub hatched_at: DateTime<Utc>,
    /// Stamped by every regeneration after the first hatch
    pub regenerated_at: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
    pub video_generation_status: VideoGenerationStatus,
    pub video_generation_started_at: Option<DateTime<Utc>>,
    pub video_generation_completed_at: Option<DateTime<Utc>>,
    pub video_generation_error: Option<String>,
}

impl Pet {
    /// Create a brand-new pet at first hatch.
    pub fn hatch(
        traits: PetTraits,
        pet_name: impl Into<String>,
        template_id: impl Into<String>,
        image_urls: MoodUrls,
        level: u32,
        happiness: u8,
        seed_tokens: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            pet_type: traits.species,
            pet_name: pet_name.into(),
            level: level.max(1),
            happiness,
            color: traits.color,
            pattern: traits.pattern,
            accessory: traits.accessory,
            template_id: template_id.into(),
            image_urls,
            video_urls: MoodUrls::default(),
            evolution_tokens: seed_tokens,
            total_evolutions: 0,
            last_evolution_at: None,
            generated_at: now,
            hatched_at: now,
            regenerated_at: None,
            last_updated: now,
            video_generation_status: VideoGenerationStatus::Pending,
            video_generation_started_at: None,
            video_generation_completed_at: None,
            video_generation_error: None,
        }
    }

    /// Current traits as a value object (for prompt building).
    pub fn traits(&self) -> PetTraits {
        PetTraits::new(
            self.pet_type.clone(),
            self.color.clone(),
            self.pattern.clone(),
            self.accessory.clone(),
        )
    }

    /// Record a regeneration run. `hatched_at`, `pet_type` and the token
    /// balance are untouched; only the media, template id and timestamps
    /// move.
    pub fn record_regeneration(
        &mut self,
        template_id: impl Into<String>,
        image_urls: MoodUrls,
        level: u32,
        happiness: u8,
        now: DateTime<Utc>,
    ) {
        self.template_id = template_id.into();
        self.image_urls = image_urls;
        self.video_urls = MoodUrls::default();
        self.level = level.max(1);
        self.happiness = happiness;
        self.generated_at = now;
        self.regenerated_at = Some(now);
        self.last_updated = now;
        self.reset_video_status();
    }

    /// Apply a progression recompute.
    pub fn apply_progression(&mut self, level: u32, happiness: u8, now: DateTime<Utc>) {
        self.level = level.max(1);
        self.happiness = happiness;
        self.last_updated = now;
    }

    /// Add evolution tokens (additive, from level-ups).
    pub fn award_tokens(&mut self, amount: u32) {
        self.evolution_tokens = self.evolution_tokens.saturating_add(amount);
    }

    /// Spend evolution tokens, validating the balance first.
    pub fn spend_tokens(&mut self, cost: u32) -> Result<(), DomainError> {
        if self.evolution_tokens < cost {
            return Err(DomainError::InsufficientTokens {
                required: cost,
                available: self.evolution_tokens,
            });
        }
        self.evolution_tokens -= cost;
        Ok(())
    }

    /// Record a completed evolution (trait change applied by the caller).
    pub fn record_evolution(&mut self, now: DateTime<Utc>) {
        self.total_evolutions += 1;
        self.last_evolution_at = Some(now);
        self.last_updated = now;
    }

    /// Invalidate videos after a visual change: back to pending.
    pub fn reset_video_status(&mut self) {
        self.video_generation_status = VideoGenerationStatus::Pending;
        self.video_generation_started_at = None;
        self.video_generation_completed_at = None;
        self.video_generation_error = None;
    }

    /// Apply a narrow video-status patch. This is the only mutation the
    /// background video worker performs.
    pub fn apply_video_patch(&mut self, patch: VideoStatusPatch, now: DateTime<Utc>) {
        match patch {
            VideoStatusPatch::Pending => self.reset_video_status(),
            VideoStatusPatch::Generating { started_at } => {
                self.video_generation_status = VideoGenerationStatus::Generating;
                self.video_generation_started_at = Some(started_at);
                self.video_generation_completed_at = None;
                self.video_generation_error = None;
            }
            VideoStatusPatch::StateVideoReady { mood, url } => {
                self.video_urls.set(mood, url);
            }
            VideoStatusPatch::Completed { completed_at } => {
                self.video_generation_status = VideoGenerationStatus::Completed;
                self.video_generation_completed_at = Some(completed_at);
                self.video_generation_error = None;
            }
            VideoStatusPatch::Failed {
                error,
                completed_at,
            } => {
                self.video_generation_status = VideoGenerationStatus::Failed;
                self.video_generation_completed_at = Some(completed_at);
                self.video_generation_error = Some(error);
            }
        }
        self.last_updated = now;
    }
}
