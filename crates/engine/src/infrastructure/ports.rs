//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Ports exist for:
//! - Contact storage (the surrounding product owns the records)
//! - Media generation (could swap providers)
//! - Clock/Random (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use bondling_domain::{Contact, ContactId, Pet, VideoStatusPatch};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Not found: {entity_type} {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MediaGenError {
    #[error("Generation request failed: {0}")]
    RequestFailed(String),
    #[error("Generation timed out after {0} seconds")]
    Timeout(u64),
    #[error("Service unavailable")]
    Unavailable,
}

// =============================================================================
// Media Generation Types
// =============================================================================

/// One still-image generation job.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub enable_safety_checker: bool,
    /// Attempt budget for this job (3 for hatch, 2 for evolution paths)
    pub attempts: u32,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>, attempts: u32) -> Self {
        Self {
            prompt: prompt.into(),
            width: 512,
            height: 512,
            steps: 25,
            enable_safety_checker: true,
            attempts,
        }
    }
}

/// One looping-video generation job.
#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub prompt: String,
    pub duration_secs: u32,
    pub aspect_ratio: String,
    pub resolution: String,
    pub fps: u32,
    pub seed: u32,
    /// Attempt budget for this job
    pub attempts: u32,
}

impl VideoRequest {
    pub fn new(prompt: impl Into<String>, seed: u32, attempts: u32) -> Self {
        Self {
            prompt: prompt.into(),
            duration_secs: 5,
            aspect_ratio: "1:1".to_string(),
            resolution: "512p".to_string(),
            fps: 24,
            seed,
            attempts,
        }
    }
}

/// External generation services. Implementations retry internally per the
/// request's attempt budget; an `Err` means the budget is exhausted and the
/// caller degrades that one state to an empty URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaGenPort: Send + Sync {
    async fn generate_image(&self, request: ImageRequest) -> Result<String, MediaGenError>;
    async fn generate_video(&self, request: VideoRequest) -> Result<String, MediaGenError>;
    async fn check_health(&self) -> Result<bool, MediaGenError>;
}

// =============================================================================
// Contact Storage Port
// =============================================================================

/// Access to contact records and the embedded pet.
///
/// Two write shapes exist deliberately: `save_pet` merges the whole pet
/// record (hatch/evolve/customize/progression), while `apply_video_patch`
/// is restricted to the video-status fields so the background worker can
/// never clobber a concurrent full-record edit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepo: Send + Sync {
    async fn get(&self, id: ContactId) -> Result<Option<Contact>, RepoError>;

    /// Full-object patch: replace the embedded pet record.
    async fn save_pet(&self, id: ContactId, pet: &Pet) -> Result<(), RepoError>;

    /// Narrow status-only patch, used exclusively by the video workflow.
    async fn apply_video_patch(
        &self,
        id: ContactId,
        patch: VideoStatusPatch,
    ) -> Result<(), RepoError>;

    /// Atomically transition the pet's video status to `generating`.
    ///
    /// Compare-and-swap: returns `Ok(false)` without writing when a job is
    /// already generating, closing the race window between two concurrent
    /// start calls.
    async fn begin_video_generation(
        &self,
        id: ContactId,
        started_at: DateTime<Utc>,
    ) -> Result<bool, RepoError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform draw in [0, 1)
    fn roll(&self) -> f64;
    /// Uniform index in 0..len (len > 0)
    fn pick_index(&self, len: usize) -> usize;
    /// Seed for video generation requests
    fn gen_seed(&self) -> u32;
}
