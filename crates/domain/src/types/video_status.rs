//! Video generation status machine
//!
//! The pet record carries the status of its (at most one) background video
//! job. Transitions are expressed as [`VideoStatusPatch`] values so that the
//! background worker's narrow write path can only ever touch these fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MoodState;

/// Status of the background video generation job for a pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoGenerationStatus {
    /// No job running; videos are stale or absent
    #[default]
    Pending,
    /// A detached job is currently producing videos
    Generating,
    /// The last job finished all mood states
    Completed,
    /// The last job died; see the recorded error message
    Failed,
}

impl VideoGenerationStatus {
    /// Check if this is a terminal state (no further transitions expected)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Check if a job is actively running
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Generating)
    }
}

impl std::fmt::Display for VideoGenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Generating => write!(f, "generating"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Narrow mutation shape for the video workflow.
///
/// This is the only write path the detached video worker uses, so a
/// long-running job's status writes cannot clobber unrelated concurrent
/// edits to the pet record. The enum is closed: there is no way to express
/// a write to any other pet field through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoStatusPatch {
    /// Reset to pending (videos invalidated, e.g. after a visual trait change)
    Pending,
    /// Mark a job started; sets `started_at`, clears `completed_at` and error
    Generating { started_at: DateTime<Utc> },
    /// One mood state's video finished; persisted immediately, not buffered
    StateVideoReady { mood: MoodState, url: String },
    /// The whole job finished
    Completed { completed_at: DateTime<Utc> },
    /// The job died with an error
    Failed {
        error: String,
        completed_at: DateTime<Utc>,
    },
}
