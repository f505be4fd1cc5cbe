//! Mood states for pet media assets
//!
//! Every pet carries one image and one looping video per mood state.
//! The declaration order of [`MoodState::ALL`] is the order media jobs
//! are issued in, so it is part of the contract.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pet's visual mood state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodState {
    /// Resting baseline (default state)
    #[default]
    Neutral,
    /// Content, playful
    Happy,
    /// Down, wistful
    Sad,
    /// Energized, bouncing
    Excited,
}

impl MoodState {
    /// All mood states, in the order media generation jobs run
    pub const ALL: [MoodState; 4] = [
        MoodState::Neutral,
        MoodState::Happy,
        MoodState::Sad,
        MoodState::Excited,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Excited => "excited",
        }
    }
}

impl fmt::Display for MoodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MoodState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "happy" => Ok(Self::Happy),
            "sad" => Ok(Self::Sad),
            "excited" => Ok(Self::Excited),
            other => Err(DomainError::Parse(format!("unknown mood state: {other}"))),
        }
    }
}
