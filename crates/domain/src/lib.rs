//! # Bondling Domain
//!
//! Core domain types for the relationship-pet pipeline: the pet entity and
//! its video-status machine, typed IDs, trait vocabulary, and pure
//! progression math. No I/O lives here.

pub mod entities;
pub mod error;
pub mod ids;
pub mod progression;
pub mod types;

pub use entities::{Contact, MoodUrls, Pet};
pub use error::DomainError;
pub use ids::{ContactId, OwnerId};
pub use progression::{ProgressionOutcome, RelationshipStats};
pub use types::{MoodState, PetTraits, TraitField, VideoGenerationStatus, VideoStatusPatch};
