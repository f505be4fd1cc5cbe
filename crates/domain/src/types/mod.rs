//! Shared vocabulary types for the pet pipeline.
//!
//! ## Design Principles
//!
//! 1. **Pure data types** - No I/O, no async, no side effects
//! 2. **Stable API** - These types cross the domain/engine boundary
//! 3. **Serializable** - All types derive Serialize/Deserialize

// Mood states (one image + one video asset each)
mod mood;
pub use mood::MoodState;

// Video generation state machine
mod video_status;
pub use video_status::{VideoGenerationStatus, VideoStatusPatch};

// Trait vocabulary
mod pet_traits;
pub use pet_traits::{PetTraits, TraitField};
