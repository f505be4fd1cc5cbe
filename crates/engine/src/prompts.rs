//! Prompt composition for the generation services.
//!
//! Two prompt families share the base trait description: still images get
//! expression-style modifiers, looping videos get motion-style modifiers.

use bondling_domain::{MoodState, PetTraits};

/// Mood modifier vocabulary for still images.
fn image_mood_modifier(mood: MoodState) -> &'static str {
    match mood {
        MoodState::Neutral => "neutral expression, relaxed posture",
        MoodState::Happy => "bright happy expression, slight smile",
        MoodState::Sad => "droopy sad expression, downcast eyes",
        MoodState::Excited => "wide sparkling eyes, mid-bounce pose",
    }
}

/// Mood modifier vocabulary for looping videos.
fn video_mood_modifier(mood: MoodState) -> &'static str {
    match mood {
        MoodState::Neutral => "sitting calmly, gentle breathing, occasional blink",
        MoodState::Happy => "tail wagging softly, cheerful idle sway",
        MoodState::Sad => "slow slumped sway, heavy sighs",
        MoodState::Excited => "bouncing energetically, quick happy hops",
    }
}

/// Shared base description built from the pet's traits.
fn base_description(traits: &PetTraits) -> String {
    let mut description = format!(
        "a cute cartoon {} pet with {} coloring and a {} pattern",
        traits.species, traits.color, traits.pattern
    );
    if traits.has_accessory() {
        description.push_str(&format!(", wearing a {}", traits.accessory));
    }
    description
}

/// Prompt for one mood state's still image.
pub fn image_prompt(traits: &PetTraits, mood: MoodState) -> String {
    format!(
        "{}, {}, soft studio lighting, plain background, digital art",
        base_description(traits),
        image_mood_modifier(mood)
    )
}

/// Prompt for one mood state's looping video.
pub fn video_prompt(traits: &PetTraits, mood: MoodState) -> String {
    format!(
        "{}, {}, seamless loop, plain background, digital art",
        base_description(traits),
        video_mood_modifier(mood)
    )
}
