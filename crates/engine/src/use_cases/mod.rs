//! Entry workflows of the pet pipeline.

mod customize;
mod evolve;
mod hatch;
mod progression;
mod queries;
mod video;

pub use customize::{CustomizePet, CustomizeRequest};
pub use evolve::EvolvePet;
pub use hatch::{HatchOutcome, HatchPet, HatchResult};
pub use progression::RecomputeHappiness;
pub use queries::{CustomizationOptions, PetQueries};
pub use video::{StartVideoGeneration, VideoStartOutcome};

use std::sync::Arc;

use futures_util::future::join_all;

use bondling_domain::{MoodState, MoodUrls, PetTraits};

use crate::infrastructure::ports::{ImageRequest, MediaGenPort};
use crate::prompts;

/// Generate the four mood-state images concurrently and join the results.
///
/// An exhausted or unavailable state degrades to an empty URL; sibling
/// states are never aborted.
pub(crate) async fn generate_mood_images(
    media: &Arc<dyn MediaGenPort>,
    traits: &PetTraits,
    attempts: u32,
) -> MoodUrls {
    let jobs = MoodState::ALL.map(|mood| {
        let media = media.clone();
        let prompt = prompts::image_prompt(traits, mood);
        async move {
            let url = match media.generate_image(ImageRequest::new(prompt, attempts)).await {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        mood = %mood,
                        error = %e,
                        "image generation degraded to empty URL"
                    );
                    String::new()
                }
            };
            (mood, url)
        }
    });

    let urls: MoodUrls = join_all(jobs).await.into_iter().collect();
    tracing::info!(
        populated = urls.populated_count(),
        degraded = MoodState::ALL.len() - urls.populated_count(),
        "mood image generation finished"
    );
    urls
}
