//! End-to-end pipeline tests: the fully wired [`App`] against the
//! in-memory contact store and a stub generation service.

use std::sync::Arc;

use async_trait::async_trait;

use bondling_domain::{
    Contact, ContactId, OwnerId, RelationshipStats, TraitField, VideoGenerationStatus,
};
use bondling_engine::infrastructure::clock::{SystemClock, SystemRandom};
use bondling_engine::infrastructure::memory_repo::InMemoryContactRepo;
use bondling_engine::infrastructure::ports::{
    ClockPort, ContactRepo, ImageRequest, MediaGenError, MediaGenPort, RandomPort, VideoRequest,
};
use bondling_engine::infrastructure::settings::EngineSettings;
use bondling_engine::use_cases::{CustomizeRequest, HatchOutcome, VideoStartOutcome};
use bondling_engine::App;

/// Generation service stub that always succeeds.
struct StubMedia;

#[async_trait]
impl MediaGenPort for StubMedia {
    async fn generate_image(&self, request: ImageRequest) -> Result<String, MediaGenError> {
        Ok(format!("https://cdn.test/img/{}.png", request.prompt.len()))
    }

    async fn generate_video(&self, request: VideoRequest) -> Result<String, MediaGenError> {
        Ok(format!("https://cdn.test/vid/{}.mp4", request.prompt.len()))
    }

    async fn check_health(&self) -> Result<bool, MediaGenError> {
        Ok(true)
    }
}

struct Harness {
    app: App,
    contacts: Arc<InMemoryContactRepo>,
}

fn harness() -> Harness {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());
    let contacts = Arc::new(InMemoryContactRepo::new(clock.clone()));
    let settings = EngineSettings {
        video_cooldown_secs: 0,
        ..EngineSettings::default()
    };
    let app = App::new(
        contacts.clone() as Arc<dyn ContactRepo>,
        Arc::new(StubMedia),
        clock,
        random,
        settings,
    );
    Harness { app, contacts }
}

fn seed_contact(harness: &Harness) -> (ContactId, OwnerId) {
    let contact_id = ContactId::new();
    let owner_id = OwnerId::new();
    harness
        .contacts
        .insert_contact(Contact::new(contact_id, owner_id, "Alex"));
    (contact_id, owner_id)
}

#[tokio::test]
async fn hatch_then_query_round_trips_through_the_store() {
    let harness = harness();
    let (contact_id, owner_id) = seed_contact(&harness);

    let result = harness.app.hatch_pet(contact_id, owner_id, 88).await.unwrap();
    assert_eq!(result.outcome, HatchOutcome::FirstHatch);

    let pet = harness.app.get_pet_data(contact_id).await.unwrap().unwrap();
    assert_eq!(pet.level, 3);
    assert_eq!(pet.happiness, 88);
    assert_eq!(pet.evolution_tokens, 3);
    assert_eq!(pet.image_urls.populated_count(), 4);
    assert_eq!(pet.video_generation_status, VideoGenerationStatus::Pending);
}

#[tokio::test]
async fn evolve_spends_a_token_and_persists_the_change() {
    let harness = harness();
    let (contact_id, owner_id) = seed_contact(&harness);
    harness.app.hatch_pet(contact_id, owner_id, 50).await.unwrap();

    let before = harness.app.get_pet_data(contact_id).await.unwrap().unwrap();
    let new_color = harness
        .app
        .get_customization_options(&before.pet_type)
        .colors[0];

    let pet = harness
        .app
        .evolve_pet(contact_id, owner_id, TraitField::Color, new_color)
        .await
        .unwrap();

    assert_eq!(pet.color, new_color);
    assert_eq!(pet.evolution_tokens, before.evolution_tokens - 1);
    assert_eq!(pet.total_evolutions, 1);

    let stored = harness.app.get_pet_data(contact_id).await.unwrap().unwrap();
    assert_eq!(stored, pet);
}

#[tokio::test]
async fn video_job_runs_to_completion_in_the_background() {
    let harness = harness();
    let (contact_id, owner_id) = seed_contact(&harness);
    harness.app.hatch_pet(contact_id, owner_id, 50).await.unwrap();

    let outcome = harness
        .app
        .start_video_generation(contact_id, owner_id)
        .await
        .unwrap();
    let task = match outcome {
        VideoStartOutcome::Started { task } => task,
        VideoStartOutcome::AlreadyInProgress => panic!("no prior job existed"),
    };
    task.await.unwrap();

    let pet = harness.app.get_pet_data(contact_id).await.unwrap().unwrap();
    assert_eq!(pet.video_generation_status, VideoGenerationStatus::Completed);
    assert_eq!(pet.video_urls.populated_count(), 4);
    assert!(pet.video_generation_completed_at.is_some());
}

#[tokio::test]
async fn progression_level_up_awards_tokens() {
    let harness = harness();
    let (contact_id, owner_id) = seed_contact(&harness);
    harness.app.hatch_pet(contact_id, owner_id, 30).await.unwrap();

    let stats = RelationshipStats {
        communication: 100,
        trust: 100,
        engagement: 100,
        consistency: 100,
    };
    let outcome = harness
        .app
        .recompute_happiness(contact_id, stats)
        .await
        .unwrap();

    assert!(outcome.leveled_up);
    assert_eq!(outcome.level, 4);
    assert_eq!(outcome.tokens_awarded, 2);

    let pet = harness.app.get_pet_data(contact_id).await.unwrap().unwrap();
    assert_eq!(pet.level, 4);
    assert_eq!(pet.evolution_tokens, 5);
}

#[tokio::test]
async fn customize_regenerates_media_without_spending_tokens() {
    let harness = harness();
    let (contact_id, owner_id) = seed_contact(&harness);
    harness.app.hatch_pet(contact_id, owner_id, 50).await.unwrap();

    let request = CustomizeRequest {
        pet_name: Some("Waffle".into()),
        accessory: Some("hat".into()),
        ..CustomizeRequest::default()
    };
    let pet = harness.app.customize_pet(contact_id, request).await.unwrap();

    assert_eq!(pet.pet_name, "Waffle");
    assert_eq!(pet.accessory, "hat");
    assert_eq!(pet.evolution_tokens, 3);
    assert_eq!(pet.video_urls.populated_count(), 4);
    assert_eq!(pet.video_generation_status, VideoGenerationStatus::Completed);
}

#[tokio::test]
async fn second_hatch_regenerates_instead_of_replacing() {
    let harness = harness();
    let (contact_id, owner_id) = seed_contact(&harness);

    let first = harness.app.hatch_pet(contact_id, owner_id, 50).await.unwrap();
    let second = harness.app.hatch_pet(contact_id, owner_id, 90).await.unwrap();

    assert_eq!(second.outcome, HatchOutcome::Regenerated);
    assert_eq!(second.pet.pet_type, first.pet.pet_type);
    assert_eq!(second.pet.hatched_at, first.pet.hatched_at);
    assert!(second.pet.regenerated_at.is_some());
    assert_eq!(second.pet.level, 3);
}
