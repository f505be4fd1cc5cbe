//! Application composition.

use std::sync::Arc;

use bondling_domain::{
    progression::{ProgressionOutcome, RelationshipStats},
    ContactId, OwnerId, Pet, TraitField,
};

use crate::error::PetError;
use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    media_client::GenerationClient,
    memory_repo::InMemoryContactRepo,
    ports::{ClockPort, ContactRepo, MediaGenPort, RandomPort},
    settings::EngineSettings,
};
use crate::selector::TraitSelector;
use crate::templates::PetTemplate;
use crate::use_cases::{
    CustomizationOptions, CustomizePet, CustomizeRequest, EvolvePet, HatchPet, HatchResult,
    PetQueries, RecomputeHappiness, StartVideoGeneration, VideoStartOutcome,
};

/// The wired pipeline. Embedders construct one `App` and call the
/// operation methods; every dependency behind it is a port.
pub struct App {
    pub hatch: HatchPet,
    pub evolve: EvolvePet,
    pub customize: CustomizePet,
    pub video: StartVideoGeneration,
    pub progression: RecomputeHappiness,
    pub queries: PetQueries,
}

impl App {
    /// Wire every use case against the given ports.
    pub fn new(
        contacts: Arc<dyn ContactRepo>,
        media: Arc<dyn MediaGenPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            hatch: HatchPet::new(
                contacts.clone(),
                media.clone(),
                TraitSelector::new(random.clone()),
                clock.clone(),
                settings.clone(),
            ),
            evolve: EvolvePet::new(
                contacts.clone(),
                media.clone(),
                clock.clone(),
                settings.clone(),
            ),
            customize: CustomizePet::new(
                contacts.clone(),
                media.clone(),
                clock.clone(),
                random.clone(),
                settings.clone(),
            ),
            video: StartVideoGeneration::new(
                contacts.clone(),
                media,
                clock.clone(),
                random,
                settings,
            ),
            progression: RecomputeHappiness::new(contacts.clone(), clock),
            queries: PetQueries::new(contacts),
        }
    }

    /// Production wiring: system clock and RNG, the HTTP generation client,
    /// and the in-memory contact store.
    pub fn with_defaults(settings: EngineSettings) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());
        let media: Arc<dyn MediaGenPort> = Arc::new(GenerationClient::new(&settings));
        let contacts: Arc<dyn ContactRepo> = Arc::new(InMemoryContactRepo::new(clock.clone()));
        Self::new(contacts, media, clock, random, settings)
    }

    pub async fn hatch_pet(
        &self,
        contact_id: ContactId,
        owner_id: OwnerId,
        health: u8,
    ) -> Result<HatchResult, PetError> {
        self.hatch.execute(contact_id, owner_id, health).await
    }

    pub async fn evolve_pet(
        &self,
        contact_id: ContactId,
        owner_id: OwnerId,
        field: TraitField,
        value: impl Into<String>,
    ) -> Result<Pet, PetError> {
        self.evolve.execute(contact_id, owner_id, field, value).await
    }

    pub async fn customize_pet(
        &self,
        contact_id: ContactId,
        request: CustomizeRequest,
    ) -> Result<Pet, PetError> {
        self.customize.execute(contact_id, request).await
    }

    pub async fn start_video_generation(
        &self,
        contact_id: ContactId,
        owner_id: OwnerId,
    ) -> Result<VideoStartOutcome, PetError> {
        self.video.execute(contact_id, owner_id).await
    }

    pub async fn recompute_happiness(
        &self,
        contact_id: ContactId,
        stats: RelationshipStats,
    ) -> Result<ProgressionOutcome, PetError> {
        self.progression.execute(contact_id, stats).await
    }

    pub async fn get_pet_data(&self, contact_id: ContactId) -> Result<Option<Pet>, PetError> {
        self.queries.get_pet_data(contact_id).await
    }

    pub fn get_templates(&self) -> &'static [PetTemplate] {
        self.queries.get_templates()
    }

    pub fn get_customization_options(&self, species: &str) -> CustomizationOptions {
        self.queries.get_customization_options(species)
    }
}
