//! Read-only query surface. No query mutates state.

use std::sync::Arc;

use serde::Serialize;

use bondling_domain::{ContactId, Pet};

use crate::error::PetError;
use crate::infrastructure::ports::ContactRepo;
use crate::templates::{self, PetTemplate, ACCESSORIES, TEMPLATES};

/// Color/pattern/accessory choices available for a species.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationOptions {
    pub species: String,
    pub colors: &'static [&'static str],
    pub patterns: &'static [&'static str],
    pub accessories: &'static [&'static str],
}

pub struct PetQueries {
    contacts: Arc<dyn ContactRepo>,
}

impl PetQueries {
    pub fn new(contacts: Arc<dyn ContactRepo>) -> Self {
        Self { contacts }
    }

    /// The pet embedded in a contact, `None` when the contact exists but has
    /// not hatched yet.
    pub async fn get_pet_data(&self, contact_id: ContactId) -> Result<Option<Pet>, PetError> {
        let contact = self
            .contacts
            .get(contact_id)
            .await?
            .ok_or_else(|| PetError::not_found("Contact", contact_id.to_string()))?;
        Ok(contact.pet)
    }

    /// The full species registry, in declaration order.
    pub fn get_templates(&self) -> &'static [PetTemplate] {
        &TEMPLATES
    }

    /// Options for a species; unknown species resolve to the generic set.
    pub fn get_customization_options(&self, species: &str) -> CustomizationOptions {
        let (colors, patterns) = templates::options_for_species(species);
        CustomizationOptions {
            species: species.to_string(),
            colors,
            patterns,
            accessories: &ACCESSORIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockContactRepo;
    use bondling_domain::{Contact, MoodUrls, OwnerId, PetTraits};
    use chrono::{TimeZone, Utc};

    fn contact_with_pet(contact_id: ContactId) -> Contact {
        let mut contact = Contact::new(contact_id, OwnerId::new(), "Alex");
        contact.pet = Some(Pet::hatch(
            PetTraits::new("phoenix", "ember", "flaming", "none"),
            "Cinder",
            "phoenix_ember_flaming_1",
            MoodUrls::default(),
            1,
            50,
            3,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ));
        contact
    }

    #[tokio::test]
    async fn pet_data_returns_embedded_pet() {
        let contact_id = ContactId::new();
        let mut contacts = MockContactRepo::new();
        contacts
            .expect_get()
            .returning(move |_| Ok(Some(contact_with_pet(contact_id))));

        let pet = PetQueries::new(Arc::new(contacts))
            .get_pet_data(contact_id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(pet.pet_type, "phoenix");
    }

    #[tokio::test]
    async fn unhatched_contact_yields_none() {
        let contact_id = ContactId::new();
        let mut contacts = MockContactRepo::new();
        contacts
            .expect_get()
            .returning(move |_| Ok(Some(Contact::new(contact_id, OwnerId::new(), "Alex"))));

        let pet = PetQueries::new(Arc::new(contacts))
            .get_pet_data(contact_id)
            .await
            .unwrap();

        assert!(pet.is_none());
    }

    #[tokio::test]
    async fn missing_contact_is_not_found() {
        let mut contacts = MockContactRepo::new();
        contacts.expect_get().returning(|_| Ok(None));

        let result = PetQueries::new(Arc::new(contacts))
            .get_pet_data(ContactId::new())
            .await;

        assert!(matches!(
            result,
            Err(PetError::NotFound {
                entity_type: "Contact",
                ..
            })
        ));
    }

    #[test]
    fn templates_are_exposed_in_declaration_order() {
        let queries = PetQueries::new(Arc::new(MockContactRepo::new()));
        let templates = queries.get_templates();
        assert_eq!(templates.len(), 6);
        assert_eq!(templates[0].species, "blob");
        assert_eq!(templates[5].species, "phoenix");
    }

    #[test]
    fn unknown_species_gets_generic_options() {
        let queries = PetQueries::new(Arc::new(MockContactRepo::new()));
        let options = queries.get_customization_options("unicorn");
        assert_eq!(options.colors, templates::FALLBACK_COLORS);
        assert_eq!(options.accessories[0], "none");
    }
}
