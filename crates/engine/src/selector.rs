//! Trait selection: weighted species sampling and uniform trait picks,
//! with preservation when regenerating an existing pet.

use std::sync::Arc;

use bondling_domain::{Pet, PetTraits};

use crate::infrastructure::ports::RandomPort;
use crate::templates::{self, PetTemplate, ACCESSORIES, TEMPLATES};

pub struct TraitSelector {
    random: Arc<dyn RandomPort>,
}

impl TraitSelector {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    /// Draw a species template by cumulative hatch-chance weights.
    ///
    /// Walks the registry in declaration order accumulating `hatch_chance`;
    /// the first entry whose cumulative sum reaches the draw wins. Weights
    /// summing below 1 leave the last-iterated entry selected.
    pub fn select_template(&self) -> &'static PetTemplate {
        let draw = self.random.roll();
        let mut selected = &TEMPLATES[0];
        let mut cumulative = 0.0;
        for template in &TEMPLATES {
            selected = template;
            cumulative += template.hatch_chance;
            if cumulative >= draw {
                break;
            }
        }
        selected
    }

    /// Uniform picks from the template's option lists plus a global
    /// accessory.
    pub fn select_traits(&self, template: &PetTemplate) -> PetTraits {
        let color = template.colors[self.random.pick_index(template.colors.len())];
        let pattern = template.patterns[self.random.pick_index(template.patterns.len())];
        let accessory = ACCESSORIES[self.random.pick_index(ACCESSORIES.len())];
        PetTraits::new(template.species, color, pattern, accessory)
    }

    /// On a regenerate path, traits come from the existing record instead of
    /// being resampled; the template is re-derived from the stored species,
    /// falling back to the registry's first entry if unknown.
    pub fn preserve_traits(&self, pet: &Pet) -> (&'static PetTemplate, PetTraits) {
        let template = templates::by_species(&pet.pet_type).unwrap_or(&TEMPLATES[0]);
        (template, pet.traits())
    }
}

/// Derived identifier: species_color_pattern_timestamp.
pub fn template_id(traits: &PetTraits, timestamp_millis: i64) -> String {
    format!(
        "{}_{}_{}_{}",
        traits.species, traits.color, traits.pattern, timestamp_millis
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;
    use bondling_domain::MoodUrls;
    use chrono::Utc;

    fn selector(roll: f64) -> TraitSelector {
        TraitSelector::new(Arc::new(FixedRandom(roll)))
    }

    #[test]
    fn low_draw_selects_first_entry() {
        let template = selector(0.0).select_template();
        assert_eq!(template.species, TEMPLATES[0].species);
    }

    #[test]
    fn draw_past_first_weight_selects_second_entry() {
        // First weight is 0.30, so 0.31 lands in the second bucket.
        let template = selector(0.31).select_template();
        assert_eq!(template.species, TEMPLATES[1].species);
    }

    #[test]
    fn draw_of_one_selects_last_entry_when_weights_exhaust() {
        // Weights sum to 1.0 exactly; a draw of 1.0 never crosses the
        // threshold, leaving the last-iterated entry selected.
        let template = selector(1.0).select_template();
        assert_eq!(template.species, TEMPLATES[TEMPLATES.len() - 1].species);
    }

    #[test]
    fn selected_traits_come_from_template_options() {
        let template = templates::by_species("fox").unwrap();
        let traits = selector(0.5).select_traits(template);
        assert_eq!(traits.species, "fox");
        assert!(template.colors.contains(&traits.color.as_str()));
        assert!(template.patterns.contains(&traits.pattern.as_str()));
        assert!(ACCESSORIES.contains(&traits.accessory.as_str()));
    }

    #[test]
    fn preserve_traits_keeps_existing_record() {
        let pet = Pet::hatch(
            PetTraits::new("dragon", "emerald", "scaled", "hat"),
            "Smolder",
            "dragon_emerald_scaled_1",
            MoodUrls::default(),
            1,
            50,
            3,
            Utc::now(),
        );
        let (template, traits) = selector(0.0).preserve_traits(&pet);
        assert_eq!(template.species, "dragon");
        assert_eq!(traits.color, "emerald");
        assert_eq!(traits.accessory, "hat");
    }

    #[test]
    fn unknown_species_falls_back_to_first_registry_entry() {
        let pet = Pet::hatch(
            PetTraits::new("chimera", "violet", "banded", "none"),
            "Mix",
            "chimera_violet_banded_1",
            MoodUrls::default(),
            1,
            50,
            3,
            Utc::now(),
        );
        let (template, traits) = selector(0.0).preserve_traits(&pet);
        assert_eq!(template.species, TEMPLATES[0].species);
        // Traits themselves are still preserved verbatim.
        assert_eq!(traits.species, "chimera");
    }

    #[test]
    fn template_id_is_species_color_pattern_timestamp() {
        let traits = PetTraits::new("fox", "amber", "striped", "none");
        assert_eq!(template_id(&traits, 1700000000000), "fox_amber_striped_1700000000000");
    }
}
