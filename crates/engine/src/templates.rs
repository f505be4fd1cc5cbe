//! Static template registry: the weighted catalog of hatchable species.
//!
//! `hatch_chance` values are sampling weights walked in declaration order
//! with a cumulative sum; they are not required to add up to 1. Unknown
//! species resolve to a generic fallback option set so customization
//! queries never fail.

use serde::Serialize;

/// Rarity tier, display metadata only (selection is driven by weight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// One species entry in the registry.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetTemplate {
    pub species: &'static str,
    pub rarity: Rarity,
    pub hatch_chance: f64,
    pub colors: &'static [&'static str],
    pub patterns: &'static [&'static str],
}

/// Declaration order is the sampling order and is part of the contract.
pub const TEMPLATES: [PetTemplate; 6] = [
    PetTemplate {
        species: "blob",
        rarity: Rarity::Common,
        hatch_chance: 0.30,
        colors: &["mint", "lavender", "peach", "sky"],
        patterns: &["solid", "speckled", "gradient"],
    },
    PetTemplate {
        species: "cat",
        rarity: Rarity::Common,
        hatch_chance: 0.25,
        colors: &["ginger", "tuxedo", "gray", "calico"],
        patterns: &["solid", "tabby", "patched"],
    },
    PetTemplate {
        species: "fox",
        rarity: Rarity::Uncommon,
        hatch_chance: 0.18,
        colors: &["amber", "silver", "cream"],
        patterns: &["solid", "striped", "tipped"],
    },
    PetTemplate {
        species: "axolotl",
        rarity: Rarity::Uncommon,
        hatch_chance: 0.12,
        colors: &["pink", "gold", "slate"],
        patterns: &["solid", "mottled", "frilled"],
    },
    PetTemplate {
        species: "dragon",
        rarity: Rarity::Rare,
        hatch_chance: 0.10,
        colors: &["emerald", "crimson", "cobalt"],
        patterns: &["scaled", "iridescent", "horned"],
    },
    PetTemplate {
        species: "phoenix",
        rarity: Rarity::Legendary,
        hatch_chance: 0.05,
        colors: &["sunrise", "ember", "opal"],
        patterns: &["flaming", "glowing"],
    },
];

/// Global accessory options, independent of species.
pub const ACCESSORIES: [&str; 5] = ["none", "hat", "bow", "collar", "glasses"];

/// Generic option set for species not in the registry.
pub const FALLBACK_COLORS: &[&str] = &["white", "black", "brown"];
pub const FALLBACK_PATTERNS: &[&str] = &["solid", "spotted"];

/// Look up a species entry.
pub fn by_species(species: &str) -> Option<&'static PetTemplate> {
    TEMPLATES.iter().find(|t| t.species == species)
}

/// Color/pattern options for a species, with the generic fallback for
/// unknown species.
pub fn options_for_species(species: &str) -> (&'static [&'static str], &'static [&'static str]) {
    match by_species(species) {
        Some(template) => (template.colors, template.patterns),
        None => (FALLBACK_COLORS, FALLBACK_PATTERNS),
    }
}
