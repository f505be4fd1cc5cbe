//! Trait vocabulary: the four visual/identity dimensions of a pet.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The selected traits for a pet, produced by the trait selector and
/// preserved across regenerations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetTraits {
    /// Species key from the template registry
    pub species: String,
    pub color: String,
    pub pattern: String,
    /// "none" when the pet wears nothing
    pub accessory: String,
}

impl PetTraits {
    pub fn new(
        species: impl Into<String>,
        color: impl Into<String>,
        pattern: impl Into<String>,
        accessory: impl Into<String>,
    ) -> Self {
        Self {
            species: species.into(),
            color: color.into(),
            pattern: pattern.into(),
            accessory: accessory.into(),
        }
    }

    pub fn has_accessory(&self) -> bool {
        self.accessory != "none"
    }
}

/// A customizable pet field, as named by the evolve entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitField {
    Name,
    Color,
    Pattern,
    Accessory,
}

impl TraitField {
    /// Evolution token cost of changing this field. Renaming is free;
    /// visual changes cost one token.
    pub fn token_cost(&self) -> u32 {
        match self {
            Self::Name => 0,
            Self::Color | Self::Pattern | Self::Accessory => 1,
        }
    }

    /// Whether changing this field invalidates the generated media.
    pub fn is_visual(&self) -> bool {
        !matches!(self, Self::Name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Color => "color",
            Self::Pattern => "pattern",
            Self::Accessory => "accessory",
        }
    }
}

impl fmt::Display for TraitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TraitField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "color" => Ok(Self::Color),
            "pattern" => Ok(Self::Pattern),
            "accessory" => Ok(Self::Accessory),
            other => Err(DomainError::Parse(format!("unknown trait field: {other}"))),
        }
    }
}
