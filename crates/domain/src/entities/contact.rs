//! Contact entity - the engine's read model of a contact record.
//!
//! Contact CRUD is owned by the surrounding product; the pipeline only
//! reads ownership and the embedded pet, and patches the pet back.

use serde::{Deserialize, Serialize};

use super::Pet;
use crate::ids::{ContactId, OwnerId};

/// A contact record as seen by the pet pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub owner_id: OwnerId,
    /// Contact display name, used as the default pet name
    pub display_name: String,
    /// Embedded 1:1; None until the first successful hatch
    pub pet: Option<Pet>,
}

impl Contact {
    pub fn new(id: ContactId, owner_id: OwnerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            owner_id,
            display_name: display_name.into(),
            pet: None,
        }
    }

    pub fn is_owned_by(&self, owner_id: OwnerId) -> bool {
        self.owner_id == owner_id
    }
}
