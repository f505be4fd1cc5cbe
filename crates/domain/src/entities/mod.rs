//! Domain entities.

mod contact;
mod pet;

pub use contact::Contact;
pub use pet::{MoodUrls, Pet};
