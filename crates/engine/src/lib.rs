//! Bondling engine library.
//!
//! Server-side pipeline for generative relationship pets: hatching,
//! trait evolution, customization, background video generation, and
//! relationship-driven progression.
//!
//! ## Structure
//!
//! - `templates` - Static species registry
//! - `selector` - Weighted trait sampling
//! - `prompts` - Mood-aware prompt construction
//! - `use_cases/` - Workflow orchestration
//! - `infrastructure/` - Ports and adapters (generation client, stores)
//! - `app` - Application composition

pub mod app;
pub mod error;
pub mod infrastructure;
pub mod prompts;
pub mod selector;
pub mod templates;
pub mod use_cases;

pub use app::App;
pub use error::PetError;
