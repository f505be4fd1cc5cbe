//! Infrastructure: ports, external service clients, storage, settings.

pub mod clock;
pub mod media_client;
pub mod memory_repo;
pub mod ports;
pub mod settings;
