//! Domain layer - core business logic and entities

pub mod launch;
pub mod selection;
