// ARCLS Virtual Switcher
// Program/preview switching, source and scene registries, overlay composition

pub mod models;
pub mod services;
