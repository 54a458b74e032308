// src/core/mod.rs

/// Turning a record into the current working context.
pub mod activation;
/// Record color hints to terminal colors.
pub mod color;
/// Create, delete and validate environments.
pub mod environment_manager;
/// Path normalization, folder keys and config locations.
pub mod paths;
/// Command aliases bound to the active environment.
pub mod proxy;
/// Loading and saving the registry document with backups.
pub mod registry_store;
