//! Provides abstractions over the system state the bridge reads and changes

/// Wiring of system or mock capabilities
pub mod dependency_provider;
pub mod permission;
pub mod settings;
pub mod window;
