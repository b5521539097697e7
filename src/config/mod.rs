//! Configuration for opsdesk
//!
//! Contains path resolution and server settings management.

pub mod paths;
pub mod settings;

pub use paths::OpsdeskPaths;
pub use settings::Settings;
