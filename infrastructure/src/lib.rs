//! Infrastructure layer for ai-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod persona;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlOperationJournal;
pub use persona::MoodTracker;
pub use providers::{SimulatedProvider, build_registry, builtin_profile, builtin_profiles};
