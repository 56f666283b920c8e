//! Application-level configuration.
//!
//! - [`CouncilConfig`] — provider timeout, agreement thresholds, status window

pub mod council_config;

pub use council_config::CouncilConfig;
