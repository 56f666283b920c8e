//! Provider adapters
//!
//! [`SimulatedProvider`] implements the
//! [`ProviderClient`](council_application::ProviderClient) port from a
//! [`ProviderProfile`](council_domain::ProviderProfile); [`catalog`] holds
//! the built-in profiles.

pub mod catalog;
pub mod simulated;

pub use catalog::{build_registry, builtin_profile, builtin_profiles};
pub use simulated::SimulatedProvider;
