//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderId`] — the closed set of AI providers, in tie-break order
//! - [`request::RequestKind`] — the three operations a provider can serve
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod provider;
pub mod request;
