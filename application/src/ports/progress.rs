//! Progress notification port
//!
//! Defines the interface for reporting progress during a council dispatch.

use council_domain::{ProviderId, RequestKind};

/// Callback for progress updates during a dispatch
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait DispatchProgress: Send + Sync {
    /// Called once the provider snapshot is taken and tasks are about to start
    fn on_dispatch_start(&self, kind: RequestKind, providers: &[ProviderId]);

    /// Called when one provider reaches a terminal state
    fn on_provider_complete(&self, provider: ProviderId, success: bool);

    /// Called after every provider has finished
    fn on_dispatch_complete(&self, kind: RequestKind);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DispatchProgress for NoProgress {
    fn on_dispatch_start(&self, _kind: RequestKind, _providers: &[ProviderId]) {}
    fn on_provider_complete(&self, _provider: ProviderId, _success: bool) {}
    fn on_dispatch_complete(&self, _kind: RequestKind) {}
}
