//! Progress reporting for council dispatches

use colored::Colorize;
use council_application::DispatchProgress;
use council_domain::{ProviderId, RequestKind};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};

/// Reports progress during a dispatch with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchProgress for ProgressReporter {
    fn on_dispatch_start(&self, kind: RequestKind, providers: &[ProviderId]) {
        let pb = ProgressBar::new(providers.len() as u64);
        pb.set_style(Self::style());
        pb.set_prefix(kind.label());
        pb.set_message("Consulting the council...");

        *self.bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_provider_complete(&self, provider: ProviderId, success: bool) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), provider.display_name())
            } else {
                format!("{} {}", "x".red(), provider.display_name())
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_dispatch_complete(&self, _kind: RequestKind) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DispatchProgress for SimpleProgress {
    fn on_dispatch_start(&self, kind: RequestKind, providers: &[ProviderId]) {
        println!(
            "{} {} ({} providers)",
            "->".cyan(),
            kind.label().bold(),
            providers.len()
        );
    }

    fn on_provider_complete(&self, provider: ProviderId, success: bool) {
        if success {
            println!("  {} {}", "v".green(), provider.display_name());
        } else {
            println!("  {} {} (failed)", "x".red(), provider.display_name());
        }
    }

    fn on_dispatch_complete(&self, _kind: RequestKind) {
        println!();
    }
}
