//! Persona sink port
//!
//! The persona layer observes dispatch outcomes as
//! [`PersonaEvent`](council_domain::PersonaEvent)s. It is a pure sink: nothing
//! it does feeds back into orchestration.

use council_domain::{Mood, PersonaEvent, Reflection};

pub trait PersonaSink: Send + Sync {
    fn on_event(&self, event: PersonaEvent);

    /// Copy of the current mood, for sinks that keep one
    fn current_mood(&self) -> Option<Mood> {
        None
    }

    /// Reflection log, oldest first
    fn reflections(&self) -> Vec<Reflection> {
        Vec::new()
    }

    /// Log a reflection on `context`; `None` when the sink keeps no log
    fn reflect(&self, _context: &str, _significance: f64) -> Option<Reflection> {
        None
    }
}

/// Sink that ignores every event
pub struct NoPersona;

impl PersonaSink for NoPersona {
    fn on_event(&self, _event: PersonaEvent) {}
}
