//! In-memory mood tracker implementing the persona sink

use council_application::PersonaSink;
use council_domain::{Mood, PersonaEvent, Reflection};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Reflections kept in the log
const REFLECTION_LOG_LIMIT: usize = 10;

#[derive(Default)]
struct PersonaState {
    mood: Mood,
    reflections: VecDeque<Reflection>,
}

impl PersonaState {
    fn push(&mut self, reflection: Reflection) {
        if self.reflections.len() == REFLECTION_LOG_LIMIT {
            self.reflections.pop_front();
        }
        self.reflections.push_back(reflection);
    }
}

/// Keeps the persona's [`Mood`] and reflection log for the lifetime of the process
#[derive(Default)]
pub struct MoodTracker {
    state: Mutex<PersonaState>,
}

impl MoodTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current mood
    pub fn mood(&self) -> Mood {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .mood
            .clone()
    }
}

impl PersonaSink for MoodTracker {
    fn on_event(&self, event: PersonaEvent) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.mood.apply(&event);
        let (emotion, level) = state.mood.dominant();
        debug!(
            "Persona {:?} ({:.2}): dominant {} at {:.2}",
            event.event_kind, event.significance, emotion, level
        );
        if event.is_significant() {
            let reflection = Reflection::from_event(&event);
            debug!("Persona reflecting: {}", reflection.context);
            state.push(reflection);
        }
    }

    fn current_mood(&self) -> Option<Mood> {
        Some(self.mood())
    }

    fn reflections(&self) -> Vec<Reflection> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.reflections.iter().cloned().collect()
    }

    fn reflect(&self, context: &str, significance: f64) -> Option<Reflection> {
        let reflection = Reflection::new(context, significance);
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reflection.clone());
        Some(reflection)
    }
}
