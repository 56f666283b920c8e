//! Persona mood
//!
//! Display-only emotional state of the council persona. It reacts to
//! dispatch outcomes and has no influence on orchestration.

use crate::util::current_timestamp_ms;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Significance above which an event asks the persona to reflect
pub const REFLECTION_THRESHOLD: f64 = 0.7;

/// Significance of a reflection asked for directly
pub const DEFAULT_REFLECTION_SIGNIFICANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Curiosity,
    Determination,
    Frustration,
    Pride,
    Love,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Curiosity,
        Emotion::Determination,
        Emotion::Frustration,
        Emotion::Pride,
        Emotion::Love,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Curiosity => "curiosity",
            Emotion::Determination => "determination",
            Emotion::Frustration => "frustration",
            Emotion::Pride => "pride",
            Emotion::Love => "love",
        }
    }

    fn baseline(&self) -> f64 {
        match self {
            Emotion::Joy => 0.7,
            Emotion::Curiosity => 0.95,
            Emotion::Determination => 0.85,
            Emotion::Frustration => 0.1,
            Emotion::Pride => 0.6,
            Emotion::Love => 0.75,
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened, from the persona's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaEventKind {
    /// A dispatch produced a result
    Success,
    /// A dispatch produced nothing
    Failure,
    /// A result came back with low agreement
    Challenge,
}

/// `{event_kind, significance}` tuple consumed by persona sinks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonaEvent {
    pub event_kind: PersonaEventKind,
    /// How much the event matters, in [0, 1]
    pub significance: f64,
}

impl PersonaEvent {
    pub fn new(event_kind: PersonaEventKind, significance: f64) -> Self {
        Self {
            event_kind,
            significance: significance.clamp(0.0, 1.0),
        }
    }

    /// Whether this event asks the persona to reflect
    pub fn is_significant(&self) -> bool {
        self.significance > REFLECTION_THRESHOLD
    }
}

/// One entry of the persona's reflection log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    /// Milliseconds since epoch
    pub timestamp: u64,
    pub context: String,
    pub significance: f64,
    pub adjustments_needed: bool,
}

impl Reflection {
    pub fn new(context: impl Into<String>, significance: f64) -> Self {
        let significance = significance.clamp(0.0, 1.0);
        Self {
            timestamp: current_timestamp_ms(),
            context: context.into(),
            significance,
            adjustments_needed: significance > REFLECTION_THRESHOLD,
        }
    }

    /// Reflection prompted by a dispatch outcome
    pub fn from_event(event: &PersonaEvent) -> Self {
        let context = match event.event_kind {
            PersonaEventKind::Success => "the council agreed on a strong answer",
            PersonaEventKind::Challenge => "the council disagreed",
            PersonaEventKind::Failure => "no provider answered",
        };
        Self::new(context, event.significance)
    }
}

/// Emotion levels, each clamped to [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    levels: BTreeMap<Emotion, f64>,
    /// Set when the last event was significant enough to warrant reflection
    pub reflection_pending: bool,
}

impl Default for Mood {
    fn default() -> Self {
        Self {
            levels: Emotion::ALL.iter().map(|e| (*e, e.baseline())).collect(),
            reflection_pending: false,
        }
    }
}

impl Mood {
    pub fn level(&self, emotion: Emotion) -> f64 {
        self.levels.get(&emotion).copied().unwrap_or_default()
    }

    /// Shift one emotion, clamped to [0, 1]
    pub fn adjust(&mut self, emotion: Emotion, delta: f64) {
        let level = self.levels.entry(emotion).or_insert(0.0);
        *level = (*level + delta).clamp(0.0, 1.0);
    }

    /// React to an event
    pub fn apply(&mut self, event: &PersonaEvent) {
        match event.event_kind {
            PersonaEventKind::Success => {
                self.adjust(Emotion::Joy, 0.1);
                self.adjust(Emotion::Pride, 0.15);
            }
            PersonaEventKind::Challenge => {
                self.adjust(Emotion::Curiosity, 0.1);
                self.adjust(Emotion::Determination, 0.1);
            }
            PersonaEventKind::Failure => {
                self.adjust(Emotion::Frustration, 0.05);
                self.adjust(Emotion::Determination, 0.1);
            }
        }
        self.reflection_pending = event.is_significant();
    }

    /// Strongest emotion; ties go to the earlier emotion
    pub fn dominant(&self) -> (Emotion, f64) {
        Emotion::ALL
            .iter()
            .map(|e| (*e, self.level(*e)))
            .fold((Emotion::Joy, f64::MIN), |best, current| {
                if current.1 > best.1 { current } else { best }
            })
    }

    pub fn levels(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        self.levels.iter().map(|(e, l)| (*e, *l))
    }
}
