//! Persona adapters

mod mood_tracker;

pub use mood_tracker::MoodTracker;
