use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trial category: color judgment or arithmetic judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Complex,
}

/// Optional audio cue played alongside a trial's stimulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distraction {
    None,
    Audio,
}

/// One entry of the trial plan. Immutable once the session config is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSpec {
    pub complexity: Complexity,
    pub distraction: Distraction,
}

/// The two scoring keys. Anything else never reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
}

/// Trial engine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No stimulus armed: before the start keypress for trial 0, and during
    /// the inter-trial gate where rendering is withheld.
    AwaitingStimulus,
    /// Stimulus shown, timer running, next Left/Right key scores the trial.
    Armed,
    /// A key was received and the outcome is being recorded.
    Scoring,
    /// All trials consumed.
    Finished,
}

/// Recorded result of one completed trial. Append-only once emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecord {
    pub participant_id: String,
    pub stimulus: String,
    pub complexity: Complexity,
    pub distraction: Distraction,
    pub key_pressed: Key,
    pub correct: bool,
    pub reaction_time_secs: f64,
    pub timestamp: DateTime<Local>,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Complexity::Simple => "Simple",
            Complexity::Complex => "Complex",
        })
    }
}

impl fmt::Display for Distraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Distraction::None => "None",
            Distraction::Audio => "Audio",
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Key::Left => "Left",
            Key::Right => "Right",
        })
    }
}
