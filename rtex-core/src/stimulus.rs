use crate::trial::Key;

/// What a trial actually showed, plus the ground-truth key for it.
///
/// Produced fresh per trial by the stimulus generator and consumed
/// immediately by the engine; never mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct StimulusOutcome {
    /// Human-readable form of the presented stimulus, exactly as recorded.
    pub description: String,
    /// The key a perfectly accurate participant would press.
    pub correct_response: Key,
}
