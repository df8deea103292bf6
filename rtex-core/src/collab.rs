use crate::stimulus::StimulusOutcome;
use crate::trial::Key;

/// Rendering surface. The engine calls this on every state transition that
/// changes what should be visible; `None` means the idle prompt (before the
/// start keypress, during the inter-trial gate, and after the last trial).
pub trait Presenter {
    fn render(&mut self, stimulus: Option<&StimulusOutcome>);
}

/// Source of scoring key events. Implementations drop any physical key that
/// does not map to [`Key`]; `None` means the source is exhausted.
pub trait InputSource {
    fn next_key(&mut self) -> Option<Key>;
}

/// Audio distraction playback. Fired at most once per trial, before the
/// reaction timer is armed, so cue latency never lands in the measurement.
pub trait DistractionCue {
    fn play(&mut self);
}
