pub mod collab;
pub mod stimulus;
pub mod trial;

pub use collab::{DistractionCue, InputSource, Presenter};
pub use stimulus::StimulusOutcome;
pub use trial::{Complexity, Distraction, EngineState, Key, TrialRecord, TrialSpec};
