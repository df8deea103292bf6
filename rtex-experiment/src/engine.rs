use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::sink::ResultSink;
use crate::stimulus;
use crate::summary::SessionSummary;
use chrono::Local;
use rand::Rng;
use rtex_core::{
    Distraction, DistractionCue, EngineState, Key, Presenter, StimulusOutcome, TrialRecord,
};
use rtex_timing::Timer;
use tracing::{info, warn};

/// A stimulus that is currently on screen with its timer running.
#[derive(Debug)]
struct ArmedStimulus {
    outcome: StimulusOutcome,
    armed_at: u64,
}

/// The per-trial state machine. Owns every piece of mutable session state:
/// the trial index, the armed stimulus and its timestamp, the completed
/// records, and the injected timer/rng/sink/presenter/cue collaborators.
///
/// One logical thread drives it: each call to [`TrialEngine::on_key_event`]
/// runs a whole trial transition to completion, including the blocking
/// inter-trial gate, before the next event can be processed.
pub struct TrialEngine<T, R, S, P, D>
where
    T: Timer<Timestamp = u64>,
    R: Rng,
    S: ResultSink,
    P: Presenter,
    D: DistractionCue,
{
    config: SessionConfig,
    state: EngineState,
    trial_index: usize,
    current: Option<ArmedStimulus>,
    records: Vec<TrialRecord>,
    persist_failures: usize,
    timer: T,
    rng: R,
    sink: S,
    presenter: P,
    cue: D,
}

impl<T, R, S, P, D> TrialEngine<T, R, S, P, D>
where
    T: Timer<Timestamp = u64>,
    R: Rng,
    S: ResultSink,
    P: Presenter,
    D: DistractionCue,
{
    /// Validates the config and shows the idle prompt. No timer is armed:
    /// the very first key press only starts the sequence and is never
    /// scored.
    pub fn start(
        config: SessionConfig,
        timer: T,
        rng: R,
        sink: S,
        presenter: P,
        cue: D,
    ) -> Result<Self, ConfigError> {
        if config.trials.is_empty() {
            return Err(ConfigError::NoTrials);
        }
        let mut engine = Self {
            config,
            state: EngineState::AwaitingStimulus,
            trial_index: 0,
            current: None,
            records: Vec::new(),
            persist_failures: 0,
            timer,
            rng,
            sink,
            presenter,
            cue,
        };
        engine.presenter.render(None);
        info!(
            participant = %engine.config.participant_id,
            trials = engine.config.trials.len(),
            delay_ms = engine.config.inter_trial_delay_ms,
            "session ready, waiting for start keypress"
        );
        Ok(engine)
    }

    /// Handles one Left/Right key event. In `AwaitingStimulus` before the
    /// first trial this is the start keypress; in `Armed` it scores the
    /// current trial; in every other state it is a no-op.
    pub fn on_key_event(&mut self, key: Key) {
        match self.state {
            EngineState::AwaitingStimulus if self.trial_index == 0 && self.current.is_none() => {
                self.present_current_trial();
            }
            EngineState::Armed => self.score(key),
            _ => {}
        }
    }

    fn score(&mut self, key: Key) {
        let Some(armed) = self.current.take() else {
            return;
        };
        self.state = EngineState::Scoring;

        let elapsed = self.timer.elapsed(armed.armed_at);
        let spec = self.config.trials[self.trial_index];
        let record = TrialRecord {
            participant_id: self.config.participant_id.clone(),
            stimulus: armed.outcome.description,
            complexity: spec.complexity,
            distraction: spec.distraction,
            key_pressed: key,
            correct: key == armed.outcome.correct_response,
            reaction_time_secs: elapsed.as_secs_f64(),
            timestamp: Local::now(),
        };

        // Storage trouble must not stall the participant: count it, surface
        // it, move on.
        if let Err(err) = self.sink.append(&record) {
            self.persist_failures += 1;
            warn!(
                trial = self.trial_index,
                error = %err,
                "trial record was not persisted"
            );
        }
        info!(
            trial = self.trial_index,
            correct = record.correct,
            reaction_secs = record.reaction_time_secs,
            "trial scored"
        );
        self.records.push(record);
        self.trial_index += 1;

        if self.trial_index < self.config.trials.len() {
            // Inter-trial gate: rendering withheld, scoring input inert.
            self.state = EngineState::AwaitingStimulus;
            self.presenter.render(None);
            self.timer.sleep(self.config.inter_trial_delay());
            self.present_current_trial();
        } else {
            self.state = EngineState::Finished;
            self.presenter.render(None);
            if let Some(summary) = self.summary() {
                info!(
                    trials = summary.trials,
                    accuracy = summary.accuracy,
                    mean_rt_secs = summary.mean_rt_secs,
                    persist_failures = summary.persist_failures,
                    "session finished"
                );
            }
        }
    }

    /// Generates and presents the stimulus for the current trial, firing the
    /// distraction cue first when requested. The timer is armed synchronously
    /// with the first render of the stimulus, never before.
    fn present_current_trial(&mut self) {
        let spec = self.config.trials[self.trial_index];
        let outcome = stimulus::generate(spec, &mut self.rng);
        if spec.distraction == Distraction::Audio {
            self.cue.play();
        }
        self.presenter.render(Some(&outcome));
        let armed_at = self.timer.now();
        self.current = Some(ArmedStimulus { outcome, armed_at });
        self.state = EngineState::Armed;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == EngineState::Finished
    }

    /// Completed records in trial order, including any that failed to
    /// persist.
    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn persist_failures(&self) -> usize {
        self.persist_failures
    }

    /// `(completed, total)` trial counts.
    pub fn trial_progress(&self) -> (usize, usize) {
        (self.trial_index, self.config.trials.len())
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        SessionSummary::from_records(&self.records, self.persist_failures)
    }
}
