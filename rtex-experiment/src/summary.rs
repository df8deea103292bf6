use rtex_core::TrialRecord;
use serde::Serialize;

/// End-of-session aggregate over the completed records. Computed once at
/// debrief time, never during the run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub trials: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mean_rt_secs: f64,
    pub min_rt_secs: f64,
    pub max_rt_secs: f64,
    pub persist_failures: usize,
}

impl SessionSummary {
    /// `None` when no trials completed.
    pub fn from_records(records: &[TrialRecord], persist_failures: usize) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let trials = records.len();
        let correct = records.iter().filter(|r| r.correct).count();
        let times: Vec<f64> = records.iter().map(|r| r.reaction_time_secs).collect();
        let mean = times.iter().sum::<f64>() / trials as f64;
        let min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            trials,
            correct,
            accuracy: correct as f64 / trials as f64,
            mean_rt_secs: mean,
            min_rt_secs: min,
            max_rt_secs: max,
            persist_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use rtex_core::{Complexity, Distraction, Key};

    fn record(correct: bool, rt: f64) -> TrialRecord {
        TrialRecord {
            participant_id: "P1".to_string(),
            stimulus: "Blue Rectangle".to_string(),
            complexity: Complexity::Simple,
            distraction: Distraction::None,
            key_pressed: Key::Left,
            correct,
            reaction_time_secs: rt,
            timestamp: Local::now(),
        }
    }

    #[test]
    fn empty_session_has_no_summary() {
        assert!(SessionSummary::from_records(&[], 0).is_none());
    }

    #[test]
    fn aggregates_accuracy_and_reaction_times() {
        let records = vec![record(true, 0.2), record(false, 0.4), record(true, 0.6)];
        let summary = SessionSummary::from_records(&records, 1).unwrap();
        assert_eq!(summary.trials, 3);
        assert_eq!(summary.correct, 2);
        assert!((summary.accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert!((summary.mean_rt_secs - 0.4).abs() < 1e-12);
        assert_eq!(summary.min_rt_secs, 0.2);
        assert_eq!(summary.max_rt_secs, 0.6);
        assert_eq!(summary.persist_failures, 1);
    }
}
