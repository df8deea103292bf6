use crate::error::ConfigError;
use rtex_core::{Complexity, Distraction, TrialSpec};
use std::path::Path;
use std::time::Duration;

/// Session parameters, loaded once before the engine starts and read-only
/// for its lifetime.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub participant_id: String,
    pub trials: Vec<TrialSpec>,
    pub inter_trial_delay_ms: u64,
}

impl SessionConfig {
    pub fn inter_trial_delay(&self) -> Duration {
        Duration::from_millis(self.inter_trial_delay_ms)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses the line-oriented session format:
    ///
    /// ```text
    /// Participant: P07
    /// Trials: AN, CD, AD
    /// Delay: 1000
    /// ```
    ///
    /// Three `label: value` lines in this order. Trial codes are two
    /// characters: complexity `A` (simple) or `C` (complex), then
    /// distraction `N` (none) or `D` (audio).
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let participant_id = field_value(lines.next(), "participant")?;
        if participant_id.is_empty() {
            return Err(ConfigError::MissingField("participant"));
        }

        let trial_list = field_value(lines.next(), "trial list")?;
        let trials = trial_list
            .split(',')
            .map(|code| parse_trial_code(code.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        if trials.is_empty() {
            return Err(ConfigError::NoTrials);
        }

        let delay = field_value(lines.next(), "delay")?;
        let inter_trial_delay_ms = delay
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidDelay(delay))?;

        Ok(Self {
            participant_id,
            trials,
            inter_trial_delay_ms,
        })
    }
}

fn field_value(line: Option<&str>, field: &'static str) -> Result<String, ConfigError> {
    let line = line.ok_or(ConfigError::MissingField(field))?;
    let (_, value) = line
        .split_once(':')
        .ok_or(ConfigError::MissingField(field))?;
    Ok(value.trim().to_string())
}

fn parse_trial_code(code: &str) -> Result<TrialSpec, ConfigError> {
    let mut chars = code.chars();
    let spec = match (chars.next(), chars.next(), chars.next()) {
        (Some(c), Some(d), None) => {
            let complexity = match c {
                'A' => Complexity::Simple,
                'C' => Complexity::Complex,
                _ => return Err(ConfigError::MalformedTrialCode(code.to_string())),
            };
            let distraction = match d {
                'N' => Distraction::None,
                'D' => Distraction::Audio,
                _ => return Err(ConfigError::MalformedTrialCode(code.to_string())),
            };
            TrialSpec {
                complexity,
                distraction,
            }
        }
        _ => return Err(ConfigError::MalformedTrialCode(code.to_string())),
    };
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "Participant: P07\nTrials: AN, CD, AD\nDelay: 1000\n";

    #[test]
    fn parses_a_full_session() {
        let config = SessionConfig::parse(VALID).unwrap();
        assert_eq!(config.participant_id, "P07");
        assert_eq!(config.inter_trial_delay_ms, 1000);
        assert_eq!(config.trials.len(), 3);
        assert_eq!(
            config.trials[0],
            TrialSpec {
                complexity: Complexity::Simple,
                distraction: Distraction::None,
            }
        );
        assert_eq!(
            config.trials[1],
            TrialSpec {
                complexity: Complexity::Complex,
                distraction: Distraction::Audio,
            }
        );
        assert_eq!(config.trials[2].complexity, Complexity::Simple);
        assert_eq!(config.trials[2].distraction, Distraction::Audio);
    }

    #[test]
    fn non_numeric_delay_is_a_config_error() {
        let err = SessionConfig::parse("Participant: P1\nTrials: AN\nDelay: abc\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDelay(v) if v == "abc"));
    }

    #[test]
    fn missing_delay_line_is_a_config_error() {
        let err = SessionConfig::parse("Participant: P1\nTrials: AN\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("delay")));
    }

    #[test]
    fn line_without_separator_is_a_config_error() {
        let err = SessionConfig::parse("just a participant\nTrials: AN\nDelay: 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("participant")));
    }

    #[test]
    fn unknown_trial_code_is_rejected() {
        let err = SessionConfig::parse("Participant: P1\nTrials: AN, XQ\nDelay: 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedTrialCode(c) if c == "XQ"));
    }

    #[test]
    fn overlong_trial_code_is_rejected() {
        let err = SessionConfig::parse("Participant: P1\nTrials: AND\nDelay: 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedTrialCode(c) if c == "AND"));
    }

    #[test]
    fn empty_trial_list_is_rejected() {
        // A lone comma-less empty value parses as one empty code.
        let err = SessionConfig::parse("Participant: P1\nTrials:\nDelay: 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedTrialCode(_)));
    }

    #[test]
    fn zero_delay_is_valid() {
        let config = SessionConfig::parse("Participant: P1\nTrials: CN\nDelay: 0\n").unwrap();
        assert_eq!(config.inter_trial_delay(), std::time::Duration::ZERO);
    }
}
