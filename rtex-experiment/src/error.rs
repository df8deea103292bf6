/// Errors raised while loading the session config. All of them are fatal at
/// startup: no session is created and the process exits non-zero.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file is missing the {0} line")]
    MissingField(&'static str),
    #[error("malformed trial code `{0}` (expected complexity A|C then distraction N|D)")]
    MalformedTrialCode(String),
    #[error("inter-trial delay is not a number of milliseconds: `{0}`")]
    InvalidDelay(String),
    #[error("trial list is empty")]
    NoTrials,
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result-file write failure. Non-fatal to a running session: the engine
/// counts and reports it, then keeps going.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("cannot write trial record: {0}")]
    Io(#[from] std::io::Error),
}
