pub mod config;
pub mod engine;
pub mod error;
pub mod sink;
pub mod stimulus;
pub mod summary;

pub use config::SessionConfig;
pub use engine::TrialEngine;
pub use error::{ConfigError, SinkError};
pub use sink::{CsvResultSink, MemorySink, ResultSink};
pub use summary::SessionSummary;
