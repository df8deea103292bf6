mod app;

use anyhow::{Context, Result, bail};
use app::{BellCue, StdinInput, TerminalPresenter};
use rtex_core::InputSource;
use rtex_experiment::{CsvResultSink, SessionConfig, TrialEngine};
use rtex_timing::MonotonicTimer;
use tracing::{info, warn};

const RESULT_FILE: &str = "reaction_time_results.csv";

fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let (Some(config_path), None) = (args.next(), args.next()) else {
        bail!("usage: rtex <session-config-file>");
    };

    let config = SessionConfig::load(&config_path)
        .with_context(|| format!("cannot start session from `{config_path}`"))?;
    let participant = config.participant_id.clone();

    let mut engine = TrialEngine::start(
        config,
        MonotonicTimer::new(),
        rand::rng(),
        CsvResultSink::new(RESULT_FILE),
        TerminalPresenter,
        BellCue,
    )?;

    let mut input = StdinInput::new();
    while !engine.is_finished() {
        let Some(key) = input.next_key() else {
            let (done, total) = engine.trial_progress();
            warn!(done, total, "input closed before the plan was exhausted");
            break;
        };
        engine.on_key_event(key);
    }

    if let Some(summary) = engine.summary() {
        let path = format!("{participant}_summary.json");
        let file = std::fs::File::create(&path)
            .with_context(|| format!("cannot create `{path}`"))?;
        serde_json::to_writer_pretty(file, &summary)?;
        info!(path = %path, "session summary written");
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rtex=info".into()),
        )
        .with_target(false)
        .init();
}
