use crate::error::SinkError;
use rtex_core::TrialRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "Participant_ID,Presented_Stimulus,Mental_Complexity,\
Distraction_Given,Key_Pressed,Right_Key_Chosen,Reaction_Time,Timestamp";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Durable, append-only recorder of completed trials. Records arrive in
/// trial-completion order, one append at a time.
pub trait ResultSink {
    fn append(&mut self, record: &TrialRecord) -> Result<(), SinkError>;
}

/// CSV-file sink. Writes the fixed header once when the file is absent or
/// empty; after that every append is exactly one row. Existing files are
/// never truncated or rewritten.
#[derive(Debug, Clone)]
pub struct CsvResultSink {
    path: PathBuf,
}

impl CsvResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn needs_header(&self) -> bool {
        match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        }
    }
}

impl ResultSink for CsvResultSink {
    fn append(&mut self, record: &TrialRecord) -> Result<(), SinkError> {
        // Build the whole payload up front so one write call carries it;
        // a failed append then leaves no torn row behind.
        let mut payload = String::new();
        if self.needs_header() {
            payload.push_str(CSV_HEADER);
            payload.push('\n');
        }
        payload.push_str(&format_row(record));
        payload.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(payload.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

fn format_row(record: &TrialRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        record.participant_id,
        record.stimulus,
        record.complexity,
        record.distraction,
        record.key_pressed,
        record.correct,
        record.reaction_time_secs,
        record.timestamp.format(TIMESTAMP_FORMAT),
    )
}

/// Keeps records in memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<TrialRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for MemorySink {
    fn append(&mut self, record: &TrialRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use rtex_core::{Complexity, Distraction, Key};

    fn record(participant: &str, rt: f64) -> TrialRecord {
        TrialRecord {
            participant_id: participant.to_string(),
            stimulus: "3 + 4 = 7".to_string(),
            complexity: Complexity::Complex,
            distraction: Distraction::Audio,
            key_pressed: Key::Left,
            correct: true,
            reaction_time_secs: rt,
            timestamp: Local.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn first_append_writes_header_then_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let mut sink = CsvResultSink::new(&path);

        sink.append(&record("P1", 0.25)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("P1,"));
    }

    #[test]
    fn later_appends_do_not_repeat_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let mut sink = CsvResultSink::new(&path);

        sink.append(&record("P1", 0.25)).unwrap();
        sink.append(&record("P1", 0.5)).unwrap();
        sink.append(&record("P1", 1.125)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().filter(|l| *l == CSV_HEADER).count(), 1);
    }

    #[test]
    fn appends_to_an_existing_file_from_a_fresh_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        CsvResultSink::new(&path).append(&record("P1", 0.25)).unwrap();
        // A second session against the same file must only add rows.
        CsvResultSink::new(&path).append(&record("P2", 0.75)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[2].starts_with("P2,"));
    }

    #[test]
    fn row_round_trips_all_eight_fields() {
        let rec = record("P42", 0.412345);
        let row = format_row(&rec);
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], "P42");
        assert_eq!(fields[1], "3 + 4 = 7");
        assert_eq!(fields[2], "Complex");
        assert_eq!(fields[3], "Audio");
        assert_eq!(fields[4], "Left");
        assert_eq!(fields[5], "true");
        assert_eq!(fields[6].parse::<f64>().unwrap(), rec.reaction_time_secs);
        assert_eq!(
            fields[7],
            rec.timestamp.format(TIMESTAMP_FORMAT).to_string()
        );
    }
}
