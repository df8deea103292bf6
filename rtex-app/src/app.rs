use rtex_core::{DistractionCue, InputSource, Key, Presenter, StimulusOutcome};
use std::io::{BufRead, Write};

/// Console stand-in for the experiment display. Prints the idle prompt or
/// the current stimulus; a real deployment would swap in a graphical
/// presenter behind the same trait.
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn render(&mut self, stimulus: Option<&StimulusOutcome>) {
        match stimulus {
            Some(outcome) => println!("\n>>> {}", outcome.description),
            None => println!("\nPress F or J (then Enter) to continue"),
        }
    }
}

/// Line-oriented key source: `f` maps to Left, `j` to Right, anything else
/// is dropped. `None` means stdin closed and the session ends early.
pub struct StdinInput<R> {
    reader: R,
}

impl StdinInput<std::io::StdinLock<'static>> {
    pub fn new() -> Self {
        Self {
            reader: std::io::stdin().lock(),
        }
    }
}

impl Default for StdinInput<std::io::StdinLock<'static>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> StdinInput<R> {
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for StdinInput<R> {
    fn next_key(&mut self) -> Option<Key> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => match line.trim().to_ascii_lowercase().as_str() {
                    "f" => return Some(Key::Left),
                    "j" => return Some(Key::Right),
                    // Everything else is silently ignored.
                    _ => continue,
                },
            }
        }
    }
}

/// Terminal bell as the audio distraction. Swappable for real playback
/// through the same trait.
pub struct BellCue;

impl DistractionCue for BellCue {
    fn play(&mut self) {
        print!("\x07");
        let _ = std::io::stdout().flush();
    }
}
