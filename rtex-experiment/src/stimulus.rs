use rand::Rng;
use rtex_core::{Complexity, Key, StimulusOutcome, TrialSpec};
use std::fmt;

/// Produces the content shown for one trial plus its ground-truth key.
///
/// Re-entrant and side-effect-free beyond draws on `rng`; the rng is
/// injected so tests can seed a deterministic sequence. The Left key always
/// means "blue" for simple trials and "the equation is correct" for complex
/// ones.
pub fn generate<R: Rng + ?Sized>(spec: TrialSpec, rng: &mut R) -> StimulusOutcome {
    match spec.complexity {
        Complexity::Simple => generate_color(rng),
        Complexity::Complex => generate_equation(rng),
    }
}

fn generate_color<R: Rng + ?Sized>(rng: &mut R) -> StimulusOutcome {
    let blue = rng.random::<bool>();
    StimulusOutcome {
        description: if blue { "Blue Rectangle" } else { "Red Rectangle" }.to_string(),
        correct_response: if blue { Key::Left } else { Key::Right },
    }
}

/// Arithmetic judgment: `x op y = shown`, where `shown` is the true result
/// for half the draws and a deliberately wrong integer for the other half.
fn generate_equation<R: Rng + ?Sized>(rng: &mut R) -> StimulusOutcome {
    let truthful = rng.random::<bool>();
    let x = rng.random_range(1..=9u32);
    let y = rng.random_range(1..=9u32);
    let op = OPERATORS[rng.random_range(0..OPERATORS.len())];
    let result = op.apply(f64::from(x), f64::from(y));

    let shown = if truthful {
        result
    } else {
        // Resample until the lure differs from the true result.
        loop {
            let lure = f64::from(rng.random_range(-20..=20i32));
            if lure != result {
                break lure;
            }
        }
    };

    StimulusOutcome {
        description: format!("{x} {op} {y} = {}", format_number(shown)),
        correct_response: if truthful { Key::Left } else { Key::Right },
    }
}

const OPERATORS: [Operator; 4] = [
    Operator::Add,
    Operator::Sub,
    Operator::Mul,
    Operator::Div,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Division is real-valued, never truncating; operands exclude 0.
    pub(crate) fn apply(self, x: f64, y: f64) -> f64 {
        match self {
            Operator::Add => x + y,
            Operator::Sub => x - y,
            Operator::Mul => x * y,
            Operator::Div => x / y,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        })
    }
}

/// Whole values print without a trailing `.0` so `8 / 4 = 2` reads like an
/// equation a participant would expect, while `7 / 2 = 3.5` keeps its
/// fraction.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
