// Sherman Leader Sequences
// Bracket-pair macros typed after the leader key

use std::fmt;

use crate::keycode::Keycode;
use crate::keycode::Keycode::{A, B, I, P};

/// One step of a leader macro's output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroStep {
    /// Type a string
    Text(&'static str),
    /// Tap a single key
    Tap(Keycode),
}

impl fmt::Display for MacroStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroStep::Text(text) => write!(f, "\"{}\"", text),
            MacroStep::Tap(keycode) => write!(f, "tap {}", keycode),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderSequence {
    pub keys: &'static [Keycode],
    pub output: &'static [MacroStep],
}

/// `A` types the pair after the cursor, `I` leaves the cursor inside.
pub const LEADER_SEQUENCES: [LeaderSequence; 6] = [
    LeaderSequence {
        keys: &[P, A],
        output: &[MacroStep::Text("()")],
    },
    LeaderSequence {
        keys: &[P, I],
        output: &[MacroStep::Text("()"), MacroStep::Tap(Keycode::Left)],
    },
    LeaderSequence {
        keys: &[B, A],
        output: &[MacroStep::Text("{}")],
    },
    LeaderSequence {
        keys: &[B, I],
        output: &[MacroStep::Text("{}"), MacroStep::Tap(Keycode::Left)],
    },
    // square brackets: the BB prefix swaps the A/I meaning
    LeaderSequence {
        keys: &[B, B, I],
        output: &[MacroStep::Text("[]")],
    },
    LeaderSequence {
        keys: &[B, B, A],
        output: &[MacroStep::Text("[]"), MacroStep::Tap(Keycode::Left)],
    },
];

/// Output for a completed leader sequence
pub fn leader_end(sequence: &[Keycode]) -> Option<&'static [MacroStep]> {
    LEADER_SEQUENCES
        .iter()
        .find(|s| s.keys == sequence)
        .map(|s| s.output)
}

/// Text a macro would produce, with cursor moves shown as arrows
pub fn describe(steps: &[MacroStep]) -> String {
    steps
        .iter()
        .map(|step| match step {
            MacroStep::Text(text) => (*text).to_string(),
            MacroStep::Tap(Keycode::Left) => "←".to_string(),
            MacroStep::Tap(keycode) => format!("<{}>", keycode),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences() {
        assert_eq!(leader_end(&[P, A]), Some(&[MacroStep::Text("()")][..]));
        assert_eq!(
            leader_end(&[B, I]),
            Some(&[MacroStep::Text("{}"), MacroStep::Tap(Keycode::Left)][..])
        );
        assert_eq!(describe(leader_end(&[B, B, I]).unwrap()), "[]");
        assert_eq!(describe(leader_end(&[B, B, A]).unwrap()), "[]←");
    }

    #[test]
    fn test_exact_match_only() {
        assert_eq!(leader_end(&[]), None);
        assert_eq!(leader_end(&[P]), None);
        assert_eq!(leader_end(&[B, B]), None);
        assert_eq!(leader_end(&[P, A, A]), None);
        assert_eq!(leader_end(&[A, P]), None);
    }
}
