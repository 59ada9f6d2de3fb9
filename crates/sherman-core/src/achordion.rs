// Sherman Achordion Policy
// Decides whether a held mod-tap and a second key form a chord

use std::fmt;

use log::trace;

use crate::action::KeyAction;
use crate::config::Timings;
use crate::keymap::KeyPos;
use crate::modifier::ModMask;

/// Columns below this are the outer block, the rest the inner block
pub const HAND_SPLIT_COL: u8 = 3;

/// Mod-taps that always chord, whichever key follows
pub const ALWAYS_CHORD: [KeyAction; 2] = [mt!(LCTL, F), mt!(RCTL, J)];

/// A key press as seen by the chord classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRecord {
    pub action: KeyAction,
    pub pos: KeyPos,
}

impl KeyRecord {
    pub const fn new(action: KeyAction, pos: KeyPos) -> Self {
        Self { action, pos }
    }
}

/// True when the two positions sit on different halves
pub fn opposite_hands(a: KeyPos, b: KeyPos) -> bool {
    a.hand() != b.hand()
}

fn crosses_column_split(a: u8, b: u8) -> bool {
    (a < HAND_SPLIT_COL && b >= HAND_SPLIT_COL) || (a >= HAND_SPLIT_COL && b < HAND_SPLIT_COL)
}

/// Which rule decided a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordReason {
    /// The mod-tap is in [`ALWAYS_CHORD`]
    AlwaysChord,
    /// The keys sit on opposite sides of [`HAND_SPLIT_COL`]
    ColumnSplit,
    OppositeHands,
    SameHand,
}

impl ChordReason {
    pub const fn is_chord(self) -> bool {
        !matches!(self, ChordReason::SameHand)
    }
}

impl fmt::Display for ChordReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordReason::AlwaysChord => write!(f, "always chords"),
            ChordReason::ColumnSplit => write!(f, "crosses the column split"),
            ChordReason::OppositeHands => write!(f, "opposite hands"),
            ChordReason::SameHand => write!(f, "same hand"),
        }
    }
}

/// Rule that applies to `tap_hold` pressed with `other`
pub fn chord_reason(tap_hold: KeyRecord, other: KeyRecord) -> ChordReason {
    if ALWAYS_CHORD.contains(&tap_hold.action) {
        ChordReason::AlwaysChord
    } else if crosses_column_split(tap_hold.pos.col, other.pos.col) {
        ChordReason::ColumnSplit
    } else if opposite_hands(tap_hold.pos, other.pos) {
        ChordReason::OppositeHands
    } else {
        ChordReason::SameHand
    }
}

/// Whether `tap_hold` pressed with `other` resolves as a chord (hold).
///
/// Returning false makes the mod-tap settle as a tap.
pub fn achordion_chord(tap_hold: KeyRecord, other: KeyRecord) -> bool {
    let reason = chord_reason(tap_hold, other);
    trace!(
        "chord {}@{} + {}@{}: {}",
        tap_hold.action,
        tap_hold.pos,
        other.action,
        other.pos,
        reason
    );
    reason.is_chord()
}

/// How long to wait before settling an unresolved chord
pub fn achordion_timeout(_tap_hold: KeyAction, timings: &Timings) -> u16 {
    timings.achordion_timeout
}

/// Typing-streak window.
///
/// Disabled for shift and for every right-hand mod-tap. The packed 5-bit mod
/// encoding sets the right-hand bit for all of RCTL/RSFT/RALT/RGUI, so a
/// right-shift test matches any right-hand modifier.
pub fn achordion_streak_chord_timeout(
    tap_hold: KeyAction,
    _next: KeyAction,
    timings: &Timings,
) -> u16 {
    let mods = tap_hold.hold_mods();
    if mods.intersects(ModMask::SHIFT) || mods.intersects(ModMask::RIGHT) {
        0
    } else {
        timings.streak_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(action: KeyAction, row: u8, col: u8) -> KeyRecord {
        KeyRecord::new(action, KeyPos::new(row, col))
    }

    #[test]
    fn test_always_chord_keys() {
        // same hand, same column block
        assert!(achordion_chord(rec(mt!(LCTL, F), 2, 3), rec(kc!(G), 2, 4)));
        assert!(achordion_chord(rec(mt!(RCTL, J), 7, 1), rec(kc!(M), 8, 1)));
    }

    #[test]
    fn test_column_split() {
        // LGUI_T(A) at col 0 with E at col 2, same hand and block
        assert!(!achordion_chord(rec(mt!(LGUI, A), 2, 0), rec(kc!(E), 1, 2)));
        // col 0 to col 3 on the same half crosses the split
        assert!(achordion_chord(rec(mt!(LGUI, A), 2, 0), rec(kc!(R), 1, 3)));
        // either direction
        assert!(achordion_chord(rec(mt!(LSFT, D), 2, 3), rec(kc!(W), 1, 1)));
        assert!(!achordion_chord(rec(mt!(LSFT, D), 2, 3), rec(kc!(T), 1, 4)));
    }

    #[test]
    fn test_opposite_hands_fallback() {
        assert!(opposite_hands(KeyPos::new(2, 0), KeyPos::new(7, 0)));
        assert!(!opposite_hands(KeyPos::new(5, 0), KeyPos::new(9, 3)));
        assert!(achordion_chord(rec(mt!(LALT, S), 2, 1), rec(kc!(K), 7, 2)));
        assert!(!achordion_chord(rec(mt!(RALT, L), 7, 3), rec(kc!(O), 6, 4)));
    }

    #[test]
    fn test_reasons() {
        let a = rec(mt!(LGUI, A), 2, 0);
        assert_eq!(chord_reason(rec(mt!(LCTL, F), 2, 3), a), ChordReason::AlwaysChord);
        assert_eq!(chord_reason(a, rec(kc!(R), 1, 3)), ChordReason::ColumnSplit);
        assert_eq!(chord_reason(a, rec(kc!(J), 7, 1)), ChordReason::OppositeHands);
        assert_eq!(chord_reason(a, rec(kc!(W), 1, 1)), ChordReason::SameHand);
        assert_eq!(ChordReason::SameHand.to_string(), "same hand");
    }

    #[test]
    fn test_streak_disabled_for_right_hand_mod_taps() {
        let timings = Timings::default();
        let right_hand = [
            mt!(RCTL, J),
            mt!(RALT, L),
            mt!(RGUI, Scln),
            mt!(RCTL, N),
            mt!(RALT, I),
            mt!(RGUI, A),
        ];
        for tap_hold in right_hand {
            assert_eq!(
                achordion_streak_chord_timeout(tap_hold, kc!(E), &timings),
                0,
                "{}",
                tap_hold
            );
        }
    }

    #[test]
    fn test_timeouts() {
        let timings = Timings::default();
        assert_eq!(achordion_timeout(mt!(LGUI, A), &timings), 500);
        assert_eq!(achordion_streak_chord_timeout(mt!(LSFT, D), kc!(A), &timings), 0);
        assert_eq!(achordion_streak_chord_timeout(mt!(RSFT, K), kc!(A), &timings), 0);
        assert_eq!(achordion_streak_chord_timeout(mt!(LCTL, F), kc!(A), &timings), 200);
        assert_eq!(achordion_streak_chord_timeout(mt!(LGUI, A), kc!(E), &timings), 200);
        assert_eq!(achordion_streak_chord_timeout(mt!(LALT, S), kc!(E), &timings), 200);
        assert_eq!(
            achordion_streak_chord_timeout(
                KeyAction::mod_tap(ModMask::LCTL | ModMask::LSFT, crate::keycode::Keycode::Z),
                kc!(A),
                &timings
            ),
            0
        );
    }
}
