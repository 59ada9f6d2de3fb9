// Sherman Tapping Terms
// Per-key tap-hold decision windows

use log::trace;

use crate::action::KeyAction;
use crate::config::Timings;

/// Home-row pinky mod-taps across every alpha and number layer.
/// Pinkies are slower to release, so these resolve as hold sooner.
#[rustfmt::skip]
pub const PINKY_KEYS: [KeyAction; 12] = [
    // qwerty
    mt!(LGUI, A), mt!(LALT, S), mt!(RALT, L), mt!(RGUI, Scln),
    // canary
    mt!(LGUI, C), mt!(LALT, R), mt!(RGUI, A), mt!(RALT, I),
    // num
    mt!(LGUI, N0), mt!(LALT, N1), mt!(RALT, N8), mt!(RGUI, N9),
];

pub fn is_pinky_key(action: KeyAction) -> bool {
    PINKY_KEYS.contains(&action)
}

/// Tapping term for a key.
///
/// A configured per-key override wins, then the pinky set, then the
/// global term.
pub fn tapping_term(action: KeyAction, timings: &Timings) -> u16 {
    let term = if let Some(term) = timings.term_overrides.get(&action) {
        *term
    } else if is_pinky_key(action) {
        timings.pinky_term
    } else {
        timings.tapping_term
    };
    trace!("tapping term for {}: {}ms", action, term);
    term
}
