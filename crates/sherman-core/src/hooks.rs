// Sherman Keymap Hooks
// The callbacks the firmware runtime asks the keymap to answer

use crate::achordion::{self, KeyRecord};
use crate::action::KeyAction;
use crate::combo::{self, ComboId};
use crate::config::{Config, Timings};
use crate::display::{HostState, OledDisplay, StatusRenderer, StatusView};
use crate::dynamic_macro::{DynamicMacros, RgbMatrix};
use crate::keycode::Keycode;
use crate::keymap::Keymap;
use crate::leader::{self, MacroStep};
use crate::tapping;

/// Per-keymap policy callbacks.
///
/// The runtime owns the tap-hold state machine, combo matching and the
/// display driver; it calls these to get keymap-specific answers.
pub trait KeymapHooks {
    fn tapping_term(&self, action: KeyAction) -> u16;

    fn combo_term(&self, id: ComboId) -> u16;

    fn combo_must_tap(&self, id: ComboId) -> bool;

    fn achordion_chord(&self, tap_hold: KeyRecord, other: KeyRecord) -> bool;

    fn achordion_timeout(&self, tap_hold: KeyAction) -> u16;

    fn achordion_streak_chord_timeout(&self, tap_hold: KeyAction, next: KeyAction) -> u16;

    fn leader_end(&self, sequence: &[Keycode]) -> Option<&'static [MacroStep]>;

    /// Draw one display frame. Returning false skips the keyboard-level
    /// renderer.
    fn oled_task(&mut self, display: &mut dyn OledDisplay, host: &HostState) -> bool;

    fn dynamic_macro_record_start(&mut self, direction: i8, rgb: &mut dyn RgbMatrix) -> bool;

    fn dynamic_macro_record_end(&mut self, direction: i8, rgb: &mut dyn RgbMatrix) -> bool;
}

/// The Sherman keymap with its timings and display state
#[derive(Debug, Clone, Default)]
pub struct Sherman {
    keymap: Keymap,
    timings: Timings,
    renderer: StatusRenderer,
    macros: DynamicMacros,
    last_view: Option<StatusView>,
}

impl Sherman {
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.timings.clone())
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn macros(&self) -> &DynamicMacros {
        &self.macros
    }

    /// View drawn by the most recent display tick
    pub fn last_view(&self) -> Option<StatusView> {
        self.last_view
    }

    /// Force the logo to be redrawn, e.g. after the panel was cleared
    pub fn invalidate_display(&mut self) {
        self.renderer.invalidate();
    }
}

impl KeymapHooks for Sherman {
    fn tapping_term(&self, action: KeyAction) -> u16 {
        tapping::tapping_term(action, &self.timings)
    }

    fn combo_term(&self, id: ComboId) -> u16 {
        combo::combo_term(id, self.timings.combo_term)
    }

    fn combo_must_tap(&self, id: ComboId) -> bool {
        combo::combo_must_tap(id)
    }

    fn achordion_chord(&self, tap_hold: KeyRecord, other: KeyRecord) -> bool {
        achordion::achordion_chord(tap_hold, other)
    }

    fn achordion_timeout(&self, tap_hold: KeyAction) -> u16 {
        achordion::achordion_timeout(tap_hold, &self.timings)
    }

    fn achordion_streak_chord_timeout(&self, tap_hold: KeyAction, next: KeyAction) -> u16 {
        achordion::achordion_streak_chord_timeout(tap_hold, next, &self.timings)
    }

    fn leader_end(&self, sequence: &[Keycode]) -> Option<&'static [MacroStep]> {
        leader::leader_end(sequence)
    }

    fn oled_task(&mut self, display: &mut dyn OledDisplay, host: &HostState) -> bool {
        self.last_view = Some(self.renderer.render(display, host, &self.macros));
        false
    }

    fn dynamic_macro_record_start(&mut self, direction: i8, rgb: &mut dyn RgbMatrix) -> bool {
        self.macros.record_start(direction, rgb)
    }

    fn dynamic_macro_record_end(&mut self, direction: i8, rgb: &mut dyn RgbMatrix) -> bool {
        self.macros.record_end(direction, rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::TextBuffer;

    #[test]
    fn test_configured_timings_flow_through() {
        let mut timings = Timings::default();
        timings.combo_term = 40;
        timings.streak_timeout = 120;
        let sherman = Sherman::new(timings);

        assert_eq!(sherman.combo_term(ComboId::QWEsc), 40);
        assert_eq!(sherman.combo_term(ComboId::ASTab), 75);
        assert_eq!(sherman.achordion_streak_chord_timeout(mt!(LCTL, F), kc!(E)), 120);
        assert_eq!(sherman.achordion_streak_chord_timeout(mt!(LSFT, D), kc!(E)), 0);
    }

    #[test]
    fn test_oled_task_records_view() {
        let mut sherman = Sherman::default();
        let mut buffer = TextBuffer::new();
        assert_eq!(sherman.last_view(), None);
        assert!(!sherman.oled_task(&mut buffer, &HostState::default()));
        assert_eq!(sherman.last_view(), Some(StatusView::Idle));
    }
}
