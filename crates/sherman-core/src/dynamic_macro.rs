// Sherman Dynamic Macros
// Recording state for the two dynamic macro slots and its RGB feedback

use log::debug;
use strum_macros::{Display, EnumIter, EnumString};

/// RGB matrix effects the keymap switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RgbMode {
    #[default]
    SolidColor,
    Breathing,
    CycleAll,
    CycleLeftRight,
    RainbowMovingChevron,
    TypingHeatmap,
    SolidReactive,
}

/// The slice of the RGB matrix driver that macro recording touches
pub trait RgbMatrix {
    fn is_enabled(&self) -> bool;
    fn enable(&mut self);
    fn disable(&mut self);
    fn mode(&self) -> RgbMode;
    fn set_mode(&mut self, mode: RgbMode);
}

/// In-memory RGB matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbMatrixState {
    pub enabled: bool,
    pub mode: RgbMode,
}

impl RgbMatrixState {
    pub fn new(enabled: bool, mode: RgbMode) -> Self {
        Self { enabled, mode }
    }
}

impl Default for RgbMatrixState {
    fn default() -> Self {
        Self::new(true, RgbMode::default())
    }
}

impl RgbMatrix for RgbMatrixState {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn mode(&self) -> RgbMode {
        self.mode
    }

    fn set_mode(&mut self, mode: RgbMode) {
        self.mode = mode;
    }
}

/// What the display shows for one macro slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroIndicator {
    /// Nothing recorded since the last reset
    Hidden,
    /// Recording in progress
    Recording,
    /// Recording finished; drawn inverted
    Recorded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Slot {
    recording: bool,
    recorded: bool,
}

impl Slot {
    fn indicator(self) -> MacroIndicator {
        match (self.recording, self.recorded) {
            (false, _) => MacroIndicator::Hidden,
            (true, false) => MacroIndicator::Recording,
            (true, true) => MacroIndicator::Recorded,
        }
    }
}

/// Dynamic macro status.
///
/// `direction` follows the firmware convention: 1 is macro 1, -1 is
/// macro 2, anything else resets both slots.
#[derive(Debug, Clone, Default)]
pub struct DynamicMacros {
    macro1: Slot,
    macro2: Slot,
    prev_enabled: bool,
    prev_mode: RgbMode,
}

impl DynamicMacros {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn macro1(&self) -> MacroIndicator {
        self.macro1.indicator()
    }

    pub fn macro2(&self) -> MacroIndicator {
        self.macro2.indicator()
    }

    /// Saves the RGB state and switches to breathing while recording
    pub fn record_start<R: RgbMatrix + ?Sized>(&mut self, direction: i8, rgb: &mut R) -> bool {
        self.prev_enabled = rgb.is_enabled();
        if !self.prev_enabled {
            rgb.enable();
        }
        self.prev_mode = rgb.mode();
        rgb.set_mode(RgbMode::Breathing);

        match direction {
            1 => {
                self.macro1 = Slot {
                    recording: true,
                    recorded: false,
                }
            }
            -1 => {
                self.macro2 = Slot {
                    recording: true,
                    recorded: false,
                }
            }
            _ => {
                self.macro1 = Slot::default();
                self.macro2 = Slot::default();
            }
        }
        debug!(
            "macro record start ({}), saved rgb {} enabled={}",
            direction, self.prev_mode, self.prev_enabled
        );
        true
    }

    /// Restores the RGB state saved by [`record_start`](Self::record_start)
    pub fn record_end<R: RgbMatrix + ?Sized>(&mut self, direction: i8, rgb: &mut R) -> bool {
        if self.prev_enabled {
            rgb.set_mode(self.prev_mode);
        } else {
            rgb.disable();
        }

        match direction {
            1 => self.macro1.recorded = true,
            -1 => self.macro2.recorded = true,
            _ => {
                self.macro1.recorded = false;
                self.macro2.recorded = false;
            }
        }
        debug!("macro record end ({})", direction);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_cycle_restores_mode() {
        let mut rgb = RgbMatrixState::new(true, RgbMode::CycleAll);
        let mut macros = DynamicMacros::new();
        assert_eq!(macros.macro1(), MacroIndicator::Hidden);

        assert!(macros.record_start(1, &mut rgb));
        assert_eq!(rgb.mode, RgbMode::Breathing);
        assert_eq!(macros.macro1(), MacroIndicator::Recording);
        assert_eq!(macros.macro2(), MacroIndicator::Hidden);

        assert!(macros.record_end(1, &mut rgb));
        assert_eq!(rgb, RgbMatrixState::new(true, RgbMode::CycleAll));
        assert_eq!(macros.macro1(), MacroIndicator::Recorded);
    }

    #[test]
    fn test_record_with_rgb_off_disables_again() {
        let mut rgb = RgbMatrixState::new(false, RgbMode::TypingHeatmap);
        let mut macros = DynamicMacros::new();

        macros.record_start(-1, &mut rgb);
        assert!(rgb.enabled);
        assert_eq!(rgb.mode, RgbMode::Breathing);

        macros.record_end(-1, &mut rgb);
        assert!(!rgb.enabled);
        assert_eq!(macros.macro2(), MacroIndicator::Recorded);
    }

    #[test]
    fn test_rerecord_and_reset() {
        let mut rgb = RgbMatrixState::default();
        let mut macros = DynamicMacros::new();
        macros.record_start(1, &mut rgb);
        macros.record_end(1, &mut rgb);
        macros.record_start(1, &mut rgb);
        assert_eq!(macros.macro1(), MacroIndicator::Recording);

        macros.record_start(0, &mut rgb);
        assert_eq!(macros.macro1(), MacroIndicator::Hidden);
        assert_eq!(macros.macro2(), MacroIndicator::Hidden);
    }

    #[test]
    fn test_rgb_mode_names() {
        assert_eq!(RgbMode::Breathing.to_string(), "breathing");
        assert_eq!("cycle_all".parse::<RgbMode>().unwrap(), RgbMode::CycleAll);
    }
}
