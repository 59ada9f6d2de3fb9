// Sherman Core Library
// Keymap tables and policy callbacks for the Sherman split keyboard

// Table constructors; must come before the modules that use them
#[macro_use]
mod macros;

pub mod achordion;
pub mod action;
pub mod combo;
pub mod config;
pub mod display;
pub mod dynamic_macro;
pub mod encoder;
pub mod hooks;
pub mod keycode;
pub mod keymap;
pub mod layer;
pub mod leader;
pub mod modifier;
pub mod tapping;

pub use achordion::{
    achordion_chord, chord_reason, opposite_hands, ChordReason, KeyRecord, HAND_SPLIT_COL,
};
pub use action::{KeyAction, ParseError};
pub use combo::{combo_must_tap, combo_term, combos, find_combo, Combo, ComboId};
pub use config::{default_config_content, Config, ConfigError, Timings};
pub use display::{
    HostState, LedState, OledDisplay, StatusRenderer, StatusView, TextBuffer, Token,
};
pub use dynamic_macro::{DynamicMacros, MacroIndicator, RgbMatrix, RgbMatrixState, RgbMode};
pub use encoder::{encoder_action, EncoderBinding, NUM_ENCODERS};
pub use hooks::{KeymapHooks, Sherman};
pub use keycode::Keycode;
pub use keymap::{Hand, KeyPos, Keymap, KEYMAPS, LAYOUT_POSITIONS, MATRIX_COLS, MATRIX_ROWS};
pub use layer::{layer_label, Layer, LayerState, LAYER_COUNT};
pub use leader::{leader_end, MacroStep};
pub use modifier::{ModMask, OsVariant};
pub use tapping::tapping_term;
