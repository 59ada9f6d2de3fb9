// Sherman Keymap
// Physical layout, switch matrix geometry and the per-layer tables

use std::fmt;

use crate::action::KeyAction;
use crate::layer::{Layer, LayerState, LAYER_COUNT};

/// Switch matrix rows; rows 0-4 are the left half, 5-9 the right half
pub const MATRIX_ROWS: usize = 10;
/// Switch matrix columns per half
pub const MATRIX_COLS: usize = 6;
/// Keys in the physical layout
pub const LAYOUT_KEY_COUNT: usize = 44;

/// A switch position in the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPos {
    pub row: u8,
    pub col: u8,
}

impl KeyPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Which half of the split board the switch sits on
    pub const fn hand(self) -> Hand {
        if (self.row as usize) < MATRIX_ROWS / 2 {
            Hand::Left
        } else {
            Hand::Right
        }
    }
}

impl fmt::Display for KeyPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

const fn p(row: u8, col: u8) -> KeyPos {
    KeyPos::new(row, col)
}

/// Matrix position of every physical key, in layout order.
///
/// Layout order is: top row (1 left, 4 right), three alpha rows
/// (5+6, 5+5, 5+5), thumb row (4+4). Right-half columns count from the
/// inner edge.
pub const LAYOUT_POSITIONS: [KeyPos; LAYOUT_KEY_COUNT] = [
    p(0, 0),                                     p(5, 0), p(5, 1), p(5, 2), p(5, 3),
    p(1, 0), p(1, 1), p(1, 2), p(1, 3), p(1, 4), p(6, 0), p(6, 1), p(6, 2), p(6, 3), p(6, 4), p(6, 5),
    p(2, 0), p(2, 1), p(2, 2), p(2, 3), p(2, 4), p(7, 0), p(7, 1), p(7, 2), p(7, 3), p(7, 4),
    p(3, 0), p(3, 1), p(3, 2), p(3, 3), p(3, 4), p(8, 0), p(8, 1), p(8, 2), p(8, 3), p(8, 4),
    p(4, 0), p(4, 1), p(4, 2), p(4, 3),          p(9, 0), p(9, 1), p(9, 2), p(9, 3),
];

/// Layout slot for each matrix cell, `None` where no switch is wired
const LAYOUT_INDEX: [[Option<u8>; MATRIX_COLS]; MATRIX_ROWS] = build_layout_index();

const fn build_layout_index() -> [[Option<u8>; MATRIX_COLS]; MATRIX_ROWS] {
    let mut index = [[None; MATRIX_COLS]; MATRIX_ROWS];
    let mut i = 0;
    while i < LAYOUT_KEY_COUNT {
        let pos = LAYOUT_POSITIONS[i];
        index[pos.row as usize][pos.col as usize] = Some(i as u8);
        i += 1;
    }
    index
}

/// One layer in physical layout order
pub type LayerKeys = [KeyAction; LAYOUT_KEY_COUNT];

/// One layer expanded onto the switch matrix
pub type Matrix = [[KeyAction; MATRIX_COLS]; MATRIX_ROWS];

const _______: KeyAction = KeyAction::Transparent;
const XXXXXXX: KeyAction = KeyAction::No;

/// The Sherman layer tables, indexed by [`Layer::index`]
#[rustfmt::skip]
pub const KEYMAPS: [LayerKeys; LAYER_COUNT] = [
    // _BASE
    [
        kc!(Esc),                                                               tg!(Media),     tg!(Mouse),     tg!(Rgb),       tg!(Key),
        kc!(Q),         kc!(W),         kc!(E),         kc!(R),         kc!(T),         kc!(Y),         kc!(U),         kc!(I),         kc!(O),         kc!(P),         kc!(Quot),
        mt!(LGUI, A),   mt!(LALT, S),   mt!(LSFT, D),   mt!(LCTL, F),   kc!(G),         kc!(H),         mt!(RCTL, J),   mt!(RSFT, K),   mt!(RALT, L),   mt!(RGUI, Scln),
        kc!(Z),         kc!(X),         kc!(C),         kc!(V),         kc!(B),         kc!(N),         kc!(M),         kc!(Comma),     kc!(Dot),       kc!(Slash),
        mo!(Nav),       kc!(QkLead),    mo!(Num),       kc!(Space),                     kc!(Bspc),      mo!(Pun),       mo!(Fun),       XXXXXXX,
    ],
    // _CANARY
    [
        kc!(Esc),                                                               tg!(Media),     tg!(Mouse),     tg!(Rgb),       tg!(Key),
        kc!(W),         kc!(L),         kc!(Y),         kc!(P),         kc!(K),         kc!(Z),         kc!(X),         kc!(O),         kc!(U),         kc!(Scln),      kc!(Quot),
        mt!(LGUI, C),   mt!(LALT, R),   mt!(LSFT, S),   mt!(LCTL, T),   kc!(B),         kc!(F),         mt!(RCTL, N),   mt!(RSFT, E),   mt!(RALT, I),   mt!(RGUI, A),
        kc!(J),         kc!(V),         kc!(D),         kc!(G),         kc!(Q),         kc!(M),         kc!(H),         kc!(Slash),     kc!(Comma),     kc!(Dot),
        mo!(Nav),       kc!(QkLead),    mo!(Num),       _______,                        _______,        mo!(Pun),       mo!(Fun),       XXXXXXX,
    ],
    // _NAV
    [
        _______,                                                                _______,        _______,        _______,        _______,
        XXXXXXX,        kc!(MsBtn1),    kc!(MsUp),      kc!(MsBtn2),    XXXXXXX,        wm!(LCTL, Y),   kc!(Pgup),      XXXXXXX,        XXXXXXX,        XXXXXXX,        kc!(Del),
        XXXXXXX,        kc!(MsLeft),    kc!(MsDown),    kc!(MsRght),    kc!(Home),      kc!(Left),      kc!(Down),      kc!(Up),        kc!(Right),     kc!(End),
        wm!(LCTL, Z),   wm!(LCTL, X),   wm!(LCTL, C),   wm!(LCTL, V),   XXXXXXX,        XXXXXXX,        kc!(Pgdn),      XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        _______,                        _______,        XXXXXXX,        XXXXXXX,        XXXXXXX,
    ],
    // _PUN
    [
        _______,                                                                _______,        _______,        _______,        _______,
        kc!(Exlm),      kc!(At),        kc!(Hash),      kc!(Dlr),       kc!(Perc),      kc!(Circ),      kc!(Ampr),      kc!(Astr),      XXXXXXX,        kc!(Dquo),      kc!(Quot),
        kc!(Unds),      kc!(Mins),      kc!(Plus),      kc!(Eql),       kc!(Slash),     kc!(Slash),     kc!(Lctl),      kc!(Lsft),      kc!(Lalt),      kc!(Lgui),
        kc!(Pipe),      kc!(Bsls),      kc!(Tild),      kc!(Grv),       XXXXXXX,        XXXXXXX,        XXXXXXX,        kc!(Labk),      kc!(Rabk),      kc!(Ques),
        XXXXXXX,        XXXXXXX,        XXXXXXX,        _______,                        _______,        XXXXXXX,        XXXXXXX,        XXXXXXX,
    ],
    // _NUM
    [
        _______,                                                                _______,        _______,        _______,        _______,
        XXXXXXX,        kc!(N5),        kc!(N6),        kc!(N7),        XXXXXXX,        kc!(Unds),      kc!(Mins),      kc!(Plus),      kc!(Astr),      kc!(Slash),     kc!(Eql),
        kc!(N1),        kc!(N2),        kc!(N3),        kc!(N4),        kc!(N5),        kc!(N6),        kc!(N7),        kc!(N8),        kc!(N9),        kc!(N0),
        XXXXXXX,        kc!(N8),        kc!(N9),        kc!(N0),        XXXXXXX,        XXXXXXX,        XXXXXXX,        _______,        _______,        _______,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        _______,                        _______,        XXXXXXX,        XXXXXXX,        XXXXXXX,
    ],
    // _FUN
    [
        _______,                                                                kc!(Caps),      kc!(Num),       kc!(Scrl),      kc!(Pscr),
        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        kc!(F1),        kc!(F2),        kc!(F3),        kc!(F4),        kc!(F5),        kc!(F6),        kc!(F7),        kc!(F8),        kc!(F9),        kc!(F10),
        kc!(F11),       kc!(F12),       XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        _______,                        _______,        XXXXXXX,        XXXXXXX,        XXXXXXX,
    ],
    // _MEDIA
    [
        kc!(Mute),                                                              _______,        _______,        _______,        _______,
        XXXXXXX,        XXXXXXX,        kc!(MsUp),      XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        kc!(Mprv),      kc!(Mply),      kc!(Mnxt),      XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        kc!(MsBtn1),                    kc!(MsBtn2),    kc!(MsBtn3),    kc!(MsBtn4),    XXXXXXX,
    ],
    // _MOUSE
    [
        kc!(Esc),                                                               _______,        _______,        _______,        _______,
        XXXXXXX,        XXXXXXX,        kc!(MsUp),      XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        kc!(MsLeft),    kc!(MsDown),    kc!(MsRght),    XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        kc!(MsBtn1),                    kc!(MsBtn2),    kc!(MsBtn3),    kc!(MsBtn4),    XXXXXXX,
    ],
    // _RGB
    [
        kc!(RmTogg),                                                            kc!(RmNext),    kc!(RmHued),    tg!(Rgb),       kc!(RmHueu),
        XXXXXXX,        XXXXXXX,        kc!(MsUp),      XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        kc!(RmPrev),    kc!(RmHued),    kc!(RmSatd),    XXXXXXX,
        XXXXXXX,        kc!(MsLeft),    kc!(MsDown),    kc!(MsRght),    XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        _______,                        _______,        XXXXXXX,        XXXXXXX,        XXXXXXX,
    ],
    // _KEY
    [
        kc!(Slep),                                                              kc!(QkBoot),    kc!(QkReboot),  kc!(EeClr),     _______,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,        XXXXXXX,
        XXXXXXX,        XXXXXXX,        XXXXXXX,        df!(Base),                      df!(Canary),    XXXXXXX,        XXXXXXX,        XXXXXXX,
    ],
];

/// Read-only view over a set of layer tables
#[derive(Debug, Clone, Copy)]
pub struct Keymap {
    layers: &'static [LayerKeys; LAYER_COUNT],
}

impl Default for Keymap {
    fn default() -> Self {
        Self::sherman()
    }
}

impl Keymap {
    /// The Sherman keymap
    pub const fn sherman() -> Self {
        Self { layers: &KEYMAPS }
    }

    /// A layer in physical layout order
    pub fn layer(&self, layer: Layer) -> &'static LayerKeys {
        &self.layers[layer.index() as usize]
    }

    /// Action at a matrix position on one layer, `No` for unwired cells
    pub fn action_at(&self, layer: Layer, pos: KeyPos) -> KeyAction {
        layout_slot(pos)
            .map(|slot| self.layer(layer)[slot])
            .unwrap_or(KeyAction::No)
    }

    /// A layer expanded onto the switch matrix
    pub fn matrix(&self, layer: Layer) -> Matrix {
        let mut matrix = [[KeyAction::No; MATRIX_COLS]; MATRIX_ROWS];
        for (slot, pos) in LAYOUT_POSITIONS.iter().enumerate() {
            matrix[pos.row as usize][pos.col as usize] = self.layer(layer)[slot];
        }
        matrix
    }

    /// Effective action for a key given the active and default layer states.
    ///
    /// Layers are searched from highest to lowest and transparent entries
    /// fall through. Returns the layer that supplied the action.
    pub fn resolve(&self, active: LayerState, default: LayerState, pos: KeyPos) -> (Layer, KeyAction) {
        let combined = LayerState(active.0 | default.0);
        for layer in combined.active_descending() {
            let action = self.action_at(layer, pos);
            if !action.is_transparent() {
                return (layer, action);
            }
        }
        match self.action_at(Layer::Base, pos) {
            KeyAction::Transparent => (Layer::Base, KeyAction::No),
            action => (Layer::Base, action),
        }
    }

    /// First matrix position carrying `action` on a layer
    pub fn position_of(&self, layer: Layer, action: KeyAction) -> Option<KeyPos> {
        self.layer(layer)
            .iter()
            .position(|a| *a == action)
            .map(|slot| LAYOUT_POSITIONS[slot])
    }
}

/// Layout slot for a matrix position
pub fn layout_slot(pos: KeyPos) -> Option<usize> {
    LAYOUT_INDEX
        .get(pos.row as usize)
        .and_then(|row| row.get(pos.col as usize))
        .copied()
        .flatten()
        .map(usize::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::Keycode;
    use crate::modifier::ModMask;

    #[test]
    fn test_layout_positions_are_unique_and_in_bounds() {
        let mut seen = std::collections::HashSet::new();
        for pos in LAYOUT_POSITIONS {
            assert!((pos.row as usize) < MATRIX_ROWS);
            assert!((pos.col as usize) < MATRIX_COLS);
            assert!(seen.insert(pos), "duplicate position {}", pos);
        }
        assert_eq!(seen.len(), LAYOUT_KEY_COUNT);
    }

    #[test]
    fn test_hand_split_by_row() {
        assert_eq!(KeyPos::new(2, 3).hand(), Hand::Left);
        assert_eq!(KeyPos::new(7, 1).hand(), Hand::Right);
    }

    #[test]
    fn test_matrix_places_home_row() {
        let keymap = Keymap::sherman();
        let matrix = keymap.matrix(Layer::Base);
        assert_eq!(matrix[2][3], KeyAction::mod_tap(ModMask::LCTL, Keycode::F));
        assert_eq!(matrix[7][1], KeyAction::mod_tap(ModMask::RCTL, Keycode::J));
        // unwired cells
        assert_eq!(matrix[0][5], KeyAction::No);
        assert_eq!(keymap.action_at(Layer::Base, KeyPos::new(42, 0)), KeyAction::No);
    }

    #[test]
    fn test_resolve_falls_through_transparent() {
        let keymap = Keymap::sherman();
        let space = keymap.position_of(Layer::Base, kc!(Space)).unwrap();

        let mut active = LayerState::EMPTY;
        active.on(Layer::Nav);
        let (layer, action) = keymap.resolve(active, LayerState::only(Layer::Base), space);
        assert_eq!(layer, Layer::Base);
        assert_eq!(action, kc!(Space));

        let esc = KeyPos::new(0, 0);
        let (layer, action) = keymap.resolve(active, LayerState::only(Layer::Base), esc);
        assert_eq!((layer, action), (Layer::Base, kc!(Esc)));
    }

    #[test]
    fn test_resolve_prefers_highest_layer() {
        let keymap = Keymap::sherman();
        let mut active = LayerState::EMPTY;
        active.on(Layer::Nav);
        active.on(Layer::Fun);
        let pos = LAYOUT_POSITIONS[16];
        assert_eq!(
            keymap.resolve(active, LayerState::only(Layer::Base), pos),
            (Layer::Fun, kc!(F1))
        );
    }

    #[test]
    fn test_resolve_transparent_on_canary_default() {
        let keymap = Keymap::sherman();
        let space_slot = LAYOUT_POSITIONS[39];
        let (layer, action) =
            keymap.resolve(LayerState::EMPTY, LayerState::only(Layer::Canary), space_slot);
        assert_eq!(layer, Layer::Base);
        assert_eq!(action, kc!(Space));
    }

    #[test]
    fn test_position_of() {
        let keymap = Keymap::sherman();
        assert_eq!(keymap.position_of(Layer::Base, kc!(Q)), Some(KeyPos::new(1, 0)));
        assert_eq!(keymap.position_of(Layer::Base, kc!(F12)), None);
    }
}
