// Sherman Layers
// Layer identifiers and the active-layer bitmask

use std::fmt;

use strum_macros::{Display, EnumCount, EnumIter, EnumString};

/// A keymap layer. Discriminants are the firmware layer indices.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Layer {
    #[strum(to_string = "_BASE", serialize = "qwerty", serialize = "base")]
    Base = 0,
    #[strum(to_string = "_CANARY", serialize = "canary")]
    Canary = 1,
    #[strum(to_string = "_NAV", serialize = "nav")]
    Nav = 2,
    #[strum(to_string = "_PUN", serialize = "pun")]
    Pun = 3,
    #[strum(to_string = "_NUM", serialize = "num")]
    Num = 4,
    #[strum(to_string = "_FUN", serialize = "fun")]
    Fun = 5,
    #[strum(to_string = "_MEDIA", serialize = "media")]
    Media = 6,
    #[strum(to_string = "_MOUSE", serialize = "mouse")]
    Mouse = 7,
    #[strum(to_string = "_RGB", serialize = "rgb")]
    Rgb = 8,
    #[strum(to_string = "_KEY", serialize = "key")]
    Key = 9,
}

/// Number of layers in the keymap
pub const LAYER_COUNT: usize = 10;

/// Shown on the display for a layer index with no name
pub const UNKNOWN_LAYER_LABEL: &str = "???";

const ALL_LAYERS: [Layer; LAYER_COUNT] = [
    Layer::Base,
    Layer::Canary,
    Layer::Nav,
    Layer::Pun,
    Layer::Num,
    Layer::Fun,
    Layer::Media,
    Layer::Mouse,
    Layer::Rgb,
    Layer::Key,
];

impl Layer {
    /// Firmware layer index
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Option<Layer> {
        if (index as usize) < LAYER_COUNT {
            Some(ALL_LAYERS[index as usize])
        } else {
            None
        }
    }

    /// Name shown on the status display
    pub const fn human_name(self) -> &'static str {
        match self {
            Layer::Base => "qwerty",
            Layer::Canary => "canary",
            Layer::Nav => "nav",
            Layer::Pun => "pun",
            Layer::Num => "num",
            Layer::Fun => "fun",
            Layer::Media => "media",
            Layer::Mouse => "mouse",
            Layer::Rgb => "rgb",
            Layer::Key => "key",
        }
    }

    pub const fn all() -> &'static [Layer; LAYER_COUNT] {
        &ALL_LAYERS
    }
}

/// Human name for a raw layer index, with a placeholder for unknown indices
pub fn layer_label(index: u8) -> &'static str {
    Layer::from_index(index)
        .map(Layer::human_name)
        .unwrap_or(UNKNOWN_LAYER_LABEL)
}

/// Bitmask of active layers, bit N set when layer index N is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct LayerState(pub u32);

impl LayerState {
    pub const EMPTY: LayerState = LayerState(0);

    /// State with exactly one layer on
    pub const fn only(layer: Layer) -> LayerState {
        LayerState(1 << layer.index())
    }

    pub fn on(&mut self, layer: Layer) {
        self.0 |= 1 << layer.index();
    }

    pub fn off(&mut self, layer: Layer) {
        self.0 &= !(1 << layer.index());
    }

    pub fn toggle(&mut self, layer: Layer) {
        self.0 ^= 1 << layer.index();
    }

    pub const fn is_on(self, layer: Layer) -> bool {
        self.0 & (1 << layer.index()) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Index of the highest set bit; 0 for an empty state
    pub const fn highest_index(self) -> u8 {
        if self.0 == 0 {
            0
        } else {
            (31 - self.0.leading_zeros()) as u8
        }
    }

    /// Highest active named layer, if the highest bit names one
    pub const fn highest(self) -> Option<Layer> {
        Layer::from_index(self.highest_index())
    }

    /// Active named layers from highest to lowest
    pub fn active_descending(self) -> impl Iterator<Item = Layer> {
        ALL_LAYERS.into_iter().rev().filter(move |l| self.is_on(*l))
    }
}

impl fmt::Display for LayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = ALL_LAYERS
            .iter()
            .filter(|l| self.is_on(**l))
            .map(|l| l.human_name())
            .collect();
        write!(f, "[{}]", names.join(", "))
    }
}
