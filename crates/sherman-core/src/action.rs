// Sherman Key Actions
// What a single matrix position does on a given layer

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::keycode::Keycode;
use crate::layer::Layer;
use crate::modifier::ModMask;

/// Errors from parsing firmware keycode notation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown keycode: '{0}'")]
    UnknownKeycode(String),

    #[error("unknown modifier: '{0}'")]
    UnknownModifier(String),

    #[error("unknown layer: '{0}'")]
    UnknownLayer(String),

    #[error("invalid key action: '{0}'")]
    InvalidAction(String),
}

/// Action bound to a key position on one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Plain keycode
    Key(Keycode),
    /// Keycode sent with modifiers held, e.g. `LCTL(KC_Z)`
    WithMods(ModMask, Keycode),
    /// Modifier when held, keycode when tapped, e.g. `LGUI_T(KC_A)`
    ModTap { mods: ModMask, tap: Keycode },
    /// Layer active while held
    Momentary(Layer),
    /// Layer toggled on press
    Toggle(Layer),
    /// Switch the default layer
    DefaultLayer(Layer),
    /// One-shot modifier
    OneShotMod(ModMask),
    /// Does nothing
    No,
    /// Falls through to the next active layer below
    Transparent,
}

impl KeyAction {
    pub const fn key(keycode: Keycode) -> KeyAction {
        KeyAction::Key(keycode)
    }

    pub const fn mod_tap(mods: ModMask, tap: Keycode) -> KeyAction {
        KeyAction::ModTap { mods, tap }
    }

    /// True for actions resolved by the tap-hold engine
    pub const fn is_tap_hold(self) -> bool {
        matches!(self, KeyAction::ModTap { .. })
    }

    /// Keycode produced on tap, for keycode-bearing actions
    pub const fn tap_keycode(self) -> Option<Keycode> {
        match self {
            KeyAction::Key(k) | KeyAction::WithMods(_, k) | KeyAction::ModTap { tap: k, .. } => {
                Some(k)
            }
            _ => None,
        }
    }

    /// Modifiers applied when a mod-tap key is held
    pub const fn hold_mods(self) -> ModMask {
        match self {
            KeyAction::ModTap { mods, .. } => mods,
            _ => ModMask::NONE,
        }
    }

    pub const fn is_transparent(self) -> bool {
        matches!(self, KeyAction::Transparent)
    }
}

impl From<Keycode> for KeyAction {
    fn from(keycode: Keycode) -> Self {
        KeyAction::Key(keycode)
    }
}

fn single_mod_name(mods: ModMask) -> Option<String> {
    if mods.bits().count_ones() == 1 {
        Some(mods.to_string())
    } else {
        None
    }
}

fn mod_list(mods: ModMask) -> String {
    mods.to_string()
        .split('|')
        .map(|m| format!("MOD_{}", m))
        .collect::<Vec<_>>()
        .join("|")
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAction::Key(k) => write!(f, "{}", k),
            KeyAction::WithMods(mods, k) => {
                // Nest one wrapper per modifier, outermost first
                let names: Vec<String> = mods.to_string().split('|').map(String::from).collect();
                for name in &names {
                    write!(f, "{}(", name)?;
                }
                write!(f, "{}", k)?;
                for _ in &names {
                    write!(f, ")")?;
                }
                Ok(())
            }
            KeyAction::ModTap { mods, tap } => match single_mod_name(*mods) {
                Some(name) => write!(f, "{}_T({})", name, tap),
                None => write!(f, "MT({}, {})", mod_list(*mods), tap),
            },
            KeyAction::Momentary(layer) => write!(f, "MO({})", layer),
            KeyAction::Toggle(layer) => write!(f, "TG({})", layer),
            KeyAction::DefaultLayer(layer) => write!(f, "DF({})", layer),
            KeyAction::OneShotMod(mods) => write!(f, "OSM({})", mod_list(*mods)),
            KeyAction::No => write!(f, "KC_NO"),
            KeyAction::Transparent => write!(f, "KC_TRNS"),
        }
    }
}

fn call_regex() -> &'static Regex {
    static CALL: OnceLock<Regex> = OnceLock::new();
    CALL.get_or_init(|| {
        Regex::new(r"^(?P<func>[A-Z_]+)\((?P<args>.*)\)$").expect("action call pattern is valid")
    })
}

/// Modifier wrapper functions such as `LCTL(...)` or the short `C(...)`
fn wrapper_mods(func: &str) -> Option<ModMask> {
    match func {
        "C" => Some(ModMask::LCTL),
        "S" => Some(ModMask::LSFT),
        "A" => Some(ModMask::LALT),
        "G" => Some(ModMask::LGUI),
        other => ModMask::from_single_name(other),
    }
}

fn parse_layer(arg: &str) -> Result<Layer, ParseError> {
    let arg = arg.trim();
    if let Ok(index) = arg.parse::<u8>() {
        return Layer::from_index(index).ok_or_else(|| ParseError::UnknownLayer(arg.to_string()));
    }
    Layer::from_str(arg).map_err(|_| ParseError::UnknownLayer(arg.to_string()))
}

fn parse_keycode(arg: &str) -> Result<Keycode, ParseError> {
    let arg = arg.trim();
    Keycode::from_str(arg).map_err(|_| ParseError::UnknownKeycode(arg.to_string()))
}

impl FromStr for KeyAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "KC_TRNS" | "KC_TRANSPARENT" | "_______" => return Ok(KeyAction::Transparent),
            "KC_NO" | "XXXXXXX" => return Ok(KeyAction::No),
            _ => {}
        }

        let Some(caps) = call_regex().captures(s) else {
            return parse_keycode(s).map(KeyAction::Key);
        };
        let func = &caps["func"];
        let args = &caps["args"];

        match func {
            "MO" => return parse_layer(args).map(KeyAction::Momentary),
            "TG" => return parse_layer(args).map(KeyAction::Toggle),
            "DF" => return parse_layer(args).map(KeyAction::DefaultLayer),
            "OSM" => return args.parse::<ModMask>().map(KeyAction::OneShotMod),
            "MT" => {
                let (mods, tap) = args
                    .split_once(',')
                    .ok_or_else(|| ParseError::InvalidAction(s.to_string()))?;
                return Ok(KeyAction::ModTap {
                    mods: mods.parse()?,
                    tap: parse_keycode(tap)?,
                });
            }
            _ => {}
        }

        if let Some(name) = func.strip_suffix("_T") {
            let mods = ModMask::from_single_name(name)
                .ok_or_else(|| ParseError::UnknownModifier(name.to_string()))?;
            return Ok(KeyAction::ModTap {
                mods,
                tap: parse_keycode(args)?,
            });
        }

        if let Some(mods) = wrapper_mods(func) {
            return match args.parse::<KeyAction>()? {
                KeyAction::Key(k) => Ok(KeyAction::WithMods(mods, k)),
                KeyAction::WithMods(inner, k) => Ok(KeyAction::WithMods(mods | inner, k)),
                _ => Err(ParseError::InvalidAction(s.to_string())),
            };
        }

        Err(ParseError::InvalidAction(s.to_string()))
    }
}
