// Sherman Keycode Type
// Closed set of firmware keycodes used by the keymap tables

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A single firmware keycode.
///
/// The string form is the firmware's canonical name (`KC_A`, `MS_BTN1`,
/// `QK_BOOT`). Parsing also accepts the usual aliases such as `KC_SLSH` or
/// `KC_ENT`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum Keycode {
    // Letters
    #[strum(to_string = "KC_A")]
    A,
    #[strum(to_string = "KC_B")]
    B,
    #[strum(to_string = "KC_C")]
    C,
    #[strum(to_string = "KC_D")]
    D,
    #[strum(to_string = "KC_E")]
    E,
    #[strum(to_string = "KC_F")]
    F,
    #[strum(to_string = "KC_G")]
    G,
    #[strum(to_string = "KC_H")]
    H,
    #[strum(to_string = "KC_I")]
    I,
    #[strum(to_string = "KC_J")]
    J,
    #[strum(to_string = "KC_K")]
    K,
    #[strum(to_string = "KC_L")]
    L,
    #[strum(to_string = "KC_M")]
    M,
    #[strum(to_string = "KC_N")]
    N,
    #[strum(to_string = "KC_O")]
    O,
    #[strum(to_string = "KC_P")]
    P,
    #[strum(to_string = "KC_Q")]
    Q,
    #[strum(to_string = "KC_R")]
    R,
    #[strum(to_string = "KC_S")]
    S,
    #[strum(to_string = "KC_T")]
    T,
    #[strum(to_string = "KC_U")]
    U,
    #[strum(to_string = "KC_V")]
    V,
    #[strum(to_string = "KC_W")]
    W,
    #[strum(to_string = "KC_X")]
    X,
    #[strum(to_string = "KC_Y")]
    Y,
    #[strum(to_string = "KC_Z")]
    Z,

    // Digits
    #[strum(to_string = "KC_1")]
    N1,
    #[strum(to_string = "KC_2")]
    N2,
    #[strum(to_string = "KC_3")]
    N3,
    #[strum(to_string = "KC_4")]
    N4,
    #[strum(to_string = "KC_5")]
    N5,
    #[strum(to_string = "KC_6")]
    N6,
    #[strum(to_string = "KC_7")]
    N7,
    #[strum(to_string = "KC_8")]
    N8,
    #[strum(to_string = "KC_9")]
    N9,
    #[strum(to_string = "KC_0")]
    N0,

    // Editing and punctuation
    #[strum(to_string = "KC_ESC")]
    Esc,
    #[strum(to_string = "KC_TAB")]
    Tab,
    #[strum(to_string = "KC_ENTER", serialize = "KC_ENT")]
    Enter,
    #[strum(to_string = "KC_SPC", serialize = "KC_SPACE")]
    Space,
    #[strum(to_string = "KC_BSPC", serialize = "KC_BACKSPACE")]
    Bspc,
    #[strum(to_string = "KC_DEL", serialize = "KC_DELETE")]
    Del,
    #[strum(to_string = "KC_QUOT", serialize = "KC_QUOTE")]
    Quot,
    #[strum(to_string = "KC_SCLN", serialize = "KC_SEMICOLON")]
    Scln,
    #[strum(to_string = "KC_COMMA", serialize = "KC_COMM")]
    Comma,
    #[strum(to_string = "KC_DOT")]
    Dot,
    #[strum(to_string = "KC_SLASH", serialize = "KC_SLSH")]
    Slash,
    #[strum(to_string = "KC_MINS", serialize = "KC_MINUS")]
    Mins,
    #[strum(to_string = "KC_EQL", serialize = "KC_EQUAL")]
    Eql,
    #[strum(to_string = "KC_LBRC")]
    Lbrc,
    #[strum(to_string = "KC_RBRC")]
    Rbrc,
    #[strum(to_string = "KC_BSLS")]
    Bsls,
    #[strum(to_string = "KC_GRV")]
    Grv,

    // Shifted symbols
    #[strum(to_string = "KC_EXLM")]
    Exlm,
    #[strum(to_string = "KC_AT")]
    At,
    #[strum(to_string = "KC_HASH")]
    Hash,
    #[strum(to_string = "KC_DLR")]
    Dlr,
    #[strum(to_string = "KC_PERC")]
    Perc,
    #[strum(to_string = "KC_CIRC")]
    Circ,
    #[strum(to_string = "KC_AMPR")]
    Ampr,
    #[strum(to_string = "KC_ASTR")]
    Astr,
    #[strum(to_string = "KC_LPRN")]
    Lprn,
    #[strum(to_string = "KC_RPRN")]
    Rprn,
    #[strum(to_string = "KC_UNDS")]
    Unds,
    #[strum(to_string = "KC_PLUS")]
    Plus,
    #[strum(to_string = "KC_LCBR")]
    Lcbr,
    #[strum(to_string = "KC_RCBR")]
    Rcbr,
    #[strum(to_string = "KC_PIPE")]
    Pipe,
    #[strum(to_string = "KC_TILD")]
    Tild,
    #[strum(to_string = "KC_DQUO")]
    Dquo,
    #[strum(to_string = "KC_LABK")]
    Labk,
    #[strum(to_string = "KC_RABK")]
    Rabk,
    #[strum(to_string = "KC_QUES")]
    Ques,

    // Navigation
    #[strum(to_string = "KC_HOME")]
    Home,
    #[strum(to_string = "KC_END")]
    End,
    #[strum(to_string = "KC_PGUP")]
    Pgup,
    #[strum(to_string = "KC_PGDN")]
    Pgdn,
    #[strum(to_string = "KC_LEFT")]
    Left,
    #[strum(to_string = "KC_DOWN")]
    Down,
    #[strum(to_string = "KC_UP")]
    Up,
    #[strum(to_string = "KC_RIGHT", serialize = "KC_RGHT")]
    Right,

    // Function row
    #[strum(to_string = "KC_F1")]
    F1,
    #[strum(to_string = "KC_F2")]
    F2,
    #[strum(to_string = "KC_F3")]
    F3,
    #[strum(to_string = "KC_F4")]
    F4,
    #[strum(to_string = "KC_F5")]
    F5,
    #[strum(to_string = "KC_F6")]
    F6,
    #[strum(to_string = "KC_F7")]
    F7,
    #[strum(to_string = "KC_F8")]
    F8,
    #[strum(to_string = "KC_F9")]
    F9,
    #[strum(to_string = "KC_F10")]
    F10,
    #[strum(to_string = "KC_F11")]
    F11,
    #[strum(to_string = "KC_F12")]
    F12,

    // Locks
    #[strum(to_string = "KC_CAPS")]
    Caps,
    #[strum(to_string = "KC_NUM")]
    Num,
    #[strum(to_string = "KC_SCRL")]
    Scrl,
    #[strum(to_string = "KC_PSCR")]
    Pscr,

    // Modifiers
    #[strum(to_string = "KC_LCTL")]
    Lctl,
    #[strum(to_string = "KC_LSFT")]
    Lsft,
    #[strum(to_string = "KC_LALT")]
    Lalt,
    #[strum(to_string = "KC_LGUI")]
    Lgui,
    #[strum(to_string = "KC_RCTL")]
    Rctl,
    #[strum(to_string = "KC_RSFT")]
    Rsft,
    #[strum(to_string = "KC_RALT")]
    Ralt,
    #[strum(to_string = "KC_RGUI")]
    Rgui,

    // Media and system
    #[strum(to_string = "KC_MUTE")]
    Mute,
    #[strum(to_string = "KC_VOLD")]
    Vold,
    #[strum(to_string = "KC_VOLU")]
    Volu,
    #[strum(to_string = "KC_MPRV")]
    Mprv,
    #[strum(to_string = "KC_MPLY")]
    Mply,
    #[strum(to_string = "KC_MNXT")]
    Mnxt,
    #[strum(to_string = "KC_BRID")]
    Brid,
    #[strum(to_string = "KC_BRIU")]
    Briu,
    #[strum(to_string = "KC_SLEP")]
    Slep,

    // Mouse keys
    #[strum(to_string = "MS_BTN1")]
    MsBtn1,
    #[strum(to_string = "MS_BTN2")]
    MsBtn2,
    #[strum(to_string = "MS_BTN3")]
    MsBtn3,
    #[strum(to_string = "MS_BTN4")]
    MsBtn4,
    #[strum(to_string = "MS_UP")]
    MsUp,
    #[strum(to_string = "MS_DOWN")]
    MsDown,
    #[strum(to_string = "MS_LEFT")]
    MsLeft,
    #[strum(to_string = "MS_RGHT")]
    MsRght,
    #[strum(to_string = "MS_WHLU")]
    MsWhlu,
    #[strum(to_string = "MS_WHLD")]
    MsWhld,

    // RGB matrix
    #[strum(to_string = "RM_TOGG")]
    RmTogg,
    #[strum(to_string = "RM_NEXT")]
    RmNext,
    #[strum(to_string = "RM_PREV")]
    RmPrev,
    #[strum(to_string = "RM_HUEU")]
    RmHueu,
    #[strum(to_string = "RM_HUED")]
    RmHued,
    #[strum(to_string = "RM_SATU")]
    RmSatu,
    #[strum(to_string = "RM_SATD")]
    RmSatd,
    #[strum(to_string = "RM_VALU")]
    RmValu,
    #[strum(to_string = "RM_VALD")]
    RmVald,

    // Quantum
    #[strum(to_string = "QK_BOOT")]
    QkBoot,
    #[strum(to_string = "QK_REBOOT")]
    QkReboot,
    #[strum(to_string = "QK_LEAD")]
    QkLead,
    #[strum(to_string = "EE_CLR")]
    EeClr,
}

impl Keycode {
    /// Canonical firmware name
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Returns true for the eight modifier keycodes (`KC_LCTL` .. `KC_RGUI`)
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Keycode::Lctl
                | Keycode::Lsft
                | Keycode::Lalt
                | Keycode::Lgui
                | Keycode::Rctl
                | Keycode::Rsft
                | Keycode::Ralt
                | Keycode::Rgui
        )
    }

    /// Returns true for mouse buttons, movement and wheel keycodes
    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            Keycode::MsBtn1
                | Keycode::MsBtn2
                | Keycode::MsBtn3
                | Keycode::MsBtn4
                | Keycode::MsUp
                | Keycode::MsDown
                | Keycode::MsLeft
                | Keycode::MsRght
                | Keycode::MsWhlu
                | Keycode::MsWhld
        )
    }

    /// Returns true for RGB matrix control keycodes
    pub fn is_rgb(self) -> bool {
        self.name().starts_with("RM_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_keycode_display_uses_firmware_name() {
        assert_eq!(Keycode::A.to_string(), "KC_A");
        assert_eq!(Keycode::N0.to_string(), "KC_0");
        assert_eq!(Keycode::MsBtn1.to_string(), "MS_BTN1");
        assert_eq!(Keycode::QkLead.to_string(), "QK_LEAD");
    }

    #[test]
    fn test_keycode_parse_aliases() {
        assert_eq!(Keycode::from_str("KC_SLSH"), Ok(Keycode::Slash));
        assert_eq!(Keycode::from_str("KC_SLASH"), Ok(Keycode::Slash));
        assert_eq!(Keycode::from_str("KC_COMM"), Ok(Keycode::Comma));
        assert_eq!(Keycode::from_str("KC_ENT"), Ok(Keycode::Enter));
        assert_eq!(Keycode::from_str("KC_RGHT"), Ok(Keycode::Right));
        assert!(Keycode::from_str("KC_NOPE").is_err());
    }

    #[test]
    fn test_every_name_parses_back() {
        for keycode in Keycode::iter() {
            assert_eq!(Keycode::from_str(keycode.name()), Ok(keycode));
        }
    }

    #[test]
    fn test_keycode_classes() {
        assert!(Keycode::Lgui.is_modifier());
        assert!(!Keycode::A.is_modifier());
        assert!(Keycode::MsWhld.is_mouse());
        assert!(!Keycode::Up.is_mouse());
        assert!(Keycode::RmTogg.is_rgb());
        assert!(!Keycode::QkBoot.is_rgb());
    }
}
