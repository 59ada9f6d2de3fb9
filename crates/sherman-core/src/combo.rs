// Sherman Combos
// Keys pressed together that produce a different key

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use smallvec::SmallVec;
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

use crate::action::KeyAction;

/// Combo identifiers, in firmware table order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ComboId {
    #[strum(to_string = "Q_W_ESC")]
    QWEsc,
    #[strum(to_string = "A_S_TAB")]
    ASTab,
    #[strum(to_string = "Z_X_CUT")]
    ZXCut,
    #[strum(to_string = "Z_C_COPY")]
    ZCCopy,
    #[strum(to_string = "Z_V_PASTE")]
    ZVPaste,
    #[strum(to_string = "SPC_BSPC_ENT")]
    SpcBspcEnt,
    #[strum(to_string = "F_E_LPRN")]
    FELprn,
    #[strum(to_string = "J_I_RPRN")]
    JIRprn,
    #[strum(to_string = "D_V_LBRC")]
    DVLbrc,
    #[strum(to_string = "K_N_RBRC")]
    KNRbrc,
    #[strum(to_string = "E_R_LCBR")]
    ERLcbr,
    #[strum(to_string = "U_I_RCBR")]
    UIRcbr,
    #[strum(to_string = "J_K_OSM_SFT")]
    JKOsmSft,
    #[strum(to_string = "BTN1_BTN2_BTN3")]
    Btn1Btn2Btn3,
}

/// Combo window for `A_S_TAB`; both keys are slow pinky/ring mod-taps
pub const A_S_TAB_TERM: u16 = 75;

/// Trigger keys and the key they produce
#[derive(Debug, Clone)]
pub struct Combo {
    id: ComboId,
    keys: SmallVec<[KeyAction; 3]>,
    result: KeyAction,
}

impl Combo {
    pub fn new(id: ComboId, keys: impl IntoIterator<Item = KeyAction>, result: KeyAction) -> Self {
        Self {
            id,
            keys: keys.into_iter().collect(),
            result,
        }
    }

    pub fn id(&self) -> ComboId {
        self.id
    }

    pub fn keys(&self) -> &[KeyAction] {
        &self.keys
    }

    pub fn result(&self) -> KeyAction {
        self.result
    }

    /// Order-independent exact match against a set of pressed keys
    pub fn matches(&self, pressed: &[KeyAction]) -> bool {
        let own: HashSet<_> = self.keys.iter().collect();
        let other: HashSet<_> = pressed.iter().collect();
        own == other
    }
}

impl PartialEq for Combo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.matches(&other.keys) && self.result == other.result
    }
}

impl Eq for Combo {}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "{}: {} -> {}", self.id, keys.join(" + "), self.result)
    }
}

#[rustfmt::skip]
const COMBO_TABLE: [(ComboId, &[KeyAction], KeyAction); 14] = [
    (ComboId::QWEsc,        &[kc!(Q), kc!(W)],                   kc!(Esc)),
    (ComboId::ASTab,        &[mt!(LGUI, A), mt!(LALT, S)],       kc!(Tab)),
    (ComboId::ZXCut,        &[kc!(Z), kc!(X)],                   wm!(LCTL, X)),
    (ComboId::ZCCopy,       &[kc!(Z), kc!(C)],                   wm!(LCTL, C)),
    (ComboId::ZVPaste,      &[kc!(Z), kc!(V)],                   wm!(LCTL, V)),
    (ComboId::SpcBspcEnt,   &[kc!(Space), kc!(Bspc)],            kc!(Enter)),
    (ComboId::FELprn,       &[mt!(LCTL, F), kc!(E)],             kc!(Lprn)),
    (ComboId::JIRprn,       &[mt!(RCTL, J), kc!(I)],             kc!(Rprn)),
    (ComboId::DVLbrc,       &[mt!(LSFT, D), kc!(V)],             kc!(Lbrc)),
    (ComboId::KNRbrc,       &[mt!(RSFT, K), kc!(N)],             kc!(Rbrc)),
    (ComboId::ERLcbr,       &[kc!(E), kc!(R)],                   kc!(Lcbr)),
    (ComboId::UIRcbr,       &[kc!(U), kc!(I)],                   kc!(Rcbr)),
    (ComboId::JKOsmSft,     &[mt!(RCTL, J), mt!(RSFT, K)],       osm!(LSFT)),
    (ComboId::Btn1Btn2Btn3, &[kc!(MsBtn1), kc!(MsBtn2)],         kc!(MsBtn3)),
];

/// All combos, in firmware table order
pub fn combos() -> &'static [Combo] {
    static COMBOS: OnceLock<Vec<Combo>> = OnceLock::new();
    COMBOS.get_or_init(|| {
        COMBO_TABLE
            .iter()
            .map(|(id, keys, result)| Combo::new(*id, keys.iter().copied(), *result))
            .collect()
    })
}

pub fn combo(id: ComboId) -> &'static Combo {
    // table order matches declaration order
    &combos()[id as usize]
}

/// Combo window for one combo, given the global default
pub fn combo_term(id: ComboId, default_term: u16) -> u16 {
    match id {
        ComboId::ASTab => A_S_TAB_TERM,
        _ => default_term,
    }
}

/// Must-tap combos fire only when every key is released within the term
pub fn combo_must_tap(id: ComboId) -> bool {
    matches!(id, ComboId::JKOsmSft)
}

/// Combo whose trigger set is exactly `pressed`
pub fn find_combo(pressed: &[KeyAction]) -> Option<&'static Combo> {
    combos().iter().find(|c| c.matches(pressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn test_table_order_matches_ids() {
        assert_eq!(combos().len(), ComboId::COUNT);
        for id in ComboId::iter() {
            assert_eq!(combo(id).id(), id);
            assert!((2..=3).contains(&combo(id).keys().len()));
        }
    }

    #[test]
    fn test_combo_terms() {
        assert_eq!(combo_term(ComboId::ASTab, 50), 75);
        assert_eq!(combo_term(ComboId::QWEsc, 50), 50);
        assert_eq!(combo_term(ComboId::JKOsmSft, 40), 40);
    }

    #[test]
    fn test_only_one_shot_shift_is_must_tap() {
        let must_tap: Vec<ComboId> = ComboId::iter().filter(|id| combo_must_tap(*id)).collect();
        assert_eq!(must_tap, vec![ComboId::JKOsmSft]);
    }

    #[test]
    fn test_find_combo_is_order_independent() {
        let found = find_combo(&[kc!(W), kc!(Q)]).unwrap();
        assert_eq!(found.id(), ComboId::QWEsc);
        assert_eq!(found.result(), kc!(Esc));

        let found = find_combo(&[mt!(RSFT, K), mt!(RCTL, J)]).unwrap();
        assert_eq!(found.result(), osm!(LSFT));

        assert!(find_combo(&[kc!(Q)]).is_none());
        assert!(find_combo(&[kc!(Q), kc!(W), kc!(E)]).is_none());
        // the mod-tap, not the plain letter, triggers
        assert!(find_combo(&[kc!(J), kc!(I)]).is_none());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(
            combo(ComboId::ZXCut).to_string(),
            "Z_X_CUT: KC_Z + KC_X -> LCTL(KC_X)"
        );
        assert_eq!("a_s_tab".parse::<ComboId>().unwrap(), ComboId::ASTab);
    }
}
