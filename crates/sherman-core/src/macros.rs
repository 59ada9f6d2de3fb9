// Sherman Table Macros
// Short constructors used by the layer, combo and encoder tables

/// Plain keycode, `kc!(A)` is `KC_A`
macro_rules! kc {
    ($k:ident) => {
        $crate::action::KeyAction::Key($crate::keycode::Keycode::$k)
    };
}

/// Mod-tap, `mt!(LGUI, A)` is `LGUI_T(KC_A)`
macro_rules! mt {
    ($m:ident, $k:ident) => {
        $crate::action::KeyAction::ModTap {
            mods: $crate::modifier::ModMask::$m,
            tap: $crate::keycode::Keycode::$k,
        }
    };
}

/// Keycode with a held modifier, `wm!(LCTL, Z)` is `LCTL(KC_Z)`
macro_rules! wm {
    ($m:ident, $k:ident) => {
        $crate::action::KeyAction::WithMods(
            $crate::modifier::ModMask::$m,
            $crate::keycode::Keycode::$k,
        )
    };
}

/// Momentary layer
macro_rules! mo {
    ($l:ident) => {
        $crate::action::KeyAction::Momentary($crate::layer::Layer::$l)
    };
}

/// Toggle layer
macro_rules! tg {
    ($l:ident) => {
        $crate::action::KeyAction::Toggle($crate::layer::Layer::$l)
    };
}

/// Default layer switch
macro_rules! df {
    ($l:ident) => {
        $crate::action::KeyAction::DefaultLayer($crate::layer::Layer::$l)
    };
}

/// One-shot modifier
macro_rules! osm {
    ($m:ident) => {
        $crate::action::KeyAction::OneShotMod($crate::modifier::ModMask::$m)
    };
}
