// Sherman Hooks Integration Tests
//
// Drives the keymap through the callback trait the way a firmware runtime
// would: config file in, timings and display frames out.

use std::fs;
use std::path::PathBuf;

use sherman_core::display::{LedState, TextBuffer};
use sherman_core::{
    Config, ComboId, HostState, KeyAction, KeyPos, KeyRecord, KeymapHooks, Keycode, Layer,
    LayerState, MacroStep, ModMask, OsVariant, RgbMatrixState, RgbMode, Sherman, StatusView,
};

fn temp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sherman-{}-{}.toml", name, std::process::id()));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn config_file_drives_every_timing_hook() {
    let path = temp_config(
        "timings",
        r#"
[tapping]
term = 210
pinky_term = 190

[tapping.overrides]
"LSFT_T(KC_D)" = 160

[combo]
term = 45

[achordion]
timeout = 800
streak_timeout = 120
"#,
    );
    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.source_path(), Some(path.as_path()));
    let sherman = Sherman::from_config(&config);
    fs::remove_file(&path).ok();

    let d = KeyAction::mod_tap(ModMask::LSFT, Keycode::D);
    let a = KeyAction::mod_tap(ModMask::LGUI, Keycode::A);
    let f = KeyAction::mod_tap(ModMask::LCTL, Keycode::F);

    assert_eq!(sherman.tapping_term(d), 160);
    assert_eq!(sherman.tapping_term(a), 190);
    assert_eq!(sherman.tapping_term(f), 210);
    assert_eq!(sherman.combo_term(ComboId::ZXCut), 45);
    assert_eq!(sherman.combo_term(ComboId::ASTab), 75);
    assert_eq!(sherman.achordion_timeout(f), 800);
    assert_eq!(sherman.achordion_streak_chord_timeout(f, KeyAction::Key(Keycode::E)), 120);
    assert_eq!(sherman.achordion_streak_chord_timeout(d, KeyAction::Key(Keycode::E)), 0);
}

#[test]
fn reload_picks_up_changes() {
    let path = temp_config("reload", "[combo]\nterm = 60\n");
    let mut config = Config::from_file(&path).unwrap();
    assert_eq!(config.timings.combo_term, 60);

    fs::write(&path, "[combo]\nterm = 70\n").unwrap();
    config.reload().unwrap();
    assert_eq!(config.timings.combo_term, 70);
    fs::remove_file(&path).ok();
}

#[test]
fn chord_hook_uses_matrix_positions() {
    let sherman = Sherman::default();
    let keymap = sherman.keymap();
    let s = KeyAction::mod_tap(ModMask::LALT, Keycode::S);
    let s_pos = keymap.position_of(Layer::Base, s).unwrap();
    let w_pos = keymap.position_of(Layer::Base, KeyAction::Key(Keycode::W)).unwrap();
    let k = KeyAction::mod_tap(ModMask::RSFT, Keycode::K);
    let k_pos = keymap.position_of(Layer::Base, k).unwrap();

    // same hand, same column block: settles as tap
    assert!(!sherman.achordion_chord(
        KeyRecord::new(s, s_pos),
        KeyRecord::new(KeyAction::Key(Keycode::W), w_pos)
    ));
    // other hand: chord
    assert!(sherman.achordion_chord(KeyRecord::new(s, s_pos), KeyRecord::new(k, k_pos)));
    assert!(sherman.achordion_chord(
        KeyRecord::new(s, s_pos),
        KeyRecord::new(KeyAction::Key(Keycode::T), KeyPos::new(1, 4))
    ));
}

#[test]
fn leader_and_combo_hooks() {
    let sherman = Sherman::default();
    assert_eq!(
        sherman.leader_end(&[Keycode::P, Keycode::I]),
        Some(&[MacroStep::Text("()"), MacroStep::Tap(Keycode::Left)][..])
    );
    assert_eq!(sherman.leader_end(&[Keycode::Q]), None);
    assert!(sherman.combo_must_tap(ComboId::JKOsmSft));
    assert!(!sherman.combo_must_tap(ComboId::SpcBspcEnt));
}

#[test]
fn display_frames_follow_host_state() {
    let mut sherman = Sherman::default();
    let mut rgb = RgbMatrixState::new(true, RgbMode::CycleAll);
    let mut screen = TextBuffer::new();

    let mut host = HostState::default();
    assert!(!sherman.oled_task(&mut screen, &host));
    assert_eq!(sherman.last_view(), Some(StatusView::Idle));
    assert!(screen.cell(0, 0).unwrap().raw);

    host.os = OsVariant::MacOs;
    host.mods = ModMask::RGUI;
    host.leds = LedState {
        scroll_lock: true,
        ..LedState::default()
    };
    host.layers = LayerState::only(Layer::Media);
    host.wpm = 93;

    assert!(sherman.dynamic_macro_record_start(-1, &mut rgb));
    assert_eq!(rgb.mode, RgbMode::Breathing);
    sherman.oled_task(&mut screen, &host);

    assert_eq!(sherman.last_view(), Some(StatusView::Status));
    assert_eq!(screen.text(0, 8..21), "CAPS NUM SCRL");
    assert_eq!(screen.text(1, 8..21), "SH CMD OPT CT");
    assert!(screen.is_inverted(11, 1));
    assert!(screen.is_inverted(17, 0));
    assert_eq!(screen.text(2, 8..19), "Layer media");
    assert_eq!(screen.text(3, 8..15), "WPM 093");
    assert_eq!(screen.text(3, 18..21), "DM2");
    assert!(!screen.is_inverted(18, 3));

    assert!(sherman.dynamic_macro_record_end(-1, &mut rgb));
    assert_eq!(rgb, RgbMatrixState::new(true, RgbMode::CycleAll));
    sherman.oled_task(&mut screen, &host);
    assert!(screen.is_inverted(18, 3));

    // logo is not redrawn over the status text
    assert!(!screen.cell(8, 0).unwrap().raw);
}
