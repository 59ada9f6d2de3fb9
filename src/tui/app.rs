use sherman_core::config::Config;
use sherman_core::display::{HostState, TextBuffer, OLED_LINES};
use sherman_core::dynamic_macro::{MacroIndicator, RgbMatrixState};
use sherman_core::{KeymapHooks, Layer, LayerState, ModMask, OsVariant, Sherman, StatusView};

const MAX_OUTPUT_LINES: usize = 800;
const WPM_STEP: u8 = 5;

const OS_VARIANTS: [OsVariant; 5] = [
    OsVariant::Unsure,
    OsVariant::Linux,
    OsVariant::Windows,
    OsVariant::MacOs,
    OsVariant::Ios,
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pane {
    Controls,
    Output,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LockKey {
    Caps,
    Num,
    Scroll,
}

/// One row of the controls list
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Control {
    Lock(LockKey),
    CapsWord,
    Mod(ModMask),
    OneShotShift,
    Os,
    Layer,
    Wpm,
    /// Record a dynamic macro; 1 or -1
    Macro(i8),
    ResetMacros,
    Redraw,
}

fn build_controls() -> Vec<Control> {
    let mut controls = vec![
        Control::Lock(LockKey::Caps),
        Control::Lock(LockKey::Num),
        Control::Lock(LockKey::Scroll),
        Control::CapsWord,
    ];
    for mods in [
        ModMask::LSFT,
        ModMask::LCTL,
        ModMask::LALT,
        ModMask::LGUI,
        ModMask::RSFT,
        ModMask::RCTL,
        ModMask::RALT,
        ModMask::RGUI,
    ] {
        controls.push(Control::Mod(mods));
    }
    controls.extend([
        Control::OneShotShift,
        Control::Os,
        Control::Layer,
        Control::Wpm,
        Control::Macro(1),
        Control::Macro(-1),
        Control::ResetMacros,
        Control::Redraw,
    ]);
    controls
}

pub struct App {
    pub focused_pane: Pane,
    pub controls: Vec<Control>,
    pub control_index: usize,
    pub host: HostState,
    pub sherman: Sherman,
    pub rgb: RgbMatrixState,
    pub screen: TextBuffer,
    pub status: String,
    pub output: Vec<String>,
    pub output_scroll: usize,
    layer: Layer,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut app = Self {
            focused_pane: Pane::Controls,
            controls: build_controls(),
            control_index: 0,
            host: HostState {
                layers: LayerState::only(Layer::Base),
                ..HostState::default()
            },
            sherman: Sherman::from_config(config),
            rgb: RgbMatrixState::default(),
            screen: TextBuffer::new(),
            status: "Ready".to_string(),
            output: vec![],
            output_scroll: 0,
            layer: Layer::Base,
        };
        match config.source_path() {
            Some(path) => app.push_output(format!("$ config {}", path.display())),
            None => app.push_output("$ config defaults"),
        }
        app.refresh_display();
        app
    }

    pub fn selected_control(&self) -> Option<Control> {
        self.controls.get(self.control_index).copied()
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = msg.into();
    }

    pub fn push_output<S: AsRef<str>>(&mut self, msg: S) {
        for line in msg.as_ref().lines() {
            self.output.push(line.to_string());
        }
        if self.output.len() > MAX_OUTPUT_LINES {
            let overflow = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(0..overflow);
        }
        self.output_scroll = self.output.len().saturating_sub(1);
    }

    pub fn cycle_pane(&mut self) {
        self.focused_pane = match self.focused_pane {
            Pane::Controls => Pane::Output,
            Pane::Output => Pane::Controls,
        };
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Run one display tick against the current host state
    pub fn refresh_display(&mut self) {
        let before = self.sherman.last_view();
        self.sherman.oled_task(&mut self.screen, &self.host);
        let after = self.sherman.last_view();
        if before != after {
            if let Some(view) = after {
                self.push_output(format!("view -> {}", view));
            }
        }
    }

    pub fn view(&self) -> Option<StatusView> {
        self.sherman.last_view()
    }

    /// Final panel contents and the newest `events` log lines
    pub fn session_summary(&self, events: usize) -> String {
        let mut out = String::new();
        for line in 0..OLED_LINES {
            out.push_str(&format!("|{}|\n", self.screen.line(line)));
        }
        if let Some(view) = self.view() {
            out.push_str(&format!("view: {}\n", view));
        }
        let start = self.output.len().saturating_sub(events);
        for line in &self.output[start..] {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Current value shown next to a control
    pub fn control_value(&self, control: Control) -> String {
        let on_off = |on: bool| if on { "on" } else { "off" }.to_string();
        match control {
            Control::Lock(LockKey::Caps) => on_off(self.host.leds.caps_lock),
            Control::Lock(LockKey::Num) => on_off(self.host.leds.num_lock),
            Control::Lock(LockKey::Scroll) => on_off(self.host.leds.scroll_lock),
            Control::CapsWord => on_off(self.host.caps_word),
            Control::Mod(mods) => on_off(self.host.mods.intersects(mods)),
            Control::OneShotShift => on_off(self.host.oneshot_mods.intersects(ModMask::LSFT)),
            Control::Os => self.host.os.to_string(),
            Control::Layer => format!("{} ({})", self.layer.human_name(), self.layer),
            Control::Wpm => self.host.wpm.to_string(),
            Control::Macro(direction) => {
                let indicator = if direction == 1 {
                    self.sherman.macros().macro1()
                } else {
                    self.sherman.macros().macro2()
                };
                match indicator {
                    MacroIndicator::Hidden => "empty".to_string(),
                    MacroIndicator::Recording => "recording".to_string(),
                    MacroIndicator::Recorded => "recorded".to_string(),
                }
            }
            Control::ResetMacros | Control::Redraw => String::new(),
        }
    }

    pub fn control_label(control: Control) -> String {
        match control {
            Control::Lock(LockKey::Caps) => "Caps lock".to_string(),
            Control::Lock(LockKey::Num) => "Num lock".to_string(),
            Control::Lock(LockKey::Scroll) => "Scroll lock".to_string(),
            Control::CapsWord => "Caps word".to_string(),
            Control::Mod(mods) => format!("Hold {}", mods),
            Control::OneShotShift => "One-shot shift".to_string(),
            Control::Os => "Host OS".to_string(),
            Control::Layer => "Layer".to_string(),
            Control::Wpm => "WPM".to_string(),
            Control::Macro(1) => "Record macro 1".to_string(),
            Control::Macro(_) => "Record macro 2".to_string(),
            Control::ResetMacros => "Reset macros".to_string(),
            Control::Redraw => "Clear screen".to_string(),
        }
    }

    /// Enter/space on the selected control
    pub fn activate_selected(&mut self) {
        let Some(control) = self.selected_control() else {
            return;
        };
        match control {
            Control::Lock(LockKey::Caps) => self.host.leds.caps_lock ^= true,
            Control::Lock(LockKey::Num) => self.host.leds.num_lock ^= true,
            Control::Lock(LockKey::Scroll) => self.host.leds.scroll_lock ^= true,
            Control::CapsWord => self.host.caps_word ^= true,
            Control::Mod(mods) => self.host.mods = ModMask(self.host.mods.bits() ^ mods.bits()),
            Control::OneShotShift => {
                self.host.oneshot_mods = ModMask(self.host.oneshot_mods.bits() ^ ModMask::LSFT.bits())
            }
            Control::Os | Control::Layer | Control::Wpm => self.adjust_selected(1),
            Control::Macro(direction) => self.toggle_recording(direction),
            Control::ResetMacros => {
                self.sherman.dynamic_macro_record_start(0, &mut self.rgb);
                self.sherman.dynamic_macro_record_end(0, &mut self.rgb);
                self.push_output("macros reset");
            }
            Control::Redraw => {
                self.screen = TextBuffer::new();
                self.sherman.invalidate_display();
                self.push_output("screen cleared, logo redrawn");
            }
        }
        self.set_status(format!(
            "{}: {}",
            Self::control_label(control),
            self.control_value(control)
        ));
        self.refresh_display();
    }

    /// Left/right on the selected control
    pub fn adjust_selected(&mut self, delta: i32) {
        let Some(control) = self.selected_control() else {
            return;
        };
        match control {
            Control::Os => {
                self.host.os = cycle(&OS_VARIANTS, self.host.os, delta);
            }
            Control::Layer => {
                self.layer = cycle(Layer::all(), self.layer, delta);
                self.host.layers = LayerState::only(self.layer);
            }
            Control::Wpm => {
                self.host.wpm = if delta >= 0 {
                    self.host.wpm.saturating_add(WPM_STEP)
                } else {
                    self.host.wpm.saturating_sub(WPM_STEP)
                };
            }
            _ => return,
        }
        self.set_status(format!(
            "{}: {}",
            Self::control_label(control),
            self.control_value(control)
        ));
        self.refresh_display();
    }

    fn toggle_recording(&mut self, direction: i8) {
        let indicator = if direction == 1 {
            self.sherman.macros().macro1()
        } else {
            self.sherman.macros().macro2()
        };
        if indicator == MacroIndicator::Recording {
            self.sherman.dynamic_macro_record_end(direction, &mut self.rgb);
            self.push_output(format!(
                "macro {} recorded, rgb {} ({})",
                if direction == 1 { 1 } else { 2 },
                self.rgb.mode,
                if self.rgb.enabled { "on" } else { "off" }
            ));
        } else {
            self.sherman.dynamic_macro_record_start(direction, &mut self.rgb);
            self.push_output(format!(
                "macro {} recording, rgb {}",
                if direction == 1 { 1 } else { 2 },
                self.rgb.mode
            ));
        }
    }
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: T, delta: i32) -> T {
    let len = items.len() as i32;
    let index = items.iter().position(|i| *i == current).unwrap_or(0) as i32;
    items[(index + delta).rem_euclid(len) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sherman_core::dynamic_macro::RgbMode;

    fn select(app: &mut App, control: Control) {
        app.control_index = app.controls.iter().position(|c| *c == control).unwrap();
    }

    #[test]
    fn test_starts_idle() {
        let app = App::new(&Config::new());
        assert_eq!(app.view(), Some(StatusView::Idle));
        assert_eq!(app.output[0], "$ config defaults");
    }

    #[test]
    fn test_toggle_mod_shows_status() {
        let mut app = App::new(&Config::new());
        select(&mut app, Control::Mod(ModMask::RCTL));
        app.activate_selected();
        assert_eq!(app.host.mods, ModMask::RCTL);
        assert_eq!(app.view(), Some(StatusView::Status));
        assert!(app.screen.is_inverted(11, 1));

        app.activate_selected();
        assert_eq!(app.view(), Some(StatusView::Idle));
    }

    #[test]
    fn test_cycle_layer_and_os() {
        let mut app = App::new(&Config::new());
        select(&mut app, Control::Layer);
        app.adjust_selected(-1);
        assert_eq!(app.layer(), Layer::Key);
        assert_eq!(app.screen.text(2, 8..17), "Layer key");

        select(&mut app, Control::Os);
        app.adjust_selected(1);
        assert_eq!(app.host.os, OsVariant::Linux);
    }

    #[test]
    fn test_macro_recording_round_trip() {
        let mut app = App::new(&Config::new());
        select(&mut app, Control::Macro(1));
        app.activate_selected();
        assert_eq!(app.rgb.mode, RgbMode::Breathing);
        assert_eq!(app.control_value(Control::Macro(1)), "recording");

        app.activate_selected();
        assert_eq!(app.rgb.mode, RgbMode::SolidColor);
        assert_eq!(app.control_value(Control::Macro(1)), "recorded");
        assert!(app.screen.is_inverted(18, 2));
    }

    #[test]
    fn test_session_summary_keeps_last_events() {
        let mut app = App::new(&Config::new());
        select(&mut app, Control::Lock(LockKey::Num));
        app.activate_selected();

        let summary = app.session_summary(1);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), OLED_LINES + 2);
        assert!(lines[0].contains("CAPS NUM SCRL"));
        assert_eq!(lines[OLED_LINES], "view: status");
        assert_eq!(lines[OLED_LINES + 1], "view -> status");
    }

    #[test]
    fn test_wpm_saturates() {
        let mut app = App::new(&Config::new());
        select(&mut app, Control::Wpm);
        app.adjust_selected(-1);
        assert_eq!(app.host.wpm, 0);
        app.adjust_selected(1);
        assert_eq!(app.screen.text(3, 8..15), "WPM 005");
    }
}
