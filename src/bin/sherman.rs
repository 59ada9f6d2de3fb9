// Sherman CLI
// Inspect the keymap tables, timing policy and status display from a terminal

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use sherman_core::combo::combos;
use sherman_core::config::Config;
use sherman_core::display::{HostState, LedState, TextBuffer, OLED_LINES};
use sherman_core::encoder::{encoder_binding, NUM_ENCODERS};
use sherman_core::keymap::{Keymap, LAYOUT_KEY_COUNT};
use sherman_core::leader::{describe, LEADER_SEQUENCES};
use sherman_core::tapping::is_pinky_key;
use sherman_core::{
    chord_reason, KeyAction, KeyRecord, KeymapHooks, Layer, LayerState, ModMask, OsVariant,
    Sherman,
};

/// Sherman keymap inspector
#[derive(Parser, Debug)]
#[command(name = "sherman")]
#[command(version)]
#[command(about = "Inspect the Sherman split keyboard keymap", long_about = None)]
struct Args {
    /// TOML timing configuration (defaults to ~/.config/sherman/config.toml)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print layer grids in firmware notation
    Layers {
        /// Only this layer (e.g. nav, _NUM, 4)
        #[arg(short, long, value_parser = parse_layer)]
        layer: Option<Layer>,
    },
    /// Print combos with their effective terms
    Combos,
    /// Print encoder bindings per layer
    Encoders,
    /// Print leader sequences
    Leaders,
    /// Tapping term for an action, e.g. "LGUI_T(KC_A)"
    Term {
        #[arg(value_parser = parse_action)]
        action: KeyAction,
    },
    /// Chord verdict for a held mod-tap and a second key
    Chord {
        #[arg(value_parser = parse_action)]
        tap_hold: KeyAction,
        #[arg(value_parser = parse_action)]
        other: KeyAction,
        /// Layer both keys are looked up on
        #[arg(short, long, value_parser = parse_layer, default_value = "qwerty")]
        layer: Layer,
    },
    /// Render the status display
    Status {
        #[arg(long)]
        caps: bool,
        #[arg(long)]
        caps_word: bool,
        #[arg(long)]
        num: bool,
        #[arg(long)]
        scroll: bool,
        /// Held modifiers, e.g. "LCTL|LSFT"
        #[arg(long, value_parser = parse_mods, default_value = "none")]
        mods: ModMask,
        /// Pending one-shot modifiers
        #[arg(long, value_parser = parse_mods, default_value = "none")]
        oneshot: ModMask,
        #[arg(long, value_parser = parse_os, default_value = "linux")]
        os: OsVariant,
        /// Highest active layer
        #[arg(short, long, value_parser = parse_layer, default_value = "qwerty")]
        layer: Layer,
        #[arg(long, default_value_t = 0)]
        wpm: u8,
    },
    /// Validate the config and the keymap tables
    Check,
}

fn parse_layer(s: &str) -> Result<Layer, String> {
    if let Ok(index) = s.parse::<u8>() {
        return Layer::from_index(index).ok_or_else(|| format!("no layer {}", index));
    }
    s.parse::<Layer>().map_err(|_| format!("unknown layer '{}'", s))
}

fn parse_action(s: &str) -> Result<KeyAction, String> {
    s.parse::<KeyAction>().map_err(|e| e.to_string())
}

fn parse_mods(s: &str) -> Result<ModMask, String> {
    s.parse::<ModMask>().map_err(|e| e.to_string())
}

fn parse_os(s: &str) -> Result<OsVariant, String> {
    s.parse::<OsVariant>().map_err(|_| format!("unknown os '{}'", s))
}

/// Physical rows as (left, right) slot ranges in layout order
const LAYOUT_ROWS: [(std::ops::Range<usize>, std::ops::Range<usize>); 5] = [
    (0..1, 1..5),
    (5..10, 10..16),
    (16..21, 21..26),
    (26..31, 31..36),
    (36..40, 40..44),
];

const CELL_WIDTH: usize = 16;

fn format_layer(keymap: &Keymap, layer: Layer) -> String {
    let keys = keymap.layer(layer);
    let cell = |slot: usize| format!("{:<width$}", keys[slot].to_string(), width = CELL_WIDTH);

    let mut out = format!("{} ({})\n", layer, layer.human_name());
    for (left, right) in LAYOUT_ROWS.iter().cloned() {
        let pad = 6 - left.len();
        let left_cells: String = left.map(cell).collect();
        let right_cells: String = right.map(cell).collect();
        out.push_str(&" ".repeat(pad * CELL_WIDTH));
        out.push_str(&left_cells);
        out.push_str("| ");
        out.push_str(right_cells.trim_end());
        out.push('\n');
    }
    out
}

fn format_combos(sherman: &Sherman) -> String {
    let mut out = String::new();
    for combo in combos() {
        let keys: Vec<String> = combo.keys().iter().map(|k| k.to_string()).collect();
        let must_tap = if sherman.combo_must_tap(combo.id()) { " must-tap" } else { "" };
        out.push_str(&format!(
            "{:<15} {:<32} -> {:<14} {}ms{}\n",
            combo.id().to_string(),
            keys.join(" + "),
            combo.result().to_string(),
            sherman.combo_term(combo.id()),
            must_tap
        ));
    }
    out
}

/// What an encoder turn drives, for keycodes in a dedicated block
fn binding_kind(action: KeyAction) -> Option<&'static str> {
    let keycode = action.tap_keycode()?;
    if keycode.is_rgb() {
        Some("rgb")
    } else if keycode.is_mouse() {
        Some("mouse")
    } else if keycode.is_modifier() {
        Some("modifier")
    } else {
        None
    }
}

fn format_encoders() -> String {
    let mut out = String::new();
    for layer in Layer::all() {
        for index in 0..NUM_ENCODERS {
            let Some(binding) = encoder_binding(*layer, index) else {
                continue;
            };
            if binding.ccw == KeyAction::No && binding.cw == KeyAction::No {
                continue;
            }
            let kind = binding_kind(binding.cw)
                .map(|k| format!(" [{}]", k))
                .unwrap_or_default();
            out.push_str(&format!(
                "{:<8} encoder {}: ccw {:<10} cw {:<10}{}\n",
                layer.to_string(),
                index,
                binding.ccw.to_string(),
                binding.cw.to_string(),
                kind
            ));
        }
    }
    out
}

fn format_leaders() -> String {
    LEADER_SEQUENCES
        .iter()
        .map(|seq| {
            let keys: Vec<String> = seq.keys.iter().map(|k| k.to_string()).collect();
            format!("LEAD {:<20} -> {}\n", keys.join(" "), describe(seq.output))
        })
        .collect()
}

fn term_source(sherman: &Sherman, action: KeyAction) -> &'static str {
    if sherman.timings().term_overrides.contains_key(&action) {
        "override"
    } else if is_pinky_key(action) {
        "pinky"
    } else {
        "default"
    }
}

/// Display buffer with a marker row under inverted cells
fn format_screen(screen: &TextBuffer) -> String {
    let mut out = String::new();
    for line in 0..OLED_LINES {
        out.push_str(&format!("|{}|\n", screen.line(line)));
        let marks: String = screen
            .row(line)
            .iter()
            .map(|c| if c.inverted { '^' } else { ' ' })
            .collect();
        if marks.contains('^') {
            out.push_str(&format!(" {}\n", marks.trim_end()));
        }
    }
    out
}

struct Application {
    args: Args,
    config: Config,
}

impl Application {
    fn new(args: Args) -> Result<Self> {
        let config = match &args.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::load_default().context("failed to load default config")?,
        };
        Ok(Self { args, config })
    }

    fn run(&self) -> Result<()> {
        let sherman = Sherman::from_config(&self.config);
        debug!("running {:?}", self.args.command);

        match &self.args.command {
            Command::Layers { layer } => {
                let layers: Vec<Layer> = match layer {
                    Some(layer) => vec![*layer],
                    None => Layer::all().to_vec(),
                };
                for layer in layers {
                    println!("{}", format_layer(sherman.keymap(), layer));
                }
            }
            Command::Combos => print!("{}", format_combos(&sherman)),
            Command::Encoders => print!("{}", format_encoders()),
            Command::Leaders => print!("{}", format_leaders()),
            Command::Term { action } => {
                println!(
                    "{}: {}ms ({})",
                    action,
                    sherman.tapping_term(*action),
                    term_source(&sherman, *action)
                );
            }
            Command::Chord {
                tap_hold,
                other,
                layer,
            } => {
                let locate = |action: KeyAction| {
                    sherman
                        .keymap()
                        .position_of(*layer, action)
                        .ok_or_else(|| anyhow!("{} is not on layer {}", action, layer.human_name()))
                };
                let tap_hold = KeyRecord::new(*tap_hold, locate(*tap_hold)?);
                let other = KeyRecord::new(*other, locate(*other)?);
                let reason = chord_reason(tap_hold, other);
                let verdict = if sherman.achordion_chord(tap_hold, other) {
                    "hold"
                } else {
                    "tap"
                };
                println!(
                    "{}@{} + {}@{}: {} ({})",
                    tap_hold.action, tap_hold.pos, other.action, other.pos, verdict, reason
                );
            }
            Command::Status {
                caps,
                caps_word,
                num,
                scroll,
                mods,
                oneshot,
                os,
                layer,
                wpm,
            } => {
                let host = HostState {
                    leds: LedState {
                        num_lock: *num,
                        caps_lock: *caps,
                        scroll_lock: *scroll,
                    },
                    caps_word: *caps_word,
                    mods: *mods,
                    oneshot_mods: *oneshot,
                    os: *os,
                    layers: LayerState::only(*layer),
                    wpm: *wpm,
                };
                let mut screen = TextBuffer::new();
                let mut sherman = sherman;
                sherman.oled_task(&mut screen, &host);
                print!("{}", format_screen(&screen));
                if let Some(view) = sherman.last_view() {
                    println!("view: {}", view);
                }
            }
            Command::Check => self.check(&sherman)?,
        }
        Ok(())
    }

    fn check(&self, sherman: &Sherman) -> Result<()> {
        match self.config.source_path() {
            Some(path) => println!("config: {}", path.display()),
            None => println!("config: defaults"),
        }

        let keymap = sherman.keymap();
        for layer in Layer::all() {
            let len = keymap.layer(*layer).len();
            if len != LAYOUT_KEY_COUNT {
                bail!("layer {} has {} keys, expected {}", layer, len, LAYOUT_KEY_COUNT);
            }
        }
        println!("layers: {} x {} keys", Layer::all().len(), LAYOUT_KEY_COUNT);

        for combo in combos() {
            for key in combo.keys() {
                let reachable = [Layer::Base, Layer::Canary, Layer::Media, Layer::Mouse]
                    .iter()
                    .any(|layer| keymap.position_of(*layer, *key).is_some());
                if !reachable {
                    bail!("combo {} uses {}, which is not on any layer", combo.id(), key);
                }
            }
        }
        println!("combos: {} ok", combos().len());

        for action in self.config.timings.term_overrides.keys() {
            let found = Layer::all()
                .iter()
                .any(|layer| keymap.position_of(*layer, *action).is_some());
            if !found {
                bail!("tapping term override for {}, which is not on any layer", action);
            }
        }
        println!(
            "timings: term {}ms, pinky {}ms, combo {}ms, {} override(s)",
            self.config.timings.tapping_term,
            self.config.timings.pinky_term,
            self.config.timings.combo_term,
            self.config.timings.term_overrides.len()
        );
        println!("Configuration is valid");
        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    Application::new(args)?.run()
}
