// Sherman Status Display
// Text layout for the 128x32 OLED and an in-memory character buffer

use std::fmt;

use crate::dynamic_macro::{DynamicMacros, MacroIndicator};
use crate::layer::{layer_label, LayerState};
use crate::modifier::{mod_labels, ModMask, OsVariant};

/// Character columns on the panel (128 px / 6 px font)
pub const OLED_COLS: usize = 21;
/// Character lines on the panel (32 px / 8 px pages)
pub const OLED_LINES: usize = 4;
pub const OLED_WIDTH_PX: usize = 128;
pub const FONT_WIDTH_PX: usize = 6;

/// Column where the status text starts, right of the logo
pub const STATUS_COL: u8 = 8;
/// Column of the dynamic macro indicators
pub const MACRO_STATUS_COL: u8 = 18;
/// Longest layer line, including the `Layer ` prefix
pub const LAYER_LINE_MAX: usize = 17;

/// Sherman logo, one byte per 8-pixel column, page by page
#[rustfmt::skip]
pub const LOGO: [u8; 512] = [
    255, 255, 255, 255, 255, 255, 223, 255, 255, 255, 253, 255, 254, 254, 254, 254,
    254, 254, 255, 253, 253, 251, 231, 207, 223, 127,  95, 223, 223, 127,  63, 255,
    255, 255, 255, 255,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    255, 255, 223, 199, 251, 133, 255, 255,   8, 101, 203, 247, 173, 208, 237, 249,
    131, 253, 195, 255, 255, 255, 255,  31, 255, 127, 255,  18,   3,  15,  31,  31,
    255, 255, 255, 255,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    255, 255, 255, 255, 253, 226, 240, 199,  15,  16,   1,   3, 103, 255,  23,  63,
    255, 219,  11,  41,  21,  15,   7,   0,   1,   4,   6,   6,   6,   0,   0,   0,
    255, 255, 255, 255,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    255, 255, 255, 255, 255, 255, 255,   0,   0,   0,   0,   0,   0,   1,   0,   3,
      1,   0,   0,   0,   0,   0,   0, 192, 248, 248, 252, 254, 254, 255, 255, 255,
    255, 255, 255, 255,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
];

/// Character-level panel driver
pub trait OledDisplay {
    /// Move the cursor to a character cell
    fn set_cursor(&mut self, col: u8, line: u8);
    /// Write text at the cursor, wrapping at the line end
    fn write(&mut self, text: &str, invert: bool);
    /// Write text then clear the rest of the line and move to the next one
    fn write_ln(&mut self, text: &str, invert: bool);
    /// Copy a bitmap into the frame buffer from the top-left corner
    fn write_raw(&mut self, data: &[u8]);
    fn clear(&mut self);
}

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub inverted: bool,
    /// Covered by bitmap pixels instead of a glyph
    pub raw: bool,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        inverted: false,
        raw: false,
    };
}

/// 21x4 character buffer standing in for the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    cells: [[Cell; OLED_COLS]; OLED_LINES],
    col: usize,
    line: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::BLANK; OLED_COLS]; OLED_LINES],
            col: 0,
            line: 0,
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.col, self.line)
    }

    /// Cell at a position; `None` off the panel
    pub fn cell(&self, col: usize, line: usize) -> Option<Cell> {
        self.cells.get(line).and_then(|l| l.get(col)).copied()
    }

    pub fn is_inverted(&self, col: usize, line: usize) -> bool {
        self.cell(col, line).is_some_and(|c| c.inverted)
    }

    pub fn row(&self, line: usize) -> &[Cell] {
        self.cells.get(line).map(|l| &l[..]).unwrap_or(&[])
    }

    /// A line as text, bitmap cells drawn as blocks
    pub fn line(&self, line: usize) -> String {
        self.row(line)
            .iter()
            .map(|c| if c.raw { '█' } else { c.ch })
            .collect()
    }

    /// Glyph text in a column range, ignoring bitmap cells
    pub fn text(&self, line: usize, cols: std::ops::Range<usize>) -> String {
        self.row(line)
            .iter()
            .skip(cols.start)
            .take(cols.len())
            .map(|c| c.ch)
            .collect()
    }

    fn put(&mut self, ch: char, inverted: bool) {
        if self.col >= OLED_COLS {
            self.col = 0;
            self.line = (self.line + 1) % OLED_LINES;
        }
        self.cells[self.line][self.col] = Cell {
            ch,
            inverted,
            raw: false,
        };
        self.col += 1;
    }

    fn advance_line(&mut self) {
        if self.col < OLED_COLS {
            for cell in &mut self.cells[self.line][self.col..] {
                *cell = Cell::BLANK;
            }
        }
        self.col = 0;
        self.line = (self.line + 1) % OLED_LINES;
    }
}

impl OledDisplay for TextBuffer {
    fn set_cursor(&mut self, col: u8, line: u8) {
        let col = col as usize;
        let line = line as usize;
        // out-of-range positions are ignored, as on the panel
        if col < OLED_COLS && line < OLED_LINES {
            self.col = col;
            self.line = line;
        }
    }

    fn write(&mut self, text: &str, invert: bool) {
        for ch in text.chars() {
            if ch == '\n' {
                self.advance_line();
            } else {
                self.put(ch, invert);
            }
        }
    }

    fn write_ln(&mut self, text: &str, invert: bool) {
        self.write(text, invert);
        self.advance_line();
    }

    fn write_raw(&mut self, data: &[u8]) {
        let mut lit = [[false; OLED_COLS]; OLED_LINES];
        for (i, byte) in data.iter().take(OLED_WIDTH_PX * OLED_LINES).enumerate() {
            let col = (i % OLED_WIDTH_PX) / FONT_WIDTH_PX;
            if *byte != 0 && col < OLED_COLS {
                lit[i / OLED_WIDTH_PX][col] = true;
            }
        }
        let pages = data.len().div_ceil(OLED_WIDTH_PX).min(OLED_LINES);
        for (line, row) in lit.iter().enumerate().take(pages) {
            for (col, raw) in row.iter().enumerate() {
                self.cells[line][col] = Cell {
                    raw: *raw,
                    ..Cell::BLANK
                };
            }
        }
    }

    fn clear(&mut self) {
        *self = Self::new();
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in 0..OLED_LINES {
            writeln!(f, "{}", self.line(line))?;
        }
        Ok(())
    }
}

/// Host lock-key LEDs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedState {
    pub num_lock: bool,
    pub caps_lock: bool,
    pub scroll_lock: bool,
}

/// Everything the status display reads from the firmware each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostState {
    pub leds: LedState,
    pub caps_word: bool,
    pub mods: ModMask,
    pub oneshot_mods: ModMask,
    pub os: OsVariant,
    pub layers: LayerState,
    pub wpm: u8,
}

impl HostState {
    /// Held and pending one-shot modifiers
    pub fn active_mods(&self) -> ModMask {
        self.mods | self.oneshot_mods
    }

    pub fn caps_active(&self) -> bool {
        self.leds.caps_lock || self.caps_word
    }

    /// No lock and no modifier active
    pub fn is_idle(&self) -> bool {
        !self.caps_active()
            && !self.leds.num_lock
            && !self.leds.scroll_lock
            && self.active_mods().is_empty()
    }
}

/// A status word and whether it is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub text: &'static str,
    pub active: bool,
}

impl Token {
    const fn new(text: &'static str, active: bool) -> Self {
        Self { text, active }
    }
}

pub fn keylock_tokens(leds: LedState, caps_word: bool) -> [Token; 3] {
    [
        Token::new("CAPS", leds.caps_lock || caps_word),
        Token::new("NUM", leds.num_lock),
        Token::new("SCRL", leds.scroll_lock),
    ]
}

/// Modifier words in the host's order and naming
pub fn mod_tokens(mods: ModMask, os: OsVariant) -> [Token; 4] {
    mod_labels(os).map(|l| Token::new(l.label, mods.intersects(l.slot.mask())))
}

/// `Layer <name>` for the highest active layer
pub fn layer_line(layers: LayerState) -> String {
    let mut line = format!("Layer {}", layer_label(layers.highest_index()));
    line.truncate(LAYER_LINE_MAX);
    line
}

/// Three-character right-aligned number
pub fn u8_str(value: u8, pad: char) -> String {
    format!("{:>3}", value).replace(' ', &pad.to_string())
}

pub fn wpm_line(wpm: u8) -> String {
    format!("WPM {}", u8_str(wpm, '0'))
}

fn write_tokens<D: OledDisplay + ?Sized>(display: &mut D, tokens: &[Token]) {
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            display.write(" ", false);
        }
        display.write(token.text, token.active);
    }
}

/// Which variant of the status rows was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusView {
    /// Status rows blank so the logo stands alone
    Idle,
    /// Lock and modifier words shown
    Status,
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusView::Idle => write!(f, "idle"),
            StatusView::Status => write!(f, "status"),
        }
    }
}

/// Draws the status screen once per display tick
#[derive(Debug, Clone)]
pub struct StatusRenderer {
    render_logo: bool,
}

impl Default for StatusRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusRenderer {
    pub fn new() -> Self {
        Self { render_logo: true }
    }

    /// True until the logo has been drawn
    pub fn needs_logo(&self) -> bool {
        self.render_logo
    }

    /// Redraw the logo on the next tick, e.g. after the panel was cleared
    pub fn invalidate(&mut self) {
        self.render_logo = true;
    }

    pub fn render<D: OledDisplay + ?Sized>(
        &mut self,
        display: &mut D,
        host: &HostState,
        macros: &DynamicMacros,
    ) -> StatusView {
        if self.render_logo {
            display.write_raw(&LOGO);
            self.render_logo = false;
        }

        let view = if host.is_idle() {
            display.set_cursor(STATUS_COL, 0);
            display.write_ln("", false);
            display.set_cursor(STATUS_COL, 1);
            display.write_ln("", false);
            StatusView::Idle
        } else {
            display.set_cursor(STATUS_COL, 0);
            write_tokens(display, &keylock_tokens(host.leds, host.caps_word));
            display.set_cursor(STATUS_COL, 1);
            write_tokens(display, &mod_tokens(host.active_mods(), host.os));
            StatusView::Status
        };

        display.set_cursor(STATUS_COL, 2);
        display.write_ln(&layer_line(host.layers), false);
        display.set_cursor(STATUS_COL, 3);
        display.write_ln(&wpm_line(host.wpm), false);

        // drawn last so they sit on top of the freshly cleared lines
        for (line, label, indicator) in [(2, "DM1", macros.macro1()), (3, "DM2", macros.macro2())] {
            match indicator {
                MacroIndicator::Hidden => {}
                MacroIndicator::Recording | MacroIndicator::Recorded => {
                    display.set_cursor(MACRO_STATUS_COL, line);
                    display.write(label, indicator == MacroIndicator::Recorded);
                }
            }
        }

        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic_macro::RgbMatrixState;
    use crate::layer::Layer;

    fn render(host: &HostState) -> (TextBuffer, StatusView) {
        let mut buffer = TextBuffer::new();
        let view = StatusRenderer::new().render(&mut buffer, host, &DynamicMacros::new());
        (buffer, view)
    }

    #[test]
    fn test_write_wraps_and_write_ln_clears() {
        let mut buffer = TextBuffer::new();
        buffer.set_cursor(19, 0);
        buffer.write("abc", false);
        assert_eq!(buffer.text(0, 19..21), "ab");
        assert_eq!(buffer.text(1, 0..1), "c");

        buffer.set_cursor(0, 2);
        buffer.write("xxxxxxxx", true);
        buffer.set_cursor(2, 2);
        buffer.write_ln("y", false);
        assert_eq!(buffer.text(2, 0..8), "xxy     ");
        assert!(buffer.is_inverted(1, 2));
        assert!(!buffer.is_inverted(3, 2));
        assert_eq!(buffer.cursor(), (0, 3));
    }

    #[test]
    fn test_logo_occupies_left_columns() {
        let mut buffer = TextBuffer::new();
        buffer.write_raw(&LOGO);
        for line in 0..OLED_LINES {
            assert!(buffer.cell(0, line).unwrap().raw);
            assert!(!buffer.cell(STATUS_COL as usize, line).unwrap().raw);
        }
    }

    #[test]
    fn test_tokens() {
        let leds = LedState {
            num_lock: true,
            ..LedState::default()
        };
        let tokens = keylock_tokens(leds, true);
        assert_eq!(tokens.map(|t| t.active), [true, true, false]);

        let pc = mod_tokens(ModMask::RCTL | ModMask::LSFT, OsVariant::Linux);
        assert_eq!(pc.map(|t| t.text), ["SH", "CT", "ALT", "GUI"]);
        assert_eq!(pc.map(|t| t.active), [true, true, false, false]);

        let mac = mod_tokens(ModMask::LGUI, OsVariant::MacOs);
        assert_eq!(mac.map(|t| t.text), ["SH", "CMD", "OPT", "CT"]);
        assert_eq!(mac.map(|t| t.active), [false, true, false, false]);
    }

    #[test]
    fn test_lines() {
        assert_eq!(layer_line(LayerState::only(Layer::Canary)), "Layer canary");
        assert_eq!(layer_line(LayerState::EMPTY), "Layer qwerty");
        assert_eq!(layer_line(LayerState(1 << 12)), "Layer ???");
        assert_eq!(wpm_line(7), "WPM 007");
        assert_eq!(wpm_line(255), "WPM 255");
        assert_eq!(u8_str(42, ' '), " 42");
    }

    #[test]
    fn test_idle_view() {
        let (buffer, view) = render(&HostState::default());
        assert_eq!(view, StatusView::Idle);
        assert_eq!(buffer.text(0, 8..21), " ".repeat(13));
        assert_eq!(buffer.text(2, 8..21), "Layer qwerty ");
        assert_eq!(buffer.text(3, 8..15), "WPM 000");
        assert!(buffer.cell(0, 0).unwrap().raw);
    }

    #[test]
    fn test_status_view() {
        let host = HostState {
            leds: LedState {
                caps_lock: true,
                ..LedState::default()
            },
            oneshot_mods: ModMask::LSFT,
            layers: LayerState::only(Layer::Nav),
            wpm: 64,
            ..HostState::default()
        };
        let (buffer, view) = render(&host);
        assert_eq!(view, StatusView::Status);
        assert_eq!(buffer.text(0, 8..21), "CAPS NUM SCRL");
        assert_eq!(buffer.text(1, 8..21), "SH CT ALT GUI");
        assert!(buffer.is_inverted(8, 0));
        assert!(!buffer.is_inverted(13, 0));
        assert!(buffer.is_inverted(8, 1));
        assert!(!buffer.is_inverted(11, 1));
        assert_eq!(buffer.text(2, 8..17), "Layer nav");
        assert_eq!(buffer.text(3, 8..15), "WPM 064");
    }

    #[test]
    fn test_logo_drawn_once() {
        let mut renderer = StatusRenderer::new();
        let mut buffer = TextBuffer::new();
        let macros = DynamicMacros::new();
        renderer.render(&mut buffer, &HostState::default(), &macros);
        assert!(!renderer.needs_logo());

        buffer.clear();
        renderer.render(&mut buffer, &HostState::default(), &macros);
        assert!(!buffer.cell(0, 0).unwrap().raw);

        renderer.invalidate();
        renderer.render(&mut buffer, &HostState::default(), &macros);
        assert!(buffer.cell(0, 0).unwrap().raw);
    }

    #[test]
    fn test_macro_indicators() {
        let mut rgb = RgbMatrixState::default();
        let mut macros = DynamicMacros::new();
        let mut renderer = StatusRenderer::new();
        let mut buffer = TextBuffer::new();

        macros.record_start(1, &mut rgb);
        renderer.render(&mut buffer, &HostState::default(), &macros);
        assert_eq!(buffer.text(2, 18..21), "DM1");
        assert!(!buffer.is_inverted(18, 2));
        assert_eq!(buffer.text(3, 18..21), "   ");

        macros.record_end(1, &mut rgb);
        renderer.render(&mut buffer, &HostState::default(), &macros);
        assert!(buffer.is_inverted(18, 2));

        macros.record_start(0, &mut rgb);
        renderer.render(&mut buffer, &HostState::default(), &macros);
        assert_eq!(buffer.text(2, 18..21), "ty ");
    }
}
