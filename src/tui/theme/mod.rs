mod palette;

use ratatui::prelude::*;
use sherman_core::StatusView;

pub use palette::Palette;

pub struct Theme {
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    // Panel border style
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.palette.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.border_default)
        }
    }

    // Badge for the last rendered view
    pub fn view_badge(&self, view: Option<StatusView>) -> Style {
        let bg = match view {
            Some(StatusView::Idle) => self.palette.bg_view_idle,
            Some(StatusView::Status) => self.palette.bg_view_status,
            None => self.palette.bg_view_unknown,
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    // One character cell of the emulated panel
    pub fn oled_cell(&self, inverted: bool) -> Style {
        if inverted {
            Style::default()
                .fg(self.palette.oled_off)
                .bg(self.palette.oled_on)
        } else {
            Style::default()
                .fg(self.palette.oled_on)
                .bg(self.palette.oled_off)
        }
    }

    // Checkbox style
    pub fn checkbox(&self, checked: bool) -> Style {
        if checked {
            Style::default().fg(self.palette.accent_success)
        } else {
            Style::default().fg(self.palette.text_muted)
        }
    }

    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.palette.text_secondary)
    }

    // Muted text (hints, labels)
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    pub fn title_focused(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_unfocused(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    // Selected row in a focused list
    pub fn selection(&self) -> Style {
        Style::default()
            .fg(self.palette.selection_fg)
            .bg(self.palette.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    // Log lines that start with '$'
    pub fn output_command(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn output_text(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    // Key hint style (the key part like "Tab")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_message(&self) -> Style {
        Style::default().fg(self.palette.accent_warning)
    }

    // Value next to a control; recording is flagged in red
    pub fn control_value(&self, value: &str) -> Style {
        match value {
            "on" | "recorded" => Style::default().fg(self.palette.accent_success),
            "recording" => Style::default()
                .fg(self.palette.accent_danger)
                .add_modifier(Modifier::BOLD),
            "off" | "empty" => Style::default().fg(self.palette.text_muted),
            _ => Style::default().fg(self.palette.text_secondary),
        }
    }

    // Panel title with optional focus indicator
    pub fn panel_title(&self, title: &str, focused: bool) -> Line<'_> {
        if focused {
            Line::styled(format!(" {} ", title), self.title_focused())
        } else {
            Line::styled(format!(" {} ", title), self.title_unfocused())
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::new)
}
