mod controls_panel;
mod display_panel;
mod footer;
mod header;
mod output_panel;

use ratatui::prelude::*;

use crate::tui::app::App;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Length(6),  // Panel preview + host summary
            Constraint::Min(8),     // Controls
            Constraint::Length(10), // Event log
            Constraint::Length(2),  // Footer
        ])
        .split(frame.area());

    header::render(frame, app, root[0]);
    display_panel::render(frame, app, root[1]);
    controls_panel::render(frame, app, root[2]);
    output_panel::render(frame, app, root[3]);
    footer::render(frame, app, root[4]);
}
