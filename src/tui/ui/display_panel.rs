use ratatui::prelude::*;
use ratatui::widgets::*;
use sherman_core::display::{Cell, OLED_COLS, OLED_LINES};

use crate::tui::app::App;
use crate::tui::theme::{theme, Theme};

// panel width plus borders
const PREVIEW_WIDTH: u16 = OLED_COLS as u16 + 2;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PREVIEW_WIDTH), Constraint::Min(20)])
        .split(area);

    render_preview(frame, app, chunks[0]);
    render_summary(frame, app, chunks[1]);
}

fn cell_span(cell: Cell, t: &Theme) -> Span<'static> {
    if cell.raw {
        Span::styled("█", t.oled_cell(false))
    } else {
        Span::styled(cell.ch.to_string(), t.oled_cell(cell.inverted))
    }
}

fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("OLED", false))
        .borders(Borders::ALL)
        .border_style(t.panel_border(false));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = (0..OLED_LINES)
        .map(|line| {
            Line::from(
                app.screen
                    .row(line)
                    .iter()
                    .map(|cell| cell_span(*cell, t))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("HOST", false))
        .borders(Borders::ALL)
        .border_style(t.panel_border(false));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let host = &app.host;
    let lines = vec![
        Line::from(vec![
            Span::styled("Mods: ", t.text_muted()),
            Span::styled(host.mods.to_string(), t.text_primary()),
            Span::styled("  One-shot: ", t.text_muted()),
            Span::styled(host.oneshot_mods.to_string(), t.text_primary()),
        ]),
        Line::from(vec![
            Span::styled("Layers: ", t.text_muted()),
            Span::styled(host.layers.to_string(), t.text_primary()),
            Span::styled("  WPM: ", t.text_muted()),
            Span::styled(host.wpm.to_string(), t.text_primary()),
        ]),
        Line::from(vec![
            Span::styled("RGB: ", t.text_muted()),
            Span::styled(
                format!(
                    "{} ({})",
                    app.rgb.mode,
                    if app.rgb.enabled { "on" } else { "off" }
                ),
                t.checkbox(app.rgb.enabled),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
