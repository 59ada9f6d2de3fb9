use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Pane};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Output;

    let block = Block::default()
        .title(t.panel_title("EVENTS", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.output.is_empty() {
        let empty = Paragraph::new(Line::styled("No events yet.", t.text_muted()));
        frame.render_widget(empty, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let total_lines = app.output.len();

    // scroll points at the last line to show
    let end = (app.output_scroll + 1).min(total_lines);
    let start = end.saturating_sub(visible_height);

    let lines: Vec<Line> = app.output[start..end]
        .iter()
        .map(|l| {
            if l.starts_with('$') {
                Line::styled(l.clone(), t.output_command())
            } else {
                Line::styled(l.clone(), t.output_text())
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
