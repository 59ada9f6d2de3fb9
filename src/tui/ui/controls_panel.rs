use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Pane};
use crate::tui::theme::theme;

const LABEL_WIDTH: usize = 18;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Controls;

    let block = Block::default()
        .title(t.panel_title("CONTROLS", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // keep the selection in view
    let visible = inner.height as usize;
    let start = if visible == 0 {
        0
    } else {
        app.control_index.saturating_sub(visible.saturating_sub(1))
    };

    let lines: Vec<Line> = app
        .controls
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(i, control)| {
            let label = format!("{:<width$}", App::control_label(*control), width = LABEL_WIDTH);
            let value = app.control_value(*control);
            let label_style = if focused && i == app.control_index {
                t.selection()
            } else {
                t.text_secondary()
            };
            Line::from(vec![
                Span::styled(label, label_style),
                Span::raw(" "),
                Span::styled(value.clone(), t.control_value(&value)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
