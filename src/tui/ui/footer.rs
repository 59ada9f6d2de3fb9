use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Control, Pane};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let line1 = match (app.focused_pane, app.selected_control()) {
        (Pane::Controls, Some(control)) => {
            let hint = match control {
                Control::Os | Control::Layer | Control::Wpm => " to step, left/right to cycle",
                Control::Macro(_) => " to start or stop recording",
                Control::ResetMacros | Control::Redraw => " to run",
                _ => " to toggle",
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ~ ", App::control_label(control)),
                    t.text_primary().add_modifier(Modifier::BOLD),
                ),
                Span::styled("Enter", t.key_hint()),
                Span::styled(hint, t.text_muted()),
                Span::styled("  Status: ", t.text_muted()),
                Span::styled(app.status.clone(), t.status_message()),
            ])
        }
        (Pane::Output, _) => {
            Line::styled(format!("Event log ~ {} lines", app.output.len()), t.text_muted())
        }
        _ => Line::styled(format!("Status: {}", app.status), t.status_message()),
    };

    let pane_style = |pane: Pane| {
        if app.focused_pane == pane {
            t.key_hint()
        } else {
            t.text_muted()
        }
    };

    let line2 = Line::from(vec![
        Span::styled("Tab", t.key_hint()),
        Span::styled(":", t.text_muted()),
        Span::styled("1-Controls", pane_style(Pane::Controls)),
        Span::styled(" ", t.text_muted()),
        Span::styled("2-Events", pane_style(Pane::Output)),
        Span::styled("  ", t.text_muted()),
        Span::styled("arrows", t.key_hint()),
        Span::styled(":navigate  ", t.text_muted()),
        Span::styled("Enter", t.key_hint()),
        Span::styled(":toggle  ", t.text_muted()),
        Span::styled("q", t.key_hint()),
        Span::styled(":quit", t.text_muted()),
    ]);

    let footer = Paragraph::new(vec![line1, line2]);
    frame.render_widget(footer, area);
}
