use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let view_label = match app.view() {
        Some(view) => view.to_string().to_uppercase(),
        None => "NOT DRAWN".to_string(),
    };

    let line = Line::from(vec![
        Span::styled("sherman ", t.text_primary().add_modifier(Modifier::BOLD)),
        Span::styled(format!("[{}] ", view_label), t.view_badge(app.view())),
        Span::styled(
            format!("{} / {}", app.layer().human_name(), app.host.os),
            t.text_muted(),
        ),
        Span::raw(" "),
        Span::styled("q:quit", t.key_hint()),
    ]);

    let header = Paragraph::new(line).alignment(Alignment::Left);

    frame.render_widget(header, area);
}
