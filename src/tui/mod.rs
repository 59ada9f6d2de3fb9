mod app;
mod handlers;
mod theme;
mod ui;

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use sherman_core::config::Config;

use app::App;
use handlers::handle_input;
use ui::draw_ui;

/// Firmware display ticks are driven by the input poll
const TICK: Duration = Duration::from_millis(200);
/// Event log lines echoed to the terminal on exit
const SUMMARY_EVENTS: usize = 12;

type Term = Terminal<CrosstermBackend<Stdout>>;

fn enter_preview() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn leave_preview(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn preview_loop(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    loop {
        app.refresh_display();
        terminal.draw(|f| draw_ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if handle_input(app, key.code)? {
            return Ok(());
        }
    }
}

pub fn run(config: &Config) -> io::Result<()> {
    let mut app = App::new(config);

    let mut terminal = enter_preview()?;
    let result = preview_loop(&mut terminal, &mut app);
    leave_preview(&mut terminal)?;
    result?;

    // the alternate screen is gone, leave the last frame in scrollback
    let mut stdout = io::stdout().lock();
    stdout.write_all(app.session_summary(SUMMARY_EVENTS).as_bytes())?;
    stdout.flush()
}
