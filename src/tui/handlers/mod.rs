use std::io;

use crossterm::event::KeyCode;

use crate::tui::app::{App, Pane};

/// Handle input and return true if the app should quit
pub fn handle_input(app: &mut App, key: KeyCode) -> io::Result<bool> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Tab | KeyCode::BackTab => {
            app.cycle_pane();
            return Ok(false);
        }
        KeyCode::Char('1') => {
            app.focused_pane = Pane::Controls;
            return Ok(false);
        }
        KeyCode::Char('2') => {
            app.focused_pane = Pane::Output;
            return Ok(false);
        }
        _ => {}
    }

    match app.focused_pane {
        Pane::Controls => handle_controls_input(app, key),
        Pane::Output => handle_output_input(app, key),
    }

    Ok(false)
}

fn handle_controls_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.control_index = app.control_index.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.control_index + 1 < app.controls.len() {
                app.control_index += 1;
            }
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.adjust_selected(-1),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => app.adjust_selected(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(),
        _ => {}
    }
}

fn handle_output_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.output_scroll = app.output_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.output_scroll + 1 < app.output.len() {
                app.output_scroll += 1;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sherman_core::config::Config;

    #[test]
    fn test_quit_and_pane_keys() {
        let mut app = App::new(&Config::new());
        assert!(handle_input(&mut app, KeyCode::Char('q')).unwrap());
        assert!(!handle_input(&mut app, KeyCode::Tab).unwrap());
        assert_eq!(app.focused_pane, Pane::Output);
        assert!(!handle_input(&mut app, KeyCode::Char('1')).unwrap());
        assert_eq!(app.focused_pane, Pane::Controls);
    }

    #[test]
    fn test_enter_toggles_selected_control() {
        let mut app = App::new(&Config::new());
        // first row is caps lock
        handle_input(&mut app, KeyCode::Enter).unwrap();
        assert!(app.host.leds.caps_lock);
        handle_input(&mut app, KeyCode::Up).unwrap();
        assert_eq!(app.control_index, 0);
        handle_input(&mut app, KeyCode::Down).unwrap();
        assert_eq!(app.control_index, 1);
    }
}
