//! Key binding dispatch for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{Focus, TuiApp};

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut TuiApp, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Global bindings
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.next();
            return;
        }
        _ => {}
    }

    // Pane-specific bindings
    match app.focus {
        Focus::Workflows => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.move_down(),
            KeyCode::Char('k') | KeyCode::Up => app.move_up(),
            KeyCode::Enter => app.run_selected(),
            KeyCode::Char('e') => app.edit_selected(),
            KeyCode::Char('n') => app.new_workflow(),
            KeyCode::Char('r') => app.reload(),
            _ => {}
        },
        Focus::Generate => match key.code {
            KeyCode::Enter => app.generate(),
            KeyCode::F(2) => app.controller.cycle_model(),
            KeyCode::Left => app.controller.form_mut().temperature.step_down(),
            KeyCode::Right => app.controller.form_mut().temperature.step_up(),
            KeyCode::Backspace => {
                app.controller.form_mut().prompt.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.controller.form_mut().prompt.push(c);
            }
            _ => {}
        },
    }
}
