use crate::app::App;
use crate::domain::{MentalState, UiMode};
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// Handle a key press. Returns true when the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.ui_mode() {
        UiMode::Setup => handle_setup_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::Journey => handle_journey_mode(app, key),
        UiMode::ConfirmStart => handle_confirm_start_mode(app, key),
        UiMode::ActiveSlot => handle_active_slot_mode(app, key),
        UiMode::ConfirmExit => handle_confirm_exit_mode(app, key),
    }
}

/// Handle keys while gathering the task pool
fn handle_setup_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up => app.move_pool_cursor_up(),
        KeyCode::Down => app.move_pool_cursor_down(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.remove_task_at_cursor(),
        KeyCode::Enter => app.begin_journey(),
        KeyCode::Char('D') => app.seed_demo(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

/// Handle keys in the add-task form
fn handle_input_form_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab => app.form_next_field(),
        KeyCode::Left => app.form_cycle_category(false),
        KeyCode::Right => app.form_cycle_category(true),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_add_char(c),
        _ => {}
    }
    false
}

/// Handle keys while choosing a mode and a task
fn handle_journey_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('1') => app.select_mode(MentalState::Soft),
        KeyCode::Char('2') => app.select_mode(MentalState::Focus),
        KeyCode::Char('3') => app.select_mode(MentalState::Sprint),
        KeyCode::Up => app.select_adjacent_task(false),
        KeyCode::Down => app.select_adjacent_task(true),
        KeyCode::Enter => app.request_start(),

        // Navigation
        KeyCode::Char('n') | KeyCode::Char('N') => app.next_day(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.advance_chapter(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.adjust_task_pool(),
        KeyCode::Char('D') => app.seed_demo(),

        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => app.dismiss_reflection(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

/// Handle keys in the "ready to begin?" prompt
fn handle_confirm_start_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.confirm_start(Instant::now())
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.decline_start(),
        _ => {}
    }
    false
}

/// Handle keys while a slot is running
fn handle_active_slot_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => {
            if app.time_expired() {
                app.complete_slot(true);
            } else {
                app.request_exit();
            }
        }
        KeyCode::Char('h') | KeyCode::Char('H') => app.dismiss_drift(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

/// Handle keys in the "shall we stay?" prompt
fn handle_confirm_exit_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Esc => app.stay(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.complete_slot(false),
        KeyCode::Char('h') | KeyCode::Char('H') => app.dismiss_drift(),
        _ => {}
    }
    false
}
