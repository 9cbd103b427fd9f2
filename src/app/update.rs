use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, Focus, PendingAction};
use crate::ui;

/// Draw, run at most one queued action, otherwise wait for a key.
///
/// Actions run after a draw so the busy state is visible while the blocking
/// request is in flight.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if let Some(action) = app.pending.pop_front() {
            app.perform(action);
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) {
                    break;
                }
            }
        }
    }
    tracing::info!("exiting");
    Ok(())
}

/// Apply one key press. Returns `true` when the application should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return false;
    }
    match app.focus {
        Focus::Form => {
            handle_form_key(app, key);
            false
        }
        Focus::List => handle_list_key(app, key),
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            if app.is_busy() {
                tracing::debug!("submit ignored: busy");
            } else {
                app.pending.push_back(PendingAction::Submit);
            }
        }
        KeyCode::Esc => {
            if app.view().is_editing() {
                app.controller.exit_edit_mode();
            } else {
                app.focus = Focus::List;
            }
        }
        KeyCode::Tab => app.focus = Focus::List,
        KeyCode::Up | KeyCode::Down | KeyCode::BackTab => {
            app.controller.state_mut().form.toggle_field();
        }
        KeyCode::Backspace => app.controller.state_mut().form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.controller.state_mut().form.push_char(c);
        }
        _ => {}
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> bool {
    let Some(action) = app.keymap.resolve(&key) else {
        return false;
    };
    match action {
        KeyAction::Quit => return true,
        KeyAction::OpenHelp => app.show_help = true,
        KeyAction::NewUser => {
            app.controller.exit_edit_mode();
            app.focus = Focus::Form;
        }
        KeyAction::EditSelection => {
            if let Some(user) = app.selected_user().cloned() {
                app.controller.enter_edit_mode(user);
                app.focus = Focus::Form;
            }
        }
        KeyAction::DeleteSelection => {
            if let Some(user) = app.selected_user() {
                let id = user.id.clone();
                app.pending.push_back(PendingAction::Delete(id));
            }
        }
        KeyAction::Reload => app.pending.push_back(PendingAction::LoadCollection),
        KeyAction::FocusForm => app.focus = Focus::Form,
        KeyAction::MoveUp => {
            app.selected_index = app.selected_index.saturating_sub(1);
        }
        KeyAction::MoveDown => {
            if app.selected_index + 1 < app.view().users.len() {
                app.selected_index += 1;
            }
        }
        KeyAction::Ignore => {}
    }
    false
}
