use crossterm::event::{KeyCode, KeyEvent};

use crate::io::KeyValueStore;
use crate::ops::ConfirmAction;
use crate::tui::app::{App, Mode, Selection};

/// Put a destructive action in front of the user. Nothing changes until
/// they answer yes.
pub(super) fn request_confirm<S: KeyValueStore>(app: &mut App<S>, action: ConfirmAction) {
    match app.workspace.request(action) {
        Ok(pending) => {
            app.confirm = Some(pending);
            app.mode = Mode::Confirm;
        }
        Err(e) => {
            app.report::<()>(Err(e));
        }
    }
}

pub(super) fn handle_confirm<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    let approved = match key.code {
        KeyCode::Char('y') | KeyCode::Enter => true,
        KeyCode::Char('n') | KeyCode::Esc => false,
        _ => return,
    };
    app.mode = Mode::Navigate;
    let Some(pending) = app.confirm.take() else {
        return;
    };
    let action = pending.action.clone();
    let result = app.workspace.resolve(pending, approved);
    if !app.report(result) || !approved {
        return;
    }
    app.status_message = Some(
        match action {
            ConfirmAction::DeleteCard(_) => "card deleted",
            ConfirmAction::DeleteColumn(_) => "column deleted",
            ConfirmAction::ResetBoard => {
                app.selection = Selection::default();
                app.column_offset = 0;
                "board reset"
            }
        }
        .to_string(),
    );
    app.clamp_selection();
}
