use crossterm::event::{KeyCode, KeyEvent};

use crate::io::KeyValueStore;
use crate::ops::ConfirmAction;
use crate::tui::app::{App, InputKind};

use super::*;

pub(super) fn handle_navigate<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if !cancel_drag(app) {
                app.status_message = None;
            }
        }
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Left => move_selection(app, -1, 0),
        KeyCode::Right => move_selection(app, 1, 0),
        KeyCode::Up => move_selection(app, 0, -1),
        KeyCode::Down => move_selection(app, 0, 1),

        KeyCode::Char('e') | KeyCode::Enter => match app.selected_card() {
            Some(card) => begin_card_edit(app, card),
            None if key.code == KeyCode::Enter => begin_title_edit(app),
            None => {}
        },
        KeyCode::Char('r') => begin_title_edit(app),
        KeyCode::Char('a') => {
            if let Some(column_id) = app.selected_column_id() {
                open_input(app, InputKind::Card { column_id });
            }
        }
        KeyCode::Char('c') => open_input(app, InputKind::Column),
        KeyCode::Char('d') => {
            if let Some(card) = app.selected_card() {
                request_confirm(app, ConfirmAction::DeleteCard(card));
            }
        }
        KeyCode::Char('D') => {
            if let Some(id) = app.selected_column_id() {
                request_confirm(app, ConfirmAction::DeleteColumn(id));
            }
        }
        KeyCode::Char('R') => request_confirm(app, ConfirmAction::ResetBoard),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
}

/// Step the selection. Moving up from the first card selects the column
/// header; moving sideways keeps the card row where the column allows.
pub(super) fn move_selection<S: KeyValueStore>(app: &mut App<S>, dx: isize, dy: isize) {
    if app.workspace.drag().is_active() {
        return;
    }
    let counts = app.workspace.tree().card_counts();
    if counts.is_empty() {
        return;
    }
    let sel = &mut app.selection;
    if dx != 0 {
        let last = counts.len() as isize - 1;
        sel.column = (sel.column as isize + dx).clamp(0, last) as usize;
        let len = counts[sel.column];
        sel.card = sel.card.filter(|_| len > 0).map(|i| i.min(len - 1));
    }
    if dy != 0 {
        let len = counts[sel.column];
        sel.card = match sel.card {
            _ if len == 0 => None,
            None if dy > 0 => Some(0),
            None => None,
            Some(0) if dy < 0 => None,
            Some(i) if dy < 0 => Some(i - 1),
            Some(i) => Some((i + 1).min(len - 1)),
        };
    }
}

/// Cancel an active drag, putting the card back. Returns whether a drag
/// was cancelled.
pub(super) fn cancel_drag<S: KeyValueStore>(app: &mut App<S>) -> bool {
    app.pending_press = None;
    let cancelled = app.workspace.cancel_drag();
    if cancelled {
        app.clamp_selection();
        app.status_message = Some("move cancelled".into());
    }
    cancelled
}
