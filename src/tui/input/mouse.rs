use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::io::KeyValueStore;
use crate::ops::{ConfirmAction, EditTarget};
use crate::tui::app::{App, HitTarget, InputKind, Mode, PendingPress, Selection};

use super::*;

pub(super) fn handle_mouse_event<S: KeyValueStore>(app: &mut App<S>, mouse: MouseEvent) {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => press(app, x, y),
        MouseEventKind::Drag(MouseButton::Left) => drag(app, x, y),
        MouseEventKind::Up(MouseButton::Left) => release(app),
        _ => {}
    }
}

fn press<S: KeyValueStore>(app: &mut App<S>, x: u16, y: u16) {
    if app.mode == Mode::Confirm {
        return;
    }
    let target = app.hit_test(x, y).cloned();

    // Clicking away from the edited element finishes the edit
    match app.mode {
        Mode::Edit if !is_edit_target(app, target.as_ref()) => submit_edit(app),
        Mode::Edit => return,
        Mode::Input => cancel_edit(app),
        Mode::Navigate | Mode::Confirm => {}
    }

    let Some(target) = target else {
        return;
    };
    match target {
        HitTarget::Card(card) => {
            app.select_card(card);
            app.pending_press = Some(PendingPress { card, x, y });
        }
        HitTarget::DeleteCard(card) => request_confirm(app, ConfirmAction::DeleteCard(card)),
        HitTarget::ColumnHeader(id) => select_column(app, &id),
        HitTarget::DeleteColumn(id) => request_confirm(app, ConfirmAction::DeleteColumn(id)),
        HitTarget::AddCard(id) => {
            select_column(app, &id);
            open_input(app, InputKind::Card { column_id: id });
        }
        HitTarget::AddColumn => open_input(app, InputKind::Column),
    }
}

fn drag<S: KeyValueStore>(app: &mut App<S>, x: u16, y: u16) {
    if !app.workspace.drag().is_active() {
        let Some(press) = app.pending_press else {
            return;
        };
        let travel = x.abs_diff(press.x).max(y.abs_diff(press.y));
        if travel < app.config.drag.threshold {
            return;
        }
        let started = app.workspace.begin_drag(press.card);
        if !app.report(started) {
            app.pending_press = None;
            return;
        }
    }
    // The first move past the threshold also marks the card in flight.
    // Resolve against the middle of the pointer's cell
    app.workspace.drag_moved(x as f64 + 0.5, y as f64 + 0.5);
    if let Some(card) = app.workspace.drag().dragged() {
        app.select_card(card);
    }
}

fn release<S: KeyValueStore>(app: &mut App<S>) {
    app.pending_press = None;
    let Some(card) = app.workspace.drag().dragged() else {
        return;
    };
    let result = app.workspace.end_drag();
    if app.report(result) {
        app.select_card(card);
    }
}

fn select_column<S: KeyValueStore>(app: &mut App<S>, id: &str) {
    if let Some(column) = app.workspace.tree().column_index(id) {
        app.selection = Selection { column, card: None };
    }
}

fn is_edit_target<S: KeyValueStore>(app: &App<S>, target: Option<&HitTarget>) -> bool {
    let Some(edit) = app.workspace.editing() else {
        return false;
    };
    match (&edit.target, target) {
        (EditTarget::Card(a), Some(HitTarget::Card(b))) => a == b,
        (EditTarget::ColumnTitle(a), Some(HitTarget::ColumnHeader(b))) => a == b,
        _ => false,
    }
}
