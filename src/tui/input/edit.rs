use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::KeyValueStore;
use crate::ops::EditTarget;
use crate::tui::app::{App, InputKind, Mode, Selection};
use crate::util::unicode;
use crate::visual::ElementId;

/// Start editing a card's text in place.
pub(super) fn begin_card_edit<S: KeyValueStore>(app: &mut App<S>, card: ElementId) {
    let Some(text) = app.workspace.tree().card(card).map(|c| c.text.clone()) else {
        return;
    };
    let result = app.workspace.begin_edit(EditTarget::Card(card));
    if app.report(result) {
        start_buffer(app, text, Mode::Edit);
    }
}

/// Start renaming the selected column in place.
pub(super) fn begin_title_edit<S: KeyValueStore>(app: &mut App<S>) {
    let Some(id) = app.selected_column_id() else {
        return;
    };
    let title = app
        .workspace
        .tree()
        .column(&id)
        .map(|c| c.title.clone())
        .unwrap_or_default();
    let result = app.workspace.begin_edit(EditTarget::ColumnTitle(id));
    if app.report(result) {
        start_buffer(app, title, Mode::Edit);
    }
}

/// Open the input line for a new card or column.
pub(super) fn open_input<S: KeyValueStore>(app: &mut App<S>, kind: InputKind) {
    if app.workspace.drag().is_active() {
        return;
    }
    app.input_kind = Some(kind);
    start_buffer(app, String::new(), Mode::Input);
}

fn start_buffer<S: KeyValueStore>(app: &mut App<S>, text: String, mode: Mode) {
    app.edit_cursor = text.len();
    app.edit_buffer = text;
    app.mode = mode;
    app.status_message = None;
}

fn close_buffer<S: KeyValueStore>(app: &mut App<S>) {
    app.edit_buffer.clear();
    app.edit_cursor = 0;
    app.input_kind = None;
    app.mode = Mode::Navigate;
}

/// Mirror the buffer into the element being edited so the board shows the
/// live text.
pub(super) fn sync_edit<S: KeyValueStore>(app: &mut App<S>) {
    if app.mode == Mode::Edit {
        let result = app.workspace.update_edit(&app.edit_buffer);
        app.report(result);
    }
}

/// Enter: save an in-place edit, or submit the input line.
pub(super) fn submit_edit<S: KeyValueStore>(app: &mut App<S>) {
    match app.mode {
        Mode::Edit => {
            let result = app.workspace.finish_edit();
            app.report(result);
            close_buffer(app);
        }
        Mode::Input => match app.input_kind.clone() {
            Some(InputKind::Card { column_id }) => {
                let result = app.workspace.add_card(&column_id, &app.edit_buffer);
                if let Ok(true) = result {
                    let column = app.workspace.tree().column_index(&column_id);
                    let count = column.map_or(0, |i| app.workspace.tree().columns[i].cards.len());
                    if let Some(column) = column {
                        app.selection = Selection {
                            column,
                            card: count.checked_sub(1),
                        };
                    }
                }
                app.report(result);
                // Stay open for the next card
                app.edit_buffer.clear();
                app.edit_cursor = 0;
            }
            Some(InputKind::Column) | None => {
                let result = app.workspace.add_column(&app.edit_buffer);
                if let Ok(Some(id)) = &result
                    && let Some(column) = app.workspace.tree().column_index(id)
                {
                    app.selection = Selection { column, card: None };
                }
                app.report(result);
                close_buffer(app);
            }
        },
        Mode::Navigate | Mode::Confirm => {}
    }
}

/// Esc: revert an in-place edit, or close the input line.
pub(super) fn cancel_edit<S: KeyValueStore>(app: &mut App<S>) {
    if app.mode == Mode::Edit {
        app.workspace.cancel_edit();
    }
    close_buffer(app);
}

/// Whether the buffer belongs to an in-place card edit. Card text may span
/// lines; titles and the input line may not.
pub(super) fn editing_card<S: KeyValueStore>(app: &App<S>) -> bool {
    app.mode == Mode::Edit
        && matches!(
            app.workspace.editing().map(|e| &e.target),
            Some(EditTarget::Card(_))
        )
}

/// Text editing shared by in-place edits and the input line. Shift+Enter
/// breaks the line inside a card.
pub(super) fn handle_edit<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    let mut changed = false;
    match (key.modifiers, key.code) {
        (m, KeyCode::Enter) if m.contains(KeyModifiers::SHIFT) && editing_card(app) => {
            app.edit_buffer.insert(app.edit_cursor, '\n');
            app.edit_cursor += 1;
            changed = true;
        }
        (_, KeyCode::Enter) => {
            submit_edit(app);
            return;
        }
        (_, KeyCode::Esc) => {
            cancel_edit(app);
            return;
        }
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_cursor = 0;
        }
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_cursor = app.edit_buffer.len();
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.drain(..app.edit_cursor);
            app.edit_cursor = 0;
            changed = true;
        }
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            let start = unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor);
            app.edit_buffer.drain(start..app.edit_cursor);
            app.edit_cursor = start;
            changed = true;
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = next;
            }
        }
        (_, KeyCode::Home) => app.edit_cursor = 0,
        (_, KeyCode::End) => app.edit_cursor = app.edit_buffer.len(),
        (m, KeyCode::Backspace) if m.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) => {
            let start = unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor);
            app.edit_buffer.drain(start..app.edit_cursor);
            app.edit_cursor = start;
            changed = true;
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_buffer.drain(prev..app.edit_cursor);
                app.edit_cursor = prev;
                changed = true;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_buffer.drain(app.edit_cursor..next);
                changed = true;
            }
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.edit_buffer.insert(app.edit_cursor, c);
            app.edit_cursor += c.len_utf8();
            changed = true;
        }
        _ => {}
    }
    if changed {
        sync_edit(app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn key(app: &mut App<crate::io::MemoryStore>, modifiers: KeyModifiers, code: KeyCode) {
        handle_edit(app, KeyEvent::new(code, modifiers));
    }

    #[test]
    fn cursor_moves_by_grapheme() {
        let mut app = seeded_app();
        open_input(&mut app, InputKind::Column);
        for c in "ab🚀".chars() {
            key(&mut app, KeyModifiers::NONE, KeyCode::Char(c));
        }
        key(&mut app, KeyModifiers::NONE, KeyCode::Left);
        assert_eq!(app.edit_cursor, 2);
        key(&mut app, KeyModifiers::NONE, KeyCode::Delete);
        assert_eq!(app.edit_buffer, "ab");
        key(&mut app, KeyModifiers::NONE, KeyCode::Home);
        key(&mut app, KeyModifiers::SHIFT, KeyCode::Char('X'));
        assert_eq!(app.edit_buffer, "Xab");
    }

    #[test]
    fn word_and_line_deletion() {
        let mut app = seeded_app();
        open_input(&mut app, InputKind::Column);
        app.edit_buffer = "plan the launch".into();
        app.edit_cursor = app.edit_buffer.len();
        key(&mut app, KeyModifiers::CONTROL, KeyCode::Char('w'));
        assert_eq!(app.edit_buffer, "plan the ");
        key(&mut app, KeyModifiers::ALT, KeyCode::Backspace);
        assert_eq!(app.edit_buffer, "plan ");
        key(&mut app, KeyModifiers::CONTROL, KeyCode::Char('u'));
        assert_eq!(app.edit_buffer, "");
    }

    #[test]
    fn title_edit_is_live() {
        let mut app = seeded_app();
        app.selection.column = 2;
        begin_title_edit(&mut app);
        key(&mut app, KeyModifiers::CONTROL, KeyCode::Char('u'));
        for c in "Shipped".chars() {
            key(&mut app, KeyModifiers::NONE, KeyCode::Char(c));
        }
        assert_eq!(app.workspace.tree().columns[2].title, "Shipped");
        key(&mut app, KeyModifiers::NONE, KeyCode::Enter);
        assert_eq!(app.workspace.board().columns[2].title, "Shipped");
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn shift_enter_breaks_card_line() {
        let mut app = seeded_app();
        let card = app.workspace.tree().columns[2].cards[0].id;
        begin_card_edit(&mut app, card);
        key(&mut app, KeyModifiers::SHIFT, KeyCode::Enter);
        for c in "today".chars() {
            key(&mut app, KeyModifiers::NONE, KeyCode::Char(c));
        }
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.workspace.tree().card(card).unwrap().text, "Setup server\ntoday");
        key(&mut app, KeyModifiers::NONE, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.workspace.board().columns[2].cards[0], "Setup server\ntoday");
    }

    #[test]
    fn shift_enter_finishes_title_edit() {
        let mut app = seeded_app();
        app.selection.column = 1;
        begin_title_edit(&mut app);
        key(&mut app, KeyModifiers::SHIFT, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.workspace.board().columns[1].title, "In Progress");
    }
}
