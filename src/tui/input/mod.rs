mod confirm;
mod edit;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};

use crate::io::KeyValueStore;

use super::app::{App, Mode};

// Submodules reach each other's handlers through `use super::*;`
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use mouse::*;
#[allow(unused_imports)]
use navigate::*;

/// Handle a key event in the current mode
pub fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit | Mode::Input => handle_edit(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

/// Handle a mouse event against the regions drawn in the last frame
pub fn handle_mouse<S: KeyValueStore>(app: &mut App<S>, mouse: MouseEvent) {
    handle_mouse_event(app, mouse);
}

/// The terminal lost focus: abandon any gesture in progress.
pub fn handle_focus_lost<S: KeyValueStore>(app: &mut App<S>) {
    app.pending_press = None;
    cancel_drag(app);
}

/// Handle a bracketed paste. Only active while typing. Line breaks survive
/// in a card edit and become spaces everywhere else.
pub fn handle_paste<S: KeyValueStore>(app: &mut App<S>, text: &str) {
    if !matches!(app.mode, Mode::Edit | Mode::Input) || text.is_empty() {
        return;
    }
    let clean = if editing_card(app) {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.replace(['\r', '\n'], " ")
    };
    app.edit_buffer.insert_str(app.edit_cursor, &clean);
    app.edit_cursor += clean.len();
    sync_edit(app);
}
