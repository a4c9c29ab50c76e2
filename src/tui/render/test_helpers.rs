use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::{KeyValueStore, MemoryStore, ModelStore};
use crate::model::{Board, LanesConfig, ThemePreference};
use crate::ops::Workspace;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over an in-memory store holding `board`.
pub fn app_with_board(board: Board) -> App<MemoryStore> {
    let mut store = ModelStore::new(MemoryStore::new());
    store.save(&board).unwrap();
    let workspace = Workspace::open(store).unwrap();
    App::new(workspace, LanesConfig::default(), ThemePreference::Dark)
}

/// An App over an empty in-memory store, showing the default seed.
pub fn seeded_app() -> App<MemoryStore> {
    let workspace = Workspace::open(ModelStore::new(MemoryStore::new())).unwrap();
    App::new(workspace, LanesConfig::default(), ThemePreference::Dark)
}

/// Render a full frame once so the tree has bounds and hit regions.
pub fn draw<S: KeyValueStore>(app: &mut App<S>, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}
