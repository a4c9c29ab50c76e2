use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::config_io::{read_config, resolve_data_dir};
use crate::io::log::init_logging;
use crate::io::{FileStore, KeyValueStore, ModelStore};
use crate::model::{LanesConfig, ThemePreference};
use crate::ops::{BoardError, PendingConfirm, Workspace};
use crate::visual::ElementId;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Editing a card or column title in place
    Edit,
    /// Typing into the input line (new card or column)
    Input,
    /// Waiting for a yes/no answer to a destructive action
    Confirm,
}

/// What the input line will create when submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Card { column_id: String },
    Column,
}

/// Keyboard selection: a column, and optionally a card inside it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub column: usize,
    pub card: Option<usize>,
}

/// A left-button press on a card that has not travelled far enough to be a
/// drag yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPress {
    pub card: ElementId,
    pub x: u16,
    pub y: u16,
}

/// Something clickable drawn during the last frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Card(ElementId),
    DeleteCard(ElementId),
    ColumnHeader(String),
    DeleteColumn(String),
    AddCard(String),
    AddColumn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub target: HitTarget,
}

/// Main application state
pub struct App<S = FileStore> {
    pub workspace: Workspace<S>,
    pub config: LanesConfig,
    pub theme_pref: ThemePreference,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    pub selection: Selection,
    /// First column drawn at the left edge
    pub column_offset: usize,
    pub pending_press: Option<PendingPress>,
    pub input_kind: Option<InputKind>,
    /// Text being edited (in-place edit or input line)
    pub edit_buffer: String,
    /// Byte offset of the cursor in `edit_buffer`
    pub edit_cursor: usize,
    pub confirm: Option<PendingConfirm>,
    pub status_message: Option<String>,
    /// Clickable areas, rebuilt on every draw. Earlier entries win.
    pub hit_regions: Vec<HitRegion>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(workspace: Workspace<S>, config: LanesConfig, theme_pref: ThemePreference) -> Self {
        let theme = Theme::from_config(theme_pref, &config.ui);
        App {
            workspace,
            config,
            theme_pref,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            selection: Selection::default(),
            column_offset: 0,
            pending_press: None,
            input_kind: None,
            edit_buffer: String::new(),
            edit_cursor: 0,
            confirm: None,
            status_message: None,
            hit_regions: Vec::new(),
        }
    }

    /// The card under the selection, if any
    pub fn selected_card(&self) -> Option<ElementId> {
        let column = self.workspace.tree().columns.get(self.selection.column)?;
        column.cards.get(self.selection.card?).map(|c| c.id)
    }

    /// Id of the selected column, if the board has any columns
    pub fn selected_column_id(&self) -> Option<String> {
        self.workspace
            .tree()
            .columns
            .get(self.selection.column)
            .map(|c| c.id.clone())
    }

    /// Pull the selection back inside the board after its shape changed.
    pub fn clamp_selection(&mut self) {
        let counts = self.workspace.tree().card_counts();
        if counts.is_empty() {
            self.selection = Selection::default();
            return;
        }
        self.selection.column = self.selection.column.min(counts.len() - 1);
        let len = counts[self.selection.column];
        self.selection.card = match (self.selection.card, len) {
            (_, 0) => None,
            (Some(i), _) => Some(i.min(len - 1)),
            (None, _) => None,
        };
    }

    /// Point the selection at `card`, wherever it now lives.
    pub fn select_card(&mut self, card: ElementId) {
        if let Some((column, index)) = self.workspace.tree().locate(card) {
            self.selection = Selection {
                column,
                card: Some(index),
            };
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_pref = self.theme_pref.toggled();
        self.theme = Theme::from_config(self.theme_pref, &self.config.ui);
        let saved = self.workspace.save_theme(self.theme_pref);
        self.report(saved);
        self.status_message = Some(format!("{} theme", self.theme_pref));
    }

    /// Surface an operation failure in the status row. Returns whether the
    /// operation succeeded.
    pub fn report<T>(&mut self, result: Result<T, BoardError>) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "board operation failed");
                self.status_message = Some(format!("error: {}", e));
                false
            }
        }
    }

    /// First hit region containing the cell at (`x`, `y`)
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&HitTarget> {
        self.hit_regions
            .iter()
            .find(|r| {
                x >= r.area.x
                    && x < r.area.x.saturating_add(r.area.width)
                    && y >= r.area.y
                    && y < r.area.y.saturating_add(r.area.height)
            })
            .map(|r| &r.target)
    }
}

/// Run the TUI application
pub fn run(data_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = resolve_data_dir(data_dir);
    let store = FileStore::open(&data_dir)?;
    init_logging(&data_dir)?;
    tracing::info!(dir = %store.dir().display(), "starting");

    let config = read_config(&data_dir)?;
    let workspace = Workspace::open(ModelStore::new(store))?;
    let theme_pref = workspace.load_theme()?.unwrap_or_default();

    let mut app = App::new(workspace, config, theme_pref);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::FocusLost => input::handle_focus_lost(app),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    if app.workspace.drag().is_active() {
        app.workspace.cancel_drag();
    }
    Ok(())
}
