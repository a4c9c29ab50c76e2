use crate::io::{KeyValueStore, ModelStore};
use crate::model::{Board, ThemePreference};
use crate::visual::{ElementId, VisualTree};

use super::board_ops::{self, ColumnIdGenerator, ConfirmAction, EditSession, EditTarget};
use super::drag::DragSession;
use super::reconcile;
use super::{BoardError, PendingConfirm};

/// The single owner of board state for a running session.
///
/// Holds the canonical [`Board`], the visual tree the user manipulates, the
/// drag and edit sessions, and the durable store. The canonical board is
/// only ever replaced by [`Workspace::commit`] (a reconciliation of the
/// visual tree) or by loading/resetting through the store.
#[derive(Debug)]
pub struct Workspace<S> {
    board: Board,
    tree: VisualTree,
    drag: DragSession,
    edit: Option<EditSession>,
    store: ModelStore<S>,
    ids: ColumnIdGenerator,
}

impl<S: KeyValueStore> Workspace<S> {
    /// Load the board from `store` (or the default seed) and render it.
    pub fn open(store: ModelStore<S>) -> Result<Self, BoardError> {
        let board = store.load()?;
        let tree = VisualTree::render(&board);
        tracing::info!(columns = board.columns.len(), "board loaded");
        Ok(Workspace {
            board,
            tree,
            drag: DragSession::new(),
            edit: None,
            store,
            ids: ColumnIdGenerator::default(),
        })
    }

    /// The last committed board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tree(&self) -> &VisualTree {
        &self.tree
    }

    /// Mutable access for layout passes (bounds only; structure changes
    /// should go through the workspace operations)
    pub fn tree_mut(&mut self) -> &mut VisualTree {
        &mut self.tree
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn store(&self) -> &ModelStore<S> {
        &self.store
    }

    /// Reconcile the visual tree into the canonical board and persist it.
    ///
    /// Refused while a drag is active or an edit is open, since the tree is
    /// not in a settled state then.
    pub fn commit(&mut self) -> Result<(), BoardError> {
        self.ensure_settled()?;
        let board = reconcile::snapshot(&self.tree);
        self.store.save(&board)?;
        self.board = board;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Drag
    // -----------------------------------------------------------------------

    pub fn begin_drag(&mut self, card: ElementId) -> Result<(), BoardError> {
        if self.edit.is_some() {
            return Err(BoardError::GestureInProgress);
        }
        self.drag.begin(&self.tree, card)
    }

    /// Pointer moved during a drag. Applies the in-flight marker on the
    /// first move, then relocates the card if the pointer is over a card
    /// list. Returns whether the visual tree changed.
    pub fn drag_moved(&mut self, x: f64, y: f64) -> bool {
        if !self.drag.is_active() {
            return false;
        }
        self.drag.mark_in_flight(&mut self.tree);
        match self.tree.container_at(x, y) {
            Some(column_idx) => self.drag.drag_over(&mut self.tree, column_idx, y),
            None => false,
        }
    }

    /// Pointer released: commit wherever the card visually landed.
    pub fn end_drag(&mut self) -> Result<(), BoardError> {
        if self.drag.end(&mut self.tree).is_none() {
            return Ok(());
        }
        self.commit()
    }

    /// Gesture cancelled: undo the visual relocation, persist nothing.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel(&mut self.tree).is_some()
    }

    // -----------------------------------------------------------------------
    // Cards and columns
    // -----------------------------------------------------------------------

    /// Append a card. Returns false (and changes nothing) for blank text.
    pub fn add_card(&mut self, column_id: &str, text: &str) -> Result<bool, BoardError> {
        self.ensure_settled()?;
        match board_ops::add_card(&mut self.tree, column_id, text)? {
            Some(_) => {
                self.commit()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append a column with a random palette color. Returns the new id, or
    /// `None` for a blank title.
    pub fn add_column(&mut self, title: &str) -> Result<Option<String>, BoardError> {
        self.ensure_settled()?;
        let color = board_ops::pick_color(&mut rand::rng());
        let now = chrono::Utc::now().timestamp_millis();
        let id = board_ops::add_column(&mut self.tree, &mut self.ids, now, title, color);
        if let Some(id) = &id {
            tracing::info!(column = %id, "column added");
            self.commit()?;
        }
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // In-place editing
    // -----------------------------------------------------------------------

    pub fn begin_edit(&mut self, target: EditTarget) -> Result<(), BoardError> {
        self.ensure_settled()?;
        self.edit = Some(board_ops::begin_edit(&mut self.tree, target)?);
        Ok(())
    }

    /// Write the live text of the open edit into the visual tree.
    pub fn update_edit(&mut self, text: &str) -> Result<(), BoardError> {
        match &self.edit {
            Some(edit) => board_ops::apply_edit(&mut self.tree, edit, text),
            None => Ok(()),
        }
    }

    /// Close the open edit (focus lost) and commit its text.
    pub fn finish_edit(&mut self) -> Result<(), BoardError> {
        match self.edit.take() {
            Some(edit) => {
                board_ops::end_edit(&mut self.tree, &edit);
                self.commit()
            }
            None => Ok(()),
        }
    }

    /// Abandon the open edit, restoring the original text.
    pub fn cancel_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            board_ops::revert_edit(&mut self.tree, &edit);
        }
    }

    // -----------------------------------------------------------------------
    // Confirmation gate
    // -----------------------------------------------------------------------

    /// Ask for a destructive action. Nothing changes until the returned
    /// request is resolved with approval.
    pub fn request(&self, action: ConfirmAction) -> Result<PendingConfirm, BoardError> {
        let prompt = board_ops::confirm_prompt(&self.tree, &action)?;
        Ok(PendingConfirm { action, prompt })
    }

    /// Carry out (`approved`) or drop a pending action. Returns whether
    /// anything changed.
    pub fn resolve(&mut self, pending: PendingConfirm, approved: bool) -> Result<bool, BoardError> {
        if !approved {
            tracing::debug!(action = ?pending.action, "destructive action declined");
            return Ok(false);
        }
        self.ensure_settled()?;
        match pending.action {
            ConfirmAction::DeleteCard(card) => {
                board_ops::delete_card(&mut self.tree, card)?;
                self.commit()?;
            }
            ConfirmAction::DeleteColumn(id) => {
                let removed = board_ops::delete_column(&mut self.tree, &id)?;
                tracing::info!(column = %id, cards = removed.cards.len(), "column deleted");
                self.commit()?;
            }
            ConfirmAction::ResetBoard => {
                self.board = self.store.reset()?;
                self.tree = VisualTree::render(&self.board);
            }
        }
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Theme
    // -----------------------------------------------------------------------

    pub fn load_theme(&self) -> Result<Option<ThemePreference>, BoardError> {
        Ok(self.store.load_theme()?)
    }

    pub fn save_theme(&mut self, theme: ThemePreference) -> Result<(), BoardError> {
        Ok(self.store.save_theme(theme)?)
    }

    fn ensure_settled(&self) -> Result<(), BoardError> {
        if self.drag.is_active() || self.edit.is_some() {
            Err(BoardError::GestureInProgress)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{BOARD_KEY, MemoryStore, StoreError};
    use crate::model::{COLUMN_PALETTE, default_board};
    use crate::visual::{LayoutMetrics, layout};
    use pretty_assertions::assert_eq;

    fn workspace() -> Workspace<MemoryStore> {
        Workspace::open(ModelStore::new(MemoryStore::new())).unwrap()
    }

    fn stored(ws: &Workspace<MemoryStore>) -> Board {
        ws.store().load().unwrap()
    }

    #[test]
    fn open_fresh_store_uses_seed() {
        let ws = workspace();
        assert_eq!(ws.board(), &default_board());
        assert_eq!(ws.tree().card_counts(), vec![2, 1, 1]);
        // Nothing persisted until the first commit
        assert!(!ws.store().inner().contains(BOARD_KEY));
    }

    #[test]
    fn open_malformed_store_fails() {
        let mut inner = MemoryStore::new();
        inner.set(BOARD_KEY, "{oops").unwrap();
        let err = Workspace::open(ModelStore::new(inner)).unwrap_err();
        assert!(matches!(err, BoardError::Store(StoreError::Parse { .. })));
    }

    #[test]
    fn commit_persists_snapshot() {
        let mut ws = workspace();
        ws.tree_mut().columns[0].title = "Backlog".into();
        ws.commit().unwrap();
        assert_eq!(ws.board().columns[0].title, "Backlog");
        assert_eq!(stored(&ws), ws.board().clone());
    }

    #[test]
    fn repeated_commits_are_stable() {
        let mut ws = workspace();
        ws.commit().unwrap();
        let first = ws.board().clone();
        ws.commit().unwrap();
        assert_eq!(ws.board(), &first);
    }

    #[test]
    fn add_card_persists_and_blank_is_ignored() {
        let mut ws = workspace();
        assert!(ws.add_card("col-3", "Release 1.0").unwrap());
        assert_eq!(stored(&ws).columns[2].cards, vec!["Setup server", "Release 1.0"]);

        assert!(!ws.add_card("col-3", "   ").unwrap());
        assert_eq!(ws.board().columns[2].cards.len(), 2);
    }

    #[test]
    fn add_column_appends_with_palette_color() {
        let mut ws = workspace();
        let id = ws.add_column("  Review ").unwrap().unwrap();
        let column = ws.board().columns.last().unwrap();
        assert_eq!(column.id, id);
        assert_eq!(column.title, "Review");
        assert!(column.cards.is_empty());
        assert!(COLUMN_PALETTE.contains(&column.color.as_str()));

        let other = ws.add_column("Blocked").unwrap().unwrap();
        assert_ne!(id, other);
        assert_eq!(ws.add_column("").unwrap(), None);
        assert_eq!(ws.board().columns.len(), 5);
    }

    #[test]
    fn edit_commits_on_finish_only() {
        let mut ws = workspace();
        let card = ws.tree().columns[1].cards[0].id;
        ws.begin_edit(EditTarget::Card(card)).unwrap();
        ws.update_edit("Build signup page").unwrap();

        assert!(matches!(ws.commit(), Err(BoardError::GestureInProgress)));
        assert_eq!(ws.board().columns[1].cards, vec!["Build login page"]);

        ws.finish_edit().unwrap();
        assert_eq!(ws.board().columns[1].cards, vec!["Build signup page"]);
        assert_eq!(stored(&ws).columns[1].cards, vec!["Build signup page"]);
    }

    #[test]
    fn cancelled_edit_restores_text() {
        let mut ws = workspace();
        ws.begin_edit(EditTarget::ColumnTitle("col-1".into())).unwrap();
        ws.update_edit("Someday").unwrap();
        assert_eq!(ws.tree().columns[0].title, "Someday");
        ws.cancel_edit();
        assert_eq!(ws.tree().columns[0].title, "To Do");
        assert!(ws.editing().is_none());
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let mut ws = workspace();
        let pending = ws.request(ConfirmAction::DeleteColumn("col-1".into())).unwrap();
        assert!(!ws.resolve(pending, false).unwrap());
        assert_eq!(ws.board(), &default_board());
        assert_eq!(ws.tree().columns.len(), 3);
    }

    #[test]
    fn approved_delete_removes_column_and_cards() {
        let mut ws = workspace();
        let pending = ws.request(ConfirmAction::DeleteColumn("col-1".into())).unwrap();
        assert!(ws.resolve(pending, true).unwrap());

        let ids: Vec<&str> = ws.board().columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["col-2", "col-3"]);
        assert_eq!(ws.board().card_count(), 2);
        assert_eq!(stored(&ws), ws.board().clone());
    }

    #[test]
    fn approved_card_delete_removes_that_element_only() {
        let mut ws = workspace();
        ws.add_card("col-1", "Team meeting").unwrap();
        // Delete the second of the two identical cards
        let dup = ws.tree().columns[0].cards[1].id;
        let pending = ws.request(ConfirmAction::DeleteCard(dup)).unwrap();
        ws.resolve(pending, true).unwrap();
        assert_eq!(ws.board().columns[0].cards, vec!["Design UX/UI", "Team meeting"]);
    }

    #[test]
    fn reset_restores_seed_and_clears_store() {
        let mut ws = workspace();
        ws.add_column("Extra").unwrap();
        let pending = ws.request(ConfirmAction::ResetBoard).unwrap();
        ws.resolve(pending, true).unwrap();

        assert_eq!(ws.board(), &default_board());
        assert_eq!(ws.tree().columns.len(), 3);
        assert!(!ws.store().inner().contains(BOARD_KEY));
    }

    #[test]
    fn drag_commit_and_cancel() {
        let mut ws = workspace();
        layout(ws.tree_mut(), &LayoutMetrics::default(), |_| 3.0);
        let design = ws.tree().columns[0].cards[0].id;

        // Drag "Design UX/UI" to the bottom of "Done" (column x 50..74)
        ws.begin_drag(design).unwrap();
        assert!(matches!(ws.add_card("col-1", "x"), Err(BoardError::GestureInProgress)));
        assert!(ws.drag_moved(55.0, 30.0));
        assert!(ws.tree().card(design).unwrap().dragging);
        assert_eq!(ws.board(), &default_board());

        ws.end_drag().unwrap();
        assert_eq!(ws.board().columns[0].cards, vec!["Team meeting"]);
        assert_eq!(ws.board().columns[2].cards, vec!["Setup server", "Design UX/UI"]);
        assert!(!ws.tree().has_transient_state());

        // Now drag it back, but cancel
        ws.begin_drag(design).unwrap();
        ws.drag_moved(5.0, 2.0);
        assert!(ws.cancel_drag());
        assert!(!ws.tree().has_transient_state());
        assert_eq!(ws.tree().columns[2].cards[1].id, design);
        assert_eq!(stored(&ws).columns[2].cards, vec!["Setup server", "Design UX/UI"]);
    }

    #[test]
    fn drag_outside_containers_keeps_position() {
        let mut ws = workspace();
        layout(ws.tree_mut(), &LayoutMetrics::default(), |_| 3.0);
        let login = ws.tree().columns[1].cards[0].id;
        ws.begin_drag(login).unwrap();
        // Above every list (header row)
        assert!(!ws.drag_moved(30.0, 0.0));
        ws.end_drag().unwrap();
        assert_eq!(ws.board(), &default_board());
    }

    #[test]
    fn cannot_edit_during_drag() {
        let mut ws = workspace();
        let card = ws.tree().columns[0].cards[0].id;
        ws.begin_drag(card).unwrap();
        assert!(matches!(
            ws.begin_edit(EditTarget::Card(card)),
            Err(BoardError::GestureInProgress)
        ));
    }

    #[test]
    fn theme_round_trips_through_store() {
        let mut ws = workspace();
        assert_eq!(ws.load_theme().unwrap(), None);
        ws.save_theme(ThemePreference::Light).unwrap();
        assert_eq!(ws.load_theme().unwrap(), Some(ThemePreference::Light));
    }
}
