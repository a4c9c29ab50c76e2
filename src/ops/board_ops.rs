use rand::Rng;

use crate::model::COLUMN_PALETTE;
use crate::visual::{CardElement, ColumnElement, ElementId, VisualTree};

use super::BoardError;

/// Pick a random palette color for a new column.
pub fn pick_color<R: Rng>(rng: &mut R) -> &'static str {
    COLUMN_PALETTE[rng.random_range(0..COLUMN_PALETTE.len())]
}

/// Hands out `col-<millis>` ids that never repeat within a process, even
/// when two columns are created in the same millisecond or the clock steps
/// backwards.
#[derive(Debug, Clone, Default)]
pub struct ColumnIdGenerator {
    last_token: i64,
}

impl ColumnIdGenerator {
    pub fn next_id(&mut self, now_millis: i64, tree: &VisualTree) -> String {
        let mut token = now_millis.max(self.last_token + 1);
        while tree.column(&column_id(token)).is_some() {
            token += 1;
        }
        self.last_token = token;
        column_id(token)
    }
}

fn column_id(token: i64) -> String {
    format!("col-{}", token)
}

/// Append a card to the end of a column. Blank text is ignored and yields
/// `Ok(None)`.
pub fn add_card(
    tree: &mut VisualTree,
    column_id: &str,
    text: &str,
) -> Result<Option<ElementId>, BoardError> {
    let idx = tree
        .column_index(column_id)
        .ok_or_else(|| BoardError::UnknownColumn(column_id.to_string()))?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(tree.append_card(idx, text)))
}

/// Append a new, empty column. Blank titles are ignored.
pub fn add_column(
    tree: &mut VisualTree,
    ids: &mut ColumnIdGenerator,
    now_millis: i64,
    title: &str,
    color: &str,
) -> Option<String> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let id = ids.next_id(now_millis, tree);
    tree.push_column(&id, title, color);
    Some(id)
}

pub fn delete_card(tree: &mut VisualTree, card: ElementId) -> Result<CardElement, BoardError> {
    tree.remove_card(card).ok_or(BoardError::UnknownCard(card))
}

/// Remove a column together with all of its cards.
pub fn delete_column(tree: &mut VisualTree, id: &str) -> Result<ColumnElement, BoardError> {
    tree.remove_column(id)
        .ok_or_else(|| BoardError::UnknownColumn(id.to_string()))
}

// ---------------------------------------------------------------------------
// In-place editing
// ---------------------------------------------------------------------------

/// What is being edited in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Card(ElementId),
    ColumnTitle(String),
}

/// An open in-place edit, remembering the text it started from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target: EditTarget,
    pub original: String,
}

/// Flag the target as being edited and capture its current text.
pub fn begin_edit(tree: &mut VisualTree, target: EditTarget) -> Result<EditSession, BoardError> {
    let original = match &target {
        EditTarget::Card(card) => {
            let element = tree.card_mut(*card).ok_or(BoardError::UnknownCard(*card))?;
            element.editing = true;
            element.text.clone()
        }
        EditTarget::ColumnTitle(id) => {
            let column = tree
                .column_mut(id)
                .ok_or_else(|| BoardError::UnknownColumn(id.clone()))?;
            column.editing_title = true;
            column.title.clone()
        }
    };
    Ok(EditSession { target, original })
}

/// Write live text into the element being edited.
pub fn apply_edit(tree: &mut VisualTree, edit: &EditSession, text: &str) -> Result<(), BoardError> {
    match &edit.target {
        EditTarget::Card(card) => {
            tree.card_mut(*card)
                .ok_or(BoardError::UnknownCard(*card))?
                .text = text.to_string();
        }
        EditTarget::ColumnTitle(id) => {
            tree.column_mut(id)
                .ok_or_else(|| BoardError::UnknownColumn(id.clone()))?
                .title = text.to_string();
        }
    }
    Ok(())
}

/// Clear the editing flag, keeping whatever text is live.
pub fn end_edit(tree: &mut VisualTree, edit: &EditSession) {
    match &edit.target {
        EditTarget::Card(card) => {
            if let Some(element) = tree.card_mut(*card) {
                element.editing = false;
            }
        }
        EditTarget::ColumnTitle(id) => {
            if let Some(column) = tree.column_mut(id) {
                column.editing_title = false;
            }
        }
    }
}

/// Put the original text back and clear the editing flag.
pub fn revert_edit(tree: &mut VisualTree, edit: &EditSession) {
    // The target may have disappeared; nothing to restore then
    let _ = apply_edit(tree, edit, &edit.original);
    end_edit(tree, edit);
}

// ---------------------------------------------------------------------------
// Confirmation gate
// ---------------------------------------------------------------------------

/// A destructive action that needs the user's go-ahead
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteCard(ElementId),
    DeleteColumn(String),
    ResetBoard,
}

/// An action waiting for a yes/no answer, with the question to ask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    pub action: ConfirmAction,
    pub prompt: String,
}

/// Build the question to put to the user for `action`.
pub fn confirm_prompt(tree: &VisualTree, action: &ConfirmAction) -> Result<String, BoardError> {
    match action {
        ConfirmAction::DeleteCard(card) => {
            tree.card(*card).ok_or(BoardError::UnknownCard(*card))?;
            Ok("Delete this card?".to_string())
        }
        ConfirmAction::DeleteColumn(id) => {
            let column = tree
                .column(id)
                .ok_or_else(|| BoardError::UnknownColumn(id.clone()))?;
            let count = column.cards.len();
            if count == 0 {
                Ok(format!("Delete column \"{}\"?", column.title))
            } else {
                Ok(format!(
                    "\"{}\" has {} card{}. Delete the column and all of them?",
                    column.title,
                    count,
                    if count == 1 { "" } else { "s" },
                ))
            }
        }
        ConfirmAction::ResetBoard => {
            Ok("Reset to the default board? All columns and cards will be lost.".to_string())
        }
    }
}
