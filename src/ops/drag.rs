use crate::visual::{ElementId, VisualTree, resolve_insertion_point};

use super::BoardError;

/// Where a card sat when its drag began
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOrigin {
    pub column_id: String,
    pub index: usize,
}

/// Lifecycle of one drag gesture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Active {
        card: ElementId,
        origin: DragOrigin,
        /// Whether the "being dragged" marker has been applied yet
        in_flight: bool,
    },
    Committed {
        card: ElementId,
    },
    Aborted {
        card: ElementId,
    },
}

/// Tracks the card currently being relocated.
///
/// While active, only the visual tree is touched. Persisting the result is
/// the caller's job once `end` reports a commit.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active { .. })
    }

    /// The card being dragged, while active
    pub fn dragged(&self) -> Option<ElementId> {
        match self.state {
            DragState::Active { card, .. } => Some(card),
            _ => None,
        }
    }

    /// Start dragging `card`. The drag marker is not applied
    /// yet; see [`DragSession::mark_in_flight`].
    pub fn begin(&mut self, tree: &VisualTree, card: ElementId) -> Result<(), BoardError> {
        if self.is_active() {
            return Err(BoardError::DragAlreadyActive);
        }
        let (column_idx, index) = tree.locate(card).ok_or(BoardError::UnknownCard(card))?;
        let origin = DragOrigin {
            column_id: tree.columns[column_idx].id.clone(),
            index,
        };
        tracing::debug!(%card, column = %origin.column_id, index, "drag started");
        self.state = DragState::Active {
            card,
            origin,
            in_flight: false,
        };
        Ok(())
    }

    /// Apply the "being dragged" marker once the gesture has visibly begun.
    /// Idempotent.
    pub fn mark_in_flight(&mut self, tree: &mut VisualTree) {
        if let DragState::Active {
            card, in_flight, ..
        } = &mut self.state
            && !*in_flight
        {
            if let Some(element) = tree.card_mut(*card) {
                element.dragging = true;
            }
            *in_flight = true;
        }
    }

    /// Pointer moved over the card list of column `column_idx`.
    ///
    /// Relocates the dragged card in the visual tree: before the sibling the
    /// geometry resolver picks, or at the end of the list. Returns whether
    /// the tree changed.
    pub fn drag_over(&mut self, tree: &mut VisualTree, column_idx: usize, pointer_y: f64) -> bool {
        let card = match self.dragged() {
            Some(card) => card,
            None => return false,
        };
        let siblings = tree.siblings(column_idx, card);
        let before = resolve_insertion_point(&siblings, pointer_y);

        if tree.locate(card) == Self::target_slot(tree, column_idx, before) {
            return false;
        }
        let moved = tree.move_card_before(card, column_idx, before);
        if moved {
            tracing::trace!(%card, column_idx, ?before, "drag relocated card");
        }
        moved
    }

    /// Slot `card` would occupy after a move, used to skip no-op moves.
    fn target_slot(
        tree: &VisualTree,
        column_idx: usize,
        before: Option<ElementId>,
    ) -> Option<(usize, usize)> {
        let cards = &tree.columns.get(column_idx)?.cards;
        match before {
            Some(target) => {
                let pos = cards.iter().position(|c| c.id == target)?;
                // Already directly in front of the target
                pos.checked_sub(1).map(|p| (column_idx, p))
            }
            None => cards.len().checked_sub(1).map(|p| (column_idx, p)),
        }
    }

    /// Gesture released: clear the marker and report the committed card.
    /// Every release commits, including a drop back where it started.
    pub fn end(&mut self, tree: &mut VisualTree) -> Option<ElementId> {
        let card = self.dragged()?;
        if let Some(element) = tree.card_mut(card) {
            element.dragging = false;
        }
        tracing::debug!(%card, "drag committed");
        self.state = DragState::Committed { card };
        Some(card)
    }

    /// Gesture cancelled: put the card back where it was and clear the
    /// marker. Nothing should be persisted afterwards.
    pub fn cancel(&mut self, tree: &mut VisualTree) -> Option<ElementId> {
        let (card, origin) = match &self.state {
            DragState::Active { card, origin, .. } => (*card, origin.clone()),
            _ => return None,
        };
        if let Some(mut element) = tree.remove_card(card) {
            element.dragging = false;
            match tree.column_index(&origin.column_id) {
                Some(ci) => tree.insert_card(ci, origin.index, element),
                None => tracing::warn!(%card, "origin column vanished during drag"),
            }
        }
        tracing::debug!(%card, "drag aborted");
        self.state = DragState::Aborted { card };
        Some(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_board;
    use crate::visual::{LayoutMetrics, layout};

    fn laid_out_tree() -> VisualTree {
        let mut tree = VisualTree::render(&default_board());
        layout(&mut tree, &LayoutMetrics::default(), |_| 3.0);
        tree
    }

    fn texts(tree: &VisualTree, column_idx: usize) -> Vec<&str> {
        tree.columns[column_idx]
            .cards
            .iter()
            .map(|c| c.text.as_str())
            .collect()
    }

    #[test]
    fn begin_does_not_mark_until_in_flight() {
        let mut tree = laid_out_tree();
        let card = tree.columns[0].cards[0].id;
        let mut drag = DragSession::new();

        drag.begin(&tree, card).unwrap();
        assert!(drag.is_active());
        assert!(!tree.card(card).unwrap().dragging);

        drag.mark_in_flight(&mut tree);
        assert!(tree.card(card).unwrap().dragging);
        drag.mark_in_flight(&mut tree);
        assert!(tree.card(card).unwrap().dragging);
    }

    #[test]
    fn second_begin_is_rejected() {
        let tree = laid_out_tree();
        let a = tree.columns[0].cards[0].id;
        let b = tree.columns[1].cards[0].id;
        let mut drag = DragSession::new();
        drag.begin(&tree, a).unwrap();
        assert!(matches!(drag.begin(&tree, b), Err(BoardError::DragAlreadyActive)));
        assert_eq!(drag.dragged(), Some(a));
    }

    #[test]
    fn begin_unknown_card_fails() {
        let tree = laid_out_tree();
        let mut other = VisualTree::default();
        let col = other.push_column("x", "X", "#ef4444");
        // Ids are per tree; outrun the four cards of the seeded tree
        let stray = (0..10).map(|i| other.append_card(col, &i.to_string())).last().unwrap();
        let mut drag = DragSession::new();
        assert!(matches!(drag.begin(&tree, stray), Err(BoardError::UnknownCard(_))));
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn drag_over_reorders_within_column() {
        let mut tree = laid_out_tree();
        // Cards in column 0 at y 2..5 and 5..8
        let design = tree.columns[0].cards[0].id;
        let mut drag = DragSession::new();
        drag.begin(&tree, design).unwrap();
        drag.mark_in_flight(&mut tree);

        // Below the second card's midpoint (6.5): append
        assert!(drag.drag_over(&mut tree, 0, 7.0));
        assert_eq!(texts(&tree, 0), vec!["Team meeting", "Design UX/UI"]);

        // Same pointer again: nothing to do
        assert!(!drag.drag_over(&mut tree, 0, 7.0));
    }

    #[test]
    fn drag_over_moves_into_other_column() {
        let mut tree = laid_out_tree();
        let meeting = tree.columns[0].cards[1].id;
        let mut drag = DragSession::new();
        drag.begin(&tree, meeting).unwrap();

        // Above "Build login page" midpoint (3.5)
        assert!(drag.drag_over(&mut tree, 1, 2.0));
        assert_eq!(texts(&tree, 0), vec!["Design UX/UI"]);
        assert_eq!(texts(&tree, 1), vec!["Team meeting", "Build login page"]);
    }

    #[test]
    fn drag_over_when_idle_is_noop() {
        let mut tree = laid_out_tree();
        let mut drag = DragSession::new();
        assert!(!drag.drag_over(&mut tree, 0, 0.0));
        assert_eq!(texts(&tree, 0), vec!["Design UX/UI", "Team meeting"]);
    }

    #[test]
    fn end_clears_marker_and_commits() {
        let mut tree = laid_out_tree();
        let card = tree.columns[2].cards[0].id;
        let mut drag = DragSession::new();
        drag.begin(&tree, card).unwrap();
        drag.mark_in_flight(&mut tree);

        assert_eq!(drag.end(&mut tree), Some(card));
        assert_eq!(drag.state(), &DragState::Committed { card });
        assert!(!tree.card(card).unwrap().dragging);
        // Ending again does nothing
        assert_eq!(drag.end(&mut tree), None);
    }

    #[test]
    fn cancel_restores_origin() {
        let mut tree = laid_out_tree();
        let design = tree.columns[0].cards[0].id;
        let mut drag = DragSession::new();
        drag.begin(&tree, design).unwrap();
        drag.mark_in_flight(&mut tree);
        drag.drag_over(&mut tree, 2, 100.0);
        assert_eq!(texts(&tree, 2), vec!["Setup server", "Design UX/UI"]);

        assert_eq!(drag.cancel(&mut tree), Some(design));
        assert_eq!(drag.state(), &DragState::Aborted { card: design });
        assert_eq!(texts(&tree, 0), vec!["Design UX/UI", "Team meeting"]);
        assert_eq!(texts(&tree, 2), vec!["Setup server"]);
        assert!(!tree.card(design).unwrap().dragging);
    }

    #[test]
    fn a_new_drag_can_follow_a_finished_one() {
        let mut tree = laid_out_tree();
        let a = tree.columns[0].cards[0].id;
        let mut drag = DragSession::new();
        drag.begin(&tree, a).unwrap();
        drag.end(&mut tree);
        drag.begin(&tree, a).unwrap();
        assert!(drag.is_active());
    }
}
