use std::fmt;

use crate::model::Board;

use super::geometry::Sibling;

/// Synthetic identity of a rendered card element.
///
/// Assigned when the element is created and never persisted, so two cards
/// with identical text can still be told apart while they are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// On-screen bounding box of an element
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Bounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Vertical midpoint
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A rendered card
#[derive(Debug, Clone, PartialEq)]
pub struct CardElement {
    pub id: ElementId,
    /// Live text content; edits are written here as they happen
    pub text: String,
    pub bounds: Bounds,
    /// Set once a drag of this card is visibly under way
    pub dragging: bool,
    /// Set while the text is being edited in place
    pub editing: bool,
}

impl CardElement {
    /// The delete affordance is hidden while editing
    pub fn shows_delete(&self) -> bool {
        !self.editing
    }
}

/// A rendered column: header, card list container, add-card affordance
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnElement {
    pub id: String,
    /// Live title text
    pub title: String,
    /// Color attribute copied from the model at render time
    pub color: String,
    pub cards: Vec<CardElement>,
    /// Whole column area
    pub bounds: Bounds,
    /// The card list container (the drop target)
    pub list_bounds: Bounds,
    pub editing_title: bool,
}

/// The rendered board: columns in display order, each holding its card
/// elements in display order.
///
/// This is what the user sees and what a drag rearranges. The canonical
/// [`Board`] is rebuilt from it on commit.
#[derive(Debug, Clone, Default)]
pub struct VisualTree {
    pub columns: Vec<ColumnElement>,
    next_id: u64,
}

impl VisualTree {
    /// Build a fresh tree for `board`. All bounds start zeroed until a
    /// layout pass fills them in.
    pub fn render(board: &Board) -> Self {
        let mut tree = VisualTree::default();
        for column in &board.columns {
            let idx = tree.push_column(&column.id, &column.title, &column.color);
            for text in &column.cards {
                tree.append_card(idx, text);
            }
        }
        tree
    }

    /// Append an empty column element and return its index.
    pub fn push_column(&mut self, id: &str, title: &str, color: &str) -> usize {
        self.columns.push(ColumnElement {
            id: id.to_string(),
            title: title.to_string(),
            color: color.to_string(),
            cards: Vec::new(),
            bounds: Bounds::default(),
            list_bounds: Bounds::default(),
            editing_title: false,
        });
        self.columns.len() - 1
    }

    /// Create a card element at the end of column `column_idx`.
    /// Panics if the index is out of range.
    pub fn append_card(&mut self, column_idx: usize, text: &str) -> ElementId {
        let id = self.allocate_id();
        self.columns[column_idx].cards.push(CardElement {
            id,
            text: text.to_string(),
            bounds: Bounds::default(),
            dragging: false,
            editing: false,
        });
        id
    }

    fn allocate_id(&mut self) -> ElementId {
        self.next_id += 1;
        ElementId(self.next_id)
    }

    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn column(&self, id: &str) -> Option<&ColumnElement> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn column_mut(&mut self, id: &str) -> Option<&mut ColumnElement> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    pub fn remove_column(&mut self, id: &str) -> Option<ColumnElement> {
        let idx = self.column_index(id)?;
        Some(self.columns.remove(idx))
    }

    /// (column index, card index) of a card element
    pub fn locate(&self, card: ElementId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, col)| {
            col.cards
                .iter()
                .position(|c| c.id == card)
                .map(|pos| (ci, pos))
        })
    }

    pub fn card(&self, card: ElementId) -> Option<&CardElement> {
        let (ci, pos) = self.locate(card)?;
        Some(&self.columns[ci].cards[pos])
    }

    pub fn card_mut(&mut self, card: ElementId) -> Option<&mut CardElement> {
        let (ci, pos) = self.locate(card)?;
        Some(&mut self.columns[ci].cards[pos])
    }

    pub fn remove_card(&mut self, card: ElementId) -> Option<CardElement> {
        let (ci, pos) = self.locate(card)?;
        Some(self.columns[ci].cards.remove(pos))
    }

    /// Put `element` at `index` in column `column_idx`, clamping to the end.
    pub fn insert_card(&mut self, column_idx: usize, index: usize, element: CardElement) {
        let cards = &mut self.columns[column_idx].cards;
        let index = index.min(cards.len());
        cards.insert(index, element);
    }

    /// Move `card` so it sits immediately before `before` in column
    /// `column_idx`, or at the end of that column when `before` is `None`.
    ///
    /// Returns false (and leaves the tree untouched) if either element is
    /// unknown or `before` is not a child of the target column.
    pub fn move_card_before(
        &mut self,
        card: ElementId,
        column_idx: usize,
        before: Option<ElementId>,
    ) -> bool {
        if column_idx >= self.columns.len() || before == Some(card) {
            return false;
        }
        if let Some(target) = before
            && !self.columns[column_idx].cards.iter().any(|c| c.id == target)
        {
            return false;
        }
        let element = match self.remove_card(card) {
            Some(e) => e,
            None => return false,
        };
        let cards = &mut self.columns[column_idx].cards;
        let index = match before {
            Some(target) => cards
                .iter()
                .position(|c| c.id == target)
                .unwrap_or(cards.len()),
            None => cards.len(),
        };
        cards.insert(index, element);
        true
    }

    /// Card children of a container that can serve as insertion anchors:
    /// everything except `dragged` and anything carrying the drag marker.
    pub fn siblings(&self, column_idx: usize, dragged: ElementId) -> Vec<Sibling> {
        self.columns
            .get(column_idx)
            .map(|col| {
                col.cards
                    .iter()
                    .filter(|c| c.id != dragged && !c.dragging)
                    .map(|c| Sibling {
                        id: c.id,
                        bounds: c.bounds,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Index of the card-list container under the pointer, if any
    pub fn container_at(&self, x: f64, y: f64) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.list_bounds.contains(x, y))
    }

    /// Card element under the pointer, if any
    pub fn card_at(&self, x: f64, y: f64) -> Option<ElementId> {
        self.columns
            .iter()
            .flat_map(|col| col.cards.iter())
            .find(|c| c.bounds.contains(x, y))
            .map(|c| c.id)
    }

    /// Card counts per column, in display order
    pub fn card_counts(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.cards.len()).collect()
    }

    /// Whether any element carries a drag marker or is being edited
    pub fn has_transient_state(&self) -> bool {
        self.columns.iter().any(|col| {
            col.editing_title || col.cards.iter().any(|c| c.dragging || c.editing)
        })
    }
}
