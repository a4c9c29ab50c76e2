use serde::{Deserialize, Serialize};

/// Colors a new column can be assigned. Stored verbatim in the board file.
pub const COLUMN_PALETTE: [&str; 6] = [
    "#ef4444", // red
    "#f59e0b", // amber
    "#10b981", // emerald
    "#3b82f6", // blue
    "#8b5cf6", // violet
    "#ec4899", // pink
];

/// A card is nothing more than its text. Position is implied by where it
/// sits in its column's `cards` vector.
pub type Card = String;

/// A named, colored lane of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Opaque id, assigned at creation and never changed
    pub id: String,
    pub title: String,
    /// One of `COLUMN_PALETTE`
    pub color: String,
    /// Cards in top-to-bottom order
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>, color: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            title: title.into(),
            color: color.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards<I, S>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cards = cards.into_iter().map(Into::into).collect();
        self
    }
}

/// The whole persisted board: columns in display order.
///
/// Serializes as a bare JSON array of column records so the stored shape is
/// `[{"id": .., "title": .., "color": .., "cards": [..]}, ..]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        Board { columns }
    }

    /// Total number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}

/// The board every first run (and every reset) starts from.
///
/// Returns a fresh value each call, so mutating one seed never leaks into
/// the next.
pub fn default_board() -> Board {
    Board::new(vec![
        Column::new("col-1", "To Do", COLUMN_PALETTE[0])
            .with_cards(["Design UX/UI", "Team meeting"]),
        Column::new("col-2", "In Progress", COLUMN_PALETTE[1]).with_cards(["Build login page"]),
        Column::new("col-3", "Done", COLUMN_PALETTE[2]).with_cards(["Setup server"]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_has_three_seeded_columns() {
        let board = default_board();
        let titles: Vec<&str> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        let counts: Vec<usize> = board.columns.iter().map(|c| c.cards.len()).collect();
        assert_eq!(counts, vec![2, 1, 1]);
        assert_eq!(board.card_count(), 4);
    }

    #[test]
    fn default_board_is_a_fresh_copy() {
        let mut first = default_board();
        first.columns[0].cards.clear();
        first.columns[1].title = "Doing".into();

        let second = default_board();
        assert_eq!(second.columns[0].cards.len(), 2);
        assert_eq!(second.columns[1].title, "In Progress");
    }

    #[test]
    fn seeded_colors_come_from_palette() {
        for column in default_board().columns {
            assert!(COLUMN_PALETTE.contains(&column.color.as_str()));
        }
    }

    #[test]
    fn board_serializes_as_bare_array() {
        let board = Board::new(vec![Column::new("col-9", "Ideas", "#3b82f6").with_cards(["a"])]);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(
            json,
            r##"[{"id":"col-9","title":"Ideas","color":"#3b82f6","cards":["a"]}]"##
        );
    }
}
