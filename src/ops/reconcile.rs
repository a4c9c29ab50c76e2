use crate::model::{Board, Column};
use crate::visual::VisualTree;

/// Capture the visual arrangement as a new canonical [`Board`].
///
/// Columns and cards are read in display order. Card text is trimmed; the
/// delete control and drag marker live outside `text`, so they never leak
/// into the captured value. The result replaces the previous board
/// wholesale.
pub fn snapshot(tree: &VisualTree) -> Board {
    let columns = tree
        .columns
        .iter()
        .map(|col| Column {
            id: col.id.clone(),
            title: col.title.clone(),
            color: col.color.clone(),
            cards: col
                .cards
                .iter()
                .map(|card| card.text.trim().to_string())
                .collect(),
        })
        .collect();
    Board::new(columns)
}
