use super::tree::{Bounds, CardElement, VisualTree};

/// Sizes used to lay columns out side by side and stack their cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub origin_x: f64,
    pub origin_y: f64,
    pub column_width: f64,
    pub column_gap: f64,
    /// Full height available to a column
    pub column_height: f64,
    /// Rows above the card list (title, count, delete control)
    pub header_height: f64,
    /// Rows below the card list (add-card affordance)
    pub footer_height: f64,
    pub card_gap: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        LayoutMetrics {
            origin_x: 0.0,
            origin_y: 0.0,
            column_width: 24.0,
            column_gap: 1.0,
            column_height: 40.0,
            header_height: 2.0,
            footer_height: 1.0,
            card_gap: 0.0,
        }
    }
}

/// Assign bounds to every column, card-list container and card.
///
/// Columns are placed left to right; cards are stacked top to bottom inside
/// their column's list area using `card_height` to size each one. Cards that
/// overflow the list keep their computed (off-list) position.
pub fn layout<F>(tree: &mut VisualTree, metrics: &LayoutMetrics, card_height: F)
where
    F: Fn(&CardElement) -> f64,
{
    for (i, column) in tree.columns.iter_mut().enumerate() {
        let x = metrics.origin_x + i as f64 * (metrics.column_width + metrics.column_gap);
        column.bounds = Bounds::new(
            x,
            metrics.origin_y,
            metrics.column_width,
            metrics.column_height,
        );
        let list_top = metrics.origin_y + metrics.header_height;
        let list_height =
            (metrics.column_height - metrics.header_height - metrics.footer_height).max(0.0);
        column.list_bounds = Bounds::new(x, list_top, metrics.column_width, list_height);

        let mut y = list_top;
        for card in column.cards.iter_mut() {
            let h = card_height(card);
            card.bounds = Bounds::new(x, y, metrics.column_width, h);
            y += h + metrics.card_gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_board;

    #[test]
    fn columns_sit_side_by_side() {
        let mut tree = VisualTree::render(&default_board());
        let metrics = LayoutMetrics::default();
        layout(&mut tree, &metrics, |_| 3.0);

        assert_eq!(tree.columns[0].bounds.x, 0.0);
        assert_eq!(tree.columns[1].bounds.x, 25.0);
        assert_eq!(tree.columns[2].bounds.x, 50.0);
        assert_eq!(tree.columns[1].list_bounds, Bounds::new(25.0, 2.0, 24.0, 37.0));
    }

    #[test]
    fn cards_stack_by_height() {
        let mut tree = VisualTree::render(&default_board());
        let metrics = LayoutMetrics {
            card_gap: 1.0,
            ..Default::default()
        };
        layout(&mut tree, &metrics, |c| if c.text.len() > 10 { 4.0 } else { 3.0 });

        let first = tree.columns[0].cards[0].bounds;
        let second = tree.columns[0].cards[1].bounds;
        // "Design UX/UI" is 12 chars
        assert_eq!(first, Bounds::new(0.0, 2.0, 24.0, 4.0));
        assert_eq!(second.y, 7.0);
        assert_eq!(second.height, 4.0);
    }
}
