//! Insertion-point resolution from pointer geometry.
//!
//! During a drag the dragged card is placed in front of the nearest sibling
//! whose vertical midpoint lies below the pointer. If the pointer is below
//! every sibling's midpoint the card goes to the end of the list.

use super::tree::{Bounds, ElementId};

/// A candidate anchor: a card under the same container as the dragged one,
/// never the dragged card itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sibling {
    pub id: ElementId,
    pub bounds: Bounds,
}

/// Return the sibling the dragged item should be inserted before, or `None`
/// for "append at the end".
///
/// Among candidates whose midpoint is strictly below `pointer_y` (negative
/// offset), picks the one with the offset closest to zero. Ties keep the
/// earliest candidate. Runs in O(n) and keeps no state between calls, since
/// layout may shift from one pointer move to the next.
pub fn resolve_insertion_point(candidates: &[Sibling], pointer_y: f64) -> Option<ElementId> {
    let mut closest: Option<(f64, ElementId)> = None;
    for sibling in candidates {
        let offset = pointer_y - sibling.bounds.mid_y();
        if offset < 0.0 && closest.is_none_or(|(best, _)| offset > best) {
            closest = Some((offset, sibling.id));
        }
    }
    closest.map(|(_, id)| id)
}
